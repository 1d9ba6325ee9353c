//! # Trajectory Writer
//!
//! Walks the segments of an augmented path, interpolates each axis and writes
//! one setpoint row per sample.
//!
//! The destination is opened once per plan (created or truncated), every
//! segment is written through a single buffered handle, and the file is
//! flushed and closed at the end.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, error, info};

use super::linspace::samples;
use super::preprocess::AugmentedPath;
use super::record::TrajectoryRecord;
use super::segment::{Segment, StepSize};
use crate::error::{PathGenError, Result};

/// Counters describing one written trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Segments walked, including skipped ones
    pub segments: usize,
    /// Segments whose endpoints coincide (no rows)
    pub skipped_segments: usize,
    /// Rows written
    pub rows: usize,
}

/// Serializes augmented paths into trajectory rows at a fixed step size
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryWriter {
    step: StepSize,
}

impl TrajectoryWriter {
    /// Create a writer for the given maximum per-axis step
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` if `step` is not finite and strictly positive
    pub fn new(step: f64) -> Result<Self> {
        Ok(Self {
            step: StepSize::new(step)?,
        })
    }

    pub fn step(&self) -> StepSize {
        self.step
    }

    /// Total rows `path` will produce
    ///
    /// # Errors
    ///
    /// Returns `NonFinite` or `SegmentTooLong` for the first segment that
    /// cannot be interpolated
    pub fn row_count(&self, path: &AugmentedPath) -> Result<usize> {
        path.segments().map(|s| s.step_count(self.step)).sum()
    }

    /// Write the rows of one segment, returning how many were written
    ///
    /// A segment with coincident endpoints writes nothing.
    pub fn write_segment<W: Write>(&self, segment: Segment, out: &mut W) -> Result<usize> {
        let n = segment.step_count(self.step)?;
        if n == 0 {
            debug!("Skipping zero-length segment at {:?}", segment.start);
            return Ok(0);
        }

        let (start, goal) = (segment.start, segment.goal);
        let rows = samples(start.x, goal.x, n)
            .zip(samples(start.y, goal.y, n))
            .zip(samples(start.z, goal.z, n));

        for ((x, y), z) in rows {
            writeln!(out, "{}", TrajectoryRecord::new(x, y, z))?;
        }

        debug!("Wrote {} rows for segment {:?} -> {:?}", n, start, goal);
        Ok(n)
    }

    /// Write every segment of `path`, in traversal order, to `out`
    ///
    /// Every segment is checked before the first row is written, so an
    /// unusable path leaves `out` untouched.
    ///
    /// # Errors
    ///
    /// Returns the `row_count` error for an unusable path, `Io` if `out` fails
    pub fn write<W: Write>(&self, path: &AugmentedPath, out: &mut W) -> Result<WriteSummary> {
        self.row_count(path)?;

        let mut summary = WriteSummary::default();
        for segment in path.segments() {
            let rows = self.write_segment(segment, out)?;
            summary.segments += 1;
            summary.rows += rows;
            if rows == 0 {
                summary.skipped_segments += 1;
            }
        }

        Ok(summary)
    }

    /// Create (or truncate) `destination` and write the whole trajectory to it
    ///
    /// The destination is not opened when the path cannot be interpolated.
    ///
    /// # Errors
    ///
    /// Returns the `row_count` error for an unusable path, and `FileWrite` if
    /// the file cannot be created or a write fails. Rows already flushed before
    /// a failing write stay in the file.
    pub fn write_to_file(&self, path: &AugmentedPath, destination: &Path) -> Result<WriteSummary> {
        let rows = self.row_count(path)?;

        let to_error = |source: io::Error| {
            error!("Failed to write trajectory file {}: {}", destination.display(), source);
            PathGenError::FileWrite {
                path: destination.to_path_buf(),
                source,
            }
        };

        let file = File::create(destination).map_err(to_error)?;
        let mut out = BufWriter::new(file);
        let summary = self.write(path, &mut out).map_err(|e| match e {
            PathGenError::Io(source) => to_error(source),
            other => other,
        })?;
        out.flush().map_err(to_error)?;
        debug_assert_eq!(summary.rows, rows);

        info!(
            "Wrote {} rows ({} segments, {} skipped) to {}",
            summary.rows,
            summary.segments,
            summary.skipped_segments,
            destination.display()
        );
        Ok(summary)
    }
}
