//! # Trajectory Record Format
//!
//! One setpoint row per interpolated sample: the commanded position followed by
//! a static attitude/gain profile expected by the downstream tracker.
//!
//! ## Row Layout
//!
//! | Fields | Content | Value |
//! |--------|---------|-------|
//! | 1-3 | Position x, y, z | varies |
//! | 4-7 | Orientation quaternion (w, x, y, z) | 1, 0, 0, 0 |
//! | 8-14 | Reserved | 0 |
//! | 15-18 | Tracker gains | 15.7777 |
//!
//! Every field is fixed-point with 4 fractional digits, separated by single
//! spaces. Rows are newline-terminated and the file has no header.

use std::fmt;

use super::waypoint::Waypoint;

/// Fractional digits of every rendered field
pub const RECORD_PRECISION: usize = 4;

/// Identity attitude (w, x, y, z)
pub const ORIENTATION: [f64; 4] = [1.0, 0.0, 0.0, 0.0];

/// Reserved fields, always zero
pub const ZERO_FIELDS: [f64; 7] = [0.0; 7];

/// Default tracker gain profile
pub const GAINS: [f64; 4] = [15.7777; 4];

/// Total number of fields in one row
pub const RECORD_FIELD_COUNT: usize = 3 + ORIENTATION.len() + ZERO_FIELDS.len() + GAINS.len();

/// Rendered form of the constant fields that follow the position
pub const RECORD_SUFFIX: &str =
    "1.0000 0.0000 0.0000 0.0000 0.0000 0.0000 0.0000 0.0000 0.0000 0.0000 0.0000 15.7777 15.7777 15.7777 15.7777";

/// One setpoint row of the trajectory file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRecord {
    pub position: Waypoint,
}

impl TrajectoryRecord {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Waypoint::new(x, y, z),
        }
    }
}

impl fmt::Display for TrajectoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        write!(
            f,
            "{:.*} {:.*} {:.*}",
            RECORD_PRECISION, p.x, RECORD_PRECISION, p.y, RECORD_PRECISION, p.z
        )?;

        for value in ORIENTATION.iter().chain(ZERO_FIELDS.iter()).chain(GAINS.iter()) {
            write!(f, " {:.*}", RECORD_PRECISION, value)?;
        }

        Ok(())
    }
}

/// Render one sample as a trajectory row (without the line terminator)
///
/// # Examples
///
/// ```
/// use path_gen::trajectory::record::{format_record, RECORD_SUFFIX};
///
/// let row = format_record(1.0, -0.5, 0.3);
/// assert_eq!(row, format!("1.0000 -0.5000 0.3000 {}", RECORD_SUFFIX));
/// ```
pub fn format_record(x: f64, y: f64, z: f64) -> String {
    TrajectoryRecord::new(x, y, z).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count() {
        assert_eq!(RECORD_FIELD_COUNT, 18);
        let row = format_record(0.0, 0.0, 0.0);
        assert_eq!(row.split(' ').count(), RECORD_FIELD_COUNT);
    }

    #[test]
    fn test_constant_fields_render_as_suffix() {
        let row = format_record(12.5, -3.25, 0.15);
        let fields: Vec<&str> = row.split(' ').collect();
        assert_eq!(fields[3..].join(" "), RECORD_SUFFIX);
    }

    #[test]
    fn test_position_fixed_point() {
        let row = format_record(0.1 + 0.2, 2.0, -0.75);
        assert!(row.starts_with("0.3000 2.0000 -0.7500 "), "row: {}", row);
    }

    #[test]
    fn test_position_rounding() {
        let row = format_record(1.23456, 9.99996, 100.0);
        assert!(row.starts_with("1.2346 10.0000 100.0000 "), "row: {}", row);
    }

    #[test]
    fn test_no_line_terminator() {
        let row = format_record(1.0, 1.0, 1.0);
        assert!(!row.contains('\n'));
        assert!(!row.ends_with(' '));
    }

    #[test]
    fn test_display_matches_format_record() {
        let record = TrajectoryRecord::new(0.5, 0.25, 0.125);
        assert_eq!(record.to_string(), format_record(0.5, 0.25, 0.125));
    }
}
