//! # Linear Space
//!
//! Evenly spaced samples between two bounds, both endpoints included.

/// Produce `num` evenly spaced samples from `start` to `end` inclusive
///
/// When `num <= 1` the result is `[start]` and `end` is ignored.
///
/// # Examples
///
/// ```
/// use path_gen::trajectory::linspace::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
/// assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
/// ```
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    samples(start, end, num).collect()
}

/// Lazy form of [`linspace`], yielding the same values without allocating
pub fn samples(start: f64, end: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num <= 1 {
        0.0
    } else {
        (end - start) / (num - 1) as f64
    };

    (0..num.max(1)).map(move |i| start + i as f64 * step)
}
