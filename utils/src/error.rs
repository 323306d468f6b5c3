use thiserror::Error;

/// Failures raised by the linear algebra types.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LinalgError {
    /// component or row/column index outside 0..len.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// the offending index.
        index: usize,
        /// number of valid indices.
        len: usize,
    },
    /// matrix determinant within the singularity threshold; no inverse exists.
    #[error("matrix is singular (determinant {determinant:e})")]
    Singular {
        /// determinant as computed, widened to f64.
        determinant: f64,
    },
    /// attempted to normalise a vector with no direction.
    #[error("cannot normalise a zero-length vector")]
    ZeroLength,
}
