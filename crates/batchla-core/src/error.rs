//! Error types for batched BLAS routines.

use thiserror::Error;

/// Errors that can occur in a batched routine.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument failed validation.
    #[error("invalid value of {arg} in {routine}")]
    InvalidArgument {
        /// Routine that rejected the argument.
        routine: &'static str,
        /// Name of the offending argument.
        arg: &'static str,
    },

    /// A flattened batch buffer is shorter than the dimensions imply.
    #[error("{routine}: {buffer} holds {actual} elements, needs at least {required}")]
    BufferTooSmall {
        routine: &'static str,
        buffer: &'static str,
        required: usize,
        actual: usize,
    },

    /// An error originating in one group of a grouped batch call.
    #[error("group {index}: {source}")]
    Group {
        /// Index of the failing group.
        index: usize,
        /// Underlying error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Construct an argument error, logging the offending routine/argument pair.
    pub fn invalid_argument(routine: &'static str, arg: &'static str) -> Self {
        log::error!("{routine}: illegal value of {arg}");
        Error::InvalidArgument { routine, arg }
    }

    /// Wrap an error with the index of the grouped-batch group it came from.
    pub fn in_group(self, index: usize) -> Self {
        Error::Group {
            index,
            source: Box::new(self),
        }
    }
}

/// Result type for batched routines.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid_argument("gemm_batchf", "lda");
        assert_eq!(err.to_string(), "invalid value of lda in gemm_batchf");
    }

    #[test]
    fn group_wrapping() {
        let err = Error::invalid_argument("trsm_batchf", "ldb").in_group(3);
        assert_eq!(err.to_string(), "group 3: invalid value of ldb in trsm_batchf");
        match err {
            Error::Group { index, source } => {
                assert_eq!(index, 3);
                assert!(matches!(*source, Error::InvalidArgument { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn buffer_too_small_display() {
        let err = Error::BufferTooSmall {
            routine: "gemm_batchf",
            buffer: "c",
            required: 64,
            actual: 32,
        };
        assert_eq!(
            err.to_string(),
            "gemm_batchf: c holds 32 elements, needs at least 64"
        );
    }
}
