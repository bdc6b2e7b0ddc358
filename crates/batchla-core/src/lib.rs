//! Shared types for the batchla workspace.
//!
//! Holds the complex scalar alias, the BLAS option enums, the error types,
//! and the flattened column-major element-access helpers the kernels build
//! on. Nothing here allocates or computes; the numeric work lives in
//! `batchla-kernels` and the batched front-ends in `batchla`.

pub mod error;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use types::{C64, Diag, Layout, Side, Trans, Uplo};
