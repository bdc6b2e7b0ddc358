//! Batched complex BLAS level-3 routines.
//!
//! Two batch flavors are provided for each of the nine level-3 operations
//! (GEMM, SYMM, HEMM, SYRK, HERK, SYR2K, HER2K, TRMM, TRSM):
//!
//! - **Fixed-size** (`*_batchf`): every matrix in the batch shares the same
//!   dimensions and scalars; operands are contiguous strided buffers.
//! - **Grouped** (`*_batch`): a sequence of groups with per-group
//!   dimensions, options, and scalars; each group is itself a fixed batch.
//!
//! ```
//! use batchla::{Layout, Trans, C64, gemm_batchf};
//!
//! // Two 2x2 problems: C[i] = A[i] * B[i], packed column-major.
//! let one = C64::new(1.0, 0.0);
//! let zero = C64::new(0.0, 0.0);
//! let a = vec![one; 8];
//! let b = vec![one; 8];
//! let mut c = vec![zero; 8];
//! gemm_batchf(
//!     Layout::ColMajor,
//!     Trans::NoTrans,
//!     Trans::NoTrans,
//!     2, 2, 2,
//!     one, &a, 2, &b, 2,
//!     zero, &mut c, 2,
//!     2,
//! )?;
//! assert_eq!(c[0], C64::new(2.0, 0.0));
//! # Ok::<(), batchla::Error>(())
//! ```
//!
//! Enable the `parallel` feature to run the problems of a fixed batch on a
//! rayon thread pool; results are bit-identical to the serial path.

pub mod fixed;
pub mod grouped;
mod validate;

pub use batchla_core::{C64, Diag, Error, Layout, Result, Side, Trans, Uplo};

pub use fixed::{
    gemm_batchf, hemm_batchf, her2k_batchf, herk_batchf, symm_batchf, syr2k_batchf, syrk_batchf,
    trmm_batchf, trsm_batchf,
};
pub use grouped::{
    GemmGroup, Her2kGroup, HerkGroup, SymmGroup, Syr2kGroup, SyrkGroup, TriangularGroup,
    gemm_batch, hemm_batch, her2k_batch, herk_batch, symm_batch, syr2k_batch, syrk_batch,
    trmm_batch, trsm_batch,
};
