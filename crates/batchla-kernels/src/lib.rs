//! Single-matrix complex BLAS-3 reference kernels.
//!
//! Each kernel operates on one column-major matrix per operand, addressed as
//! a flattened slice plus a leading dimension. The batched front-ends in the
//! `batchla` crate validate arguments, handle layout rewriting, and loop
//! these kernels over a batch; the kernels themselves assume validated
//! arguments and column-major storage.
//!
//! Structured operands (symmetric, hermitian, triangular) are read only in
//! the referenced triangle, through the access helpers in `batchla-core`.

pub mod gemm;
pub mod rank_update;
pub mod symm;
pub mod triangular;

pub use gemm::gemm;
pub use rank_update::{her2k, herk, syr2k, syrk};
pub use symm::{hemm, symm};
pub use triangular::{trmm, trsm};

#[cfg(test)]
pub(crate) mod testutil;
