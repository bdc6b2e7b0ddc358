//! Element access helpers for flattened column-major matrices.
//!
//! Every kernel in this workspace works on a flattened slice plus a leading
//! dimension. These helpers centralize the index arithmetic and the
//! structured-matrix read rules (symmetric/hermitian mirroring, triangular
//! masking) so the kernels stay close to their textbook loop structure.

use crate::types::{C64, Diag, Trans, Uplo};

/// Element (i, j) of a column-major matrix with leading dimension `lda`.
#[inline]
pub fn at(a: &[C64], lda: usize, i: usize, j: usize) -> C64 {
    a[i + j * lda]
}

/// Mutable element (i, j) of a column-major matrix.
#[inline]
pub fn at_mut(a: &mut [C64], lda: usize, i: usize, j: usize) -> &mut C64 {
    &mut a[i + j * lda]
}

/// Element (i, j) of op(A) for a stored matrix `a`.
#[inline]
pub fn op_at(a: &[C64], lda: usize, trans: Trans, i: usize, j: usize) -> C64 {
    match trans {
        Trans::NoTrans => at(a, lda, i, j),
        Trans::Trans => at(a, lda, j, i),
        Trans::ConjTrans => at(a, lda, j, i).conj(),
    }
}

/// Element (i, j) of a symmetric matrix stored in one triangle.
#[inline]
pub fn sy_at(a: &[C64], lda: usize, uplo: Uplo, i: usize, j: usize) -> C64 {
    let stored = match uplo {
        Uplo::Upper => i <= j,
        Uplo::Lower => i >= j,
    };
    if stored { at(a, lda, i, j) } else { at(a, lda, j, i) }
}

/// Element (i, j) of a hermitian matrix stored in one triangle.
///
/// The imaginary part of the stored diagonal is not referenced, matching the
/// BLAS hermitian-input contract.
#[inline]
pub fn he_at(a: &[C64], lda: usize, uplo: Uplo, i: usize, j: usize) -> C64 {
    if i == j {
        return C64::new(at(a, lda, i, i).re, 0.0);
    }
    let stored = match uplo {
        Uplo::Upper => i < j,
        Uplo::Lower => i > j,
    };
    if stored {
        at(a, lda, i, j)
    } else {
        at(a, lda, j, i).conj()
    }
}

/// Element (i, j) of op(A) for a triangular matrix.
///
/// Entries outside the referenced triangle of op(A) read as zero, and the
/// diagonal reads as one when `diag` is `Unit`.
#[inline]
pub fn tr_op_at(
    a: &[C64],
    lda: usize,
    uplo: Uplo,
    trans: Trans,
    diag: Diag,
    i: usize,
    j: usize,
) -> C64 {
    // uplo describes the stored matrix; transposition flips the triangle
    // that is populated in op(A).
    let (si, sj) = if trans.is_transposed() { (j, i) } else { (i, j) };
    if si == sj {
        return match diag {
            Diag::Unit => C64::new(1.0, 0.0),
            Diag::NonUnit => {
                let v = at(a, lda, si, sj);
                if trans == Trans::ConjTrans { v.conj() } else { v }
            }
        };
    }
    let stored = match uplo {
        Uplo::Upper => si < sj,
        Uplo::Lower => si > sj,
    };
    if !stored {
        return C64::new(0.0, 0.0);
    }
    let v = at(a, lda, si, sj);
    if trans == Trans::ConjTrans { v.conj() } else { v }
}

/// Stored dimensions (rows, cols) of A given that op(A) is `rows` x `cols`.
#[inline]
pub fn op_dims(trans: Trans, rows: usize, cols: usize) -> (usize, usize) {
    if trans.is_transposed() { (cols, rows) } else { (rows, cols) }
}
