//! Symmetric and hermitian rank-k and rank-2k update kernels.
//!
//! All four kernels update only the `uplo` triangle of C; the opposite
//! triangle is never read or written. The hermitian variants take real
//! scaling where BLAS does (herk: both scalars, her2k: beta) and force the
//! diagonal of C exactly real on output.

use batchla_core::view::{at_mut, op_at};
use batchla_core::{C64, Trans, Uplo};

/// Row range of column j that lies inside the `uplo` triangle of an n x n
/// matrix.
#[inline]
fn triangle_rows(uplo: Uplo, n: usize, j: usize) -> std::ops::Range<usize> {
    match uplo {
        Uplo::Upper => 0..j + 1,
        Uplo::Lower => j..n,
    }
}

/// C := beta * C over the `uplo` triangle, for the alpha == 0 exits where
/// A and B are not referenced.
fn scale_triangle(uplo: Uplo, n: usize, beta: C64, c: &mut [C64], ldc: usize) {
    let zero = C64::new(0.0, 0.0);
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let cij = at_mut(c, ldc, i, j);
            *cij = if beta == zero { zero } else { beta * *cij };
        }
    }
}

/// Hermitian counterpart of [`scale_triangle`]: real beta, and the diagonal
/// is treated as real and written exactly real.
fn scale_triangle_he(uplo: Uplo, n: usize, beta: f64, c: &mut [C64], ldc: usize) {
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let cij = at_mut(c, ldc, i, j);
            *cij = if i == j {
                C64::new(if beta == 0.0 { 0.0 } else { beta * cij.re }, 0.0)
            } else if beta == 0.0 {
                C64::new(0.0, 0.0)
            } else {
                *cij * beta
            };
        }
    }
}

/// C := alpha * op(A) * op(A)^T + beta * C, C symmetric n x n.
///
/// `trans` is NoTrans (op(A) = A, n x k) or Trans (op(A) = A^T, A is k x n);
/// ConjTrans is not defined for the symmetric update and is rejected by the
/// batched front-end.
#[allow(clippy::too_many_arguments)]
pub fn syrk(
    uplo: Uplo,
    trans: Trans,
    n: usize,
    k: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    beta: C64,
    c: &mut [C64],
    ldc: usize,
) {
    let zero = C64::new(0.0, 0.0);
    if alpha == zero {
        scale_triangle(uplo, n, beta, c, ldc);
        return;
    }
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let mut acc = zero;
            for l in 0..k {
                acc += op_at(a, lda, trans, i, l) * op_at(a, lda, trans, j, l);
            }
            let cij = at_mut(c, ldc, i, j);
            *cij = if beta == zero {
                alpha * acc
            } else {
                alpha * acc + beta * *cij
            };
        }
    }
}

/// C := alpha * op(A) * op(A)^H + beta * C, C hermitian n x n, alpha and
/// beta real.
///
/// `trans` is NoTrans or ConjTrans (Trans is rejected upstream). The stored
/// diagonal of C is treated as real on input and written exactly real.
#[allow(clippy::too_many_arguments)]
pub fn herk(
    uplo: Uplo,
    trans: Trans,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[C64],
    lda: usize,
    beta: f64,
    c: &mut [C64],
    ldc: usize,
) {
    if alpha == 0.0 {
        scale_triangle_he(uplo, n, beta, c, ldc);
        return;
    }
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let mut acc = C64::new(0.0, 0.0);
            for l in 0..k {
                acc += op_at(a, lda, trans, i, l) * op_at(a, lda, trans, j, l).conj();
            }
            let cij = at_mut(c, ldc, i, j);
            *cij = if i == j {
                // The diagonal of a hermitian update is real by construction;
                // discard the rounding residue in the imaginary part.
                let prev = if beta == 0.0 { 0.0 } else { beta * cij.re };
                C64::new(alpha * acc.re + prev, 0.0)
            } else if beta == 0.0 {
                acc * alpha
            } else {
                acc * alpha + *cij * beta
            };
        }
    }
}

/// C := alpha * op(A) * op(B)^T + alpha * op(B) * op(A)^T + beta * C,
/// C symmetric n x n.
#[allow(clippy::too_many_arguments)]
pub fn syr2k(
    uplo: Uplo,
    trans: Trans,
    n: usize,
    k: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &[C64],
    ldb: usize,
    beta: C64,
    c: &mut [C64],
    ldc: usize,
) {
    let zero = C64::new(0.0, 0.0);
    if alpha == zero {
        scale_triangle(uplo, n, beta, c, ldc);
        return;
    }
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let mut acc = zero;
            for l in 0..k {
                acc += op_at(a, lda, trans, i, l) * op_at(b, ldb, trans, j, l)
                    + op_at(b, ldb, trans, i, l) * op_at(a, lda, trans, j, l);
            }
            let cij = at_mut(c, ldc, i, j);
            *cij = if beta == zero {
                alpha * acc
            } else {
                alpha * acc + beta * *cij
            };
        }
    }
}

/// C := alpha * op(A) * op(B)^H + conj(alpha) * op(B) * op(A)^H + beta * C,
/// C hermitian n x n, beta real.
///
/// `trans` is NoTrans or ConjTrans, as for [`herk`].
#[allow(clippy::too_many_arguments)]
pub fn her2k(
    uplo: Uplo,
    trans: Trans,
    n: usize,
    k: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &[C64],
    ldb: usize,
    beta: f64,
    c: &mut [C64],
    ldc: usize,
) {
    if alpha == C64::new(0.0, 0.0) {
        scale_triangle_he(uplo, n, beta, c, ldc);
        return;
    }
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let mut ab = C64::new(0.0, 0.0);
            let mut ba = C64::new(0.0, 0.0);
            for l in 0..k {
                ab += op_at(a, lda, trans, i, l) * op_at(b, ldb, trans, j, l).conj();
                ba += op_at(b, ldb, trans, i, l) * op_at(a, lda, trans, j, l).conj();
            }
            let update = alpha * ab + alpha.conj() * ba;
            let cij = at_mut(c, ldc, i, j);
            *cij = if i == j {
                let prev = if beta == 0.0 { 0.0 } else { beta * cij.re };
                C64::new(update.re + prev, 0.0)
            } else if beta == 0.0 {
                update
            } else {
                update + *cij * beta
            };
        }
    }
}
