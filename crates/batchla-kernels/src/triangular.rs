//! Triangular matrix-matrix multiply and triangular solve kernels.

use batchla_core::view::{at, at_mut, tr_op_at};
use batchla_core::{C64, Diag, Side, Trans, Uplo};

/// Whether op(A) is lower triangular: transposition flips the triangle of
/// the stored matrix.
#[inline]
fn op_is_lower(uplo: Uplo, transa: Trans) -> bool {
    (uplo == Uplo::Lower) != transa.is_transposed()
}

/// B := 0 for the alpha == 0 exits where A is not referenced.
fn zero_fill(m: usize, n: usize, b: &mut [C64], ldb: usize) {
    let zero = C64::new(0.0, 0.0);
    for j in 0..n {
        for i in 0..m {
            *at_mut(b, ldb, i, j) = zero;
        }
    }
}

/// B := alpha * op(A) * B (side = Left) or B := alpha * B * op(A)
/// (side = Right), in place.
///
/// A is triangular, m x m when side = Left and n x n when side = Right; only
/// its `uplo` triangle is referenced (and not the diagonal when `diag` is
/// Unit). B is m x n.
#[allow(clippy::too_many_arguments)]
pub fn trmm(
    side: Side,
    uplo: Uplo,
    transa: Trans,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &mut [C64],
    ldb: usize,
) {
    let zero = C64::new(0.0, 0.0);
    // When alpha is zero, A is not referenced and B is set to zero.
    if alpha == zero {
        zero_fill(m, n, b, ldb);
        return;
    }
    match side {
        Side::Left => {
            // Per column of B, accumulate op(A) * b_j into a scratch column
            // so the in-place update never reads an already-written entry.
            let mut col = vec![zero; m];
            for j in 0..n {
                for (i, slot) in col.iter_mut().enumerate() {
                    let mut acc = zero;
                    for l in 0..m {
                        let aij = tr_op_at(a, lda, uplo, transa, diag, i, l);
                        if aij != zero {
                            acc += aij * at(b, ldb, l, j);
                        }
                    }
                    *slot = alpha * acc;
                }
                for (i, &v) in col.iter().enumerate() {
                    *at_mut(b, ldb, i, j) = v;
                }
            }
        }
        Side::Right => {
            let mut row = vec![zero; n];
            for i in 0..m {
                for (j, slot) in row.iter_mut().enumerate() {
                    let mut acc = zero;
                    for l in 0..n {
                        let alj = tr_op_at(a, lda, uplo, transa, diag, l, j);
                        if alj != zero {
                            acc += at(b, ldb, i, l) * alj;
                        }
                    }
                    *slot = alpha * acc;
                }
                for (j, &v) in row.iter().enumerate() {
                    *at_mut(b, ldb, i, j) = v;
                }
            }
        }
    }
}

/// Solve op(A) * X = alpha * B (side = Left) or X * op(A) = alpha * B
/// (side = Right), overwriting B with X.
///
/// No singularity check is performed: a zero on a non-unit diagonal
/// propagates infinities, as in the underlying BLAS contract.
#[allow(clippy::too_many_arguments)]
pub fn trsm(
    side: Side,
    uplo: Uplo,
    transa: Trans,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &mut [C64],
    ldb: usize,
) {
    if alpha == C64::new(0.0, 0.0) {
        zero_fill(m, n, b, ldb);
        return;
    }
    let lower = op_is_lower(uplo, transa);
    match side {
        Side::Left => {
            // Forward substitution for lower op(A), backward for upper,
            // one right-hand-side column at a time.
            for j in 0..n {
                for i in 0..m {
                    *at_mut(b, ldb, i, j) *= alpha;
                }
                if lower {
                    for i in 0..m {
                        let mut v = at(b, ldb, i, j);
                        for l in 0..i {
                            v -= tr_op_at(a, lda, uplo, transa, diag, i, l) * at(b, ldb, l, j);
                        }
                        if diag == Diag::NonUnit {
                            v /= tr_op_at(a, lda, uplo, transa, diag, i, i);
                        }
                        *at_mut(b, ldb, i, j) = v;
                    }
                } else {
                    for i in (0..m).rev() {
                        let mut v = at(b, ldb, i, j);
                        for l in i + 1..m {
                            v -= tr_op_at(a, lda, uplo, transa, diag, i, l) * at(b, ldb, l, j);
                        }
                        if diag == Diag::NonUnit {
                            v /= tr_op_at(a, lda, uplo, transa, diag, i, i);
                        }
                        *at_mut(b, ldb, i, j) = v;
                    }
                }
            }
        }
        Side::Right => {
            // Row x of X satisfies x * op(A) = alpha * b_row: columns of
            // op(A) resolve left-to-right when op(A) is upper triangular,
            // right-to-left when lower.
            for i in 0..m {
                for j in 0..n {
                    *at_mut(b, ldb, i, j) *= alpha;
                }
                if lower {
                    for j in (0..n).rev() {
                        let mut v = at(b, ldb, i, j);
                        for l in j + 1..n {
                            v -= at(b, ldb, i, l) * tr_op_at(a, lda, uplo, transa, diag, l, j);
                        }
                        if diag == Diag::NonUnit {
                            v /= tr_op_at(a, lda, uplo, transa, diag, j, j);
                        }
                        *at_mut(b, ldb, i, j) = v;
                    }
                } else {
                    for j in 0..n {
                        let mut v = at(b, ldb, i, j);
                        for l in 0..j {
                            v -= at(b, ldb, i, l) * tr_op_at(a, lda, uplo, transa, diag, l, j);
                        }
                        if diag == Diag::NonUnit {
                            v /= tr_op_at(a, lda, uplo, transa, diag, j, j);
                        }
                        *at_mut(b, ldb, i, j) = v;
                    }
                }
            }
        }
    }
}
