//! General matrix-matrix multiply kernel.

use batchla_core::view::{at_mut, op_at};
use batchla_core::{C64, Trans};

/// C := alpha * op(A) * op(B) + beta * C.
///
/// op(A) is m x k, op(B) is k x n, C is m x n, all column-major. When beta
/// is zero, C is not read (it may contain uninitialized or NaN data).
#[allow(clippy::too_many_arguments)]
pub fn gemm(
    transa: Trans,
    transb: Trans,
    m: usize,
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
    // When alpha is zero, A and B are not referenced; C is only scaled.
    if alpha == zero {
        for j in 0..n {
            for i in 0..m {
                let cij = at_mut(c, ldc, i, j);
                *cij = if beta == zero { zero } else { beta * *cij };
            }
        }
        return;
    }
    for j in 0..n {
        for i in 0..m {
            let mut acc = zero;
            for l in 0..k {
                acc += op_at(a, lda, transa, i, l) * op_at(b, ldb, transb, l, j);
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
