//! Symmetric and hermitian matrix-matrix multiply kernels.

use batchla_core::view::{at, at_mut, he_at, sy_at};
use batchla_core::{C64, Side, Uplo};

/// C := alpha * A * B + beta * C (side = Left) or
/// C := alpha * B * A + beta * C (side = Right),
/// where A is symmetric and stored in the `uplo` triangle.
///
/// A is m x m when side = Left and n x n when side = Right; B and C are
/// m x n. Only the `uplo` triangle of A is referenced.
#[allow(clippy::too_many_arguments)]
pub fn symm(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &[C64],
    ldb: usize,
    beta: C64,
    c: &mut [C64],
    ldc: usize,
) {
    structured_mm(side, m, n, alpha, beta, b, ldb, c, ldc, |i, j| {
        sy_at(a, lda, uplo, i, j)
    });
}

/// Hermitian counterpart of [`symm`]: A is hermitian, its stored diagonal's
/// imaginary parts are not referenced.
#[allow(clippy::too_many_arguments)]
pub fn hemm(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: C64,
    a: &[C64],
    lda: usize,
    b: &[C64],
    ldb: usize,
    beta: C64,
    c: &mut [C64],
    ldc: usize,
) {
    structured_mm(side, m, n, alpha, beta, b, ldb, c, ldc, |i, j| {
        he_at(a, lda, uplo, i, j)
    });
}

/// Shared loop for symm/hemm: the two differ only in how an element of the
/// structured operand A is read.
#[allow(clippy::too_many_arguments)]
fn structured_mm(
    side: Side,
    m: usize,
    n: usize,
    alpha: C64,
    beta: C64,
    b: &[C64],
    ldb: usize,
    c: &mut [C64],
    ldc: usize,
    a_at: impl Fn(usize, usize) -> C64,
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
            match side {
                Side::Left => {
                    // (A * B)[i, j], A is m x m.
                    for l in 0..m {
                        acc += a_at(i, l) * at(b, ldb, l, j);
                    }
                }
                Side::Right => {
                    // (B * A)[i, j], A is n x n.
                    for l in 0..n {
                        acc += at(b, ldb, i, l) * a_at(l, j);
                    }
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        TestRng, assert_close, from_col_slice, herm_full, poison_opposite_triangle, sym_full,
        to_col_slice,
    };

    const TOL: f64 = 1e-12;

    fn check(hermitian: bool, side: Side, uplo: Uplo, m: usize, n: usize) {
        let mut rng = TestRng::new(0xabc ^ (m as u64) << 4 ^ n as u64);
        let na = match side {
            Side::Left => m,
            Side::Right => n,
        };

        let a = rng.matrix(na, na);
        let b = rng.matrix(m, n);
        let c0 = rng.matrix(m, n);
        let alpha = rng.next_c64();
        let beta = rng.next_c64();

        let lda = na + 1;
        let mut a_flat = to_col_slice(&a, lda);
        // The kernel must never look at the other triangle.
        poison_opposite_triangle(&mut a_flat, na, lda, uplo);
        let b_flat = to_col_slice(&b, m);
        let mut c_flat = to_col_slice(&c0, m);

        let a_full = if hermitian {
            herm_full(&a, uplo)
        } else {
            sym_full(&a, uplo)
        };

        if hermitian {
            hemm(
                side, uplo, m, n, alpha, &a_flat, lda, &b_flat, m, beta, &mut c_flat, m,
            );
        } else {
            symm(
                side, uplo, m, n, alpha, &a_flat, lda, &b_flat, m, beta, &mut c_flat, m,
            );
        }

        let expected = match side {
            Side::Left => &a_full * &b * alpha + &c0 * beta,
            Side::Right => &b * &a_full * alpha + &c0 * beta,
        };
        let actual = from_col_slice(&c_flat, m, n, m);
        assert_close(&actual, &expected, TOL);
    }

    #[test]
    fn symm_all_sides_and_triangles() {
        for &side in &[Side::Left, Side::Right] {
            for &uplo in &[Uplo::Upper, Uplo::Lower] {
                check(false, side, uplo, 5, 4);
            }
        }
    }

    #[test]
    fn hemm_all_sides_and_triangles() {
        for &side in &[Side::Left, Side::Right] {
            for &uplo in &[Uplo::Upper, Uplo::Lower] {
                check(true, side, uplo, 4, 6);
            }
        }
    }

    #[test]
    fn alpha_zero_never_reads_operands() {
        let (m, n) = (3, 4);
        let mut rng = TestRng::new(23);
        let c0 = rng.matrix(m, n);
        let mut c_flat = to_col_slice(&c0, m);
        let nan_a = vec![C64::new(f64::NAN, f64::NAN); m * m];
        let nan_b = vec![C64::new(f64::NAN, f64::NAN); m * n];
        let beta = rng.next_c64();

        symm(
            Side::Left,
            Uplo::Upper,
            m,
            n,
            C64::new(0.0, 0.0),
            &nan_a,
            m,
            &nan_b,
            m,
            beta,
            &mut c_flat,
            m,
        );

        let expected = &c0 * beta;
        assert_close(&from_col_slice(&c_flat, m, n, m), &expected, TOL);
    }

    #[test]
    fn hemm_ignores_diagonal_imaginary_parts() {
        let n = 3;
        let mut rng = TestRng::new(99);
        let mut a = rng.matrix(n, n);
        let b = rng.matrix(n, n);
        let b_flat = to_col_slice(&b, n);
        let alpha = C64::new(1.0, 0.0);
        let beta = C64::new(0.0, 0.0);

        let mut c1 = vec![C64::new(0.0, 0.0); n * n];
        let a_flat = to_col_slice(&a, n);
        hemm(
            Side::Left,
            Uplo::Upper,
            n,
            n,
            alpha,
            &a_flat,
            n,
            &b_flat,
            n,
            beta,
            &mut c1,
            n,
        );

        // Perturb the stored diagonal's imaginary parts; output must not move.
        for i in 0..n {
            a[(i, i)] += C64::new(0.0, 42.0);
        }
        let a_flat = to_col_slice(&a, n);
        let mut c2 = vec![C64::new(0.0, 0.0); n * n];
        hemm(
            Side::Left,
            Uplo::Upper,
            n,
            n,
            alpha,
            &a_flat,
            n,
            &b_flat,
            n,
            beta,
            &mut c2,
            n,
        );

        assert_eq!(c1, c2);
    }
}
