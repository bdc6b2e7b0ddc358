//! Shared helpers for kernel tests: deterministic matrix generation and
//! conversion between nalgebra matrices and flattened column-major storage.

use batchla_core::{C64, Diag, Trans, Uplo};
use nalgebra::DMatrix;

/// Simple xorshift generator so tests are deterministic without a rand
/// dependency.
pub struct TestRng(u64);

impl TestRng {
    pub fn new(seed: u64) -> Self {
        TestRng(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish value in [-1, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 52) as f64 * 2.0 - 1.0
    }

    pub fn next_c64(&mut self) -> C64 {
        C64::new(self.next_f64(), self.next_f64())
    }

    pub fn matrix(&mut self, rows: usize, cols: usize) -> DMatrix<C64> {
        DMatrix::from_fn(rows, cols, |_, _| self.next_c64())
    }
}

/// Flatten a matrix into column-major storage with leading dimension `lda`.
///
/// Padding rows (between the matrix rows and `lda`) are poisoned with NaN so
/// any kernel that touches them fails its comparison.
pub fn to_col_slice(m: &DMatrix<C64>, lda: usize) -> Vec<C64> {
    assert!(lda >= m.nrows());
    let mut out = vec![C64::new(f64::NAN, f64::NAN); lda * m.ncols()];
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            out[i + j * lda] = m[(i, j)];
        }
    }
    out
}

/// Rebuild a matrix from flattened column-major storage.
pub fn from_col_slice(data: &[C64], rows: usize, cols: usize, lda: usize) -> DMatrix<C64> {
    DMatrix::from_fn(rows, cols, |i, j| data[i + j * lda])
}

/// Poison the triangle of `data` that a kernel must not reference.
///
/// `referenced` is the triangle the kernel is allowed to read; everything
/// strictly on the other side of the diagonal becomes NaN.
pub fn poison_opposite_triangle(data: &mut [C64], n: usize, lda: usize, referenced: Uplo) {
    for j in 0..n {
        for i in 0..n {
            let poison = match referenced {
                Uplo::Upper => i > j,
                Uplo::Lower => i < j,
            };
            if poison {
                data[i + j * lda] = C64::new(f64::NAN, f64::NAN);
            }
        }
    }
}

/// Full dense matrix equal to op(A).
pub fn apply_op(a: &DMatrix<C64>, trans: Trans) -> DMatrix<C64> {
    match trans {
        Trans::NoTrans => a.clone(),
        Trans::Trans => a.transpose(),
        Trans::ConjTrans => a.adjoint(),
    }
}

/// Full dense symmetric matrix from the `uplo` triangle of `a`.
pub fn sym_full(a: &DMatrix<C64>, uplo: Uplo) -> DMatrix<C64> {
    let n = a.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        let stored = match uplo {
            Uplo::Upper => i <= j,
            Uplo::Lower => i >= j,
        };
        if stored { a[(i, j)] } else { a[(j, i)] }
    })
}

/// Full dense hermitian matrix from the `uplo` triangle of `a`.
pub fn herm_full(a: &DMatrix<C64>, uplo: Uplo) -> DMatrix<C64> {
    let n = a.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            return C64::new(a[(i, i)].re, 0.0);
        }
        let stored = match uplo {
            Uplo::Upper => i < j,
            Uplo::Lower => i > j,
        };
        if stored { a[(i, j)] } else { a[(j, i)].conj() }
    })
}

/// Full dense triangular matrix from the `uplo` triangle of `a`.
pub fn tri_full(a: &DMatrix<C64>, uplo: Uplo, diag: Diag) -> DMatrix<C64> {
    let n = a.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            return match diag {
                Diag::Unit => C64::new(1.0, 0.0),
                Diag::NonUnit => a[(i, i)],
            };
        }
        let stored = match uplo {
            Uplo::Upper => i < j,
            Uplo::Lower => i > j,
        };
        if stored { a[(i, j)] } else { C64::new(0.0, 0.0) }
    })
}

/// Assert two matrices agree elementwise within `tol`.
pub fn assert_close(actual: &DMatrix<C64>, expected: &DMatrix<C64>, tol: f64) {
    assert_eq!(actual.nrows(), expected.nrows());
    assert_eq!(actual.ncols(), expected.ncols());
    for j in 0..actual.ncols() {
        for i in 0..actual.nrows() {
            let d = (actual[(i, j)] - expected[(i, j)]).norm();
            assert!(
                d <= tol,
                "mismatch at ({i}, {j}): {} vs {} (|diff| = {d})",
                actual[(i, j)],
                expected[(i, j)]
            );
        }
    }
}
