//! Fixed-size batched routines.
//!
//! Every matrix in the batch shares the same dimensions, options, scalars,
//! and leading dimensions. Operands are flattened strided buffers: matrix
//! `i` of an operand starts `i * stride` elements in, where the stride is
//! the leading dimension times the operand's minor dimension under the call
//! layout.
//!
//! Each routine validates leading dimensions first, then takes the
//! operation's quick-return exit if the whole batch is a no-op (without
//! touching any buffer), then checks buffer lengths and runs the kernel over
//! the batch. Row-major calls are rewritten to their column-major duals
//! before dispatch.

use batchla_core::view::op_dims;
use batchla_core::{C64, Diag, Layout, Result, Side, Trans, Uplo};
use batchla_kernels as kernels;

use crate::validate::{check_buffer, check_he_trans, check_ld, check_sy_trans, ld_and_stride};

const ZERO: C64 = C64 { re: 0.0, im: 0.0 };
const ONE: C64 = C64 { re: 1.0, im: 0.0 };

/// Run `f` once per problem in the batch, handing it the problem index and
/// that problem's chunk of the updated operand.
///
/// With the `parallel` feature the problems run under rayon; they are
/// independent by construction, so the results are identical to the serial
/// path.
fn for_each_problem(
    out: &mut [C64],
    stride: usize,
    batch_count: usize,
    f: impl Fn(usize, &mut [C64]) + Sync + Send,
) {
    if stride == 0 || batch_count == 0 {
        return;
    }
    let out = &mut out[..stride * batch_count];
    log::debug!(
        "dispatching batch of {batch_count} problems ({} path)",
        if cfg!(feature = "parallel") { "rayon" } else { "serial" },
    );

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }

    #[cfg(not(feature = "parallel"))]
    for (i, chunk) in out.chunks_exact_mut(stride).enumerate() {
        f(i, chunk);
    }
}

/// Batched general matrix multiply:
/// C\[i\] := alpha * op(A\[i\]) * op(B\[i\]) + beta * C\[i\].
///
/// op(A\[i\]) is m x k, op(B\[i\]) is k x n, C\[i\] is m x n.
#[allow(clippy::too_many_arguments)]
pub fn gemm_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    const ROUTINE: &str = "gemm_batchf";
    let (a_rows, a_cols) = op_dims(transa, m, k);
    let (b_rows, b_cols) = op_dims(transb, k, n);
    let (min_lda, stride_a) = ld_and_stride(layout, lda, a_rows, a_cols);
    let (min_ldb, stride_b) = ld_and_stride(layout, ldb, b_rows, b_cols);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, m, n);
    check_ld(ROUTINE, "lda", lda, min_lda)?;
    check_ld(ROUTINE, "ldb", ldb, min_ldb)?;
    check_ld(ROUTINE, "ldc", ldc, min_ldc)?;

    // Skip batches where nothing needs to be done.
    if m == 0 || n == 0 || ((alpha == ZERO || k == 0) && beta == ONE) {
        return Ok(());
    }

    check_buffer(ROUTINE, "a", a.len(), stride_a, batch_count)?;
    check_buffer(ROUTINE, "b", b.len(), stride_b, batch_count)?;
    check_buffer(ROUTINE, "c", c.len(), stride_c, batch_count)?;

    match layout {
        Layout::ColMajor => for_each_problem(c, stride_c, batch_count, |i, ci| {
            kernels::gemm(
                transa,
                transb,
                m,
                n,
                k,
                alpha,
                &a[i * stride_a..],
                lda,
                &b[i * stride_b..],
                ldb,
                beta,
                ci,
                ldc,
            );
        }),
        // Row-major dual: C^T = alpha * op(B)^T * op(A)^T + beta * C^T.
        Layout::RowMajor => for_each_problem(c, stride_c, batch_count, |i, ci| {
            kernels::gemm(
                transb,
                transa,
                n,
                m,
                k,
                alpha,
                &b[i * stride_b..],
                ldb,
                &a[i * stride_a..],
                lda,
                beta,
                ci,
                ldc,
            );
        }),
    }
    Ok(())
}

/// Batched symmetric matrix multiply:
/// C\[i\] := alpha * A\[i\] * B\[i\] + beta * C\[i\] (side = Left) or
/// C\[i\] := alpha * B\[i\] * A\[i\] + beta * C\[i\] (side = Right).
#[allow(clippy::too_many_arguments)]
pub fn symm_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    structured_mm_batchf(
        "symm_batchf",
        false,
        layout,
        side,
        uplo,
        m,
        n,
        alpha,
        a,
        lda,
        b,
        ldb,
        beta,
        c,
        ldc,
        batch_count,
    )
}

/// Batched hermitian matrix multiply; as [`symm_batchf`] with hermitian
/// A\[i\] (stored diagonal imaginary parts are not referenced).
#[allow(clippy::too_many_arguments)]
pub fn hemm_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    structured_mm_batchf(
        "hemm_batchf",
        true,
        layout,
        side,
        uplo,
        m,
        n,
        alpha,
        a,
        lda,
        b,
        ldb,
        beta,
        c,
        ldc,
        batch_count,
    )
}

#[allow(clippy::too_many_arguments)]
fn structured_mm_batchf(
    routine: &'static str,
    hermitian: bool,
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    let na = match side {
        Side::Left => m,
        Side::Right => n,
    };
    let (min_lda, stride_a) = ld_and_stride(layout, lda, na, na);
    let (min_ldb, stride_b) = ld_and_stride(layout, ldb, m, n);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, m, n);
    check_ld(routine, "lda", lda, min_lda)?;
    check_ld(routine, "ldb", ldb, min_ldb)?;
    check_ld(routine, "ldc", ldc, min_ldc)?;

    if m == 0 || n == 0 {
        return Ok(());
    }

    check_buffer(routine, "a", a.len(), stride_a, batch_count)?;
    check_buffer(routine, "b", b.len(), stride_b, batch_count)?;
    check_buffer(routine, "c", c.len(), stride_c, batch_count)?;

    // Row-major dual: flip side and uplo, swap m and n; A^T stays
    // symmetric (or hermitian) under the flipped triangle.
    let (side, uplo, m, n) = match layout {
        Layout::ColMajor => (side, uplo, m, n),
        Layout::RowMajor => (side.flipped(), uplo.flipped(), n, m),
    };
    type StructuredKernel =
        fn(Side, Uplo, usize, usize, C64, &[C64], usize, &[C64], usize, C64, &mut [C64], usize);
    let kernel: StructuredKernel = if hermitian { kernels::hemm } else { kernels::symm };
    for_each_problem(c, stride_c, batch_count, |i, ci| {
        kernel(
            side,
            uplo,
            m,
            n,
            alpha,
            &a[i * stride_a..],
            lda,
            &b[i * stride_b..],
            ldb,
            beta,
            ci,
            ldc,
        );
    });
    Ok(())
}

/// Batched symmetric rank-k update:
/// C\[i\] := alpha * op(A\[i\]) * op(A\[i\])^T + beta * C\[i\], with op(A\[i\])
/// n x k and C\[i\] symmetric n x n. `trans` must be NoTrans or Trans.
#[allow(clippy::too_many_arguments)]
pub fn syrk_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    const ROUTINE: &str = "syrk_batchf";
    check_sy_trans(ROUTINE, trans)?;
    let (a_rows, a_cols) = op_dims(trans, n, k);
    let (min_lda, stride_a) = ld_and_stride(layout, lda, a_rows, a_cols);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, n, n);
    check_ld(ROUTINE, "lda", lda, min_lda)?;
    check_ld(ROUTINE, "ldc", ldc, min_ldc)?;

    if n == 0 || ((k == 0 || alpha == ZERO) && beta == ONE) {
        return Ok(());
    }

    check_buffer(ROUTINE, "a", a.len(), stride_a, batch_count)?;
    check_buffer(ROUTINE, "c", c.len(), stride_c, batch_count)?;

    // Row-major dual: flip the stored triangle and toggle the transpose.
    let (uplo, trans) = match layout {
        Layout::ColMajor => (uplo, trans),
        Layout::RowMajor => (uplo.flipped(), trans.toggled(false)),
    };
    for_each_problem(c, stride_c, batch_count, |i, ci| {
        kernels::syrk(uplo, trans, n, k, alpha, &a[i * stride_a..], lda, beta, ci, ldc);
    });
    Ok(())
}

/// Batched hermitian rank-k update:
/// C\[i\] := alpha * op(A\[i\]) * op(A\[i\])^H + beta * C\[i\], with real alpha
/// and beta and C\[i\] hermitian n x n. `trans` must be NoTrans or ConjTrans.
#[allow(clippy::too_many_arguments)]
pub fn herk_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    const ROUTINE: &str = "herk_batchf";
    check_he_trans(ROUTINE, trans)?;
    let (a_rows, a_cols) = op_dims(trans, n, k);
    let (min_lda, stride_a) = ld_and_stride(layout, lda, a_rows, a_cols);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, n, n);
    check_ld(ROUTINE, "lda", lda, min_lda)?;
    check_ld(ROUTINE, "ldc", ldc, min_ldc)?;

    if n == 0 || ((k == 0 || alpha == 0.0) && beta == 1.0) {
        return Ok(());
    }

    check_buffer(ROUTINE, "a", a.len(), stride_a, batch_count)?;
    check_buffer(ROUTINE, "c", c.len(), stride_c, batch_count)?;

    let (uplo, trans) = match layout {
        Layout::ColMajor => (uplo, trans),
        Layout::RowMajor => (uplo.flipped(), trans.toggled(true)),
    };
    for_each_problem(c, stride_c, batch_count, |i, ci| {
        kernels::herk(uplo, trans, n, k, alpha, &a[i * stride_a..], lda, beta, ci, ldc);
    });
    Ok(())
}

/// Batched symmetric rank-2k update:
/// C\[i\] := alpha * op(A\[i\]) * op(B\[i\])^T + alpha * op(B\[i\]) * op(A\[i\])^T
/// + beta * C\[i\]. `trans` must be NoTrans or Trans.
#[allow(clippy::too_many_arguments)]
pub fn syr2k_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    const ROUTINE: &str = "syr2k_batchf";
    check_sy_trans(ROUTINE, trans)?;
    let (ab_rows, ab_cols) = op_dims(trans, n, k);
    let (min_lda, stride_a) = ld_and_stride(layout, lda, ab_rows, ab_cols);
    let (min_ldb, stride_b) = ld_and_stride(layout, ldb, ab_rows, ab_cols);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, n, n);
    check_ld(ROUTINE, "lda", lda, min_lda)?;
    check_ld(ROUTINE, "ldb", ldb, min_ldb)?;
    check_ld(ROUTINE, "ldc", ldc, min_ldc)?;

    if n == 0 || ((k == 0 || alpha == ZERO) && beta == ONE) {
        return Ok(());
    }

    check_buffer(ROUTINE, "a", a.len(), stride_a, batch_count)?;
    check_buffer(ROUTINE, "b", b.len(), stride_b, batch_count)?;
    check_buffer(ROUTINE, "c", c.len(), stride_c, batch_count)?;

    let (uplo, trans) = match layout {
        Layout::ColMajor => (uplo, trans),
        Layout::RowMajor => (uplo.flipped(), trans.toggled(false)),
    };
    for_each_problem(c, stride_c, batch_count, |i, ci| {
        kernels::syr2k(
            uplo,
            trans,
            n,
            k,
            alpha,
            &a[i * stride_a..],
            lda,
            &b[i * stride_b..],
            ldb,
            beta,
            ci,
            ldc,
        );
    });
    Ok(())
}

/// Batched hermitian rank-2k update:
/// C\[i\] := alpha * op(A\[i\]) * op(B\[i\])^H + conj(alpha) * op(B\[i\]) *
/// op(A\[i\])^H + beta * C\[i\], with real beta. `trans` must be NoTrans or
/// ConjTrans.
#[allow(clippy::too_many_arguments)]
pub fn her2k_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    const ROUTINE: &str = "her2k_batchf";
    check_he_trans(ROUTINE, trans)?;
    let (ab_rows, ab_cols) = op_dims(trans, n, k);
    let (min_lda, stride_a) = ld_and_stride(layout, lda, ab_rows, ab_cols);
    let (min_ldb, stride_b) = ld_and_stride(layout, ldb, ab_rows, ab_cols);
    let (min_ldc, stride_c) = ld_and_stride(layout, ldc, n, n);
    check_ld(ROUTINE, "lda", lda, min_lda)?;
    check_ld(ROUTINE, "ldb", ldb, min_ldb)?;
    check_ld(ROUTINE, "ldc", ldc, min_ldc)?;

    if n == 0 || ((k == 0 || alpha == ZERO) && beta == 1.0) {
        return Ok(());
    }

    check_buffer(ROUTINE, "a", a.len(), stride_a, batch_count)?;
    check_buffer(ROUTINE, "b", b.len(), stride_b, batch_count)?;
    check_buffer(ROUTINE, "c", c.len(), stride_c, batch_count)?;

    // Row-major dual additionally conjugates alpha.
    let (uplo, trans, alpha) = match layout {
        Layout::ColMajor => (uplo, trans, alpha),
        Layout::RowMajor => (uplo.flipped(), trans.toggled(true), alpha.conj()),
    };
    for_each_problem(c, stride_c, batch_count, |i, ci| {
        kernels::her2k(
            uplo,
            trans,
            n,
            k,
            alpha,
            &a[i * stride_a..],
            lda,
            &b[i * stride_b..],
            ldb,
            beta,
            ci,
            ldc,
        );
    });
    Ok(())
}

/// Batched triangular multiply:
/// B\[i\] := alpha * op(A\[i\]) * B\[i\] (side = Left) or
/// B\[i\] := alpha * B\[i\] * op(A\[i\]) (side = Right), in place.
#[allow(clippy::too_many_arguments)]
pub fn trmm_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    triangular_batchf(
        "trmm_batchf",
        kernels::trmm,
        layout,
        side,
        uplo,
        transa,
        diag,
        m,
        n,
        alpha,
        a,
        lda,
        b,
        ldb,
        batch_count,
    )
}

/// Batched triangular solve: overwrite B\[i\] with the solution X of
/// op(A\[i\]) * X = alpha * B\[i\] (side = Left) or
/// X * op(A\[i\]) = alpha * B\[i\] (side = Right).
///
/// No singularity detection is performed; zeros on a non-unit diagonal
/// propagate infinities.
#[allow(clippy::too_many_arguments)]
pub fn trsm_batchf(
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    triangular_batchf(
        "trsm_batchf",
        kernels::trsm,
        layout,
        side,
        uplo,
        transa,
        diag,
        m,
        n,
        alpha,
        a,
        lda,
        b,
        ldb,
        batch_count,
    )
}

type TriangularKernel =
    fn(Side, Uplo, Trans, Diag, usize, usize, C64, &[C64], usize, &mut [C64], usize);

#[allow(clippy::too_many_arguments)]
fn triangular_batchf(
    routine: &'static str,
    kernel: TriangularKernel,
    layout: Layout,
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
    batch_count: usize,
) -> Result<()> {
    let na = match side {
        Side::Left => m,
        Side::Right => n,
    };
    let (min_lda, stride_a) = ld_and_stride(layout, lda, na, na);
    let (min_ldb, stride_b) = ld_and_stride(layout, ldb, m, n);
    check_ld(routine, "lda", lda, min_lda)?;
    check_ld(routine, "ldb", ldb, min_ldb)?;

    if m == 0 || n == 0 {
        return Ok(());
    }

    check_buffer(routine, "a", a.len(), stride_a, batch_count)?;
    check_buffer(routine, "b", b.len(), stride_b, batch_count)?;

    // Row-major dual: flip side and uplo, swap m and n; transa carries over
    // because transposing the stored matrix realizes the same op(A).
    let (side, uplo, m, n) = match layout {
        Layout::ColMajor => (side, uplo, m, n),
        Layout::RowMajor => (side.flipped(), uplo.flipped(), n, m),
    };
    for_each_problem(b, stride_b, batch_count, |i, bi| {
        kernel(
            side,
            uplo,
            transa,
            diag,
            m,
            n,
            alpha,
            &a[i * stride_a..],
            lda,
            bi,
            ldb,
        );
    });
    Ok(())
}
