//! Grouped variable-size batched routines.
//!
//! A grouped call is a sequence of groups, each of which is a fixed-size
//! batch with its own options, dimensions, scalars, and buffers. Every group
//! delegates to the corresponding fixed-size routine. A failing group does
//! not stop the call: the remaining groups are still processed, and the
//! first failure is returned with its group index attached, so callers know
//! where a bad argument came from and which outputs were still updated.

use batchla_core::{C64, Diag, Error, Layout, Result, Side, Trans, Uplo};

use crate::fixed::{
    gemm_batchf, hemm_batchf, her2k_batchf, herk_batchf, symm_batchf, syr2k_batchf, syrk_batchf,
    trmm_batchf, trsm_batchf,
};

/// One group of a grouped GEMM call.
#[derive(Debug)]
pub struct GemmGroup<'a> {
    pub transa: Trans,
    pub transb: Trans,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub b: &'a [C64],
    pub ldb: usize,
    pub beta: C64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    /// Number of matrices in this group.
    pub batch_count: usize,
}

/// One group of a grouped SYMM or HEMM call.
#[derive(Debug)]
pub struct SymmGroup<'a> {
    pub side: Side,
    pub uplo: Uplo,
    pub m: usize,
    pub n: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub b: &'a [C64],
    pub ldb: usize,
    pub beta: C64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    pub batch_count: usize,
}

/// One group of a grouped SYRK call.
#[derive(Debug)]
pub struct SyrkGroup<'a> {
    pub uplo: Uplo,
    pub trans: Trans,
    pub n: usize,
    pub k: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub beta: C64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    pub batch_count: usize,
}

/// One group of a grouped HERK call (real scalars).
#[derive(Debug)]
pub struct HerkGroup<'a> {
    pub uplo: Uplo,
    pub trans: Trans,
    pub n: usize,
    pub k: usize,
    pub alpha: f64,
    pub a: &'a [C64],
    pub lda: usize,
    pub beta: f64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    pub batch_count: usize,
}

/// One group of a grouped SYR2K call.
#[derive(Debug)]
pub struct Syr2kGroup<'a> {
    pub uplo: Uplo,
    pub trans: Trans,
    pub n: usize,
    pub k: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub b: &'a [C64],
    pub ldb: usize,
    pub beta: C64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    pub batch_count: usize,
}

/// One group of a grouped HER2K call (real beta).
#[derive(Debug)]
pub struct Her2kGroup<'a> {
    pub uplo: Uplo,
    pub trans: Trans,
    pub n: usize,
    pub k: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub b: &'a [C64],
    pub ldb: usize,
    pub beta: f64,
    pub c: &'a mut [C64],
    pub ldc: usize,
    pub batch_count: usize,
}

/// One group of a grouped TRMM or TRSM call. B is updated in place.
#[derive(Debug)]
pub struct TriangularGroup<'a> {
    pub side: Side,
    pub uplo: Uplo,
    pub transa: Trans,
    pub diag: Diag,
    pub m: usize,
    pub n: usize,
    pub alpha: C64,
    pub a: &'a [C64],
    pub lda: usize,
    pub b: &'a mut [C64],
    pub ldb: usize,
    pub batch_count: usize,
}

/// Keep the first failing group's error, tagged with its index; later
/// failures are dropped, as in the reference's first-error reporting.
fn note_failure(first: &mut Option<Error>, index: usize, result: Result<()>) {
    if let Err(e) = result {
        if first.is_none() {
            *first = Some(e.in_group(index));
        }
    }
}

/// Grouped GEMM: apply [`gemm_batchf`] per group.
pub fn gemm_batch(layout: Layout, groups: &mut [GemmGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = gemm_batchf(
            layout,
            g.transa,
            g.transb,
            g.m,
            g.n,
            g.k,
            g.alpha,
            g.a,
            g.lda,
            g.b,
            g.ldb,
            g.beta,
            g.c,
            g.ldc,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped SYMM: apply [`symm_batchf`] per group.
pub fn symm_batch(layout: Layout, groups: &mut [SymmGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = symm_batchf(
            layout,
            g.side,
            g.uplo,
            g.m,
            g.n,
            g.alpha,
            g.a,
            g.lda,
            g.b,
            g.ldb,
            g.beta,
            g.c,
            g.ldc,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped HEMM: apply [`hemm_batchf`] per group.
pub fn hemm_batch(layout: Layout, groups: &mut [SymmGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = hemm_batchf(
            layout,
            g.side,
            g.uplo,
            g.m,
            g.n,
            g.alpha,
            g.a,
            g.lda,
            g.b,
            g.ldb,
            g.beta,
            g.c,
            g.ldc,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped SYRK: apply [`syrk_batchf`] per group.
pub fn syrk_batch(layout: Layout, groups: &mut [SyrkGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = syrk_batchf(
            layout, g.uplo, g.trans, g.n, g.k, g.alpha, g.a, g.lda, g.beta, g.c, g.ldc,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped HERK: apply [`herk_batchf`] per group.
pub fn herk_batch(layout: Layout, groups: &mut [HerkGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = herk_batchf(
            layout, g.uplo, g.trans, g.n, g.k, g.alpha, g.a, g.lda, g.beta, g.c, g.ldc,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped SYR2K: apply [`syr2k_batchf`] per group.
pub fn syr2k_batch(layout: Layout, groups: &mut [Syr2kGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = syr2k_batchf(
            layout, g.uplo, g.trans, g.n, g.k, g.alpha, g.a, g.lda, g.b, g.ldb, g.beta, g.c,
            g.ldc, g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped HER2K: apply [`her2k_batchf`] per group.
pub fn her2k_batch(layout: Layout, groups: &mut [Her2kGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = her2k_batchf(
            layout, g.uplo, g.trans, g.n, g.k, g.alpha, g.a, g.lda, g.b, g.ldb, g.beta, g.c,
            g.ldc, g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped TRMM: apply [`trmm_batchf`] per group.
pub fn trmm_batch(layout: Layout, groups: &mut [TriangularGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = trmm_batchf(
            layout, g.side, g.uplo, g.transa, g.diag, g.m, g.n, g.alpha, g.a, g.lda, g.b, g.ldb,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

/// Grouped TRSM: apply [`trsm_batchf`] per group.
pub fn trsm_batch(layout: Layout, groups: &mut [TriangularGroup<'_>]) -> Result<()> {
    let mut first = None;
    for (index, g) in groups.iter_mut().enumerate() {
        let result = trsm_batchf(
            layout, g.side, g.uplo, g.transa, g.diag, g.m, g.n, g.alpha, g.a, g.lda, g.b, g.ldb,
            g.batch_count,
        );
        note_failure(&mut first, index, result);
    }
    first.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchla_core::Error;

    const ZERO: C64 = C64 { re: 0.0, im: 0.0 };
    const ONE: C64 = C64 { re: 1.0, im: 0.0 };

    #[test]
    fn failing_group_reports_its_index() {
        let a0 = vec![ONE; 4];
        let b0 = vec![ONE; 4];
        let mut c0 = vec![ZERO; 4];
        let a1 = vec![ONE; 4];
        let b1 = vec![ONE; 4];
        let mut c1 = vec![ZERO; 4];

        let mut groups = vec![
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 2,
                n: 2,
                k: 2,
                alpha: ONE,
                a: &a0,
                lda: 2,
                b: &b0,
                ldb: 2,
                beta: ZERO,
                c: &mut c0,
                ldc: 2,
                batch_count: 1,
            },
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 2,
                n: 2,
                k: 2,
                alpha: ONE,
                a: &a1,
                lda: 1, // bad: lda < m
                b: &b1,
                ldb: 2,
                beta: ZERO,
                c: &mut c1,
                ldc: 2,
                batch_count: 1,
            },
        ];

        let err = gemm_batch(Layout::ColMajor, &mut groups).unwrap_err();
        match err {
            Error::Group { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, Error::InvalidArgument { arg: "lda", .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn earlier_groups_complete_before_a_later_failure() {
        // Group 0 is valid and must be computed even though group 1 fails,
        // mirroring the reference behavior of processing groups in order.
        let a0 = vec![ONE; 1];
        let b0 = vec![ONE; 1];
        let mut c0 = vec![ZERO; 1];
        let a1 = vec![ONE; 1];
        let b1 = vec![ONE; 1];
        let mut c1 = vec![ZERO; 1];

        let mut groups = vec![
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 1,
                n: 1,
                k: 1,
                alpha: ONE,
                a: &a0,
                lda: 1,
                b: &b0,
                ldb: 1,
                beta: ZERO,
                c: &mut c0,
                ldc: 1,
                batch_count: 1,
            },
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 1,
                n: 1,
                k: 1,
                alpha: ONE,
                a: &a1,
                lda: 1,
                b: &b1,
                ldb: 1,
                beta: ZERO,
                c: &mut c1,
                ldc: 0, // bad
                batch_count: 1,
            },
        ];

        assert!(gemm_batch(Layout::ColMajor, &mut groups).is_err());
        drop(groups);
        assert_eq!(c0[0], ONE);
        assert_eq!(c1[0], ZERO);
    }

    #[test]
    fn later_groups_still_run_after_an_early_failure() {
        // Group 0 fails validation; group 1 must still be computed, as the
        // reference processes every group and reports the first failure.
        let a0 = vec![ONE; 4];
        let b0 = vec![ONE; 4];
        let mut c0 = vec![ZERO; 4];
        let a1 = vec![ONE; 4];
        let b1 = vec![ONE; 4];
        let mut c1 = vec![ZERO; 4];

        let mut groups = vec![
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 2,
                n: 2,
                k: 2,
                alpha: ONE,
                a: &a0,
                lda: 1, // bad: lda < m
                b: &b0,
                ldb: 2,
                beta: ZERO,
                c: &mut c0,
                ldc: 2,
                batch_count: 1,
            },
            GemmGroup {
                transa: Trans::NoTrans,
                transb: Trans::NoTrans,
                m: 2,
                n: 2,
                k: 2,
                alpha: ONE,
                a: &a1,
                lda: 2,
                b: &b1,
                ldb: 2,
                beta: ZERO,
                c: &mut c1,
                ldc: 2,
                batch_count: 1,
            },
        ];

        let err = gemm_batch(Layout::ColMajor, &mut groups).unwrap_err();
        drop(groups);
        match err {
            Error::Group { index, source } => {
                assert_eq!(index, 0);
                assert!(matches!(*source, Error::InvalidArgument { arg: "lda", .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The failing group's output is untouched, the valid group's is not.
        assert_eq!(c0[0], ZERO);
        assert_eq!(c1[0], C64 { re: 2.0, im: 0.0 });
    }

    #[test]
    fn empty_group_list_is_a_no_op() {
        let mut groups: Vec<GemmGroup<'_>> = vec![];
        assert!(gemm_batch(Layout::ColMajor, &mut groups).is_ok());
    }
}
