//! Shared argument validation for the batched front-ends.
//!
//! The option enums and unsigned dimensions make the classic "illegal value
//! of transa" and "m < 0" rejections unrepresentable; what remains are the
//! leading-dimension minimums, the per-operation transpose restrictions
//! (symmetric updates take no ConjTrans, hermitian updates take no plain
//! Trans), and the flattened-buffer length checks a pointer-based interface
//! could never perform.

use batchla_core::{Error, Layout, Result, Trans};

/// Minimum leading dimension and per-matrix stride for an operand whose
/// logical shape is `rows` x `cols`.
///
/// Column-major storage advances `ld` per column (so `ld` spans rows);
/// row-major storage advances `ld` per row.
pub(crate) fn ld_and_stride(layout: Layout, ld: usize, rows: usize, cols: usize) -> (usize, usize) {
    match layout {
        Layout::ColMajor => (rows.max(1), ld * cols),
        Layout::RowMajor => (cols.max(1), ld * rows),
    }
}

/// Check a leading dimension against its minimum.
pub(crate) fn check_ld(
    routine: &'static str,
    arg: &'static str,
    ld: usize,
    min_ld: usize,
) -> Result<()> {
    if ld < min_ld {
        return Err(Error::invalid_argument(routine, arg));
    }
    Ok(())
}

/// Check that a flattened batch buffer can hold `batch_count` matrices of
/// the given per-matrix stride.
pub(crate) fn check_buffer(
    routine: &'static str,
    buffer: &'static str,
    len: usize,
    stride: usize,
    batch_count: usize,
) -> Result<()> {
    let required = stride * batch_count;
    if len < required {
        return Err(Error::BufferTooSmall {
            routine,
            buffer,
            required,
            actual: len,
        });
    }
    Ok(())
}

/// Reject ConjTrans for symmetric rank updates (syrk/syr2k).
pub(crate) fn check_sy_trans(routine: &'static str, trans: Trans) -> Result<()> {
    if trans == Trans::ConjTrans {
        return Err(Error::invalid_argument(routine, "trans"));
    }
    Ok(())
}

/// Reject plain Trans for hermitian rank updates (herk/her2k).
pub(crate) fn check_he_trans(routine: &'static str, trans: Trans) -> Result<()> {
    if trans == Trans::Trans {
        return Err(Error::invalid_argument(routine, "trans"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ld_minimum_follows_layout() {
        // 3 x 5 operand: column-major needs ld >= 3, row-major ld >= 5.
        assert_eq!(ld_and_stride(Layout::ColMajor, 4, 3, 5), (3, 20));
        assert_eq!(ld_and_stride(Layout::RowMajor, 6, 3, 5), (5, 18));
        // Degenerate shapes still demand ld >= 1.
        assert_eq!(ld_and_stride(Layout::ColMajor, 1, 0, 2).0, 1);
    }

    #[test]
    fn ld_check() {
        assert!(check_ld("gemm_batchf", "lda", 3, 3).is_ok());
        assert!(check_ld("gemm_batchf", "lda", 2, 3).is_err());
    }

    #[test]
    fn buffer_check() {
        assert!(check_buffer("gemm_batchf", "a", 24, 12, 2).is_ok());
        let err = check_buffer("gemm_batchf", "a", 23, 12, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                required: 24,
                actual: 23,
                ..
            }
        ));
    }

    #[test]
    fn structured_trans_domains() {
        assert!(check_sy_trans("syrk_batchf", Trans::Trans).is_ok());
        assert!(check_sy_trans("syrk_batchf", Trans::ConjTrans).is_err());
        assert!(check_he_trans("herk_batchf", Trans::ConjTrans).is_ok());
        assert!(check_he_trans("herk_batchf", Trans::Trans).is_err());
    }
}
