//! Scalar alias and option enums shared by every batched routine.

use num_complex::Complex64;

/// Double-precision complex scalar used throughout the crate.
pub type C64 = Complex64;

/// Storage order of every matrix in a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Column-major storage (Fortran order).
    #[default]
    ColMajor,
    /// Row-major storage (C order).
    RowMajor,
}

/// Transpose option for an operand: op(X).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trans {
    /// op(X) = X.
    #[default]
    NoTrans,
    /// op(X) = X^T.
    Trans,
    /// op(X) = X^H.
    ConjTrans,
}

/// Which triangle of a symmetric/hermitian/triangular matrix is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uplo {
    /// Upper triangle is referenced.
    Upper,
    /// Lower triangle is referenced.
    Lower,
}

/// Side from which the structured factor multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The factor appears on the left: op(A)·B.
    Left,
    /// The factor appears on the right: B·op(A).
    Right,
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diag {
    /// Diagonal entries are read from storage.
    NonUnit,
    /// Diagonal entries are taken as one and not referenced.
    Unit,
}

impl Layout {
    /// Parse from a LAPACK-style character ('C' or 'R').
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Layout::ColMajor),
            'R' => Some(Layout::RowMajor),
            _ => None,
        }
    }
}

impl Trans {
    /// Parse from a LAPACK-style character ('N', 'T', or 'C').
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Trans::NoTrans),
            'T' => Some(Trans::Trans),
            'C' => Some(Trans::ConjTrans),
            _ => None,
        }
    }

    /// Whether this option transposes the operand (with or without conjugation).
    pub fn is_transposed(self) -> bool {
        !matches!(self, Trans::NoTrans)
    }

    /// Toggle between NoTrans and the given transposed form.
    ///
    /// Used when rewriting a row-major call as the column-major dual: an
    /// untransposed operand becomes transposed and vice versa, preserving
    /// conjugation.
    pub fn toggled(self, conjugate: bool) -> Self {
        match (self, conjugate) {
            (Trans::NoTrans, false) => Trans::Trans,
            (Trans::NoTrans, true) => Trans::ConjTrans,
            (Trans::Trans, _) | (Trans::ConjTrans, _) => Trans::NoTrans,
        }
    }
}

impl Uplo {
    /// Parse from a LAPACK-style character ('U' or 'L').
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Uplo::Upper),
            'L' => Some(Uplo::Lower),
            _ => None,
        }
    }

    /// The opposite triangle.
    pub fn flipped(self) -> Self {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }
}

impl Side {
    /// Parse from a LAPACK-style character ('L' or 'R').
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Side::Left),
            'R' => Some(Side::Right),
            _ => None,
        }
    }

    /// The opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl Diag {
    /// Parse from a LAPACK-style character ('N' or 'U').
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Diag::NonUnit),
            'U' => Some(Diag::Unit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::ColMajor => write!(f, "column-major"),
            Layout::RowMajor => write!(f, "row-major"),
        }
    }
}

impl std::fmt::Display for Trans {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trans::NoTrans => write!(f, "N"),
            Trans::Trans => write!(f, "T"),
            Trans::ConjTrans => write!(f, "C"),
        }
    }
}

impl std::fmt::Display for Uplo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Uplo::Upper => write!(f, "U"),
            Uplo::Lower => write!(f, "L"),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "L"),
            Side::Right => write!(f, "R"),
        }
    }
}

impl std::fmt::Display for Diag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diag::NonUnit => write!(f, "N"),
            Diag::Unit => write!(f, "U"),
        }
    }
}
