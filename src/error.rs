//! Error types of the constitutive models.
//!
//! Every fallible operation returns `FractureResult<T>`. Failures are local
//! precondition violations: the computation is deterministic so none of them
//! is worth retrying.

use crate::models::ModelKind;
use std::fmt;
use thiserror::Error;

/// The solver-provided state a model reads from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateField {
    Displacement,
    Phase,
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateField::Displacement => write!(f, "displacement field"),
            StateField::Phase => write!(f, "phase field"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum FractureError {
    /// No elastic matrix exists for this geometric dimension.
    #[error("unsupported geometric dimension {0} (expected 2 or 3)")]
    UnsupportedDimension(usize),

    /// The factory was given a name outside of the known variants.
    #[error("unknown constitutive model type `{0}`")]
    UnknownModelType(String),

    /// Stress or tangent requested before the solver provided its fields.
    #[error("the {0} has not been set on the constitutive model")]
    UninitializedState(StateField),

    /// Elastic constants out of their physical range.
    #[error("invalid material parameter: {0}")]
    InvalidMaterial(String),

    #[error("expected a square tensor, found {rows}×{cols}")]
    NonSquareTensor { rows: usize, cols: usize },

    /// Two per-point arrays (or a batch and the stored history) disagree on
    /// their `(cells, points)` shape.
    #[error("shape mismatch: expected {expected:?} (cells, points), found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("the symmetric eigen-decomposition of the strain tensor did not converge")]
    EigenDecomposition,

    #[error("invalid anisotropy director: {0}")]
    InvalidDirector(String),

    /// `maximum_historical_field` called on a variant that tracks no history.
    #[error("the {0} model does not track a history field")]
    NoHistoryField(ModelKind),
}

/// Convenience alias for `Result<T, FractureError>`.
pub type FractureResult<T> = Result<T, FractureError>;
