use crate::descriptor::ShapeKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a geometric parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Missing,
    NotPositive,
    Negative,
    NotFinite,
    StationsNotIncreasing,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::Missing => f.write_str("is required"),
            InvalidReason::NotPositive => f.write_str("must be greater than zero"),
            InvalidReason::Negative => f.write_str("must not be negative"),
            InvalidReason::NotFinite => f.write_str("must be a finite number"),
            InvalidReason::StationsNotIncreasing => {
                f.write_str("must have strictly increasing stations")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {kind} shape: {parameter} {reason}")]
    InvalidShape {
        kind: ShapeKind,
        parameter: &'static str,
        reason: InvalidReason,
    },

    /// An irregular profile with fewer than two points. Not a failure of `render`, which maps it
    /// to an absent result.
    #[error("irregular profile needs at least 2 station-elevation points, got {points}")]
    InsufficientData { points: usize },

    #[error("invalid viewport config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("descriptor JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(kind: ShapeKind, parameter: &'static str, reason: InvalidReason) -> Self {
        Error::InvalidShape {
            kind,
            parameter,
            reason,
        }
    }
}
