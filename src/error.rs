use thiserror::Error;

/// Top-level error type for the linesect kernel.
#[derive(Debug, Error)]
pub enum LinesectError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),
}

/// Contract violations in geometric operations.
///
/// Parallel, coincident, skew or short inputs are not errors; they are
/// reported through the classification enums. These variants only appear
/// when an operation that needs a well-defined direction is called on an
/// operand that has none.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{operation}: operand {operand} has length {length:e}, below the {tolerance:e} floor")]
    TooShort {
        operation: &'static str,
        operand: String,
        length: f64,
        tolerance: f64,
    },

    #[error("vector with squared length {length_squared} is not a unit vector")]
    NotUnitLength { length_squared: f64 },
}

impl GeometryError {
    /// Builds a [`GeometryError::TooShort`] and records it at debug level.
    pub(crate) fn too_short(
        operation: &'static str,
        operand: &impl std::fmt::Debug,
        length: f64,
        tolerance: f64,
    ) -> Self {
        let operand = format!("{operand:?}");
        tracing::debug!(operation, %operand, length, tolerance, "operand too short");
        Self::TooShort {
            operation,
            operand,
            length,
            tolerance,
        }
    }
}

/// Errors in user supplied tolerance settings.
#[derive(Debug, Error)]
pub enum ToleranceError {
    #[error("tolerance {name} = {value} must be finite and non-negative")]
    Invalid { name: &'static str, value: f64 },

    #[error("angle {degrees} degrees is outside (0, 90]")]
    AngleOutOfRange { degrees: f64 },
}

/// Convenience type alias for results using [`LinesectError`].
pub type Result<T> = std::result::Result<T, LinesectError>;
