//! Small numeric predicates shared by the vector and line code.

use crate::error::{Result, ToleranceError};

/// Returns `true` if `length` is below `tol` or NaN.
#[must_use]
#[inline]
pub fn is_too_tiny(length: f64, tol: f64) -> bool {
    length < tol || length.is_nan()
}

/// [`is_too_tiny`] with the default [`TOO_TINY`](super::TOO_TINY) floor.
#[must_use]
#[inline]
pub fn is_too_tiny_default(length: f64) -> bool {
    is_too_tiny(length, super::TOO_TINY)
}

/// Squared-length form of [`is_too_tiny`]; `tol_sq` is the squared floor.
#[must_use]
#[inline]
pub fn is_too_tiny_squared(length_sq: f64, tol_sq: f64) -> bool {
    length_sq < tol_sq || length_sq.is_nan()
}

/// Clamps `x` to `[0, 1]`.
#[must_use]
#[inline]
pub fn clamp_to_unit_interval(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// `cross_sq / (cross_sq + dot_sq)`, i.e. the squared sine of the angle
/// between two vectors.
///
/// Unlike `1 - cos` this keeps full precision for nearly parallel vectors
/// and does not depend on their lengths. Returns 0.0 when both inputs are
/// zero.
#[must_use]
#[inline]
pub fn relative_angle_discriminant(cross_sq: f64, dot_sq: f64) -> f64 {
    let total = cross_sq + dot_sq;
    if total > 0.0 {
        cross_sq / total
    } else {
        0.0
    }
}

/// Converts degrees to radians.
#[must_use]
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[must_use]
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Threshold on [`relative_angle_discriminant`] below which two directions
/// are parallel.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RelAngleDiscriminant(f64);

impl RelAngleDiscriminant {
    /// Threshold for 0.25 degrees, `sin²(0.25°)`.
    pub const DEFAULT: Self = Self(1.903_846_791_435_563_5e-5);

    /// Builds the threshold matching an angle in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`ToleranceError::AngleOutOfRange`] unless `0 < degrees <= 90`.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        if !(degrees > 0.0 && degrees <= 90.0) {
            return Err(ToleranceError::AngleOutOfRange { degrees }.into());
        }
        let s = to_radians(degrees).sin();
        Ok(Self(s * s))
    }

    /// The raw discriminant value in `(0, 1]`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The angle in degrees this threshold corresponds to.
    #[must_use]
    pub fn to_degrees(self) -> f64 {
        to_degrees(self.0.sqrt().asin())
    }
}

impl Default for RelAngleDiscriminant {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where a segment parameter falls relative to the `[0, 1]` domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPosition {
    /// Below 0 by more than the snap distance.
    Before,
    /// Within the snap distance of 0.
    Start,
    /// Strictly inside, away from both ends.
    Inside,
    /// Within the snap distance of 1.
    End,
    /// Above 1 by more than the snap distance.
    After,
}

impl ParamPosition {
    /// `true` for [`Start`](Self::Start) and [`End`](Self::End).
    #[must_use]
    pub fn is_end(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// `true` unless the parameter lies outside the domain.
    #[must_use]
    pub fn is_on_segment(self) -> bool {
        !matches!(self, Self::Before | Self::After)
    }

    /// The snapped parameter: 0.0 or 1.0 at the ends, `t` otherwise.
    #[must_use]
    pub fn snap(self, t: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::End => 1.0,
            _ => t,
        }
    }
}

/// Classifies `t` against `[0, 1]` with an absolute `snap` around both ends.
///
/// Parameters are already normalised to the segment, so the snap is not
/// scaled by segment length.
#[must_use]
#[inline]
pub fn classify_param(t: f64, snap: f64) -> ParamPosition {
    if t < -snap {
        ParamPosition::Before
    } else if t <= snap {
        ParamPosition::Start
    } else if t < 1.0 - snap {
        ParamPosition::Inside
    } else if t <= 1.0 + snap {
        ParamPosition::End
    } else {
        ParamPosition::After
    }
}

/// `true` if `t` lies in `[-snap, 1 + snap]`.
#[must_use]
#[inline]
pub fn is_zero_one_or_between(t: f64, snap: f64) -> bool {
    classify_param(t, snap).is_on_segment()
}

/// Fails unless `value` is finite and non-negative.
pub(crate) fn check_tolerance(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ToleranceError::Invalid { name, value }.into())
    }
}
