use std::ops::{Deref, Neg};

use crate::error::{GeometryError, Result};

use super::tolerance::{is_too_tiny, to_degrees};
use super::{Vector, Vector2, TOO_TINY};

/// Scalar cross product of two 2D vectors, `a.x * b.y - a.y * b.x`.
#[must_use]
#[inline]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Squared magnitude of the exterior product of `a` and `b`.
///
/// Summed from the 2x2 minors, so it equals `|a x b|²` in 3D and
/// `cross_2d(a, b)²` in 2D. Computing it as `|a|²|b|² - (a.b)²` instead would
/// lose all significant digits for nearly parallel vectors.
#[must_use]
#[inline]
#[allow(clippy::needless_range_loop)]
pub fn cross_squared<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> f64 {
    let mut sum = 0.0;
    for i in 0..D {
        for j in (i + 1)..D {
            let minor = a[i] * b[j] - a[j] * b[i];
            sum += minor * minor;
        }
    }
    sum
}

/// Normalises `v`.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`] if `|v|` is below [`TOO_TINY`].
pub fn unitize<const D: usize>(v: &Vector<D>) -> Result<UnitVector<D>> {
    UnitVector::try_new(*v)
}

/// Angle between `a` and `b` in degrees, in `[0, 180]`.
///
/// Uses `atan2(|a x b|, a.b)`, which stays accurate near 0 and 180 degrees
/// where `acos` does not.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`] if either vector is too tiny.
pub fn angle_between_degrees<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> Result<f64> {
    check_direction("angle_between_degrees", a)?;
    check_direction("angle_between_degrees", b)?;
    Ok(to_degrees(cross_squared(a, b).sqrt().atan2(a.dot(b))))
}

/// Angle between the lines spanned by `a` and `b` in degrees, in `[0, 90]`.
/// Orientation is ignored.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`] if either vector is too tiny.
pub fn angle_between_degrees_90<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> Result<f64> {
    check_direction("angle_between_degrees_90", a)?;
    check_direction("angle_between_degrees_90", b)?;
    Ok(to_degrees(cross_squared(a, b).sqrt().atan2(a.dot(b).abs())))
}

/// Fails if `v` is too tiny to carry a direction.
pub(crate) fn check_direction<const D: usize>(
    operation: &'static str,
    v: &Vector<D>,
) -> Result<()> {
    let len = v.norm();
    if is_too_tiny(len, TOO_TINY) {
        return Err(GeometryError::too_short(operation, v, len, TOO_TINY).into());
    }
    Ok(())
}

/// A vector of length one.
///
/// Only obtainable through [`UnitVector::try_new`], [`unitize`] or
/// [`UnitVector::try_from_normalized`], so the length invariant holds for
/// every value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector<const D: usize>(Vector<D>);

/// 2D unit vector.
pub type UnitVector2 = UnitVector<2>;

/// 3D unit vector.
pub type UnitVector3 = UnitVector<3>;

impl<const D: usize> UnitVector<D> {
    /// Smallest accepted squared length of an already normalised vector.
    pub const MIN_LENGTH_SQ: f64 = 0.999_999_64;

    /// Largest accepted squared length of an already normalised vector.
    pub const MAX_LENGTH_SQ: f64 = 1.000_000_715;

    /// Normalises `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooShort`] if `|v|` is below [`TOO_TINY`].
    pub fn try_new(v: Vector<D>) -> Result<Self> {
        let len = v.norm();
        if is_too_tiny(len, TOO_TINY) {
            return Err(GeometryError::too_short("UnitVector::try_new", &v, len, TOO_TINY).into());
        }
        Ok(Self(v / len))
    }

    /// Wraps `v` after checking it is already of unit length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotUnitLength`] if `|v|²` is outside
    /// `[MIN_LENGTH_SQ, MAX_LENGTH_SQ]`.
    pub fn try_from_normalized(v: Vector<D>) -> Result<Self> {
        let length_squared = v.norm_squared();
        if (Self::MIN_LENGTH_SQ..=Self::MAX_LENGTH_SQ).contains(&length_squared) {
            Ok(Self(v))
        } else {
            Err(GeometryError::NotUnitLength { length_squared }.into())
        }
    }

    /// Wraps `v` without any check.
    ///
    /// Only for vectors that are unit length by construction, e.g. the
    /// negation or rotation of another unit vector.
    pub(crate) fn new_unchecked(v: Vector<D>) -> Self {
        debug_assert!(
            (Self::MIN_LENGTH_SQ..=Self::MAX_LENGTH_SQ).contains(&v.norm_squared()),
            "not a unit vector: {v:?}"
        );
        Self(v)
    }

    /// Borrows the underlying vector.
    #[must_use]
    pub fn as_vector(&self) -> &Vector<D> {
        &self.0
    }

    /// Returns the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vector<D> {
        self.0
    }
}

impl UnitVector2 {
    /// Rotates by 90 degrees counter-clockwise.
    #[must_use]
    pub fn rotate_90_ccw(self) -> Self {
        Self::new_unchecked(Vector2::new(-self.0.y, self.0.x))
    }
}

impl<const D: usize> Deref for UnitVector<D> {
    type Target = Vector<D>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const D: usize> Neg for UnitVector<D> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new_unchecked(-self.0)
    }
}
