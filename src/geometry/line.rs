use crate::error::{GeometryError, Result};
use crate::math::tolerance::{is_too_tiny, is_too_tiny_squared};
use crate::math::vector::UnitVector;
use crate::math::{Matrix4, Point, Vector, TOO_SHORT, TOO_TINY, TOO_TINY_SQ};

/// A finite line segment from `from` to `to`.
///
/// The parametric form is `P(t) = from + t * (to - from)`; `t` in `[0, 1]`
/// covers the segment, any other real `t` lies on the infinite ray through
/// both points. Zero-length lines are valid values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<const D: usize> {
    pub from: Point<D>,
    pub to: Point<D>,
}

/// 2D line segment.
pub type Line2 = Line<2>;

/// 3D line segment.
pub type Line3 = Line<3>;

impl<const D: usize> Line<D> {
    /// Creates a line from two points.
    #[must_use]
    pub fn new(from: Point<D>, to: Point<D>) -> Self {
        Self { from, to }
    }

    /// The vector `to - from`.
    #[must_use]
    pub fn vector(&self) -> Vector<D> {
        self.to - self.from
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Squared length; avoids the square root in comparisons.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.vector().norm_squared()
    }

    /// The point at `t = 0.5`.
    #[must_use]
    pub fn mid_point(&self) -> Point<D> {
        nalgebra::center(&self.from, &self.to)
    }

    /// The same line running from `to` to `from`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from)
    }

    /// `true` if the line is shorter than `tol`.
    #[must_use]
    pub fn is_too_short(&self, tol: f64) -> bool {
        is_too_tiny_squared(self.length_squared(), tol * tol)
    }

    /// The normalised direction from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooShort`] if the line is shorter than
    /// [`TOO_TINY`].
    pub fn unit_tangent(&self) -> Result<UnitVector<D>> {
        let len = self.length();
        if is_too_tiny(len, TOO_TINY) {
            return Err(GeometryError::too_short("Line::unit_tangent", self, len, TOO_TINY).into());
        }
        Ok(UnitVector::new_unchecked(self.vector() / len))
    }

    /// The point at parameter `t`. Defined for every real `t`.
    #[must_use]
    pub fn evaluate_at(&self, t: f64) -> Point<D> {
        self.from + self.vector() * t
    }

    /// Parameter of the projection of `p` onto the infinite ray through
    /// this line.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooShort`] if the line is shorter than
    /// [`TOO_SHORT`], since the ray has no direction.
    pub fn closest_parameter_on_ray(&self, p: &Point<D>) -> Result<f64> {
        let v = self.vector();
        let len_sq = v.norm_squared();
        if is_too_tiny_squared(len_sq, TOO_SHORT * TOO_SHORT) {
            return Err(GeometryError::too_short(
                "Line::closest_parameter_on_ray",
                self,
                len_sq.sqrt(),
                TOO_SHORT,
            )
            .into());
        }
        Ok((p - self.from).dot(&v) / len_sq)
    }

    /// Parameter of the point of the segment closest to `p`, in `[0, 1]`.
    ///
    /// Never fails. On a degenerate line every point is equally close, so
    /// the end on the side of `p` is returned.
    #[must_use]
    pub fn closest_parameter_on_segment(&self, p: &Point<D>) -> f64 {
        let v = self.vector();
        let len_sq = v.norm_squared();
        let dot = (p - self.from).dot(&v);
        if is_too_tiny_squared(len_sq, TOO_TINY_SQ) {
            return if dot > 0.0 { 1.0 } else { 0.0 };
        }
        (dot / len_sq).clamp(0.0, 1.0)
    }

    /// Projection of `p` onto the infinite ray through this line.
    ///
    /// # Errors
    ///
    /// See [`closest_parameter_on_ray`](Self::closest_parameter_on_ray).
    pub fn closest_point_on_ray(&self, p: &Point<D>) -> Result<Point<D>> {
        Ok(self.evaluate_at(self.closest_parameter_on_ray(p)?))
    }

    /// The point of the segment closest to `p`.
    #[must_use]
    pub fn closest_point_on_segment(&self, p: &Point<D>) -> Point<D> {
        self.evaluate_at(self.closest_parameter_on_segment(p))
    }

    /// Squared distance from `p` to the infinite ray.
    ///
    /// # Errors
    ///
    /// See [`closest_parameter_on_ray`](Self::closest_parameter_on_ray).
    pub fn squared_distance_point_to_ray(&self, p: &Point<D>) -> Result<f64> {
        Ok(nalgebra::distance_squared(p, &self.closest_point_on_ray(p)?))
    }

    /// Squared distance from `p` to the segment.
    #[must_use]
    pub fn squared_distance_point_to_segment(&self, p: &Point<D>) -> f64 {
        nalgebra::distance_squared(p, &self.closest_point_on_segment(p))
    }

    /// Distance from `p` to the infinite ray.
    ///
    /// # Errors
    ///
    /// See [`closest_parameter_on_ray`](Self::closest_parameter_on_ray).
    pub fn distance_point_to_ray(&self, p: &Point<D>) -> Result<f64> {
        Ok(self.squared_distance_point_to_ray(p)?.sqrt())
    }

    /// Distance from `p` to the segment.
    #[must_use]
    pub fn distance_point_to_segment(&self, p: &Point<D>) -> f64 {
        self.squared_distance_point_to_segment(p).sqrt()
    }

    /// Applies a point transformation to both ends.
    #[must_use]
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(&Point<D>) -> Point<D>,
    {
        Self::new(f(&self.from), f(&self.to))
    }
}

impl Line<3> {
    /// Transforms both ends by a homogeneous 4x4 matrix.
    #[must_use]
    pub fn transform(&self, m: &Matrix4) -> Self {
        self.map_points(|p| m.transform_point(p))
    }
}
