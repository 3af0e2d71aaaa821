mod line_line;
mod parallel;
mod ray_ray;

pub use line_line::{
    intersect_lines, ClosestPoints, IntersectionKind, LineIntersection, LineLineIntersect,
};
pub use parallel::{
    classify_lines, is_parallel, is_parallel_and_same_orientation, is_parallel_fast,
    is_perpendicular, LinePairRelation,
};
pub use ray_ray::{intersect_rays, RayIntersection};

use crate::error::Result;
use crate::math::tolerance::{check_tolerance, RelAngleDiscriminant};
use crate::math::{COINCIDENT, PARAM_SNAP, SKEW, TOO_SHORT};

/// Tolerances used by the line pair classifiers.
///
/// Override single values with struct update syntax:
///
/// ```
/// use linesect::operations::query::IntersectionTolerances;
///
/// let tol = IntersectionTolerances {
///     skew: 1e-3,
///     ..Default::default()
/// };
/// assert!(tol.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionTolerances {
    /// Directions whose relative angle discriminant is below this are parallel.
    pub rel_angle: RelAngleDiscriminant,
    /// Parallel lines closer than this distance are coincident.
    pub coincident: f64,
    /// Lines shorter than this have no direction.
    pub too_short: f64,
    /// Closest points further apart than this do not touch.
    pub skew: f64,
    /// Absolute snap of segment parameters onto 0.0 and 1.0.
    pub param_snap: f64,
}

impl Default for IntersectionTolerances {
    fn default() -> Self {
        Self {
            rel_angle: RelAngleDiscriminant::DEFAULT,
            coincident: COINCIDENT,
            too_short: TOO_SHORT,
            skew: SKEW,
            param_snap: PARAM_SNAP,
        }
    }
}

impl IntersectionTolerances {
    /// Checks that every distance tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ToleranceError::Invalid`](crate::error::ToleranceError::Invalid)
    /// naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_tolerance("rel_angle", self.rel_angle.value())?;
        check_tolerance("coincident", self.coincident)?;
        check_tolerance("too_short", self.too_short)?;
        check_tolerance("skew", self.skew)?;
        check_tolerance("param_snap", self.param_snap)
    }
}
