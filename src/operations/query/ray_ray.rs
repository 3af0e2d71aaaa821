use crate::geometry::Line;
use crate::math::vector::cross_squared;

use super::parallel::{classify_lines, LinePairRelation};
use super::IntersectionTolerances;

/// Result of intersecting two infinite lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayIntersection {
    /// The lines are closest (or meet) at `a.evaluate_at(u)` and
    /// `b.evaluate_at(v)`.
    TwoParam { u: f64, v: f64 },
    /// Parallel on distinct lines; no unique closest pair exists.
    Parallel,
    /// Parallel on the same line.
    Coincident,
    /// The first line is too short to have a direction.
    TooShortA,
    /// The second line is too short to have a direction.
    TooShortB,
    /// Neither line has a direction.
    TooShortBoth,
}

/// Solves for the parameters at which the infinite lines through `a` and
/// `b` come closest.
///
/// The closed form is only evaluated once [`classify_lines`] has ruled out
/// parallel and too-short inputs, so its denominator is never near zero.
#[must_use]
pub fn intersect_rays<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    tol: &IntersectionTolerances,
) -> RayIntersection {
    match classify_lines(a, b, tol) {
        LinePairRelation::NotParallel => {
            let (u, v) = solve_closest_params(a, b);
            RayIntersection::TwoParam { u, v }
        }
        LinePairRelation::Parallel { .. } => RayIntersection::Parallel,
        LinePairRelation::Coincident { .. } => RayIntersection::Coincident,
        LinePairRelation::TooShortA => RayIntersection::TooShortA,
        LinePairRelation::TooShortB => RayIntersection::TooShortB,
        LinePairRelation::TooShortBoth => RayIntersection::TooShortBoth,
    }
}

/// Closed-form solution of the 2x2 normal equations
///
/// ```text
/// a·u - b·v = d
/// b·u - c·v = e
/// ```
///
/// with `a = |da|²`, `b = da.db`, `c = |db|²`, `d = da.w`, `e = db.w`,
/// `w = b.from - a.from`. The determinant `a·c - b²` is taken as the squared
/// exterior product of the directions to avoid cancellation.
pub(super) fn solve_closest_params<const D: usize>(a: &Line<D>, b: &Line<D>) -> (f64, f64) {
    let da = a.vector();
    let db = b.vector();
    let w = b.from - a.from;

    let aa = da.norm_squared();
    let bb = da.dot(&db);
    let cc = db.norm_squared();
    let d = da.dot(&w);
    let e = db.dot(&w);
    let det = cross_squared(&da, &db);

    let u = (cc * d - bb * e) / det;
    let v = (bb * d - aa * e) / det;
    (u, v)
}
