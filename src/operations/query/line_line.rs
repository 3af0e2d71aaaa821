use crate::error::Result;
use crate::geometry::Line;
use crate::math::tolerance::{clamp_to_unit_interval, classify_param, ParamPosition};
use crate::math::Point;

use super::parallel::{classify_lines, LinePairRelation};
use super::ray_ray::{intersect_rays, solve_closest_params, RayIntersection};
use super::IntersectionTolerances;

/// A pair of closest points, one on each segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoints<const D: usize> {
    /// Parameter on the first segment.
    pub u: f64,
    /// Parameter on the second segment.
    pub v: f64,
    /// `a.evaluate_at(u)`.
    pub point_a: Point<D>,
    /// `b.evaluate_at(v)`.
    pub point_b: Point<D>,
}

impl<const D: usize> ClosestPoints<D> {
    fn at(a: &Line<D>, b: &Line<D>, u: f64, v: f64) -> Self {
        Self {
            u,
            v,
            point_a: a.evaluate_at(u),
            point_b: b.evaluate_at(v),
        }
    }

    /// Squared gap between the two points.
    #[must_use]
    pub fn distance_squared(&self) -> f64 {
        nalgebra::distance_squared(&self.point_a, &self.point_b)
    }

    /// Gap between the two points.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_squared().sqrt()
    }
}

/// How two finite segments relate.
///
/// `u` is always a parameter on the first segment and `v` on the second.
/// Points reported for touching cases are the midpoint of the two
/// closest points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<const D: usize> {
    /// Crossing strictly inside both segments.
    Intersecting { u: f64, v: f64, point: Point<D> },
    /// Crossing at an end of both segments.
    IntersectingEndsBoth { u: f64, v: f64, point: Point<D> },
    /// Crossing at an end of the first segment only.
    IntersectingEndsFirst { u: f64, v: f64, point: Point<D> },
    /// Crossing at an end of the second segment only.
    IntersectingEndsSecond { u: f64, v: f64, point: Point<D> },
    /// Closest approach lies on both segments but the lines pass each other.
    Skew(ClosestPoints<D>),
    /// Closest approach of the rays lies outside a segment; the clamped
    /// closest points do not touch.
    Apart(ClosestPoints<D>),
    /// Parallel on distinct lines.
    Parallel(ClosestPoints<D>),
    /// Coincident with a shared stretch `[u_start, u_end]` of the first segment.
    Overlapping {
        u_start: f64,
        u_end: f64,
        flipped: bool,
    },
    /// Coincident but with a gap between the segments.
    CoincidentApart(ClosestPoints<D>),
    /// Coincident, touching end to end, same orientation.
    Continuation { point: Point<D> },
    /// Coincident, touching end to end, opposite orientation.
    ContinuationFlipped { point: Point<D> },
    /// Same end points in the same order.
    Identical,
    /// Same end points in reverse order.
    IdenticalFlipped,
    /// First segment too short; `v` is the parameter on the second segment
    /// closest to the first segment's midpoint.
    TooShortA { v: f64, point_b: Point<D> },
    /// Second segment too short; `u` is the parameter on the first segment
    /// closest to the second segment's midpoint.
    TooShortB { u: f64, point_a: Point<D> },
    /// Both segments too short.
    TooShortBoth,
}

/// Fieldless discriminant of [`LineIntersection`]; each variant means the
/// same as its counterpart there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionKind {
    Intersecting,
    IntersectingEndsBoth,
    IntersectingEndsFirst,
    IntersectingEndsSecond,
    Skew,
    Apart,
    Parallel,
    Overlapping,
    CoincidentApart,
    Continuation,
    ContinuationFlipped,
    Identical,
    IdenticalFlipped,
    TooShortA,
    TooShortB,
    TooShortBoth,
}

impl IntersectionKind {
    /// The kind reported when the two segments are passed in reverse order.
    #[must_use]
    pub fn swapped(self) -> Self {
        match self {
            Self::IntersectingEndsFirst => Self::IntersectingEndsSecond,
            Self::IntersectingEndsSecond => Self::IntersectingEndsFirst,
            Self::TooShortA => Self::TooShortB,
            Self::TooShortB => Self::TooShortA,
            other => other,
        }
    }
}

impl<const D: usize> LineIntersection<D> {
    /// The variant without its payload.
    #[must_use]
    pub fn kind(&self) -> IntersectionKind {
        match self {
            Self::Intersecting { .. } => IntersectionKind::Intersecting,
            Self::IntersectingEndsBoth { .. } => IntersectionKind::IntersectingEndsBoth,
            Self::IntersectingEndsFirst { .. } => IntersectionKind::IntersectingEndsFirst,
            Self::IntersectingEndsSecond { .. } => IntersectionKind::IntersectingEndsSecond,
            Self::Skew(_) => IntersectionKind::Skew,
            Self::Apart(_) => IntersectionKind::Apart,
            Self::Parallel(_) => IntersectionKind::Parallel,
            Self::Overlapping { .. } => IntersectionKind::Overlapping,
            Self::CoincidentApart(_) => IntersectionKind::CoincidentApart,
            Self::Continuation { .. } => IntersectionKind::Continuation,
            Self::ContinuationFlipped { .. } => IntersectionKind::ContinuationFlipped,
            Self::Identical => IntersectionKind::Identical,
            Self::IdenticalFlipped => IntersectionKind::IdenticalFlipped,
            Self::TooShortA { .. } => IntersectionKind::TooShortA,
            Self::TooShortB { .. } => IntersectionKind::TooShortB,
            Self::TooShortBoth => IntersectionKind::TooShortBoth,
        }
    }

    /// `true` if the segments share at least one point.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        matches!(
            self,
            Self::Intersecting { .. }
                | Self::IntersectingEndsBoth { .. }
                | Self::IntersectingEndsFirst { .. }
                | Self::IntersectingEndsSecond { .. }
                | Self::Overlapping { .. }
                | Self::Continuation { .. }
                | Self::ContinuationFlipped { .. }
                | Self::Identical
                | Self::IdenticalFlipped
        )
    }
}

/// Classifies how two finite segments relate.
///
/// Parallel, coincident, short and non-touching inputs are all reported as
/// variants; this never fails.
#[must_use]
pub fn intersect_lines<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    tol: &IntersectionTolerances,
) -> LineIntersection<D> {
    let result = match classify_lines(a, b, tol) {
        LinePairRelation::TooShortBoth => LineIntersection::TooShortBoth,
        LinePairRelation::TooShortA => {
            let v = b.closest_parameter_on_segment(&a.mid_point());
            LineIntersection::TooShortA {
                v,
                point_b: b.evaluate_at(v),
            }
        }
        LinePairRelation::TooShortB => {
            let u = a.closest_parameter_on_segment(&b.mid_point());
            LineIntersection::TooShortB {
                u,
                point_a: a.evaluate_at(u),
            }
        }
        LinePairRelation::Parallel { flipped } => parallel(a, b, flipped, tol),
        LinePairRelation::Coincident { flipped } => coincident(a, b, flipped, tol),
        LinePairRelation::NotParallel => {
            let (u, v) = solve_closest_params(a, b);
            crossing(a, b, u, v, tol)
        }
    };
    tracing::trace!(kind = ?result.kind(), "segment pair classified");
    result
}

/// Query object for a segment pair, configured with
/// [`with_tolerances`](Self::with_tolerances).
#[derive(Debug, Clone, Copy)]
pub struct LineLineIntersect<const D: usize> {
    a: Line<D>,
    b: Line<D>,
    tolerances: IntersectionTolerances,
}

impl<const D: usize> LineLineIntersect<D> {
    /// Creates a new `LineLineIntersect` query with default tolerances.
    #[must_use]
    pub fn new(a: Line<D>, b: Line<D>) -> Self {
        Self {
            a,
            b,
            tolerances: IntersectionTolerances::default(),
        }
    }

    /// Replaces the tolerances used by [`execute`](Self::execute).
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: IntersectionTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Classifies the two segments.
    ///
    /// # Errors
    ///
    /// Returns [`ToleranceError::Invalid`](crate::error::ToleranceError::Invalid)
    /// if the configured tolerances are not usable.
    pub fn execute(&self) -> Result<LineIntersection<D>> {
        self.tolerances.validate()?;
        Ok(intersect_lines(&self.a, &self.b, &self.tolerances))
    }

    /// Intersects the infinite lines through the two segments.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_rays(&self) -> Result<RayIntersection> {
        self.tolerances.validate()?;
        Ok(intersect_rays(&self.a, &self.b, &self.tolerances))
    }
}

/// Non-parallel segments whose rays are closest at `(u, v)`.
fn crossing<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    u: f64,
    v: f64,
    tol: &IntersectionTolerances,
) -> LineIntersection<D> {
    let pu = classify_param(u, tol.param_snap);
    let pv = classify_param(v, tol.param_snap);
    let skew_sq = tol.skew * tol.skew;

    if pu.is_on_segment() && pv.is_on_segment() {
        let cp = ClosestPoints::at(a, b, pu.snap(u), pv.snap(v));
        if cp.distance_squared() <= skew_sq {
            touching(&cp, pu, pv)
        } else {
            LineIntersection::Skew(cp)
        }
    } else {
        let cp = clamped_closest(a, b, u);
        if cp.distance_squared() <= skew_sq {
            snapped_touching(a, b, &cp, tol)
        } else {
            LineIntersection::Apart(cp)
        }
    }
}

/// Closest points of two non-parallel segments, starting from the
/// unclamped ray parameter `u`: clamp it, project onto `b` and clamp, then
/// project back onto `a` and clamp.
fn clamped_closest<const D: usize>(a: &Line<D>, b: &Line<D>, u: f64) -> ClosestPoints<D> {
    let u0 = clamp_to_unit_interval(u);
    let v = b.closest_parameter_on_segment(&a.evaluate_at(u0));
    let u = a.closest_parameter_on_segment(&b.evaluate_at(v));
    ClosestPoints::at(a, b, u, v)
}

/// The touching variant for closest points known to meet.
fn touching<const D: usize>(
    cp: &ClosestPoints<D>,
    pu: ParamPosition,
    pv: ParamPosition,
) -> LineIntersection<D> {
    let (u, v) = (cp.u, cp.v);
    let point = nalgebra::center(&cp.point_a, &cp.point_b);
    match (pu.is_end(), pv.is_end()) {
        (true, true) => LineIntersection::IntersectingEndsBoth { u, v, point },
        (true, false) => LineIntersection::IntersectingEndsFirst { u, v, point },
        (false, true) => LineIntersection::IntersectingEndsSecond { u, v, point },
        (false, false) => LineIntersection::Intersecting { u, v, point },
    }
}

/// Like [`touching`], but first snaps the parameters of `cp` onto the ends.
fn snapped_touching<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    cp: &ClosestPoints<D>,
    tol: &IntersectionTolerances,
) -> LineIntersection<D> {
    let pu = classify_param(cp.u, tol.param_snap);
    let pv = classify_param(cp.v, tol.param_snap);
    touching(&ClosestPoints::at(a, b, pu.snap(cp.u), pv.snap(cp.v)), pu, pv)
}

/// Where the oriented second segment lies along the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Entirely behind the start of `a`.
    Before,
    /// Entirely ahead of the end of `a`.
    After,
    /// Reaches past both ends of `a`.
    Covers,
    /// Starts behind `a` and ends within it.
    OverlapsStart,
    /// Starts within `a` and ends ahead of it.
    OverlapsEnd,
    /// Lies within `a`.
    Inside,
}

/// The second segment re-oriented to run along the first one.
struct Oriented<const D: usize> {
    start: Point<D>,
    end: Point<D>,
    /// Parameters of `start` and `end` on `a`'s ray.
    t_start: f64,
    t_end: f64,
    /// Parameters of `start` and `end` on the original second segment.
    v_start: f64,
    v_end: f64,
    placement: Placement,
}

impl<const D: usize> Oriented<D> {
    fn new(a: &Line<D>, b: &Line<D>, flipped: bool) -> Self {
        let (start, end, v_start, v_end) = if flipped {
            (b.to, b.from, 1.0, 0.0)
        } else {
            (b.from, b.to, 0.0, 1.0)
        };
        let da = a.vector();
        let behind = |p: &Point<D>| da.dot(&(p - a.from)) < 0.0;
        let ahead = |p: &Point<D>| da.dot(&(p - a.to)) > 0.0;

        let placement = match (behind(&start), ahead(&start), behind(&end), ahead(&end)) {
            (true, _, true, _) => Placement::Before,
            (_, true, _, true) => Placement::After,
            (true, _, _, true) => Placement::Covers,
            (true, _, false, false) => Placement::OverlapsStart,
            (false, false, _, true) => Placement::OverlapsEnd,
            _ => Placement::Inside,
        };

        let la_sq = da.norm_squared();
        Self {
            start,
            end,
            t_start: da.dot(&(start - a.from)) / la_sq,
            t_end: da.dot(&(end - a.from)) / la_sq,
            v_start,
            v_end,
            placement,
        }
    }

    /// The stretch of `a`'s domain shared with the second segment, if any.
    fn overlap(&self) -> Option<(f64, f64)> {
        match self.placement {
            Placement::Before | Placement::After => None,
            Placement::Covers => Some((0.0, 1.0)),
            Placement::OverlapsStart => Some((0.0, clamp_to_unit_interval(self.t_end))),
            Placement::OverlapsEnd => Some((clamp_to_unit_interval(self.t_start), 1.0)),
            Placement::Inside => Some((
                clamp_to_unit_interval(self.t_start),
                clamp_to_unit_interval(self.t_end),
            )),
        }
    }

    /// Closest points between the nearest ends when the segments do not
    /// overlap along `a`.
    fn nearest_ends(&self, a: &Line<D>, b: &Line<D>) -> ClosestPoints<D> {
        if self.placement == Placement::Before {
            ClosestPoints::at(a, b, 0.0, self.v_end)
        } else {
            ClosestPoints::at(a, b, 1.0, self.v_start)
        }
    }
}

/// Parallel segments on distinct lines.
fn parallel<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    flipped: bool,
    tol: &IntersectionTolerances,
) -> LineIntersection<D> {
    let o = Oriented::new(a, b, flipped);
    let cp = match o.overlap() {
        Some((lo, hi)) => {
            let u = 0.5 * (lo + hi);
            let v = b.closest_parameter_on_segment(&a.evaluate_at(u));
            ClosestPoints::at(a, b, u, v)
        }
        None => o.nearest_ends(a, b),
    };
    // Nearly parallel segments can still meet at an end of either one.
    let nearest = end_contacts(a, b).into_iter().fold(cp, |best, c| {
        if c.distance_squared() < best.distance_squared() {
            c
        } else {
            best
        }
    });
    if nearest.distance_squared() <= tol.skew * tol.skew {
        snapped_touching(a, b, &nearest, tol)
    } else {
        LineIntersection::Parallel(cp)
    }
}

/// Each endpoint paired with its closest point on the other segment.
fn end_contacts<const D: usize>(a: &Line<D>, b: &Line<D>) -> [ClosestPoints<D>; 4] {
    [
        ClosestPoints::at(a, b, 0.0, b.closest_parameter_on_segment(&a.from)),
        ClosestPoints::at(a, b, 1.0, b.closest_parameter_on_segment(&a.to)),
        ClosestPoints::at(a, b, a.closest_parameter_on_segment(&b.from), 0.0),
        ClosestPoints::at(a, b, a.closest_parameter_on_segment(&b.to), 1.0),
    ]
}

/// Parallel segments on the same line.
fn coincident<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    flipped: bool,
    tol: &IntersectionTolerances,
) -> LineIntersection<D> {
    let o = Oriented::new(a, b, flipped);
    let near_sq = tol.coincident * tol.coincident;
    let near = |p: &Point<D>, q: &Point<D>| nalgebra::distance_squared(p, q) < near_sq;

    if near(&a.from, &o.start) && near(&a.to, &o.end) {
        return if flipped {
            LineIntersection::IdenticalFlipped
        } else {
            LineIntersection::Identical
        };
    }

    let continuation = |point: Point<D>| {
        if flipped {
            LineIntersection::ContinuationFlipped { point }
        } else {
            LineIntersection::Continuation { point }
        }
    };

    match o.overlap() {
        Some((lo, hi)) => {
            let shared = (hi - lo) * a.length();
            if shared > tol.coincident {
                return LineIntersection::Overlapping {
                    u_start: lo,
                    u_end: hi,
                    flipped,
                };
            }
            match o.placement {
                Placement::OverlapsStart => continuation(nalgebra::center(&a.from, &o.end)),
                Placement::OverlapsEnd => continuation(nalgebra::center(&a.to, &o.start)),
                _ => LineIntersection::Overlapping {
                    u_start: lo,
                    u_end: hi,
                    flipped,
                },
            }
        }
        None => {
            let cp = o.nearest_ends(a, b);
            if cp.distance_squared() < near_sq {
                continuation(nalgebra::center(&cp.point_a, &cp.point_b))
            } else {
                LineIntersection::CoincidentApart(cp)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::error::{LinesectError, ToleranceError};
    use crate::geometry::{Line2, Line3};
    use crate::math::{Point2, Point3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn line(a: Point3, b: Point3) -> Line3 {
        Line3::new(a, b)
    }

    fn classify(a: &Line3, b: &Line3) -> LineIntersection<3> {
        intersect_lines(a, b, &IntersectionTolerances::default())
    }

    /// Pairs covering most variants, reused by the symmetry test.
    fn sample_pairs() -> Vec<(Line3, Line3)> {
        let x01 = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let x02 = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let long = line(p(0.0, 0.0, 0.0), p(1000.0, 0.0, 0.0));
        vec![
            (x01, line(p(0.5, -1.0, 0.0), p(0.5, 1.0, 0.0))),
            (x01, line(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0))),
            (x01, line(p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0))),
            (x01, line(p(0.0, 0.0, 1.0), p(1.0, 1.0, 2.0))),
            (line(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0)), line(p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0))),
            (x02, line(p(0.0, 0.0, 0.0), p(-2.0, 0.0, 0.0))),
            (x02, line(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))),
            (x01, line(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))),
            (x02, line(p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0))),
            (x01, line(p(2.0, 1.0, 0.0), p(3.0, 1.0, 0.0))),
            (x02, line(p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0))),
            (x02, x02.reversed()),
            (x02, x02),
            (long, line(p(0.0, 0.0, 0.0), p(1000.0, 3.0, 0.0))),
            (long, line(p(500.0, 0.0, 0.0), p(1500.0, 3.0, 0.0))),
        ]
    }

    // ── scenarios ──

    #[test]
    fn interior_crossing() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(0.5, -1.0, 0.0), p(0.5, 1.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::Intersecting { u, v, point } => {
                assert_relative_eq!(u, 0.5);
                assert_relative_eq!(v, 0.5);
                assert_abs_diff_eq!(point, p(0.5, 0.0, 0.0), epsilon = 1e-12);
            }
            other => panic!("expected Intersecting, got {other:?}"),
        }
    }

    #[test]
    fn collinear_with_gap() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::CoincidentApart(cp) => {
                assert_eq!(cp.u, 1.0);
                assert_eq!(cp.v, 0.0);
                assert_relative_eq!(cp.distance(), 1.0);
            }
            other => panic!("expected CoincidentApart, got {other:?}"),
        }
    }

    #[test]
    fn collinear_continuation() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::Continuation { point } => assert_eq!(point, p(1.0, 0.0, 0.0)),
            other => panic!("expected Continuation, got {other:?}"),
        }
    }

    #[test]
    fn skew_lines_without_near_crossing() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(0.0, 0.0, 1.0), p(1.0, 1.0, 2.0));
        let tol = IntersectionTolerances::default();
        match intersect_lines(&a, &b, &tol) {
            LineIntersection::Apart(cp) | LineIntersection::Skew(cp) => {
                assert!(cp.distance_squared() > tol.skew * tol.skew);
                assert_eq!(cp.point_a, p(0.0, 0.0, 0.0));
                assert_eq!(cp.point_b, p(0.0, 0.0, 1.0));
            }
            other => panic!("expected Apart or Skew, got {other:?}"),
        }
    }

    #[test]
    fn zero_length_first_segment() {
        let a = line(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0));
        let b = line(p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::TooShortA { v, point_b } => {
                assert_relative_eq!(v, b.closest_parameter_on_segment(&a.from));
                assert_relative_eq!(v, 0.5);
                assert_eq!(point_b, p(0.0, 0.0, 0.0));
            }
            other => panic!("expected TooShortA, got {other:?}"),
        }
        match classify(&b, &a) {
            LineIntersection::TooShortB { u, .. } => assert_relative_eq!(u, 0.5),
            other => panic!("expected TooShortB, got {other:?}"),
        }
    }

    #[test]
    fn opposite_directions_meeting_at_origin() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let b = line(p(0.0, 0.0, 0.0), p(-2.0, 0.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::ContinuationFlipped { point } => {
                assert_eq!(point, p(0.0, 0.0, 0.0));
            }
            other => panic!("expected ContinuationFlipped, got {other:?}"),
        }
    }

    // ── other variants ──

    #[test]
    fn end_touching_variants() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let t_junction = line(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0));
        assert_eq!(classify(&a, &t_junction).kind(), IntersectionKind::IntersectingEndsSecond);
        assert_eq!(classify(&t_junction, &a).kind(), IntersectionKind::IntersectingEndsFirst);

        let corner = line(p(2.0, 0.0, 0.0), p(2.0, 3.0, 0.0));
        match classify(&a, &corner) {
            LineIntersection::IntersectingEndsBoth { u, v, point } => {
                assert_eq!(u, 1.0);
                assert_eq!(v, 0.0);
                assert_abs_diff_eq!(point, p(2.0, 0.0, 0.0), epsilon = 1e-12);
            }
            other => panic!("expected IntersectingEndsBoth, got {other:?}"),
        }
    }

    #[test]
    fn skew_inside_both_domains() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let b = line(p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0));
        match classify(&a, &b) {
            LineIntersection::Skew(cp) => {
                assert_relative_eq!(cp.u, 0.5);
                assert_relative_eq!(cp.v, 0.5);
                assert_relative_eq!(cp.distance(), 1.0);
            }
            other => panic!("expected Skew, got {other:?}"),
        }
    }

    #[test]
    fn apart_reports_clamped_points() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(3.0, 1.0, 0.0), p(3.0, 4.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::Apart(cp) => {
                assert_eq!(cp.u, 1.0);
                assert_eq!(cp.v, 0.0);
                assert_eq!(cp.point_a, p(1.0, 0.0, 0.0));
                assert_eq!(cp.point_b, p(3.0, 1.0, 0.0));
            }
            other => panic!("expected Apart, got {other:?}"),
        }
    }

    #[test]
    fn gap_below_skew_tolerance_touches() {
        // Ray crossing lies 5e-7 beyond the end of a 1e-3 long segment.
        let a = line(p(0.0, 0.0, 0.0), p(1e-3, 0.0, 0.0));
        let b = line(p(1e-3 + 5e-7, -1.0, 0.0), p(1e-3 + 5e-7, 1.0, 0.0));
        match classify(&a, &b) {
            LineIntersection::IntersectingEndsFirst { u, v, .. } => {
                assert_eq!(u, 1.0);
                assert_relative_eq!(v, 0.5);
            }
            other => panic!("expected IntersectingEndsFirst, got {other:?}"),
        }
    }

    #[test]
    fn parallel_placements() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let y = |x0: f64, x1: f64| line(p(x0, 1.0, 0.0), p(x1, 1.0, 0.0));

        // Before and after: nearest ends.
        match classify(&a, &y(-3.0, -1.0)) {
            LineIntersection::Parallel(cp) => {
                assert_eq!((cp.u, cp.v), (0.0, 1.0));
                assert_relative_eq!(cp.distance_squared(), 2.0);
            }
            other => panic!("expected Parallel, got {other:?}"),
        }
        match classify(&a, &y(5.0, 3.0)) {
            LineIntersection::Parallel(cp) => {
                assert_eq!((cp.u, cp.v), (1.0, 1.0));
                assert_eq!(cp.point_b, p(3.0, 1.0, 0.0));
            }
            other => panic!("expected Parallel, got {other:?}"),
        }

        // Overlapping extents: midpoint of the shared stretch.
        for (x0, x1, mid) in [
            (-1.0, 3.0, 0.5),
            (-1.0, 1.0, 0.25),
            (1.0, 3.0, 0.75),
            (0.5, 1.5, 0.5),
            (1.5, 0.5, 0.5),
        ] {
            match classify(&a, &y(x0, x1)) {
                LineIntersection::Parallel(cp) => {
                    assert_relative_eq!(cp.u, mid);
                    assert_relative_eq!(cp.distance(), 1.0);
                }
                other => panic!("expected Parallel for {x0}..{x1}, got {other:?}"),
            }
        }
    }

    #[test]
    fn nearly_parallel_shared_start_touches() {
        // 0.17 degrees apart; the far ends are 3 units apart.
        let a = line(p(0.0, 0.0, 0.0), p(1000.0, 0.0, 0.0));
        let b = line(p(0.0, 0.0, 0.0), p(1000.0, 3.0, 0.0));
        for (first, second) in [(a, b), (b, a)] {
            match classify(&first, &second) {
                LineIntersection::IntersectingEndsBoth { u, v, point } => {
                    assert_eq!((u, v), (0.0, 0.0));
                    assert_eq!(point, p(0.0, 0.0, 0.0));
                }
                other => panic!("expected IntersectingEndsBoth, got {other:?}"),
            }
        }
    }

    #[test]
    fn nearly_parallel_end_on_interior_touches() {
        let a = line(p(0.0, 0.0, 0.0), p(1000.0, 0.0, 0.0));
        let c = line(p(500.0, 0.0, 0.0), p(1500.0, 3.0, 0.0));
        match classify(&a, &c) {
            LineIntersection::IntersectingEndsSecond { u, v, point } => {
                assert_relative_eq!(u, 0.5);
                assert_eq!(v, 0.0);
                assert_abs_diff_eq!(point, p(500.0, 0.0, 0.0), epsilon = 1e-9);
            }
            other => panic!("expected IntersectingEndsSecond, got {other:?}"),
        }
        match classify(&c, &a) {
            LineIntersection::IntersectingEndsFirst { u, v, .. } => {
                assert_eq!(u, 0.0);
                assert_relative_eq!(v, 0.5);
            }
            other => panic!("expected IntersectingEndsFirst, got {other:?}"),
        }
        // Lifted off the line by more than the skew tolerance.
        let lifted = line(p(500.0, 0.0, 1e-3), p(1500.0, 3.0, 1e-3));
        assert_eq!(classify(&a, &lifted).kind(), IntersectionKind::Parallel);
    }

    #[test]
    fn overlapping_extents() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        match classify(&a, &line(p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0))) {
            LineIntersection::Overlapping {
                u_start,
                u_end,
                flipped,
            } => {
                assert_relative_eq!(u_start, 0.5);
                assert_relative_eq!(u_end, 1.0);
                assert!(!flipped);
            }
            other => panic!("expected Overlapping, got {other:?}"),
        }
        match classify(&a, &line(p(1.5, 0.0, 0.0), p(0.5, 0.0, 0.0))) {
            LineIntersection::Overlapping {
                u_start,
                u_end,
                flipped,
            } => {
                assert_relative_eq!(u_start, 0.25);
                assert_relative_eq!(u_end, 0.75);
                assert!(flipped);
            }
            other => panic!("expected Overlapping, got {other:?}"),
        }
        let covering = line(p(-1.0, 0.0, 0.0), p(4.0, 0.0, 0.0));
        assert_eq!(classify(&a, &covering).kind(), IntersectionKind::Overlapping);
    }

    #[test]
    fn identical_segments() {
        let a = line(p(0.0, 1.0, 2.0), p(3.0, -1.0, 0.5));
        assert_eq!(classify(&a, &a), LineIntersection::Identical);
        assert_eq!(classify(&a, &a.reversed()), LineIntersection::IdenticalFlipped);
        let nudged = line(a.from + nalgebra::Vector3::new(1e-8, 0.0, 0.0), a.to);
        assert_eq!(classify(&a, &nudged), LineIntersection::Identical);
    }

    #[test]
    fn too_short_both() {
        let a = line(p(0.0, 0.0, 0.0), p(1e-8, 0.0, 0.0));
        let b = line(p(5.0, 0.0, 0.0), p(5.0, 0.0, 0.0));
        assert_eq!(classify(&a, &b), LineIntersection::TooShortBoth);
    }

    #[test]
    fn segments_in_2d() {
        let a = Line2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let b = Line2::new(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0));
        let tol = IntersectionTolerances::default();
        match intersect_lines(&a, &b, &tol) {
            LineIntersection::Intersecting { point, .. } => {
                assert_abs_diff_eq!(point, Point2::new(1.0, 1.0), epsilon = 1e-12);
            }
            other => panic!("expected Intersecting, got {other:?}"),
        }
        let c = Line2::new(Point2::new(3.0, 0.0), Point2::new(4.0, -1.0));
        assert_eq!(intersect_lines(&a, &c, &tol).kind(), IntersectionKind::Apart);
    }

    // ── properties ──

    #[test]
    fn swapping_inputs_swaps_the_kind() {
        for (a, b) in sample_pairs() {
            let ab = classify(&a, &b).kind();
            let ba = classify(&b, &a).kind();
            assert_eq!(ba, ab.swapped(), "{a:?} / {b:?}");
        }
    }

    #[test]
    fn crossing_params_round_trip() {
        let tol = IntersectionTolerances::default();
        let pairs = [
            (line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)), line(p(0.5, -1.0, 0.0), p(0.5, 1.0, 0.0))),
            (line(p(1.0, 2.0, 3.0), p(4.0, 6.0, 3.0)), line(p(3.0, 1.0, 0.0), p(2.0, 7.0, 6.0))),
            (line(p(-5.0, 0.0, 1.0), p(5.0, 0.1, 1.0)), line(p(0.0, -3.0, 1.0), p(0.2, 3.0, 1.0))),
        ];
        for (a, b) in pairs {
            match intersect_lines(&a, &b, &tol) {
                LineIntersection::Intersecting { u, v, .. } => {
                    let gap = nalgebra::distance(&a.evaluate_at(u), &b.evaluate_at(v));
                    assert!(gap <= tol.skew, "gap {gap} for {a:?} / {b:?}");
                }
                other => panic!("expected Intersecting, got {other:?}"),
            }
        }
    }

    #[test]
    fn parallel_verdict_survives_scaling() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0));
        for k in [1e-4, 0.5, 2.0, 1e5] {
            let scaled = line(a.from, a.from + a.vector() * k);
            assert_eq!(classify(&scaled, &b).kind(), IntersectionKind::Parallel, "k = {k}");
        }
    }

    #[test]
    fn shared_endpoint_always_touches() {
        let q = p(0.3, 1.7, -2.1);
        let others = [
            p(1.3, 2.7, 0.9),
            p(-4.0, 0.25, 3.0),
            p(0.3, 9.0, -2.1),
            p(7.7, -1.0, -6.5),
        ];
        let allowed = [
            IntersectionKind::IntersectingEndsBoth,
            IntersectionKind::IntersectingEndsFirst,
            IntersectionKind::IntersectingEndsSecond,
            IntersectionKind::Continuation,
            IntersectionKind::ContinuationFlipped,
        ];
        for (i, &x) in others.iter().enumerate() {
            for &y in &others[i + 1..] {
                for (a, b) in [
                    (line(q, x), line(q, y)),
                    (line(x, q), line(q, y)),
                    (line(x, q), line(y, q)),
                ] {
                    let kind = classify(&a, &b).kind();
                    assert!(allowed.contains(&kind), "{kind:?} for {a:?} / {b:?}");
                }
            }
        }
        // Nearly parallel and diverging from the shared point.
        let far = line(p(0.0, 0.0, 0.0), p(1000.0, 0.0, 0.0));
        let near = line(p(0.0, 0.0, 0.0), p(1000.0, 3.0, 0.0));
        for (a, b) in [
            (far, near),
            (far.reversed(), near),
            (far.reversed(), near.reversed()),
        ] {
            let kind = classify(&a, &b).kind();
            assert!(allowed.contains(&kind), "{kind:?} for {a:?} / {b:?}");
        }
        // Collinear and pointing away from each other.
        let kind = classify(&line(p(-1.0, 0.0, 0.0), q), &line(q, q + (q - p(-1.0, 0.0, 0.0)))).kind();
        assert_eq!(kind, IntersectionKind::Continuation);
    }

    #[test]
    fn touching_helper() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert!(classify(&a, &a).is_touching());
        assert!(!classify(&a, &line(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0))).is_touching());
    }

    // ── query object ──

    #[test]
    fn query_object_validates_tolerances() {
        let a = line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = line(p(0.5, -1.0, 0.0), p(0.5, 1.0, 0.0));
        let query = LineLineIntersect::new(a, b);
        assert_eq!(query.execute().unwrap().kind(), IntersectionKind::Intersecting);
        assert_eq!(
            query.execute_rays().unwrap(),
            RayIntersection::TwoParam { u: 0.5, v: 0.5 }
        );

        let bad = query.with_tolerances(IntersectionTolerances {
            param_snap: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            bad.execute(),
            Err(LinesectError::Tolerance(ToleranceError::Invalid { name: "param_snap", .. }))
        ));
    }

    #[test]
    fn custom_skew_tolerance_turns_skew_into_crossing() {
        let a = line(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let b = line(p(1.0, -1.0, 1e-3), p(1.0, 1.0, 1e-3));
        assert_eq!(classify(&a, &b).kind(), IntersectionKind::Skew);
        let loose = IntersectionTolerances {
            skew: 1e-2,
            ..Default::default()
        };
        let result = LineLineIntersect::new(a, b).with_tolerances(loose).execute().unwrap();
        assert_eq!(result.kind(), IntersectionKind::Intersecting);
    }
}
