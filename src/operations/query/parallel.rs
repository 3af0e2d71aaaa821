use crate::error::Result;
use crate::geometry::Line;
use crate::math::tolerance::{is_too_tiny_squared, relative_angle_discriminant, RelAngleDiscriminant};
use crate::math::vector::{check_direction, cross_squared};
use crate::math::{Point, Vector};

use super::IntersectionTolerances;

/// How the directions of two lines relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePairRelation {
    /// Both lines are shorter than the too-short tolerance.
    TooShortBoth,
    /// Only the first line is too short.
    TooShortA,
    /// Only the second line is too short.
    TooShortB,
    /// Parallel on distinct infinite lines. `flipped` if they point in
    /// opposite directions.
    Parallel { flipped: bool },
    /// Parallel on the same infinite line.
    Coincident { flipped: bool },
    /// Directions differ; the lines cross or are skew.
    NotParallel,
}

/// Relative parallelism test on two direction vectors.
///
/// Compares the squared sine of the angle between `a` and `b` against
/// `rel`, so the verdict does not depend on the vector lengths.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`](crate::error::GeometryError::TooShort)
/// if either vector is too tiny to have a direction.
pub fn is_parallel<const D: usize>(
    a: &Vector<D>,
    b: &Vector<D>,
    rel: RelAngleDiscriminant,
) -> Result<bool> {
    check_direction("is_parallel", a)?;
    check_direction("is_parallel", b)?;
    let dot = a.dot(b);
    Ok(relative_angle_discriminant(cross_squared(a, b), dot * dot) < rel.value())
}

/// Absolute parallelism test: `|a x b|² < min_cross_sq`.
///
/// The threshold is a squared parallelogram area, so it only makes sense
/// when the caller knows the scale of both vectors. Cheaper than
/// [`is_parallel`] and never fails; zero vectors count as parallel.
#[must_use]
pub fn is_parallel_fast<const D: usize>(a: &Vector<D>, b: &Vector<D>, min_cross_sq: f64) -> bool {
    cross_squared(a, b) < min_cross_sq
}

/// Like [`is_parallel`], but also requires `a.b > 0`.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`](crate::error::GeometryError::TooShort)
/// if either vector is too tiny.
pub fn is_parallel_and_same_orientation<const D: usize>(
    a: &Vector<D>,
    b: &Vector<D>,
    rel: RelAngleDiscriminant,
) -> Result<bool> {
    Ok(is_parallel(a, b, rel)? && a.dot(b) > 0.0)
}

/// Relative perpendicularity test; `rel` bounds the squared cosine.
///
/// # Errors
///
/// Returns [`GeometryError::TooShort`](crate::error::GeometryError::TooShort)
/// if either vector is too tiny.
pub fn is_perpendicular<const D: usize>(
    a: &Vector<D>,
    b: &Vector<D>,
    rel: RelAngleDiscriminant,
) -> Result<bool> {
    check_direction("is_perpendicular", a)?;
    check_direction("is_perpendicular", b)?;
    let dot = a.dot(b);
    Ok(relative_angle_discriminant(dot * dot, cross_squared(a, b)) < rel.value())
}

/// Classifies the directions of two lines.
///
/// Length is checked before angle: too-short lines never reach the
/// parallel test. Parallel lines are coincident when both ends of the
/// shorter line lie within `tol.coincident` of the longer line's ray.
/// Lines of equal length must each lie on the other's ray.
#[must_use]
pub fn classify_lines<const D: usize>(
    a: &Line<D>,
    b: &Line<D>,
    tol: &IntersectionTolerances,
) -> LinePairRelation {
    let va = a.vector();
    let vb = b.vector();
    let la_sq = va.norm_squared();
    let lb_sq = vb.norm_squared();
    let min_sq = tol.too_short * tol.too_short;

    match (is_too_tiny_squared(la_sq, min_sq), is_too_tiny_squared(lb_sq, min_sq)) {
        (true, true) => return LinePairRelation::TooShortBoth,
        (true, false) => return LinePairRelation::TooShortA,
        (false, true) => return LinePairRelation::TooShortB,
        (false, false) => {}
    }

    let dot = va.dot(&vb);
    let rel = relative_angle_discriminant(cross_squared(&va, &vb), dot * dot);
    if rel >= tol.rel_angle.value() {
        tracing::trace!(rel, "directions not parallel");
        return LinePairRelation::NotParallel;
    }

    let flipped = dot < 0.0;
    let miss_sq = if la_sq > lb_sq {
        ends_miss_squared(b, a)
    } else if lb_sq > la_sq {
        ends_miss_squared(a, b)
    } else {
        ends_miss_squared(a, b).max(ends_miss_squared(b, a))
    };
    let relation = if miss_sq < tol.coincident * tol.coincident {
        LinePairRelation::Coincident { flipped }
    } else {
        LinePairRelation::Parallel { flipped }
    };
    tracing::trace!(rel, miss_sq, ?relation, "parallel directions");
    relation
}

/// Largest squared distance from an endpoint of `short` to the ray of `long`.
fn ends_miss_squared<const D: usize>(short: &Line<D>, long: &Line<D>) -> f64 {
    let dir = long.vector();
    let dir_sq = dir.norm_squared();
    let miss = |p: Point<D>| cross_squared(&(p - long.from), &dir) / dir_sq;
    miss(short.from).max(miss(short.to))
}
