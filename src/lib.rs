pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{LinesectError, Result};
pub use geometry::{Line, Line2, Line3};
pub use operations::query::{
    intersect_lines, intersect_rays, IntersectionKind, IntersectionTolerances, LineIntersection,
};
