pub mod tolerance;
pub mod vector;

/// Point in `D` dimensions.
pub type Point<const D: usize> = nalgebra::Point<f64, D>;

/// Vector in `D` dimensions.
pub type Vector<const D: usize> = nalgebra::SVector<f64, D>;

/// 2D point type.
pub type Point2 = Point<2>;

/// 3D point type.
pub type Point3 = Point<3>;

/// 2D vector type.
pub type Vector2 = Vector<2>;

/// 3D vector type.
pub type Vector3 = Vector<3>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Below this length a vector is treated as exactly zero.
pub const TOO_TINY: f64 = 1e-12;

/// Square of [`TOO_TINY`].
pub const TOO_TINY_SQ: f64 = TOO_TINY * TOO_TINY;

/// Below this length a line has no usable direction.
pub const TOO_SHORT: f64 = 1e-6;

/// Default distance under which two parallel lines count as coincident.
pub const COINCIDENT: f64 = 1e-6;

/// Default distance under which two closest points count as touching.
pub const SKEW: f64 = 1e-6;

/// Default absolute snap of a segment parameter onto 0.0 or 1.0.
pub const PARAM_SNAP: f64 = 1e-6;
