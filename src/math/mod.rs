pub mod angle_2d;
pub mod intersect_2d;
pub mod normal_3d;
mod tolerance;

pub use tolerance::Tolerances;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D point type, only used for loops coming from the modelling front end.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
///
/// Also used for segment exit vectors `(dx, dy, curvature)`.
pub type Vector3 = nalgebra::Vector3<f64>;
