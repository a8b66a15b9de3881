pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pocket;

pub use error::{GeometryError, Result, TenonProblem};
pub use geometry::{Endpoint, Polygon, Rotation, Segment};
pub use math::{Point2, Tolerances};
pub use pocket::{plan_pocket, CutDirection, PocketConfig, PocketPlan, PocketRegion};
