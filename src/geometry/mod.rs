pub mod bounding_box;
pub mod endpoint;
pub mod polygon;
pub mod segment;

pub use bounding_box::BoundingBox;
pub use endpoint::{Endpoint, Rotation};
pub use polygon::Polygon;
pub use segment::Segment;
