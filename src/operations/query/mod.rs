mod contact;
mod distance;
mod point_in_polygon;
mod validity;

pub use contact::{boundaries_touch, contact_points};
pub use distance::distance_to_polygon;
pub use point_in_polygon::{is_inside, point_in_polygon, Containment};
pub use validity::{validate, IsValid};
