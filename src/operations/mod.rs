pub mod boolean;
pub mod cleanup;
pub mod cut;
pub mod iteration;
pub mod offset;
pub mod query;
pub mod trace;

pub use boolean::{add, relation, subtract, Add, PolygonWithHoles, Relation, Subtract};
pub use cleanup::cleanup;
pub use offset::{offset, OffsetDirection, PolygonOffset};
pub use query::{point_in_polygon, validate, Containment, IsValid};
