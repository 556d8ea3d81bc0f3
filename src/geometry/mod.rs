pub mod bounding_box;
pub mod grid_index;
pub mod polygon;
pub mod ring;
pub mod segment;

pub use bounding_box::Aabb2;
pub use grid_index::GridIndex;
pub use polygon::PolygonWithHoles;
pub use ring::{Orientation, SimplePolygon};
pub use segment::{PointKey, Segment, SegmentKey};
