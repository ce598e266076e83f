pub mod placement;
pub mod shapes;

pub use placement::{place_animals, spotlight_instance, target_count, AnimalInstance, PlacementParams};
pub use shapes::{library, AnimalShape, ShapePoint};
