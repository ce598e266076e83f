pub mod animals;
pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod sky;
pub mod systems;

// Re-export key types at crate root for convenience
pub use animals::{library, place_animals, spotlight_instance, AnimalInstance, AnimalShape, PlacementParams};
pub use api::config::{AnimalMode, ConstellationMode, SkyConfig};
pub use api::scheduler::{FrameScheduler, ManualScheduler};
pub use api::sky::SkyState;
pub use core::rng::Rng;
pub use core::time::{CycleTimer, FrameClock};
pub use core::viewport::{Bounds, Viewport};
pub use input::{EventQueue, OrientationState, SkyEvent};
pub use renderer::color::Color;
pub use renderer::paint::{ColorStop, Font, LineCap, LineJoin, Paint, Shadow, StrokeStyle};
pub use renderer::path::{Path, PathEl};
pub use renderer::recording::{DrawCommand, RecordingSurface};
pub use renderer::surface::Surface;
pub use sky::{build_constellations, create_stars, Constellation, ConstellationParams, Sky, Star};
pub use systems::effects::{AmbientEffects, EffectsConfig};
pub use systems::stroke_progress::{draw_shape_progress, ProgressStyle};

#[cfg(feature = "vectors")]
pub use renderer::vector::{TessellatingSurface, VectorVertex};
