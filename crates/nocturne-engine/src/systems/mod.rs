pub mod animals;
pub mod constellations;
pub mod effects;
pub mod starfield;
pub mod stroke_progress;
