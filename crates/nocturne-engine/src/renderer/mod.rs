pub mod color;
pub mod paint;
pub mod path;
pub mod recording;
pub mod surface;
#[cfg(feature = "vectors")]
pub mod vector;
