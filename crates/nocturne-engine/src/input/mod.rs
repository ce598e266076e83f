pub mod orientation;
pub mod queue;

pub use orientation::OrientationState;
pub use queue::{EventQueue, SkyEvent};
