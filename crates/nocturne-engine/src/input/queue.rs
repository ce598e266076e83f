use crate::core::viewport::Viewport;

/// Events the sky reacts to.
/// Pushed by the host between frames, drained at the start of the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkyEvent {
    /// A device-orientation sample, angles in degrees.
    /// `alpha` (compass) is missing on some devices.
    Orientation {
        alpha: Option<f32>,
        beta: f32,
        gamma: f32,
    },
    /// Show or hide constellation lines.
    ShowLines(bool),
    /// Show or hide animal figures.
    ShowAnimals(bool),
    /// The drawing area changed size.
    Resize(Viewport),
}

/// A queue of sky events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct EventQueue {
    events: Vec<SkyEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: SkyEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<SkyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
