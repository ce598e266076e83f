/// Asks the host for another frame callback.
///
/// The browser bridge backs this with `requestAnimationFrame`; tests count calls.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only records requests. The caller drives frames by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    requested: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet consumed by `take_request`.
    pub fn pending(&self) -> u32 {
        self.requested
    }

    /// Consume a pending request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.requested == 0 {
            return false;
        }
        self.requested -= 1;
        true
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_requests() {
        let mut s = ManualScheduler::new();
        s.request_frame();
        s.request_frame();
        assert_eq!(s.pending(), 2);
        assert!(s.take_request());
        assert!(s.take_request());
        assert!(!s.take_request());
        assert_eq!(s.pending(), 0);
    }
}
