/// Variable-rate frame clock fed by display-refresh timestamps.
///
/// Converts absolute millisecond timestamps into clamped per-frame deltas.
/// There is no accumulator and no catch-up: a long stall (tab resume, busy
/// host) produces a single frame with `max_dt`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Upper bound for a single frame delta, in seconds.
    max_dt: f32,
    /// Timestamp of the first frame, in milliseconds.
    start_ms: Option<f64>,
    /// Timestamp of the previous frame, in milliseconds.
    last_ms: f64,
    /// Delta of the most recent frame, in seconds.
    dt: f32,
}

impl FrameClock {
    /// Negative or NaN `max_dt` is treated as 0.
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            start_ms: None,
            last_ms: 0.0,
            dt: 0.0,
        }
    }

    /// Register a new frame at `now_ms`. Returns the clamped delta in seconds.
    /// The first frame always yields 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        if self.start_ms.is_none() {
            self.start_ms = Some(now_ms);
            self.last_ms = now_ms;
        }
        let raw = ((now_ms - self.last_ms) / 1000.0) as f32;
        self.dt = raw.clamp(0.0, self.max_dt);
        self.last_ms = now_ms;
        self.dt
    }

    /// Delta of the last `tick`, in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds since the first frame.
    pub fn elapsed_secs(&self) -> f32 {
        match self.start_ms {
            Some(start) => ((self.last_ms - start) / 1000.0) as f32,
            None => 0.0,
        }
    }

    /// The clamp applied to frame deltas.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

/// Rotates through `len` items on a fixed period.
///
/// The first call to [`CycleTimer::advance`] arms the timer; afterwards the
/// index moves forward once `now` passes the deadline and the deadline is
/// re-armed relative to that frame.
#[derive(Debug, Clone)]
pub struct CycleTimer {
    period_ms: f64,
    next_at_ms: Option<f64>,
    index: usize,
    len: usize,
}

impl CycleTimer {
    pub fn new(period_ms: f64, len: usize) -> Self {
        Self {
            period_ms,
            next_at_ms: None,
            index: 0,
            len,
        }
    }

    /// Advance to `now_ms`. Returns true when the index moved on this call.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        match self.next_at_ms {
            None => {
                self.next_at_ms = Some(now_ms + self.period_ms);
                false
            }
            Some(deadline) if now_ms > deadline => {
                if self.len > 0 {
                    self.index = (self.index + 1) % self.len;
                }
                self.next_at_ms = Some(now_ms + self.period_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Fraction of the current period elapsed at `now_ms`, clamped to [0, 1].
    pub fn progress(&self, now_ms: f64) -> f32 {
        match self.next_at_ms {
            Some(deadline) if self.period_ms > 0.0 => {
                let remaining = deadline - now_ms;
                ((self.period_ms - remaining) / self.period_ms).clamp(0.0, 1.0) as f32
            }
            _ => 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}
