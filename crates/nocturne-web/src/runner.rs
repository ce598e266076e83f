use nocturne_engine::{FrameScheduler, SkyConfig, SkyEvent, SkyState, Viewport};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::surface::Canvas2dSurface;

/// Records whether the frame asked for a follow-up `requestAnimationFrame`.
///
/// The bridge owns the actual callback; this only carries the request out of
/// `SkyState::frame`.
#[derive(Debug, Default)]
pub struct RafScheduler {
    requested: bool,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending request and clears it.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// Window size waiting for the next frame, so the canvas backing store and
/// the sky layout switch on the same frame.
#[derive(Debug, Default)]
pub struct PendingResize {
    next: Option<Viewport>,
}

impl PendingResize {
    /// Queue `measured` unless it matches what the next frame will use.
    /// Returns whether a new size was queued.
    pub fn request(&mut self, current: Viewport, measured: Viewport) -> bool {
        if measured == self.next.unwrap_or(current) {
            return false;
        }
        self.next = Some(measured);
        true
    }

    pub fn take(&mut self) -> Option<Viewport> {
        self.next.take()
    }
}

/// Wires a [`SkyState`] to a browser canvas.
///
/// The bridge keeps one of these in a `thread_local!` and drives it from the
/// animation-frame callback, because wasm-bindgen cannot export the state directly.
pub struct SkyRunner {
    state: SkyState,
    surface: Canvas2dSurface,
    canvas: HtmlCanvasElement,
    scheduler: RafScheduler,
    pending: PendingResize,
}

impl SkyRunner {
    /// Size the canvas to the window and generate the sky.
    pub fn new(
        window: &Window,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        seed: u32,
        config: SkyConfig,
    ) -> Result<Self, JsValue> {
        let viewport = measure_window(window)?;
        size_canvas(&canvas, viewport)?;
        let state = SkyState::new(seed, config, viewport);
        let surface = Canvas2dSurface::new(ctx, viewport);
        log::info!(
            "Sky started: seed {} {}x{} @{}x",
            seed,
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        Ok(Self {
            state,
            surface,
            canvas,
            scheduler: RafScheduler::new(),
            pending: PendingResize::default(),
        })
    }

    pub fn push_event(&mut self, event: SkyEvent) {
        self.state.push_event(event);
    }

    /// Draw one frame. Returns whether another frame was requested.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if let Some(viewport) = self.pending.take() {
            if let Err(e) = size_canvas(&self.canvas, viewport) {
                log::warn!("canvas resize failed: {:?}", e);
            }
            self.surface.set_viewport(viewport);
        }
        self.state.frame(now_ms, &mut self.surface, &mut self.scheduler);
        self.scheduler.take()
    }

    /// Measure the window and queue the new viewport.
    ///
    /// The canvas, surface and sky all switch at the start of the next frame.
    pub fn fit(&mut self, window: &Window) -> Result<Viewport, JsValue> {
        let viewport = measure_window(window)?;
        if self.pending.request(self.state.viewport(), viewport) {
            self.state.push_event(SkyEvent::Resize(viewport));
        }
        Ok(viewport)
    }

    pub fn state(&self) -> &SkyState {
        &self.state
    }
}

/// Logical window size and device pixel ratio.
pub fn measure_window(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
    let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
    Ok(Viewport::new(width, height, window.device_pixel_ratio() as f32))
}

/// Match the canvas backing store and CSS size to `viewport`.
pub fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) -> Result<(), JsValue> {
    let (pw, ph) = viewport.pixel_size();
    if canvas.width() != pw || canvas.height() != ph {
        canvas.set_width(pw);
        canvas.set_height(ph);
    }
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_request_is_consumed_once() {
        let mut s = RafScheduler::new();
        assert!(!s.take());
        s.request_frame();
        s.request_frame();
        assert!(s.take());
        assert!(!s.take());
    }

    #[test]
    fn resize_waits_for_the_next_frame() {
        let desktop = Viewport::new(1280.0, 720.0, 1.0);
        let phone = Viewport::new(390.0, 844.0, 3.0);
        let mut pending = PendingResize::default();

        assert!(!pending.request(desktop, desktop));
        assert!(pending.request(desktop, phone));
        // repeated resize events before the frame queue nothing new
        assert!(!pending.request(desktop, phone));
        assert_eq!(pending.take(), Some(phone));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn resize_back_before_the_frame_is_kept() {
        let desktop = Viewport::new(1280.0, 720.0, 1.0);
        let phone = Viewport::new(390.0, 844.0, 3.0);
        let mut pending = PendingResize::default();
        assert!(pending.request(desktop, phone));
        assert!(pending.request(desktop, desktop));
        assert_eq!(pending.take(), Some(desktop));
    }
}
