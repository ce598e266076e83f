//! Browser bridge for the night-sky overlay.
//!
//! Exposes free `#[wasm_bindgen]` functions over a single `thread_local!`
//! [`SkyRunner`]. Frames are driven by `requestAnimationFrame`; orientation
//! samples, toggles and resizes are queued and applied on the next frame.
//!
//! ```js
//! import init, { sky_start, sky_listen_orientation } from "./nocturne_web.js";
//! await init();
//! sky_start("sky", undefined, JSON.stringify({ animal_mode: "placed" }));
//! sky_listen_orientation();
//! ```

pub mod runner;
pub mod surface;

pub use runner::{measure_window, size_canvas, PendingResize, RafScheduler, SkyRunner};
pub use surface::Canvas2dSurface;

use std::cell::{Cell, RefCell};

use nocturne_engine::{SkyConfig, SkyEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, DeviceOrientationEvent, HtmlCanvasElement, Window};

thread_local! {
    static RUNNER: RefCell<Option<SkyRunner>> = RefCell::new(None);
    static FRAME_CALLBACK: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
    static LOOP_RUNNING: Cell<bool> = const { Cell::new(false) };
    static RESIZE_LISTENING: Cell<bool> = const { Cell::new(false) };
    static ORIENTATION_LISTENING: Cell<bool> = const { Cell::new(false) };
}

fn with_runner<R>(f: impl FnOnce(&mut SkyRunner) -> R) -> Result<R, JsValue> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Sky not started. Call sky_start() first."))?;
        Ok(f(runner))
    })
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn request_animation_frame() -> Result<i32, JsValue> {
    let window = window()?;
    FRAME_CALLBACK.with(|cell| {
        let borrow = cell.borrow();
        let callback = borrow
            .as_ref()
            .ok_or_else(|| JsValue::from_str("frame callback not installed"))?;
        window.request_animation_frame(callback.as_ref().unchecked_ref())
    })
}

fn on_animation_frame(now_ms: f64) {
    let again = RUNNER.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|runner| runner.frame(now_ms))
            .unwrap_or(false)
    });
    if !again {
        LOOP_RUNNING.with(|running| running.set(false));
        log::debug!("Frame loop stopped");
        return;
    }
    if let Err(e) = request_animation_frame() {
        LOOP_RUNNING.with(|running| running.set(false));
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

fn start_frame_loop() -> Result<(), JsValue> {
    FRAME_CALLBACK.with(|cell| {
        let mut borrow = cell.borrow_mut();
        if borrow.is_none() {
            *borrow = Some(Closure::<dyn FnMut(f64)>::new(on_animation_frame));
        }
    });
    if LOOP_RUNNING.with(Cell::get) {
        return Ok(());
    }
    request_animation_frame()?;
    LOOP_RUNNING.with(|running| running.set(true));
    Ok(())
}

fn listen_resize(window: &Window) -> Result<(), JsValue> {
    if RESIZE_LISTENING.with(Cell::get) {
        return Ok(());
    }
    let on_resize = Closure::<dyn FnMut()>::new(|| {
        if let Err(e) = sky_resize() {
            log::warn!("resize failed: {:?}", e);
        }
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    RESIZE_LISTENING.with(|listening| listening.set(true));
    Ok(())
}

/// Start (or restart) the sky on the canvas with id `canvas_id`.
///
/// `seed` defaults to the current time. `config_json` is a partial
/// `SkyConfig`; missing fields take their defaults.
#[wasm_bindgen]
pub fn sky_start(canvas_id: &str, seed: Option<u32>, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => SkyConfig::from_json(json).map_err(|e| JsValue::from_str(&format!("invalid sky config: {}", e)))?,
        None => SkyConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64 as u32);

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let runner = SkyRunner::new(&window, canvas, ctx, seed, config)?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    listen_resize(&window)?;
    start_frame_loop()
}

/// Drop the sky. The frame loop ends at its next callback.
#[wasm_bindgen]
pub fn sky_stop() {
    if RUNNER.with(|cell| cell.borrow_mut().take()).is_some() {
        log::info!("Sky stopped");
    }
}

/// Refit the canvas to the window.
#[wasm_bindgen]
pub fn sky_resize() -> Result<(), JsValue> {
    let window = window()?;
    with_runner(|r| r.fit(&window))?.map(|_| ())
}

/// Feed a device-orientation sample in degrees. Samples without `alpha` are ignored.
#[wasm_bindgen]
pub fn sky_orientation(alpha: Option<f32>, beta: f32, gamma: f32) -> Result<(), JsValue> {
    with_runner(|r| r.push_event(SkyEvent::Orientation { alpha, beta, gamma }))
}

#[wasm_bindgen]
pub fn sky_show_lines(on: bool) -> Result<(), JsValue> {
    with_runner(|r| r.push_event(SkyEvent::ShowLines(on)))
}

#[wasm_bindgen]
pub fn sky_show_animals(on: bool) -> Result<(), JsValue> {
    with_runner(|r| r.push_event(SkyEvent::ShowAnimals(on)))
}

/// Rounded compass heading from the last orientation sample.
#[wasm_bindgen]
pub fn sky_heading() -> Option<i32> {
    with_runner(|r| r.state().heading_degrees()).ok().flatten()
}

/// Subscribe to `deviceorientation` events.
///
/// Permission prompts stay with the page; without a sensor no samples arrive
/// and the sky keeps drifting.
#[wasm_bindgen]
pub fn sky_listen_orientation() -> Result<(), JsValue> {
    if ORIENTATION_LISTENING.with(Cell::get) {
        return Ok(());
    }
    let on_orientation = Closure::<dyn FnMut(DeviceOrientationEvent)>::new(|e: DeviceOrientationEvent| {
        let alpha = e.alpha().map(|a| a as f32);
        let beta = e.beta().unwrap_or(0.0) as f32;
        let gamma = e.gamma().unwrap_or(0.0) as f32;
        // samples arriving before sky_start are dropped
        let _ = sky_orientation(alpha, beta, gamma);
    });
    window()?.add_event_listener_with_callback(
        "deviceorientation",
        on_orientation.as_ref().unchecked_ref(),
    )?;
    on_orientation.forget();
    ORIENTATION_LISTENING.with(|listening| listening.set(true));
    log::info!("Listening for device orientation");
    Ok(())
}
