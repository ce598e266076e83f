use glam::{Affine2, Vec2};
use nocturne_engine::renderer::paint::{ColorStop, LineCap, LineJoin};
use nocturne_engine::{Color, Font, Paint, Path, PathEl, Shadow, StrokeStyle, Surface, Viewport};
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

/// [`Surface`] backed by a browser `CanvasRenderingContext2d`.
///
/// Save/restore, transform, alpha and shadow map onto the context's own state
/// stack. The base transform scales logical pixels to device pixels.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        let mut surface = Self { ctx, viewport };
        surface.reset_base_transform();
        surface
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Call after the canvas backing store was resized; resizing resets context state.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset_base_transform();
    }

    fn reset_base_transform(&mut self) {
        let dpr = f64::from(self.viewport.pixel_ratio);
        check("setTransform", self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0));
    }

    fn trace_path(&self, path: &Path) {
        self.ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.ctx.move_to(p.x.into(), p.y.into()),
                PathEl::LineTo(p) => self.ctx.line_to(p.x.into(), p.y.into()),
                PathEl::QuadTo { ctrl, to } => {
                    self.ctx
                        .quadratic_curve_to(ctrl.x.into(), ctrl.y.into(), to.x.into(), to.y.into())
                }
                PathEl::Arc { center, radius, start, end } => check(
                    "arc",
                    self.ctx.arc(
                        center.x.into(),
                        center.y.into(),
                        f64::from(radius.max(0.0)),
                        start.into(),
                        end.into(),
                    ),
                ),
                PathEl::Close => self.ctx.close_path(),
            }
        }
    }

    fn gradient(&self, paint: &Paint) -> Result<Option<CanvasGradient>, JsValue> {
        let (gradient, stops) = match paint {
            Paint::Solid(_) => return Ok(None),
            Paint::Linear(g) => (
                self.ctx.create_linear_gradient(
                    g.start.x.into(),
                    g.start.y.into(),
                    g.end.x.into(),
                    g.end.y.into(),
                ),
                &g.stops,
            ),
            Paint::Radial(g) => (
                self.ctx.create_radial_gradient(
                    g.center.x.into(),
                    g.center.y.into(),
                    f64::from(g.inner_radius.max(0.0)),
                    g.center.x.into(),
                    g.center.y.into(),
                    f64::from(g.outer_radius.max(0.0)),
                )?,
                &g.stops,
            ),
        };
        add_stops(&gradient, stops)?;
        Ok(Some(gradient))
    }

    fn apply_fill(&self, paint: &Paint) {
        match self.gradient(paint) {
            Ok(Some(g)) => self.ctx.set_fill_style_canvas_gradient(&g),
            Ok(None) => self.ctx.set_fill_style_str(&paint.primary_color().to_css()),
            Err(e) => {
                log::warn!("gradient fill failed: {:?}", e);
                self.ctx.set_fill_style_str(&paint.primary_color().to_css());
            }
        }
    }

    fn apply_stroke(&self, paint: &Paint, style: &StrokeStyle) {
        match self.gradient(paint) {
            Ok(Some(g)) => self.ctx.set_stroke_style_canvas_gradient(&g),
            Ok(None) => self.ctx.set_stroke_style_str(&paint.primary_color().to_css()),
            Err(e) => {
                log::warn!("gradient stroke failed: {:?}", e);
                self.ctx.set_stroke_style_str(&paint.primary_color().to_css());
            }
        }
        self.ctx.set_line_width(style.width.into());
        self.ctx.set_line_cap(line_cap_css(style.cap));
        self.ctx.set_line_join(line_join_css(style.join));
    }
}

impl Surface for Canvas2dSurface {
    fn logical_size(&self) -> Vec2 {
        self.viewport.size()
    }

    fn pixel_ratio(&self) -> f32 {
        self.viewport.pixel_ratio
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.viewport.width.into(), self.viewport.height.into());
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn transform(&mut self, xf: Affine2) {
        let [a, b, c, d, e, f] = canvas_matrix(&xf);
        check("transform", self.ctx.transform(a, b, c, d, e, f));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0).into());
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        match shadow {
            Some(s) => {
                self.ctx.set_shadow_color(&s.color.to_css());
                self.ctx.set_shadow_blur(s.blur.max(0.0).into());
            }
            None => {
                self.ctx.set_shadow_color(&Color::TRANSPARENT.to_css());
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        self.trace_path(path);
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle) {
        if path.is_empty() {
            return;
        }
        self.trace_path(path);
        self.apply_stroke(paint, style);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &Font, color: Color) {
        self.ctx.set_font(&font.css);
        self.ctx.set_fill_style_str(&color.to_css());
        check("fillText", self.ctx.fill_text(text, at.x.into(), at.y.into()));
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), JsValue> {
    for stop in stops {
        gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())?;
    }
    Ok(())
}

/// Canvas `transform(a, b, c, d, e, f)` arguments for an affine map.
fn canvas_matrix(xf: &Affine2) -> [f64; 6] {
    let m = xf.matrix2;
    let t = xf.translation;
    [
        m.x_axis.x.into(),
        m.x_axis.y.into(),
        m.y_axis.x.into(),
        m.y_axis.y.into(),
        t.x.into(),
        t.y.into(),
    ]
}

fn line_cap_css(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

fn line_join_css(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

fn check(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("canvas {} failed: {:?}", op, e);
    }
}
