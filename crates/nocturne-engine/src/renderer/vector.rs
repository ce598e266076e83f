//! Lyon-based tessellating surface.
//!
//! Turns the sky's draw calls into a flat triangle list with per-vertex
//! color, for hosts that render through WebGPU instead of Canvas2D.
//! Gradients are evaluated per vertex; shadows become a translucent halo
//! pass under the shape; text is not rasterized.
//!
//! # Usage
//!
//! ```ignore
//! let mut surface = TessellatingSurface::new(viewport);
//! sky.frame(now_ms, &mut surface, &mut scheduler);
//! upload(surface.as_floats());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path as LyonPath;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    LineCap as LyonCap, LineJoin as LyonJoin, StrokeOptions, StrokeTessellator, StrokeVertex,
    StrokeVertexConstructor, VertexBuffers,
};

use super::color::Color;
use super::paint::{Font, LineCap, LineJoin, Paint, Shadow, StrokeStyle};
use super::path::{Path, Polyline};
use super::surface::{StateStack, Surface};
use crate::core::viewport::Viewport;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Flattening tolerance in device pixels.
const TOLERANCE: f32 = 0.25;
/// Opacity of the halo drawn for a shadowed shape.
const HALO_ALPHA: f32 = 0.35;

/// Colors vertices by sampling the paint in the path's local space.
struct PaintCtor<'a> {
    paint: &'a Paint,
    to_local: Affine2,
    alpha: f32,
}

impl PaintCtor<'_> {
    fn vertex(&self, x: f32, y: f32) -> VectorVertex {
        let local = self.to_local.transform_point2(Vec2::new(x, y));
        let c = self.paint.color_at(local);
        VectorVertex {
            x,
            y,
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a * self.alpha,
        }
    }
}

impl FillVertexConstructor<VectorVertex> for PaintCtor<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        self.vertex(p.x, p.y)
    }
}

impl StrokeVertexConstructor<VectorVertex> for PaintCtor<'_> {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        self.vertex(p.x, p.y)
    }
}

/// Surface that tessellates every draw into a triangle list.
pub struct TessellatingSurface {
    viewport: Viewport,
    state: StateStack,
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl TessellatingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            state: StateStack::new(),
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// The vertex buffer as raw floats, ready for upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn device_path(&self, path: &Path) -> Option<LyonPath> {
        let xf = self.state.current().transform;
        let polylines = path.transformed(&xf).flatten(TOLERANCE);
        to_lyon(&polylines)
    }

    /// Mean scale of the current transform, for widths and blur radii.
    fn device_scale(&self) -> f32 {
        let m = self.state.current().transform.matrix2;
        (m.x_axis.length() + m.y_axis.length()) * 0.5
    }

    fn tessellate_fill(&mut self, path: &LyonPath, paint: &Paint, alpha: f32) {
        let ctor = PaintCtor {
            paint,
            to_local: self.state.current().transform.inverse(),
            alpha,
        };
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, ctor),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn tessellate_stroke(&mut self, path: &LyonPath, paint: &Paint, style: &StrokeStyle, width: f32, alpha: f32) {
        let ctor = PaintCtor {
            paint,
            to_local: self.state.current().transform.inverse(),
            alpha,
        };
        let options = StrokeOptions::tolerance(TOLERANCE)
            .with_line_width(width)
            .with_line_cap(lyon_cap(style.cap))
            .with_line_join(lyon_join(style.join));
        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, ctor),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn halo(&self) -> Option<(Paint, f32)> {
        let state = self.state.current();
        let shadow = state.shadow?;
        if shadow.blur <= 0.0 || shadow.color.a <= 0.0 {
            return None;
        }
        Some((
            Paint::Solid(shadow.color.fade(HALO_ALPHA * state.alpha)),
            shadow.blur,
        ))
    }
}

fn to_lyon(polylines: &[Polyline]) -> Option<LyonPath> {
    if polylines.is_empty() {
        return None;
    }
    let mut builder = LyonPath::builder();
    for line in polylines {
        let (first, rest) = line.points.split_first()?;
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(line.closed);
    }
    Some(builder.build())
}

fn lyon_cap(cap: LineCap) -> LyonCap {
    match cap {
        LineCap::Butt => LyonCap::Butt,
        LineCap::Round => LyonCap::Round,
        LineCap::Square => LyonCap::Square,
    }
}

fn lyon_join(join: LineJoin) -> LyonJoin {
    match join {
        LineJoin::Miter => LyonJoin::Miter,
        LineJoin::Round => LyonJoin::Round,
        LineJoin::Bevel => LyonJoin::Bevel,
    }
}

impl Surface for TessellatingSurface {
    fn logical_size(&self) -> Vec2 {
        self.viewport.size()
    }

    fn pixel_ratio(&self) -> f32 {
        self.viewport.pixel_ratio
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn transform(&mut self, xf: Affine2) {
        self.state.transform(xf);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.set_alpha(alpha);
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.set_shadow(shadow);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(device) = self.device_path(path) else {
            return;
        };
        if let Some((halo, blur)) = self.halo() {
            let style = StrokeStyle::round(blur);
            self.tessellate_stroke(&device, &halo, &style, blur, 1.0);
        }
        let alpha = self.state.current().alpha;
        self.tessellate_fill(&device, paint, alpha);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle) {
        let Some(device) = self.device_path(path) else {
            return;
        };
        let width = style.width * self.device_scale();
        if let Some((halo, blur)) = self.halo() {
            self.tessellate_stroke(&device, &halo, style, width + blur, 1.0);
        }
        let alpha = self.state.current().alpha;
        self.tessellate_stroke(&device, paint, style, width, alpha);
    }

    fn fill_text(&mut self, text: &str, _at: Vec2, _font: &Font, _color: Color) {
        log::trace!("tessellating surface skips text {:?}", text);
    }
}
