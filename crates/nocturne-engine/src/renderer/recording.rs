use glam::{Affine2, Vec2};

use super::color::Color;
use super::paint::{Font, Paint, Shadow, StrokeStyle};
use super::path::Path;
use super::surface::{DrawState, StateStack, Surface};

/// One recorded draw call together with the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        path: Path,
        paint: Paint,
        state: DrawState,
    },
    Stroke {
        path: Path,
        paint: Paint,
        style: StrokeStyle,
        state: DrawState,
    },
    Text {
        text: String,
        at: Vec2,
        font: Font,
        color: Color,
        state: DrawState,
    },
}

impl DrawCommand {
    pub fn state(&self) -> Option<&DrawState> {
        match self {
            DrawCommand::Clear => None,
            DrawCommand::Fill { state, .. }
            | DrawCommand::Stroke { state, .. }
            | DrawCommand::Text { state, .. } => Some(state),
        }
    }
}

/// Surface that records every call instead of rasterizing.
///
/// Used by tests and by hosts that want to replay a frame elsewhere.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    pixel_ratio: f32,
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            pixel_ratio: 1.0,
            state: StateStack::new(),
            commands: Vec::with_capacity(1024),
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop the log (keeps the drawing state).
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current save/restore nesting depth.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    pub fn current_transform(&self) -> Affine2 {
        self.state.current().transform
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> Vec2 {
        self.size
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
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
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: paint.clone(),
            state: *self.state.current(),
        });
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            style: *style,
            state: *self.state.current(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &Font, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font: font.clone(),
            color,
            state: *self.state.current(),
        });
    }
}
