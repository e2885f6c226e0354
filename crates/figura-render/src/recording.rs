//! Backend that records flattened drawing commands.
//!
//! Useful for headless hosts and for inspecting what a frame would paint.

use kurbo::{Affine, BezPath};
use peniko::Color;

use crate::painter::{PathSink, paint_frame};
use crate::renderer::{RenderContext, Renderer};

/// A painted path, already transformed to screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, color: Color, width: f64 },
}

impl DrawCommand {
    pub fn path(&self) -> &BezPath {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => path,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl PathSink for RecordingRenderer {
    fn fill(&mut self, transform: Affine, path: &BezPath, color: Color) {
        let mut path = path.clone();
        path.apply_affine(transform);
        self.commands.push(DrawCommand::Fill { path, color });
    }

    fn stroke(&mut self, transform: Affine, path: &BezPath, color: Color, width: f64) {
        let mut path = path.clone();
        path.apply_affine(transform);
        let scale = transform.as_coeffs()[0].abs();
        self.commands.push(DrawCommand::Stroke {
            path,
            color,
            width: width * scale,
        });
    }
}

impl Renderer for RecordingRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        paint_frame(self, ctx);
        log::trace!("Recorded {} draw commands", self.commands.len());
    }
}
