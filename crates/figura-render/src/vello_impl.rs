//! Vello-based renderer implementation.

use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

use crate::painter::{PathSink, paint_frame};
use crate::renderer::{RenderContext, Renderer};

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// The scene built by the last [`Renderer::build_scene`] call.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl PathSink for VelloRenderer {
    fn fill(&mut self, transform: Affine, path: &BezPath, color: Color) {
        self.scene.fill(Fill::NonZero, transform, color, None, path);
    }

    fn stroke(&mut self, transform: Affine, path: &BezPath, color: Color, width: f64) {
        self.scene.stroke(&Stroke::new(width), transform, color, None, path);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        paint_frame(self, ctx);
    }
}
