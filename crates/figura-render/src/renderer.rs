//! Renderer trait abstraction.

use figura_core::Editor;
use kurbo::Size;
use peniko::Color;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain background.
    None,
    #[default]
    Lines,
    /// A dot at every grid crossing.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The editor whose containers are drawn.
    pub editor: &'a Editor,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    pub background_color: Color,
    pub grid_style: GridStyle,
    pub grid_color: Color,
    /// Grid spacing in canvas units.
    pub grid_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a render context whose grid matches the editor's snapping grid.
    pub fn new(editor: &'a Editor, viewport_size: Size) -> Self {
        Self {
            editor,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_style: GridStyle::Lines,
            grid_color: Color::from_rgba8(220, 220, 220, 255),
            grid_size: editor.settings().grid_snap.grid_size_x,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_size(mut self, size: f64) -> Self {
        self.grid_size = size;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
