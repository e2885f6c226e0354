//! Tool system.
//!
//! Each tool is a small state machine driven by pointer events. Tools build
//! previews in the working container, commit finished shapes to the current
//! container and abort through [`Tool::clean`], which is always safe to call.

mod bezier;
mod corner;
mod guide;
mod line;
mod none;
mod path;
mod point;
mod polyline;
mod scribble;
mod selection;
pub mod settings;

#[cfg(test)]
mod tests;

pub use bezier::{CubicBezierState, CubicBezierTool, CubicHandles, QuadraticBezierState, QuadraticBezierTool, QuadraticHandles};
pub use corner::{CornerState, EllipseTool, RectangleTool};
pub use guide::{GuideState, GuideTool};
pub use line::{LineState, LineTool};
pub use none::NoneTool;
pub use path::{Draft, PathState, PathSubTool, PathTool};
pub use point::PointTool;
pub use polyline::{PolyLineState, PolyLineTool};
pub use scribble::ScribbleTool;
pub use selection::{SelectionState, SelectionTool};

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    None,
    #[default]
    Selection,
    Guide,
    Point,
    Line,
    PolyLine,
    CubicBezier,
    QuadraticBezier,
    Path,
    Scribble,
    Rectangle,
    Ellipse,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::None => "None",
            ToolKind::Selection => "Selection",
            ToolKind::Guide => "Guide",
            ToolKind::Point => "Point",
            ToolKind::Line => "Line",
            ToolKind::PolyLine => "PolyLine",
            ToolKind::CubicBezier => "CubicBezier",
            ToolKind::QuadraticBezier => "QuadraticBezier",
            ToolKind::Path => "Path",
            ToolKind::Scribble => "Scribble",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
        }
    }
}

/// Interaction protocol shared by every tool.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, modifiers: Modifiers);

    fn left_up(&mut self, _ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {}

    fn right_down(&mut self, _ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {}

    fn right_up(&mut self, _ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {}

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, modifiers: Modifiers);

    /// Abort any gesture: clear filter guides, drop working shapes, release
    /// capture and return to the initial state. Idempotent.
    fn clean(&mut self, ctx: &mut ToolContext);

    /// Whether a multi-step gesture is in progress.
    fn is_active(&self) -> bool {
        false
    }

    /// Editing operations, for tools that provide them.
    fn as_edit(&mut self) -> Option<&mut dyn Edit> {
        None
    }

    /// Sub-tool control, for the path tool.
    fn as_path(&mut self) -> Option<&mut PathTool> {
        None
    }
}

/// Clipboard and structural editing on the selection.
pub trait Edit {
    fn cut(&mut self, ctx: &mut ToolContext);
    fn copy(&mut self, ctx: &mut ToolContext);
    fn paste(&mut self, ctx: &mut ToolContext);
    fn delete(&mut self, ctx: &mut ToolContext);
    fn group(&mut self, ctx: &mut ToolContext);
    fn select_all(&mut self, ctx: &mut ToolContext);
    /// Drop state holding handles into a document that is being replaced.
    fn reset(&mut self, ctx: &mut ToolContext);
}

/// Run `point` through the filters and return the adjusted point.
pub(crate) fn filtered(filters: &mut FilterChain, ctx: &mut ToolContext, point: Point) -> Point {
    let mut point = point;
    filters.process(ctx, &mut point);
    point
}

/// Owns every tool and tracks which one is current.
pub struct ToolManager {
    tools: Vec<Box<dyn Tool>>,
    current: ToolKind,
}

impl ToolManager {
    /// `current` must be one of the supplied tools' kinds.
    pub fn new(tools: Vec<Box<dyn Tool>>, current: ToolKind) -> Self {
        Self { tools, current }
    }

    pub fn current_kind(&self) -> ToolKind {
        self.current
    }

    pub fn kinds(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.tools.iter().map(|t| t.kind())
    }

    pub fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.iter_mut().find(|t| t.kind() == kind).map(|t| t.as_mut())
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Tool + 'static)> {
        self.tool_mut(self.current)
    }

    /// The tool providing editing operations.
    pub fn edit_mut(&mut self) -> Option<&mut dyn Edit> {
        self.tools.iter_mut().find_map(|t| t.as_edit())
    }

    pub fn path_mut(&mut self) -> Option<&mut PathTool> {
        self.tools.iter_mut().find_map(|t| t.as_path())
    }

    /// Switch tools, cleaning the outgoing one first.
    pub fn set_tool(&mut self, ctx: &mut ToolContext, kind: ToolKind) -> bool {
        if !self.tools.iter().any(|t| t.kind() == kind) {
            log::warn!("Tool {} is not registered", kind.name());
            return false;
        }
        if let Some(outgoing) = self.current_mut() {
            outgoing.clean(ctx);
        }
        log::debug!("Tool changed: {} -> {}", self.current.name(), kind.name());
        self.current = kind;
        true
    }
}
