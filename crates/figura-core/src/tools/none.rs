use kurbo::Point;

use super::{Tool, ToolKind};
use crate::context::ToolContext;
use crate::input::Modifiers;

/// Ignores all input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneTool;

impl Tool for NoneTool {
    fn kind(&self) -> ToolKind {
        ToolKind::None
    }

    fn left_down(&mut self, _ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {}

    fn pointer_move(&mut self, _ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {}

    fn clean(&mut self, _ctx: &mut ToolContext) {}
}
