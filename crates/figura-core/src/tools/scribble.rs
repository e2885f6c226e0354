use kurbo::Point;

use super::settings::ScribbleToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::shapes::{Scribble, Shape, ShapeId, ShapeTrait};

/// Freehand drawing: press, drag, release.
#[derive(Debug)]
pub struct ScribbleTool {
    pub settings: ScribbleToolSettings,
    filters: FilterChain,
    scribble: Option<ShapeId>,
}

impl ScribbleTool {
    pub fn new(settings: ScribbleToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            scribble: None,
        }
    }
}

impl Tool for ScribbleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Scribble
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        if self.scribble.is_some() {
            self.clean(ctx);
        }
        let p = filtered(&mut self.filters, ctx, point);
        let first = ctx.points.add(p.x, p.y, None);
        let scribble = Scribble::new(vec![first], ctx.current_style);
        self.scribble = Some(scribble.id());
        ctx.working.add_shape(scribble);
        ctx.capture();
        ctx.invalidate();
    }

    fn left_up(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        let Some(id) = self.scribble.take() else { return };
        self.filters.clear(ctx);
        if let Some(Shape::Scribble(mut scribble)) = ctx.working.remove_shape(id) {
            if self.settings.simplify {
                scribble.simplify(&ctx.points, self.settings.epsilon);
            }
            if scribble.points.len() >= 2 {
                ctx.current.add_shape(scribble);
            } else {
                log::debug!("Dropped scribble {id} with a single point");
            }
        }
        ctx.release();
        ctx.invalidate();
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let Some(id) = self.scribble else { return };
        let p = filtered(&mut self.filters, ctx, point);
        let next = ctx.points.add(p.x, p.y, None);
        if let Some(Shape::Scribble(scribble)) = ctx.working_shape_mut(id) {
            scribble.points.push(next);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        if let Some(id) = self.scribble.take() {
            ctx.working.remove_shape(id);
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.scribble.is_some()
    }
}
