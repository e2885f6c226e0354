use kurbo::Point;

use super::settings::PointToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::selection::ObjectId;

/// Hangs free points on connectable shapes. Clicks elsewhere do nothing.
#[derive(Debug)]
pub struct PointTool {
    pub settings: PointToolSettings,
    filters: FilterChain,
}

impl PointTool {
    pub fn new(settings: PointToolSettings, filters: FilterChain) -> Self {
        Self { settings, filters }
    }
}

impl Tool for PointTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Point
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        if !self.settings.connect_points {
            return;
        }
        let target = ctx
            .hit_test
            .try_get_shape(&ctx.current.shapes, &ctx.points, p, self.settings.hit_test_radius)
            .filter(|shape| shape.is_connectable())
            .and_then(|shape| shape.id());
        let Some(target) = target else {
            log::trace!("No connectable shape at {:?}", p);
            return;
        };

        let created = ctx.new_point(p.x, p.y);
        let attached = ctx
            .current
            .get_shape_mut(target)
            .is_some_and(|shape| shape.attach_point(created));
        if attached {
            log::debug!("Attached point {:?} to {target}", created);
            ctx.selection.insert(ObjectId::Point(created));
        }
        self.filters.clear(ctx);
        ctx.invalidate();
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        filtered(&mut self.filters, ctx, point);
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        ctx.release();
        ctx.invalidate();
    }
}
