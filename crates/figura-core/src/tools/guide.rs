use kurbo::Point;

use super::settings::GuideToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::shapes::{Line, ShapeId, ShapeTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideState {
    #[default]
    StartPoint,
    Point {
        guide: ShapeId,
        end: PointId,
    },
}

/// Draws guide lines: construction geometry kept beside the shapes.
#[derive(Debug)]
pub struct GuideTool {
    pub settings: GuideToolSettings,
    filters: FilterChain,
    state: GuideState,
}

impl GuideTool {
    pub fn new(settings: GuideToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            state: GuideState::StartPoint,
        }
    }

    pub fn state(&self) -> GuideState {
        self.state
    }
}

impl Tool for GuideTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Guide
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        match std::mem::take(&mut self.state) {
            GuideState::StartPoint => {
                let style = ctx.current.add_style(self.settings.guide_style.clone());
                ctx.working.add_style(self.settings.guide_style.clone());
                let start = ctx.new_point(p.x, p.y);
                let end = ctx.new_point(p.x, p.y);
                let line = Line::new(start, end, Some(style));
                let guide = line.id();
                ctx.working.guides.push(line.into());
                ctx.capture();
                self.state = GuideState::Point { guide, end };
            }
            GuideState::Point { guide, end } => {
                ctx.points.set_position(end, p.x, p.y);
                match ctx.working.remove_guide(guide) {
                    Some(line) => {
                        log::debug!("Committed guide {guide}");
                        ctx.current.guides.push(line);
                    }
                    None => log::warn!("Guide {guide} missing from the working container"),
                }
                self.filters.clear(ctx);
                ctx.release();
            }
        }
        ctx.invalidate();
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        if let GuideState::Point { end, .. } = self.state {
            ctx.points.set_position(end, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        if let GuideState::Point { guide, .. } = std::mem::take(&mut self.state) {
            if let Some(removed) = ctx.working.remove_guide(guide) {
                ctx.release_points(&removed);
            }
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != GuideState::StartPoint
    }
}
