use kurbo::Point;

use super::settings::PolyLineToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::selection::ObjectId;
use crate::shapes::{Line, Shape, ShapeId, ShapeTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolyLineState {
    #[default]
    StartPoint,
    Point {
        shape: ShapeId,
        start: PointId,
        end: PointId,
    },
}

/// Chains lines end to start. Every click commits the previous segment;
/// right click drops the pending one.
#[derive(Debug)]
pub struct PolyLineTool {
    pub settings: PolyLineToolSettings,
    filters: FilterChain,
    state: PolyLineState,
}

impl PolyLineTool {
    pub fn new(settings: PolyLineToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            state: PolyLineState::StartPoint,
        }
    }

    pub fn state(&self) -> PolyLineState {
        self.state
    }

    fn begin_segment(&mut self, ctx: &mut ToolContext, start: PointId, p: Point) {
        let end = ctx.new_point(p.x, p.y);
        let line = Line::new(start, end, ctx.current_style);
        let shape = line.id();
        ctx.working.add_shape(line);
        ctx.selection.insert(ObjectId::Point(start));
        ctx.selection.insert(ObjectId::Point(end));
        self.state = PolyLineState::Point { shape, start, end };
    }
}

impl Tool for PolyLineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::PolyLine
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        let (connect, radius) = (self.settings.connect_points, self.settings.hit_test_radius);
        match self.state {
            PolyLineState::StartPoint => {
                let start = ctx.get_next_point(p.x, p.y, connect, radius);
                self.begin_segment(ctx, start, p);
                ctx.capture();
            }
            PolyLineState::Point { shape, start, end } => {
                ctx.selection.remove(&ObjectId::Point(start));
                ctx.selection.remove(&ObjectId::Point(end));
                let Some(Shape::Line(mut line)) = ctx.working.remove_shape(shape) else {
                    log::warn!("Polyline segment {shape} missing from the working container");
                    self.clean(ctx);
                    return;
                };
                match connect.then(|| ctx.find_point(p, radius)).flatten() {
                    Some(existing) => line.end = existing,
                    None => ctx.points.set_position(end, p.x, p.y),
                }
                let joint = line.end;
                ctx.current.add_shape(line);
                self.begin_segment(ctx, joint, p);
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
        if let PolyLineState::Point { end, .. } = self.state {
            ctx.points.set_position(end, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        if let PolyLineState::Point { shape, .. } = std::mem::take(&mut self.state) {
            ctx.discard(shape);
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != PolyLineState::StartPoint
    }
}
