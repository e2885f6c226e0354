use kurbo::Point;

use super::settings::LineToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::intersections::{PointIntersection, collect_intersections};
use crate::points::PointId;
use crate::selection::ObjectId;
use crate::shapes::{Line, Shape, ShapeId, ShapeTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    StartPoint,
    Point {
        shape: ShapeId,
        start: PointId,
        end: PointId,
    },
}

/// Draws single lines, optionally split where they cross committed shapes.
pub struct LineTool {
    pub settings: LineToolSettings,
    filters: FilterChain,
    intersections: Vec<Box<dyn PointIntersection>>,
    state: LineState,
}

impl LineTool {
    pub fn new(
        settings: LineToolSettings,
        filters: FilterChain,
        intersections: Vec<Box<dyn PointIntersection>>,
    ) -> Self {
        Self {
            settings,
            filters,
            intersections,
            state: LineState::StartPoint,
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    fn start(&mut self, ctx: &mut ToolContext, p: Point) {
        let start = ctx.get_next_point(p.x, p.y, self.settings.connect_points, self.settings.hit_test_radius);
        let end = ctx.new_point(p.x, p.y);
        let line = Line::new(start, end, ctx.current_style);
        let shape = line.id();
        ctx.working.add_shape(line);
        ctx.selection.insert(ObjectId::Point(start));
        ctx.selection.insert(ObjectId::Point(end));
        ctx.capture();
        ctx.invalidate();
        self.state = LineState::Point { shape, start, end };
    }

    fn finish(&mut self, ctx: &mut ToolContext, p: Point, shape: ShapeId, start: PointId, end: PointId) {
        self.state = LineState::StartPoint;
        ctx.selection.remove(&ObjectId::Point(start));
        ctx.selection.remove(&ObjectId::Point(end));

        let Some(Shape::Line(mut line)) = ctx.working.remove_shape(shape) else {
            log::warn!("Line {shape} missing from the working container");
            self.clean(ctx);
            return;
        };
        match self
            .settings
            .connect_points
            .then(|| ctx.find_point(p, self.settings.hit_test_radius))
            .flatten()
        {
            Some(existing) => line.end = existing,
            None => ctx.points.set_position(end, p.x, p.y),
        }

        if self.settings.split_intersections {
            self.split(ctx, line);
        } else {
            ctx.current.add_shape(line);
        }

        self.filters.clear(ctx);
        ctx.release();
        ctx.invalidate();
    }

    /// Commit `line` as sub-lines broken at each crossing, nearest first.
    fn split(&self, ctx: &mut ToolContext, line: Line) {
        let hits = collect_intersections(
            &self.intersections,
            &ctx.current.shapes,
            &ctx.points,
            line.start_position(&ctx.points),
            line.end_position(&ctx.points),
        );
        if hits.is_empty() {
            ctx.current.add_shape(line);
            return;
        }
        log::debug!("Splitting line at {} intersections", hits.len());

        let end = line.end;
        let style = line.style;
        let mut segment = line;
        for hit in hits {
            let joint = ctx.new_point(hit.point.x, hit.point.y);
            segment.end = joint;
            ctx.current.add_shape(segment);
            segment = Line::new(joint, end, style);
        }
        ctx.current.add_shape(segment);
    }
}

impl Tool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        match self.state {
            LineState::StartPoint => self.start(ctx, p),
            LineState::Point { shape, start, end } => self.finish(ctx, p, shape, start, end),
        }
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        if let LineState::Point { end, .. } = self.state {
            ctx.points.set_position(end, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        if let LineState::Point { shape, .. } = std::mem::take(&mut self.state) {
            ctx.discard(shape);
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != LineState::StartPoint
    }
}
