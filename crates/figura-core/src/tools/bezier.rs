//! Bezier tools.
//!
//! Control points are placed counting down: the first click drops every point
//! on the start, the next click pins the end point, and each further click pins
//! the next control point until the last one commits the curve.

use kurbo::Point;

use super::settings::{CubicBezierToolSettings, QuadraticBezierToolSettings};
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::selection::ObjectId;
use crate::shapes::{CubicBezier, QuadraticBezier, Shape, ShapeId, ShapeTrait};

/// Point handles of a cubic curve under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubicHandles {
    pub shape: ShapeId,
    pub start: PointId,
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CubicBezierState {
    #[default]
    StartPoint,
    Point1(CubicHandles),
    Point2(CubicHandles),
    Point3(CubicHandles),
}

#[derive(Debug)]
pub struct CubicBezierTool {
    pub settings: CubicBezierToolSettings,
    filters: FilterChain,
    state: CubicBezierState,
}

impl CubicBezierTool {
    pub fn new(settings: CubicBezierToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            state: CubicBezierState::StartPoint,
        }
    }

    pub fn state(&self) -> CubicBezierState {
        self.state
    }
}

/// Pin the end point of a curve, reusing a committed point under the cursor.
fn pin_end(ctx: &mut ToolContext, shape: ShapeId, end: PointId, p: Point, connect: bool, radius: f64) -> PointId {
    let Some(existing) = connect.then(|| ctx.find_point(p, radius)).flatten() else {
        ctx.points.set_position(end, p.x, p.y);
        return end;
    };
    match ctx.working_shape_mut(shape) {
        Some(Shape::CubicBezier(c)) => c.point3 = existing,
        Some(Shape::QuadraticBezier(q)) => q.point2 = existing,
        _ => return end,
    }
    ctx.selection.remove(&ObjectId::Point(end));
    ctx.selection.insert(ObjectId::Point(existing));
    existing
}

fn deselect_all(ctx: &mut ToolContext, shape: ShapeId, points: &[PointId]) {
    ctx.selection.remove(&ObjectId::Shape(shape));
    for p in points {
        ctx.selection.remove(&ObjectId::Point(*p));
    }
}

impl Tool for CubicBezierTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CubicBezier
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        let (connect, radius) = (self.settings.connect_points, self.settings.hit_test_radius);
        self.state = match self.state {
            CubicBezierState::StartPoint => {
                let start = ctx.get_next_point(p.x, p.y, connect, radius);
                let point1 = ctx.new_point(p.x, p.y);
                let point2 = ctx.new_point(p.x, p.y);
                let point3 = ctx.new_point(p.x, p.y);
                let curve = CubicBezier::new(start, point1, point2, point3, ctx.current_style);
                let shape = curve.id();
                ctx.working.add_shape(curve);
                ctx.selection.insert(ObjectId::Shape(shape));
                for id in [start, point1, point2, point3] {
                    ctx.selection.insert(ObjectId::Point(id));
                }
                ctx.capture();
                CubicBezierState::Point3(CubicHandles {
                    shape,
                    start,
                    point1,
                    point2,
                    point3,
                })
            }
            CubicBezierState::Point3(mut h) => {
                ctx.points.set_position(h.point2, p.x, p.y);
                h.point3 = pin_end(ctx, h.shape, h.point3, p, connect, radius);
                CubicBezierState::Point2(h)
            }
            CubicBezierState::Point2(h) => {
                ctx.points.set_position(h.point1, p.x, p.y);
                ctx.points.set_position(h.point2, p.x, p.y);
                CubicBezierState::Point1(h)
            }
            CubicBezierState::Point1(h) => {
                ctx.points.set_position(h.point1, p.x, p.y);
                deselect_all(ctx, h.shape, &[h.start, h.point1, h.point2, h.point3]);
                ctx.commit(h.shape);
                self.filters.clear(ctx);
                ctx.release();
                CubicBezierState::StartPoint
            }
        };
        ctx.invalidate();
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        let moving: &[PointId] = match &self.state {
            CubicBezierState::StartPoint => &[],
            CubicBezierState::Point3(h) => &[h.point2, h.point3],
            CubicBezierState::Point2(h) => &[h.point1, h.point2],
            CubicBezierState::Point1(h) => &[h.point1],
        };
        for id in moving {
            ctx.points.set_position(*id, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        match std::mem::take(&mut self.state) {
            CubicBezierState::StartPoint => {}
            CubicBezierState::Point1(h) | CubicBezierState::Point2(h) | CubicBezierState::Point3(h) => {
                ctx.discard(h.shape);
            }
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != CubicBezierState::StartPoint
    }
}

/// Point handles of a quadratic curve under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadraticHandles {
    pub shape: ShapeId,
    pub start: PointId,
    pub point1: PointId,
    pub point2: PointId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadraticBezierState {
    #[default]
    StartPoint,
    Point1(QuadraticHandles),
    Point2(QuadraticHandles),
}

#[derive(Debug)]
pub struct QuadraticBezierTool {
    pub settings: QuadraticBezierToolSettings,
    filters: FilterChain,
    state: QuadraticBezierState,
}

impl QuadraticBezierTool {
    pub fn new(settings: QuadraticBezierToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            state: QuadraticBezierState::StartPoint,
        }
    }

    pub fn state(&self) -> QuadraticBezierState {
        self.state
    }
}

impl Tool for QuadraticBezierTool {
    fn kind(&self) -> ToolKind {
        ToolKind::QuadraticBezier
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        let (connect, radius) = (self.settings.connect_points, self.settings.hit_test_radius);
        self.state = match self.state {
            QuadraticBezierState::StartPoint => {
                let start = ctx.get_next_point(p.x, p.y, connect, radius);
                let point1 = ctx.new_point(p.x, p.y);
                let point2 = ctx.new_point(p.x, p.y);
                let curve = QuadraticBezier::new(start, point1, point2, ctx.current_style);
                let shape = curve.id();
                ctx.working.add_shape(curve);
                ctx.selection.insert(ObjectId::Shape(shape));
                for id in [start, point1, point2] {
                    ctx.selection.insert(ObjectId::Point(id));
                }
                ctx.capture();
                QuadraticBezierState::Point2(QuadraticHandles {
                    shape,
                    start,
                    point1,
                    point2,
                })
            }
            QuadraticBezierState::Point2(mut h) => {
                ctx.points.set_position(h.point1, p.x, p.y);
                h.point2 = pin_end(ctx, h.shape, h.point2, p, connect, radius);
                QuadraticBezierState::Point1(h)
            }
            QuadraticBezierState::Point1(h) => {
                ctx.points.set_position(h.point1, p.x, p.y);
                deselect_all(ctx, h.shape, &[h.start, h.point1, h.point2]);
                ctx.commit(h.shape);
                self.filters.clear(ctx);
                ctx.release();
                QuadraticBezierState::StartPoint
            }
        };
        ctx.invalidate();
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        let moving: &[PointId] = match &self.state {
            QuadraticBezierState::StartPoint => &[],
            QuadraticBezierState::Point2(h) => &[h.point1, h.point2],
            QuadraticBezierState::Point1(h) => &[h.point1],
        };
        for id in moving {
            ctx.points.set_position(*id, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        match std::mem::take(&mut self.state) {
            QuadraticBezierState::StartPoint => {}
            QuadraticBezierState::Point1(h) | QuadraticBezierState::Point2(h) => ctx.discard(h.shape),
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != QuadraticBezierState::StartPoint
    }
}
