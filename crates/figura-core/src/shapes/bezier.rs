//! Cubic and quadratic bezier curves.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{sample_cubic, sample_quadratic};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, CubicBez, Point, QuadBez, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cubic bezier: start, two control points, end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub(crate) id: ShapeId,
    pub start: PointId,
    pub point1: PointId,
    pub point2: PointId,
    pub point3: PointId,
    pub style: Option<StyleId>,
}

impl CubicBezier {
    pub fn new(start: PointId, point1: PointId, point2: PointId, point3: PointId, style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            point1,
            point2,
            point3,
            style,
        }
    }

    pub fn to_kurbo(&self, points: &PointArena) -> CubicBez {
        CubicBez::new(
            points.position(self.start),
            points.position(self.point1),
            points.position(self.point2),
            points.position(self.point3),
        )
    }

    /// Curve flattened for hit-testing.
    pub fn samples(&self, points: &PointArena) -> Vec<Point> {
        let c = self.to_kurbo(points);
        sample_cubic(c.p0, c.p1, c.p2, c.p3)
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_cubic_bezier(self.to_kurbo(ctx.points), style, ctx.offset);
        }
        ctx.draw_selected_handles(renderer, &self.anchors());
    }
}

impl ShapeTrait for CubicBezier {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        vec![self.start, self.point1, self.point2, self.point3]
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.start, &mut self.point1, &mut self.point2, &mut self.point3]
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        self.to_kurbo(points).bounding_box()
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let c = self.to_kurbo(points);
        let mut path = BezPath::new();
        path.move_to(c.p0);
        path.curve_to(c.p1, c.p2, c.p3);
        path
    }
}

/// A quadratic bezier: start, one control point, end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub(crate) id: ShapeId,
    pub start: PointId,
    pub point1: PointId,
    pub point2: PointId,
    pub style: Option<StyleId>,
}

impl QuadraticBezier {
    pub fn new(start: PointId, point1: PointId, point2: PointId, style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            point1,
            point2,
            style,
        }
    }

    pub fn to_kurbo(&self, points: &PointArena) -> QuadBez {
        QuadBez::new(
            points.position(self.start),
            points.position(self.point1),
            points.position(self.point2),
        )
    }

    pub fn samples(&self, points: &PointArena) -> Vec<Point> {
        let q = self.to_kurbo(points);
        sample_quadratic(q.p0, q.p1, q.p2)
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_quadratic_bezier(self.to_kurbo(ctx.points), style, ctx.offset);
        }
        ctx.draw_selected_handles(renderer, &self.anchors());
    }
}

impl ShapeTrait for QuadraticBezier {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        vec![self.start, self.point1, self.point2]
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.start, &mut self.point1, &mut self.point2]
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        self.to_kurbo(points).bounding_box()
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let q = self.to_kurbo(points);
        let mut path = BezPath::new();
        path.move_to(q.p0);
        path.quad_to(q.p1, q.p2);
        path
    }
}
