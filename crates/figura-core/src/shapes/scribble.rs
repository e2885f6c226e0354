//! Freehand scribble shape.

use super::{ShapeId, ShapeTrait};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand polyline captured from pointer movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scribble {
    pub(crate) id: ShapeId,
    pub points: Vec<PointId>,
    pub style: Option<StyleId>,
}

impl Scribble {
    pub fn new(points: Vec<PointId>, style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    pub fn positions(&self, arena: &PointArena) -> Vec<Point> {
        self.points.iter().map(|p| arena.position(*p)).collect()
    }

    /// Drop points using Ramer-Douglas-Peucker with the given tolerance.
    /// Endpoints are always kept.
    pub fn simplify(&mut self, arena: &PointArena, epsilon: f64) {
        let positions = self.positions(arena);
        let mut keep = vec![false; positions.len()];
        rdp_mark(&positions, 0, positions.len(), epsilon, &mut keep);
        let before = self.points.len();
        let mut flags = keep.into_iter();
        self.points.retain(|_| flags.next().unwrap_or(false));
        log::debug!("Simplified scribble {}: {} -> {} points", self.id, before, self.points.len());
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if self.points.len() < 2 {
            return;
        }
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_path(&self.to_path(ctx.points), style, ctx.offset);
        }
    }
}

/// Mark the points of `points[start..end]` that survive simplification.
fn rdp_mark(points: &[Point], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    if end <= start {
        return;
    }
    let last = end - 1;
    keep[start] = true;
    keep[last] = true;
    if last - start < 2 {
        return;
    }

    let (first, final_point) = (points[start], points[last]);
    let mut max_dist = 0.0;
    let mut max_index = start;
    for (i, point) in points.iter().enumerate().take(last).skip(start + 1) {
        let dist = perpendicular_distance(*point, first, final_point);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > epsilon {
        rdp_mark(points, start, max_index + 1, epsilon, keep);
        rdp_mark(points, max_index, end, epsilon, keep);
    }
}

/// Perpendicular distance from point to the infinite line through a and b.
fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len_sq = d.hypot2();
    if len_sq < f64::EPSILON {
        return point.distance(a);
    }
    (point - a).cross(d).abs() / len_sq.sqrt()
}

impl ShapeTrait for Scribble {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        self.points.clone()
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        self.points.iter_mut().collect()
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        let mut iter = self.points.iter().map(|p| points.position(*p));
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter().map(|p| points.position(*p));
        if let Some(first) = iter.next() {
            path.move_to(first);
            for p in iter {
                path.line_to(p);
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scribble(arena: &mut PointArena, coords: &[(f64, f64)]) -> Scribble {
        let points = coords.iter().map(|(x, y)| arena.add(*x, *y, None)).collect();
        Scribble::new(points, None)
    }

    #[test]
    fn test_simplify_collinear() {
        let mut arena = PointArena::new();
        let mut s = scribble(&mut arena, &[(0.0, 0.0), (1.0, 0.1), (2.0, 0.0), (3.0, 0.05), (4.0, 0.0)]);
        let (first, last) = (s.points[0], s.points[4]);
        s.simplify(&arena, 1.0);
        assert_eq!(s.points, vec![first, last]);
    }

    #[test]
    fn test_simplify_keeps_corner() {
        let mut arena = PointArena::new();
        let mut s = scribble(&mut arena, &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.0, 10.0)]);
        let corner = s.points[2];
        s.simplify(&arena, 1.0);
        assert_eq!(s.points.len(), 3);
        assert_eq!(s.points[1], corner);
    }

    #[test]
    fn test_simplify_short_scribble_untouched() {
        let mut arena = PointArena::new();
        let mut s = scribble(&mut arena, &[(0.0, 0.0), (1.0, 1.0)]);
        s.simplify(&arena, 1.0);
        assert_eq!(s.points.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let mut arena = PointArena::new();
        let s = scribble(&mut arena, &[(5.0, 5.0), (-1.0, 3.0), (2.0, 9.0)]);
        assert_eq!(s.bounds(&arena), Rect::new(-1.0, 3.0, 5.0, 9.0));
    }
}
