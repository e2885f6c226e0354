//! Line shape.

use super::{ShapeId, ShapeTrait, joints};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two shared points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point handle.
    pub start: PointId,
    /// End point handle.
    pub end: PointId,
    /// Free points attached to the line (joints placed by the point tool).
    #[serde(default)]
    pub aux: Vec<PointId>,
    pub style: Option<StyleId>,
}

impl Line {
    /// Create a new line between two existing points.
    pub fn new(start: PointId, end: PointId, style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            aux: Vec::new(),
            style,
        }
    }

    pub fn start_position(&self, points: &PointArena) -> Point {
        points.position(self.start)
    }

    pub fn end_position(&self, points: &PointArena) -> Point {
        points.position(self.end)
    }

    /// Rewire the reference to `target` so it points at `point`.
    pub fn connect(&mut self, point: PointId, target: PointId) -> bool {
        if joints::connect(&mut self.aux, point, target) {
            return true;
        }
        if self.start == point || self.end == point {
            return false;
        }
        if self.start == target {
            log::debug!("Line {} connected at start", self.id);
            self.start = point;
            true
        } else if self.end == target {
            log::debug!("Line {} connected at end", self.id);
            self.end = point;
            true
        } else {
            false
        }
    }

    /// Replace the reference to `point` with a fresh copy and return the copy.
    pub fn disconnect_point(&mut self, points: &mut PointArena, point: PointId) -> Option<PointId> {
        if let Some(copy) = joints::disconnect(&mut self.aux, points, point) {
            return Some(copy);
        }
        if self.start == point {
            log::debug!("Line {} disconnected at start", self.id);
            self.start = points.duplicate(point);
            Some(self.start)
        } else if self.end == point {
            log::debug!("Line {} disconnected at end", self.id);
            self.end = points.duplicate(point);
            Some(self.end)
        } else {
            None
        }
    }

    /// Give every referenced point its own fresh copy.
    pub fn disconnect_all(&mut self, points: &mut PointArena) -> bool {
        joints::disconnect_all(&mut self.aux, points);
        self.start = points.duplicate(self.start);
        self.end = points.duplicate(self.end);
        log::debug!("Line {} disconnected", self.id);
        true
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_line(
                self.start_position(ctx.points),
                self.end_position(ctx.points),
                style,
                ctx.offset,
            );
        }
        ctx.draw_selected_handles(renderer, &[self.start, self.end]);
        ctx.draw_handles(renderer, &self.aux);
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        vec![self.start, self.end]
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        let mut handles = vec![&mut self.start, &mut self.end];
        handles.extend(self.aux.iter_mut());
        handles
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        Rect::from_points(self.start_position(points), self.end_position(points))
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start_position(points));
        path.line_to(self.end_position(points));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &mut PointArena) -> Line {
        let a = points.add(0.0, 0.0, None);
        let b = points.add(10.0, 0.0, None);
        Line::new(a, b, None)
    }

    #[test]
    fn test_connect_replaces_end() {
        let mut points = PointArena::new();
        let mut l = line(&mut points);
        let other = points.add(10.0, 1.0, None);
        let end = l.end;
        assert!(l.connect(other, end));
        assert_eq!(l.end, other);
    }

    #[test]
    fn test_connect_refuses_self_loop() {
        let mut points = PointArena::new();
        let mut l = line(&mut points);
        let (start, end) = (l.start, l.end);
        assert!(!l.connect(start, end));
        assert_eq!(l.end, end);
    }

    #[test]
    fn test_connect_unknown_target() {
        let mut points = PointArena::new();
        let mut l = line(&mut points);
        let p = points.add(1.0, 1.0, None);
        let q = points.add(2.0, 2.0, None);
        assert!(!l.connect(p, q));
    }

    #[test]
    fn test_disconnect_point_clones() {
        let mut points = PointArena::new();
        let mut l = line(&mut points);
        let start = l.start;
        let copy = l.disconnect_point(&mut points, start).expect("start is held");
        assert_ne!(copy, start);
        assert_eq!(l.start, copy);
        assert_eq!(points.position(copy), points.position(start));
    }

    #[test]
    fn test_bounds_normalized() {
        let mut points = PointArena::new();
        let a = points.add(10.0, 10.0, None);
        let b = points.add(0.0, 5.0, None);
        let l = Line::new(a, b, None);
        assert_eq!(l.bounds(&points), Rect::new(0.0, 5.0, 10.0, 10.0));
    }
}
