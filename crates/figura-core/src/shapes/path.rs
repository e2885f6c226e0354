//! Path shape built from figures of connected segments.

use super::{Shape, ShapeId, ShapeTrait, joints};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Fill rule used when a path is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

/// A run of segments where each segment starts at the previous one's end.
///
/// Segments are `Line`, `CubicBezier` or `QuadraticBezier` shapes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub segments: Vec<Shape>,
    pub is_closed: bool,
    pub is_filled: bool,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// First point of the figure.
    pub fn first_point(&self) -> Option<PointId> {
        match self.segments.first()? {
            Shape::Line(l) => Some(l.start),
            Shape::CubicBezier(c) => Some(c.start),
            Shape::QuadraticBezier(q) => Some(q.start),
            _ => None,
        }
    }

    /// Last point of the figure.
    pub fn last_point(&self) -> Option<PointId> {
        match self.segments.last()? {
            Shape::Line(l) => Some(l.end),
            Shape::CubicBezier(c) => Some(c.point3),
            Shape::QuadraticBezier(q) => Some(q.point2),
            _ => None,
        }
    }

    fn append_to(&self, path: &mut BezPath, points: &PointArena) {
        let Some(first) = self.first_point() else {
            return;
        };
        path.move_to(points.position(first));
        for segment in &self.segments {
            match segment {
                Shape::Line(l) => path.line_to(points.position(l.end)),
                Shape::CubicBezier(c) => path.curve_to(
                    points.position(c.point1),
                    points.position(c.point2),
                    points.position(c.point3),
                ),
                Shape::QuadraticBezier(q) => {
                    path.quad_to(points.position(q.point1), points.position(q.point2))
                }
                _ => {}
            }
        }
        if self.is_closed {
            path.close_path();
        }
    }
}

/// A compound path of one or more figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: ShapeId,
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub fill_rule: FillRule,
    #[serde(default)]
    pub aux: Vec<PointId>,
    pub style: Option<StyleId>,
}

impl Path {
    pub fn new(style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            figures: Vec::new(),
            fill_rule: FillRule::default(),
            aux: Vec::new(),
            style,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Shape> {
        self.figures.iter().flat_map(|f| f.segments.iter())
    }

    fn segment_handles_mut(&mut self) -> impl Iterator<Item = &mut PointId> {
        self.figures
            .iter_mut()
            .flat_map(|f| f.segments.iter_mut())
            .flat_map(|s| s.handles_mut())
    }

    /// Whether any segment references `point`.
    pub fn references(&self, point: PointId) -> bool {
        self.segments().any(|s| s.points().any(|p| p == point))
    }

    /// Rewire every reference to `target` so it points at `point`.
    pub fn connect(&mut self, point: PointId, target: PointId) -> bool {
        if joints::connect(&mut self.aux, point, target) {
            return true;
        }
        if self.references(point) {
            return false;
        }
        let mut connected = false;
        for handle in self.segment_handles_mut() {
            if *handle == target {
                *handle = point;
                connected = true;
            }
        }
        if connected {
            log::debug!("Path {} connected", self.id);
        }
        connected
    }

    /// Replace every reference to `point` with one shared fresh copy.
    pub fn disconnect_point(&mut self, points: &mut PointArena, point: PointId) -> Option<PointId> {
        if let Some(copy) = joints::disconnect(&mut self.aux, points, point) {
            return Some(copy);
        }
        if !self.references(point) {
            return None;
        }
        let copy = points.duplicate(point);
        for handle in self.segment_handles_mut() {
            if *handle == point {
                *handle = copy;
            }
        }
        log::debug!("Path {} disconnected", self.id);
        Some(copy)
    }

    /// Copy every point once, keeping the joints between the path's own segments.
    pub fn disconnect_all(&mut self, points: &mut PointArena) -> bool {
        joints::disconnect_all(&mut self.aux, points);
        let mut remap: HashMap<PointId, PointId> = HashMap::new();
        for handle in self.segment_handles_mut() {
            let old = *handle;
            *handle = *remap.entry(old).or_insert_with(|| points.duplicate(old));
        }
        log::debug!("Path {} disconnected", self.id);
        true
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_path(&self.to_path(ctx.points), style, ctx.offset);
        }
        for segment in self.segments() {
            ctx.draw_selected_handles(renderer, &segment.points().collect::<Vec<_>>());
        }
        ctx.draw_handles(renderer, &self.aux);
    }
}

impl ShapeTrait for Path {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        let mut anchors = Vec::new();
        for p in self.segments().flat_map(|s| s.points()) {
            if !anchors.contains(&p) {
                anchors.push(p);
            }
        }
        anchors
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        let mut handles: Vec<&mut PointId> = self.aux.iter_mut().collect();
        handles.extend(
            self.figures
                .iter_mut()
                .flat_map(|f| f.segments.iter_mut())
                .flat_map(|s| s.handles_mut()),
        );
        handles
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        let mut segments = self.segments();
        let Some(first) = segments.next() else {
            return Rect::ZERO;
        };
        segments.fold(first.bounds(points), |r, s| r.union(s.bounds(points)))
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let mut path = BezPath::new();
        for figure in &self.figures {
            figure.append_to(&mut path, points);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Line;

    /// Two-segment figure a-b-c with b shared.
    fn path(points: &mut PointArena) -> (Path, [PointId; 3]) {
        let a = points.add(0.0, 0.0, None);
        let b = points.add(10.0, 0.0, None);
        let c = points.add(10.0, 10.0, None);
        let mut path = Path::new(None);
        path.figures.push(Figure {
            segments: vec![
                Shape::Line(Line::new(a, b, None)),
                Shape::Line(Line::new(b, c, None)),
            ],
            is_closed: false,
            is_filled: false,
        });
        (path, [a, b, c])
    }

    #[test]
    fn test_anchors_are_unique() {
        let mut points = PointArena::new();
        let (path, [a, b, c]) = path(&mut points);
        assert_eq!(path.anchors(), vec![a, b, c]);
    }

    #[test]
    fn test_disconnect_point_rewires_all_occurrences() {
        let mut points = PointArena::new();
        let (mut path, [_, b, _]) = path(&mut points);
        let copy = path.disconnect_point(&mut points, b).expect("joint is held");
        assert!(!path.references(b));
        let uses = path.segments().flat_map(|s| s.points()).filter(|p| *p == copy).count();
        assert_eq!(uses, 2);
    }

    #[test]
    fn test_connect_refuses_held_point() {
        let mut points = PointArena::new();
        let (mut path, [a, b, _]) = path(&mut points);
        assert!(!path.connect(a, b));
    }

    #[test]
    fn test_disconnect_all_keeps_internal_joint() {
        let mut points = PointArena::new();
        let (mut path, [a, b, c]) = path(&mut points);
        assert!(path.disconnect_all(&mut points));
        let anchors = path.anchors();
        assert_eq!(anchors.len(), 3);
        assert!(!anchors.contains(&a) && !anchors.contains(&b) && !anchors.contains(&c));
    }

    #[test]
    fn test_to_path_closes_figure() {
        let mut points = PointArena::new();
        let (mut path, _) = path(&mut points);
        path.figures[0].is_closed = true;
        let bez = path.to_path(&points);
        assert!(matches!(bez.elements().last(), Some(kurbo::PathEl::ClosePath)));
    }
}
