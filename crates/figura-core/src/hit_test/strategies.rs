//! Built-in hit-test strategies.

use kurbo::{Point, Rect, Shape as KurboShape};

use super::{HitTest, HitTestStrategy};
use crate::geometry::{
    ellipse_value, point_to_polyline_dist, point_to_segment_dist, polyline_intersects_rect, rect_contains,
    rects_intersect,
};
use crate::points::{PointArena, PointId};
use crate::shapes::{Shape, ShapeKind, ShapeTrait};

/// First of `candidates` within `radius` of `target`.
fn nearest_in_order(
    candidates: impl IntoIterator<Item = PointId>,
    points: &PointArena,
    target: Point,
    radius: f64,
    exclude: Option<PointId>,
) -> Option<PointId> {
    candidates
        .into_iter()
        .filter(|p| Some(*p) != exclude)
        .find(|p| points[*p].distance(target) <= radius)
}

pub struct PointHitTest;

impl HitTestStrategy for PointHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Point(p) = shape else { return None };
        nearest_in_order([*p], points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Point(p) = shape else { return false };
        points[*p].distance(target) <= radius
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Point(p) = shape else { return false };
        rect_contains(rect.inflate(radius, radius), points.position(*p))
    }
}

pub struct LineHitTest;

impl HitTestStrategy for LineHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Line(line) = shape else { return None };
        let candidates = [line.start, line.end].into_iter().chain(line.aux.iter().copied());
        nearest_in_order(candidates, points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Line(line) = shape else { return false };
        point_to_segment_dist(target, line.start_position(points), line.end_position(points)) <= radius
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Line(line) = shape else { return false };
        polyline_intersects_rect(
            &[line.start_position(points), line.end_position(points)],
            rect.inflate(radius, radius),
        )
    }
}

pub struct CubicBezierHitTest;

impl HitTestStrategy for CubicBezierHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::CubicBezier
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::CubicBezier(c) = shape else { return None };
        nearest_in_order([c.start, c.point1, c.point2, c.point3], points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::CubicBezier(c) = shape else { return false };
        point_to_polyline_dist(target, &c.samples(points)) <= radius
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::CubicBezier(c) = shape else { return false };
        polyline_intersects_rect(&c.samples(points), rect.inflate(radius, radius))
    }
}

pub struct QuadraticBezierHitTest;

impl HitTestStrategy for QuadraticBezierHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::QuadraticBezier
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::QuadraticBezier(q) = shape else { return None };
        nearest_in_order([q.start, q.point1, q.point2], points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::QuadraticBezier(q) = shape else { return false };
        point_to_polyline_dist(target, &q.samples(points)) <= radius
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::QuadraticBezier(q) = shape else { return false };
        polyline_intersects_rect(&q.samples(points), rect.inflate(radius, radius))
    }
}

/// Paths test their own auxiliary points, then delegate to segment strategies.
/// Filled closed figures also hit on their interior.
pub struct PathHitTest;

impl HitTestStrategy for PathHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Path
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Path(path) = shape else { return None };
        nearest_in_order(path.aux.iter().copied(), points, target, radius, exclude).or_else(|| {
            path.segments()
                .find_map(|s| registry.shape_point(s, points, target, radius, exclude))
        })
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, registry: &HitTest) -> bool {
        let Shape::Path(path) = shape else { return false };
        if path
            .segments()
            .any(|s| registry.contains(s, points, target, radius).is_some())
        {
            return true;
        }
        path.figures.iter().any(|f| f.is_filled && f.is_closed) && path.to_path(points).contains(target)
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, registry: &HitTest) -> bool {
        let Shape::Path(path) = shape else { return false };
        path.segments()
            .any(|s| registry.shape_overlaps(s, points, rect, radius))
    }
}

pub struct RectangleHitTest;

impl HitTestStrategy for RectangleHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Rectangle(r) = shape else { return None };
        nearest_in_order([r.top_left, r.bottom_right], points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Rectangle(r) = shape else { return false };
        rect_contains(r.rect(points).inflate(radius, radius), target)
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Rectangle(r) = shape else { return false };
        rects_intersect(r.rect(points), rect.inflate(radius, radius))
    }
}

pub struct EllipseHitTest;

impl HitTestStrategy for EllipseHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Ellipse(e) = shape else { return None };
        nearest_in_order([e.top_left, e.bottom_right], points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Ellipse(e) = shape else { return false };
        ellipse_value(e.rect(points), target, radius) <= 1.0
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Ellipse(e) = shape else { return false };
        rects_intersect(e.rect(points), rect.inflate(radius, radius))
    }
}

pub struct ScribbleHitTest;

impl HitTestStrategy for ScribbleHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Scribble
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        _registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Scribble(s) = shape else { return None };
        nearest_in_order(s.points.iter().copied(), points, target, radius, exclude)
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Scribble(s) = shape else { return false };
        point_to_polyline_dist(target, &s.positions(points)) <= radius
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, _registry: &HitTest) -> bool {
        let Shape::Scribble(s) = shape else { return false };
        polyline_intersects_rect(&s.positions(points), rect.inflate(radius, radius))
    }
}

/// Groups test their joint points first, then each child in order.
pub struct GroupHitTest;

impl HitTestStrategy for GroupHitTest {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Group
    }

    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        registry: &HitTest,
    ) -> Option<PointId> {
        let Shape::Group(group) = shape else { return None };
        nearest_in_order(group.aux.iter().copied(), points, target, radius, exclude)
            .or_else(|| registry.try_get_point_excluding(&group.shapes, points, target, radius, exclude))
    }

    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, registry: &HitTest) -> bool {
        let Shape::Group(group) = shape else { return false };
        registry.try_get_shape(&group.shapes, points, target, radius).is_some()
    }

    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, registry: &HitTest) -> bool {
        let Shape::Group(group) = shape else { return false };
        group
            .shapes
            .iter()
            .any(|s| registry.shape_overlaps(s, points, rect, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CubicBezier, Ellipse, Figure, Group, Line, Path};

    #[test]
    fn test_line_contains_within_radius() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(100.0, 0.0, None);
        let line = Shape::Line(Line::new(a, b, None));
        let registry = HitTest::standard();
        assert!(registry.contains(&line, &points, Point::new(50.0, 6.0), 7.0).is_some());
        assert!(registry.contains(&line, &points, Point::new(50.0, 8.0), 7.0).is_none());
    }

    #[test]
    fn test_exclude_skips_point() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(1.0, 0.0, None);
        let line = Shape::Line(Line::new(a, b, None));
        let registry = HitTest::standard();
        let found = registry.shape_point(&line, &points, Point::new(0.0, 0.0), 5.0, Some(a));
        assert_eq!(found, Some(b));
    }

    #[test]
    fn test_cubic_contains_on_curve() {
        let mut points = PointArena::new();
        let ids: Vec<_> = [(0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0)]
            .iter()
            .map(|(x, y)| points.add(*x, *y, None))
            .collect();
        let curve = Shape::CubicBezier(CubicBezier::new(ids[0], ids[1], ids[2], ids[3], None));
        let registry = HitTest::standard();
        // Midpoint of this symmetric curve is (50, 75).
        assert!(registry.contains(&curve, &points, Point::new(50.0, 75.0), 2.0).is_some());
        assert!(registry.contains(&curve, &points, Point::new(50.0, 40.0), 2.0).is_none());
    }

    #[test]
    fn test_ellipse_contains() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(20.0, 10.0, None);
        let ellipse = Shape::Ellipse(Ellipse::new(a, b, None));
        let registry = HitTest::standard();
        assert!(registry.contains(&ellipse, &points, Point::new(10.0, 5.0), 0.0).is_some());
        assert!(registry.contains(&ellipse, &points, Point::new(0.5, 0.5), 0.0).is_none());
    }

    #[test]
    fn test_group_point_prefers_joints() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(10.0, 0.0, None);
        let joint = points.add(0.0, 0.0, None);
        let mut group = Group::new(vec![Shape::Line(Line::new(a, b, None))]);
        group.aux.push(joint);
        let registry = HitTest::standard();
        let found = registry.shape_point(&Shape::Group(group), &points, Point::new(0.0, 0.0), 1.0, None);
        assert_eq!(found, Some(joint));
    }

    #[test]
    fn test_filled_path_contains_interior() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(100.0, 0.0, None);
        let c = points.add(100.0, 100.0, None);
        let mut path = Path::new(None);
        path.figures.push(Figure {
            segments: vec![
                Shape::Line(Line::new(a, b, None)),
                Shape::Line(Line::new(b, c, None)),
                Shape::Line(Line::new(c, a, None)),
            ],
            is_closed: true,
            is_filled: true,
        });
        let shape = Shape::Path(path);
        let registry = HitTest::standard();
        assert!(registry.contains(&shape, &points, Point::new(70.0, 20.0), 1.0).is_some());
        assert!(registry.contains(&shape, &points, Point::new(20.0, 70.0), 1.0).is_none());
    }
}
