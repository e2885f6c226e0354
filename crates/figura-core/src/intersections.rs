//! Intersection providers.
//!
//! Line drawing tools ask each provider where a proposed segment crosses
//! committed shapes, so the segment can be split at those points.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::{rect_edges, segment_ellipse_intersections, segment_intersection};
use crate::points::PointArena;
use crate::shapes::Shape;

/// A crossing along a segment: its parameter from the start point and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub point: Point,
}

/// Computes where a segment crosses one kind of shape.
pub trait PointIntersection {
    fn title(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Crossings of `start → end` with `shapes`, in any order.
    fn find(&self, shapes: &[Shape], points: &PointArena, start: Point, end: Point) -> Vec<Intersection>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSettings {
    pub is_enabled: bool,
}

impl Default for IntersectionSettings {
    fn default() -> Self {
        Self { is_enabled: true }
    }
}

/// Crossings with line shapes.
#[derive(Debug, Default)]
pub struct LineLineIntersection {
    pub settings: IntersectionSettings,
}

impl PointIntersection for LineLineIntersection {
    fn title(&self) -> &str {
        "Line-Line"
    }

    fn is_enabled(&self) -> bool {
        self.settings.is_enabled
    }

    fn find(&self, shapes: &[Shape], points: &PointArena, start: Point, end: Point) -> Vec<Intersection> {
        shapes
            .iter()
            .filter_map(Shape::as_line)
            .filter_map(|line| {
                segment_intersection(start, end, line.start_position(points), line.end_position(points))
            })
            .map(|(t, point)| Intersection { t, point })
            .collect()
    }
}

/// Crossings with rectangle edges.
#[derive(Debug, Default)]
pub struct RectangleLineIntersection {
    pub settings: IntersectionSettings,
}

impl PointIntersection for RectangleLineIntersection {
    fn title(&self) -> &str {
        "Rectangle-Line"
    }

    fn is_enabled(&self) -> bool {
        self.settings.is_enabled
    }

    fn find(&self, shapes: &[Shape], points: &PointArena, start: Point, end: Point) -> Vec<Intersection> {
        let mut hits = Vec::new();
        for shape in shapes {
            let Shape::Rectangle(rect) = shape else {
                continue;
            };
            for (a, b) in rect_edges(rect.rect(points)) {
                if let Some((t, point)) = segment_intersection(start, end, a, b) {
                    // A crossing through a corner shows up on both edges
                    if !hits.iter().any(|h: &Intersection| (h.t - t).abs() < 1e-9) {
                        hits.push(Intersection { t, point });
                    }
                }
            }
        }
        hits
    }
}

/// Crossings with ellipse outlines.
#[derive(Debug, Default)]
pub struct EllipseLineIntersection {
    pub settings: IntersectionSettings,
}

impl PointIntersection for EllipseLineIntersection {
    fn title(&self) -> &str {
        "Ellipse-Line"
    }

    fn is_enabled(&self) -> bool {
        self.settings.is_enabled
    }

    fn find(&self, shapes: &[Shape], points: &PointArena, start: Point, end: Point) -> Vec<Intersection> {
        shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Ellipse(e) => Some(e.rect(points)),
                _ => None,
            })
            .flat_map(|bounds| segment_ellipse_intersections(start, end, bounds))
            .map(|(t, point)| Intersection { t, point })
            .collect()
    }
}

/// The built-in providers.
pub fn standard_intersections() -> Vec<Box<dyn PointIntersection>> {
    vec![
        Box::new(LineLineIntersection::default()),
        Box::new(RectangleLineIntersection::default()),
        Box::new(EllipseLineIntersection::default()),
    ]
}

/// Interior crossings from every enabled provider, ordered by distance from
/// `start`. Crossings at either end of the segment are dropped.
pub fn collect_intersections(
    providers: &[Box<dyn PointIntersection>],
    shapes: &[Shape],
    points: &PointArena,
    start: Point,
    end: Point,
) -> Vec<Intersection> {
    const END_TOLERANCE: f64 = 1e-6;
    let mut hits: Vec<Intersection> = providers
        .iter()
        .filter(|p| p.is_enabled())
        .flat_map(|p| p.find(shapes, points, start, end))
        .filter(|h| h.t > END_TOLERANCE && h.t < 1.0 - END_TOLERANCE)
        .collect();
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits.dedup_by(|a, b| (a.t - b.t).abs() < END_TOLERANCE);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Line, Rectangle};

    #[test]
    fn test_sorted_by_distance_from_start() {
        let mut points = PointArena::new();
        let v1 = (points.add(30.0, -10.0, None), points.add(30.0, 10.0, None));
        let v2 = (points.add(10.0, -10.0, None), points.add(10.0, 10.0, None));
        let shapes = vec![
            Shape::Line(Line::new(v1.0, v1.1, None)),
            Shape::Line(Line::new(v2.0, v2.1, None)),
        ];
        let hits = collect_intersections(
            &standard_intersections(),
            &shapes,
            &points,
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
        );
        assert_eq!(hits.len(), 2);
        assert!((hits[0].point.x - 10.0).abs() < 1e-9);
        assert!((hits[1].point.x - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangle_and_ellipse() {
        let mut points = PointArena::new();
        let r = (points.add(10.0, -10.0, None), points.add(20.0, 10.0, None));
        let e = (points.add(30.0, -10.0, None), points.add(50.0, 10.0, None));
        let shapes = vec![
            Shape::Rectangle(Rectangle::new(r.0, r.1, None)),
            Shape::Ellipse(Ellipse::new(e.0, e.1, None)),
        ];
        let hits = collect_intersections(
            &standard_intersections(),
            &shapes,
            &points,
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
        );
        let xs: Vec<f64> = hits.iter().map(|h| h.point.x.round()).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0, 50.0]);
    }

    #[test]
    fn test_end_points_excluded() {
        let mut points = PointArena::new();
        let a = points.add(0.0, -10.0, None);
        let b = points.add(0.0, 10.0, None);
        let shapes = vec![Shape::Line(Line::new(a, b, None))];
        let hits = collect_intersections(
            &standard_intersections(),
            &shapes,
            &points,
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_disabled_provider_skipped() {
        let mut points = PointArena::new();
        let a = points.add(10.0, -10.0, None);
        let b = points.add(10.0, 10.0, None);
        let shapes = vec![Shape::Line(Line::new(a, b, None))];
        let providers: Vec<Box<dyn PointIntersection>> = vec![Box::new(LineLineIntersection {
            settings: IntersectionSettings { is_enabled: false },
        })];
        let hits = collect_intersections(&providers, &shapes, &points, Point::ZERO, Point::new(40.0, 0.0));
        assert!(hits.is_empty());
    }
}
