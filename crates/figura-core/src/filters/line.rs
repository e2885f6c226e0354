//! Snapping to the end points, middles and bodies of existing lines.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::{GuideLines, PointFilter};
use crate::context::ToolContext;
use crate::geometry::{nearest_on_segment, segment_intersection};
use crate::shapes::Shape;
use crate::style::Style;

/// Snap candidates a line offers, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapMode {
    pub point: bool,
    pub middle: bool,
    pub intersection: bool,
    pub horizontal: bool,
    pub vertical: bool,
    pub nearest: bool,
}

impl Default for LineSnapMode {
    fn default() -> Self {
        Self {
            point: true,
            middle: true,
            intersection: true,
            horizontal: true,
            vertical: true,
            nearest: true,
        }
    }
}

/// Container lists searched for lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapTarget {
    pub shapes: bool,
    pub guides: bool,
}

impl Default for LineSnapTarget {
    fn default() -> Self {
        Self {
            shapes: true,
            guides: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapSettings {
    pub is_enabled: bool,
    pub enable_guides: bool,
    pub target: LineSnapTarget,
    pub mode: LineSnapMode,
    /// Maximum snap distance.
    pub threshold: f64,
    #[serde(default = "Style::default_guide")]
    pub guide_style: Style,
}

impl Default for LineSnapSettings {
    fn default() -> Self {
        Self {
            is_enabled: true,
            enable_guides: true,
            target: LineSnapTarget::default(),
            mode: LineSnapMode::default(),
            threshold: 10.0,
            guide_style: Style::default_guide(),
        }
    }
}

/// Result of snapping against a set of segments.
#[derive(Debug, Clone, PartialEq)]
struct LineSnap {
    point: Point,
    /// Feedback segments to draw.
    guides: Vec<(Point, Point)>,
}

fn within(a: Point, b: Point, threshold: f64) -> bool {
    a.distance(b) < threshold
}

fn snap_to_segments(segments: &[(Point, Point)], target: Point, mode: LineSnapMode, threshold: f64) -> Option<LineSnap> {
    let found = |point: Point, guides: Vec<(Point, Point)>| Some(LineSnap { point, guides });

    if mode.point {
        for &(a, b) in segments {
            for end in [a, b] {
                if within(end, target, threshold) {
                    return found(end, vec![(a, b)]);
                }
            }
        }
    }

    if mode.middle {
        for &(a, b) in segments {
            let middle = a.midpoint(b);
            if within(middle, target, threshold) {
                return found(middle, vec![(a, b)]);
            }
        }
    }

    if mode.intersection {
        for (i, &(a, b)) in segments.iter().enumerate() {
            for &(c, d) in &segments[i + 1..] {
                if let Some((_, hit)) = segment_intersection(a, b, c, d) {
                    if within(hit, target, threshold) {
                        return found(hit, vec![(a, b), (c, d)]);
                    }
                }
            }
        }
    }

    let mut aligned = target;
    let mut guides = Vec::new();
    if mode.horizontal {
        let anchor = segments
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .find(|p| (p.y - target.y).abs() < threshold);
        if let Some(anchor) = anchor {
            aligned.y = anchor.y;
            guides.push((anchor, Point::new(target.x, anchor.y)));
        }
    }
    if mode.vertical {
        let anchor = segments
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .find(|p| (p.x - target.x).abs() < threshold);
        if let Some(anchor) = anchor {
            aligned.x = anchor.x;
            guides.push((anchor, Point::new(anchor.x, aligned.y)));
        }
    }
    if !guides.is_empty() {
        return found(aligned, guides);
    }

    if mode.nearest {
        for &(a, b) in segments {
            let nearest = nearest_on_segment(target, a, b);
            if within(nearest, target, threshold) {
                return found(nearest, vec![(a, b)]);
            }
        }
    }

    None
}

/// Snaps to top-level lines in the current container.
#[derive(Debug, Default)]
pub struct LineSnapFilter {
    pub settings: LineSnapSettings,
    guides: GuideLines,
}

impl LineSnapFilter {
    pub fn new(settings: LineSnapSettings) -> Self {
        Self {
            settings,
            guides: GuideLines::default(),
        }
    }

    fn segments(&self, ctx: &ToolContext) -> Vec<(Point, Point)> {
        let target = self.settings.target;
        let guides = target.guides.then_some(ctx.current.guides.iter()).into_iter().flatten();
        let shapes = target.shapes.then_some(ctx.current.shapes.iter()).into_iter().flatten();
        guides
            .chain(shapes)
            .filter_map(Shape::as_line)
            .map(|l| (l.start_position(&ctx.points), l.end_position(&ctx.points)))
            .collect()
    }
}

impl PointFilter for LineSnapFilter {
    fn title(&self) -> &str {
        "Line-Snap"
    }

    fn process(&mut self, ctx: &mut ToolContext, point: &mut Point) -> bool {
        if !self.settings.is_enabled {
            return false;
        }
        let segments = self.segments(ctx);
        let Some(snap) = snap_to_segments(&segments, *point, self.settings.mode, self.settings.threshold) else {
            return false;
        };
        log::trace!("Line snap ({}, {}) -> ({}, {})", point.x, point.y, snap.point.x, snap.point.y);
        *point = snap.point;

        if self.settings.enable_guides {
            let style = self.settings.guide_style.clone();
            for (a, b) in snap.guides {
                self.guides.add(ctx, a, b, &style);
            }
        }
        true
    }

    fn clear(&mut self, ctx: &mut ToolContext) {
        self.guides.clear(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Line;

    fn context_with_line(a: (f64, f64), b: (f64, f64)) -> ToolContext {
        let mut ctx = ToolContext::default();
        let a = ctx.new_point(a.0, a.1);
        let b = ctx.new_point(b.0, b.1);
        ctx.current.add_shape(Line::new(a, b, None));
        ctx
    }

    #[test]
    fn test_end_point_wins_over_nearest() {
        let mut ctx = context_with_line((0.0, 0.0), (100.0, 0.0));
        let mut filter = LineSnapFilter::default();
        let mut point = Point::new(97.0, 3.0);
        assert!(filter.process(&mut ctx, &mut point));
        assert_eq!(point, Point::new(100.0, 0.0));
        assert_eq!(filter.guides.len(), 1);
    }

    #[test]
    fn test_middle() {
        let mut ctx = context_with_line((0.0, 0.0), (100.0, 0.0));
        let mut filter = LineSnapFilter::default();
        let mut point = Point::new(52.0, 4.0);
        filter.process(&mut ctx, &mut point);
        assert_eq!(point, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_horizontal_alignment() {
        let mut ctx = context_with_line((0.0, 0.0), (0.0, 100.0));
        let mut filter = LineSnapFilter::new(LineSnapSettings {
            mode: LineSnapMode {
                point: false,
                middle: false,
                intersection: false,
                horizontal: true,
                vertical: false,
                nearest: false,
            },
            ..LineSnapSettings::default()
        });
        let mut point = Point::new(200.0, 96.0);
        assert!(filter.process(&mut ctx, &mut point));
        assert_eq!(point, Point::new(200.0, 100.0));
    }

    #[test]
    fn test_intersection() {
        let segments = [
            (Point::new(0.0, 0.0), Point::new(100.0, 100.0)),
            (Point::new(0.0, 100.0), Point::new(100.0, 0.0)),
        ];
        let mode = LineSnapMode {
            point: false,
            middle: false,
            ..LineSnapMode::default()
        };
        let snap = snap_to_segments(&segments, Point::new(53.0, 48.0), mode, 10.0).expect("snaps");
        assert!((snap.point.x - 50.0).abs() < 1e-9 && (snap.point.y - 50.0).abs() < 1e-9);
        assert_eq!(snap.guides.len(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let mut ctx = context_with_line((0.0, 0.0), (100.0, 0.0));
        let mut filter = LineSnapFilter::default();
        let mut point = Point::new(300.0, 300.0);
        assert!(!filter.process(&mut ctx, &mut point));
        assert_eq!(point, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_targets_respected() {
        let mut ctx = context_with_line((0.0, 0.0), (100.0, 0.0));
        let mut filter = LineSnapFilter::new(LineSnapSettings {
            target: LineSnapTarget {
                shapes: false,
                guides: true,
            },
            ..LineSnapSettings::default()
        });
        let mut point = Point::new(97.0, 3.0);
        assert!(!filter.process(&mut ctx, &mut point));
    }
}
