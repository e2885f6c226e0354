//! Geometry primitives and the distance / intersection math shared by hit-testing,
//! snapping and the intersection providers.

use kurbo::{CubicBez, ParamCurve, Point, QuadBez, Rect, Vec2};

/// Number of segments used when flattening curves for hit-testing.
pub const CURVE_SAMPLES: usize = 32;

const EPSILON: f64 = 1e-9;

/// Build a normalized rectangle from two arbitrary corners (handles inverted drags).
pub fn rect_from_points(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Inclusive containment test (kurbo's `Rect::contains` is half-open).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Inclusive overlap test between two rectangles.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    let (a, b) = (a.abs(), b.abs());
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Closest point on the segment a→b to `point`.
pub fn nearest_on_segment(point: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => point.distance(*single),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Flatten a cubic bezier into `CURVE_SAMPLES + 1` points.
pub fn sample_cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
    let curve = CubicBez::new(p0, p1, p2, p3);
    (0..=CURVE_SAMPLES)
        .map(|i| curve.eval(i as f64 / CURVE_SAMPLES as f64))
        .collect()
}

/// Flatten a quadratic bezier into `CURVE_SAMPLES + 1` points.
pub fn sample_quadratic(p0: Point, p1: Point, p2: Point) -> Vec<Point> {
    let curve = QuadBez::new(p0, p1, p2);
    (0..=CURVE_SAMPLES)
        .map(|i| curve.eval(i as f64 / CURVE_SAMPLES as f64))
        .collect()
}

/// Intersection of segments a→b and c→d, as the parameter along a→b and the point.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<(f64, Point)> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < EPSILON {
        return None;
    }
    let qp = c - a;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    if (-EPSILON..=1.0 + EPSILON).contains(&t) && (-EPSILON..=1.0 + EPSILON).contains(&u) {
        Some((t.clamp(0.0, 1.0), a + r * t))
    } else {
        None
    }
}

/// Test if two line segments (a-b) and (c-d) intersect, including collinear touches.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}

/// Test if any segment of a polyline crosses or lies inside a rectangle.
pub fn polyline_intersects_rect(points: &[Point], rect: Rect) -> bool {
    let rect = rect.abs();
    if points.iter().any(|p| rect_contains(rect, *p)) {
        return true;
    }
    let edges = rect_edges(rect);
    points.windows(2).any(|w| {
        edges
            .iter()
            .any(|&(c, d)| segments_intersect(w[0], w[1], c, d))
    })
}

/// The four edges of a rectangle, clockwise from the top-left corner.
pub fn rect_edges(rect: Rect) -> [(Point, Point); 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Normalized ellipse equation value for `point`: `<= 1.0` means inside.
/// The radii are grown by `tolerance` on each axis.
pub fn ellipse_value(bounds: Rect, point: Point, tolerance: f64) -> f64 {
    let bounds = bounds.abs();
    let center = bounds.center();
    let rx = bounds.width() / 2.0 + tolerance;
    let ry = bounds.height() / 2.0 + tolerance;
    if rx < EPSILON || ry < EPSILON {
        return f64::INFINITY;
    }
    let d = point - center;
    (d.x * d.x) / (rx * rx) + (d.y * d.y) / (ry * ry)
}

/// Intersections of the segment a→b with the axis-aligned ellipse inscribed in
/// `bounds`, as (parameter, point) pairs ordered by parameter.
pub fn segment_ellipse_intersections(a: Point, b: Point, bounds: Rect) -> Vec<(f64, Point)> {
    let bounds = bounds.abs();
    let center = bounds.center();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx < EPSILON || ry < EPSILON {
        return Vec::new();
    }
    let d = b - a;
    let o = a - center;
    let qa = (d.x * d.x) / (rx * rx) + (d.y * d.y) / (ry * ry);
    let qb = 2.0 * ((o.x * d.x) / (rx * rx) + (o.y * d.y) / (ry * ry));
    let qc = (o.x * o.x) / (rx * rx) + (o.y * o.y) / (ry * ry) - 1.0;
    if qa.abs() < EPSILON {
        return Vec::new();
    }
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return Vec::new();
    }
    let sqrt = disc.sqrt();
    let mut hits: Vec<(f64, Point)> = [(-qb - sqrt) / (2.0 * qa), (-qb + sqrt) / (2.0 * qa)]
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| (t, a + d * t))
        .collect();
    hits.dedup_by(|x, y| (x.0 - y.0).abs() < EPSILON);
    hits
}

/// Parameter of `point` projected onto a→b (unclamped).
pub fn segment_parameter(a: Point, b: Point, point: Point) -> f64 {
    let seg: Vec2 = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return 0.0;
    }
    (point - a).dot(seg) / len_sq
}
