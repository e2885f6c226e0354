//! Drawing capability consumed by shapes.
//!
//! Shapes resolve their geometry and style, then call into a [`ShapeRenderer`]
//! supplied by the host. Rasterization lives behind that trait.

use kurbo::{BezPath, CubicBez, Point, QuadBez, Rect, Vec2};

use crate::container::Container;
use crate::points::{PointArena, PointId};
use crate::selection::Selection;
use crate::style::{Style, StyleId};

/// Per-kind drawing primitives. `offset` translates everything drawn.
pub trait ShapeRenderer {
    fn draw_line(&mut self, start: Point, end: Point, style: &Style, offset: Vec2);
    fn draw_cubic_bezier(&mut self, curve: CubicBez, style: &Style, offset: Vec2);
    fn draw_quadratic_bezier(&mut self, curve: QuadBez, style: &Style, offset: Vec2);
    fn draw_path(&mut self, path: &BezPath, style: &Style, offset: Vec2);
    fn draw_rectangle(&mut self, rect: Rect, style: &Style, offset: Vec2);
    fn draw_ellipse(&mut self, rect: Rect, style: &Style, offset: Vec2);
}

/// State a shape needs while drawing itself.
pub struct DrawContext<'a> {
    pub points: &'a PointArena,
    pub styles: &'a [Style],
    pub selection: &'a Selection,
    pub offset: Vec2,
}

impl<'a> DrawContext<'a> {
    pub fn new(points: &'a PointArena, styles: &'a [Style], selection: &'a Selection) -> Self {
        Self {
            points,
            styles,
            selection,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Look up a style table entry.
    pub fn style(&self, id: Option<StyleId>) -> Option<&'a Style> {
        let id = id?;
        self.styles.iter().find(|s| s.id == id)
    }

    /// Draw a point handle using its template. Points without one are invisible.
    pub fn draw_point(&self, renderer: &mut dyn ShapeRenderer, point: PointId) {
        let shape = &self.points[point];
        let Some(template) = shape.template else {
            return;
        };
        let Some(style) = self.style(template.style) else {
            return;
        };
        let bounds = template.bounds(shape.position());
        if template.round {
            renderer.draw_ellipse(bounds, style, self.offset);
        } else {
            renderer.draw_rectangle(bounds, style, self.offset);
        }
    }

    /// Draw handles for the anchors that are currently selected.
    pub fn draw_selected_handles(&self, renderer: &mut dyn ShapeRenderer, anchors: &[PointId]) {
        for &point in anchors {
            if self.selection.contains_point(point) {
                self.draw_point(renderer, point);
            }
        }
    }

    /// Draw handles unconditionally.
    pub fn draw_handles(&self, renderer: &mut dyn ShapeRenderer, points: &[PointId]) {
        for &point in points {
            self.draw_point(renderer, point);
        }
    }
}

/// Draw guides, then shapes, of one container.
pub fn draw_container(
    renderer: &mut dyn ShapeRenderer,
    container: &Container,
    points: &PointArena,
    selection: &Selection,
    offset: Vec2,
) {
    let ctx = DrawContext::new(points, &container.styles, selection).with_offset(offset);
    for guide in &container.guides {
        guide.draw(renderer, &ctx);
    }
    for shape in &container.shapes {
        shape.draw(renderer, &ctx);
    }
}
