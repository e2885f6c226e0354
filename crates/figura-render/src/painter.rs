//! Flattening of editor shapes into fill and stroke commands.

use figura_core::{ShapeRenderer, Style};
use kurbo::{Affine, BezPath, CubicBez, Ellipse, Line, Point, QuadBez, Rect, Shape as KurboShape, Size, Vec2};
use peniko::Color;

use crate::renderer::{GridStyle, RenderContext};

const TOLERANCE: f64 = 0.1;

/// Backend primitive: paint a path with a transform.
pub trait PathSink {
    fn fill(&mut self, transform: Affine, path: &BezPath, color: Color);
    fn stroke(&mut self, transform: Affine, path: &BezPath, color: Color, width: f64);
}

/// Adapts a [`PathSink`] to the per-kind drawing calls shapes make.
pub struct Painter<'a, S: PathSink + ?Sized> {
    sink: &'a mut S,
    transform: Affine,
}

impl<'a, S: PathSink + ?Sized> Painter<'a, S> {
    pub fn new(sink: &'a mut S, transform: Affine) -> Self {
        Self { sink, transform }
    }

    fn paint(&mut self, path: BezPath, style: &Style, offset: Vec2, fillable: bool) {
        let transform = self.transform * Affine::translate(offset);
        if fillable {
            if let Some(color) = style.fill_color() {
                self.sink.fill(transform, &path, color);
            }
        }
        if let Some(color) = style.stroke_color() {
            self.sink.stroke(transform, &path, color, style.thickness);
        }
    }
}

impl<S: PathSink + ?Sized> ShapeRenderer for Painter<'_, S> {
    fn draw_line(&mut self, start: Point, end: Point, style: &Style, offset: Vec2) {
        self.paint(Line::new(start, end).to_path(TOLERANCE), style, offset, false);
    }

    fn draw_cubic_bezier(&mut self, curve: CubicBez, style: &Style, offset: Vec2) {
        self.paint(curve.to_path(TOLERANCE), style, offset, true);
    }

    fn draw_quadratic_bezier(&mut self, curve: QuadBez, style: &Style, offset: Vec2) {
        self.paint(curve.to_path(TOLERANCE), style, offset, true);
    }

    fn draw_path(&mut self, path: &BezPath, style: &Style, offset: Vec2) {
        self.paint(path.clone(), style, offset, true);
    }

    fn draw_rectangle(&mut self, rect: Rect, style: &Style, offset: Vec2) {
        self.paint(rect.to_path(TOLERANCE), style, offset, true);
    }

    fn draw_ellipse(&mut self, rect: Rect, style: &Style, offset: Vec2) {
        self.paint(Ellipse::from_rect(rect).to_path(TOLERANCE), style, offset, true);
    }
}

fn grid_path(style: GridStyle, area: Size, size: f64) -> Option<BezPath> {
    if style == GridStyle::None || size <= 0.0 {
        return None;
    }
    let columns = (area.width / size).floor() as usize;
    let rows = (area.height / size).floor() as usize;
    let mut path = BezPath::new();
    match style {
        GridStyle::None => {}
        GridStyle::Lines => {
            for i in 0..=columns {
                let x = i as f64 * size;
                path.move_to((x, 0.0));
                path.line_to((x, area.height));
            }
            for j in 0..=rows {
                let y = j as f64 * size;
                path.move_to((0.0, y));
                path.line_to((area.width, y));
            }
        }
        GridStyle::Dots => {
            for i in 0..=columns {
                for j in 0..=rows {
                    let center = Point::new(i as f64 * size, j as f64 * size);
                    path.extend(Rect::from_center_size(center, (1.5, 1.5)).path_elements(TOLERANCE));
                }
            }
        }
    }
    Some(path)
}

/// Paint a whole frame: background, grid, committed shapes, then previews.
pub fn paint_frame<S: PathSink + ?Sized>(sink: &mut S, ctx: &RenderContext) {
    let screen = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);
    sink.fill(Affine::IDENTITY, &screen.to_path(TOLERANCE), ctx.background_color);

    let transform = Affine::scale(ctx.scale_factor);
    let scale = if ctx.scale_factor > 0.0 { ctx.scale_factor } else { 1.0 };
    let area = ctx.viewport_size / scale;
    if let Some(grid) = grid_path(ctx.grid_style, area, ctx.grid_size) {
        match ctx.grid_style {
            GridStyle::Dots => sink.fill(transform, &grid, ctx.grid_color),
            _ => sink.stroke(transform, &grid, ctx.grid_color, 1.0 / scale),
        }
    }

    ctx.editor.draw(&mut Painter::new(sink, transform));
}
