//! Two-click tools that span a box: rectangle and ellipse.

use kurbo::Point;

use super::settings::{EllipseToolSettings, RectangleToolSettings};
use super::{Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::selection::ObjectId;
use crate::shapes::{Ellipse, Rectangle, Shape, ShapeId};

/// Progress of a box gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerState {
    #[default]
    TopLeft,
    BottomRight {
        shape: ShapeId,
        top_left: PointId,
        bottom_right: PointId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoxKind {
    Rectangle,
    Ellipse,
}

impl BoxKind {
    fn create(self, top_left: PointId, bottom_right: PointId, ctx: &ToolContext) -> Shape {
        match self {
            BoxKind::Rectangle => Rectangle::new(top_left, bottom_right, ctx.current_style).into(),
            BoxKind::Ellipse => Ellipse::new(top_left, bottom_right, ctx.current_style).into(),
        }
    }
}

fn set_bottom_right(shape: &mut Shape, point: PointId) {
    match shape {
        Shape::Rectangle(r) => r.bottom_right = point,
        Shape::Ellipse(e) => e.bottom_right = point,
        _ => {}
    }
}

#[derive(Debug)]
struct CornerGesture {
    kind: BoxKind,
    state: CornerState,
}

impl CornerGesture {
    fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            state: CornerState::TopLeft,
        }
    }

    fn left_down(&mut self, ctx: &mut ToolContext, filters: &mut FilterChain, point: Point, connect: bool, radius: f64) {
        let p = filtered(filters, ctx, point);
        match self.state {
            CornerState::TopLeft => {
                let top_left = ctx.get_next_point(p.x, p.y, connect, radius);
                let bottom_right = ctx.new_point(p.x, p.y);
                let shape = self.kind.create(top_left, bottom_right, ctx);
                let Some(id) = shape.id() else { return };
                ctx.working.add_shape(shape);
                ctx.selection.insert(ObjectId::Point(top_left));
                ctx.selection.insert(ObjectId::Point(bottom_right));
                ctx.capture();
                ctx.invalidate();
                self.state = CornerState::BottomRight {
                    shape: id,
                    top_left,
                    bottom_right,
                };
            }
            CornerState::BottomRight {
                shape,
                top_left,
                bottom_right,
            } => {
                self.state = CornerState::TopLeft;
                ctx.selection.remove(&ObjectId::Point(bottom_right));
                ctx.selection.remove(&ObjectId::Point(top_left));
                match connect.then(|| ctx.find_point(p, radius)).flatten() {
                    Some(existing) => {
                        if let Some(working) = ctx.working_shape_mut(shape) {
                            set_bottom_right(working, existing);
                        }
                    }
                    None => ctx.points.set_position(bottom_right, p.x, p.y),
                }
                ctx.commit(shape);
                filters.clear(ctx);
                ctx.release();
                ctx.invalidate();
            }
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, filters: &mut FilterChain, point: Point) {
        let p = filtered(filters, ctx, point);
        if let CornerState::BottomRight { bottom_right, .. } = self.state {
            ctx.points.set_position(bottom_right, p.x, p.y);
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext, filters: &mut FilterChain) {
        filters.clear(ctx);
        if let CornerState::BottomRight { shape, .. } = std::mem::take(&mut self.state) {
            ctx.discard(shape);
        }
        ctx.release();
        ctx.invalidate();
    }
}

/// Draws rectangles: click the first corner, click the opposite corner.
#[derive(Debug)]
pub struct RectangleTool {
    pub settings: RectangleToolSettings,
    filters: FilterChain,
    gesture: CornerGesture,
}

impl RectangleTool {
    pub fn new(settings: RectangleToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            gesture: CornerGesture::new(BoxKind::Rectangle),
        }
    }

    pub fn state(&self) -> CornerState {
        self.gesture.state
    }
}

impl Tool for RectangleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let (connect, radius) = (self.settings.connect_points, self.settings.hit_test_radius);
        self.gesture.left_down(ctx, &mut self.filters, point, connect, radius);
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        self.gesture.pointer_move(ctx, &mut self.filters, point);
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.gesture.clean(ctx, &mut self.filters);
    }

    fn is_active(&self) -> bool {
        self.gesture.state != CornerState::TopLeft
    }
}

/// Draws ellipses inscribed in a two-corner box.
#[derive(Debug)]
pub struct EllipseTool {
    pub settings: EllipseToolSettings,
    filters: FilterChain,
    gesture: CornerGesture,
}

impl EllipseTool {
    pub fn new(settings: EllipseToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            gesture: CornerGesture::new(BoxKind::Ellipse),
        }
    }

    pub fn state(&self) -> CornerState {
        self.gesture.state
    }
}

impl Tool for EllipseTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Ellipse
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let (connect, radius) = (self.settings.connect_points, self.settings.hit_test_radius);
        self.gesture.left_down(ctx, &mut self.filters, point, connect, radius);
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.clean(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        self.gesture.pointer_move(ctx, &mut self.filters, point);
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.gesture.clean(ctx, &mut self.filters);
    }

    fn is_active(&self) -> bool {
        self.gesture.state != CornerState::TopLeft
    }
}
