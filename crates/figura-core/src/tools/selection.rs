//! Selection tool: click to select, drag to move, drag on empty space to
//! rubber-band select. Dragging a shared point breaks it away from its other
//! holders first; dropping a point on another point merges the two.

use std::collections::HashMap;

use kurbo::Point;

use super::settings::SelectionToolSettings;
use super::{Edit, Tool, ToolKind, filtered};
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::geometry::rect_from_points;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::selection::{ObjectId, deselect_object, select_object, try_to_hover, try_to_select, try_to_select_rect};
use crate::shapes::{Group, Rectangle, Shape, ShapeId, ShapeTrait};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    None,
    /// Rubber-band rectangle in the working container.
    Rectangle {
        shape: ShapeId,
        top_left: PointId,
        bottom_right: PointId,
    },
    /// Dragging the selection. `dragged` is the single point being moved, if any.
    Move {
        origin: Point,
        dragged: Option<PointId>,
    },
}

#[derive(Debug)]
pub struct SelectionTool {
    pub settings: SelectionToolSettings,
    filters: FilterChain,
    state: SelectionState,
    hover: Option<ObjectId>,
    clipboard: Vec<Shape>,
}

impl SelectionTool {
    pub fn new(settings: SelectionToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            state: SelectionState::None,
            hover: None,
            clipboard: Vec::new(),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The object highlighted under the cursor.
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hover
    }

    /// Shapes held by the last copy.
    pub fn clipboard(&self) -> &[Shape] {
        &self.clipboard
    }

    fn set_hover(&mut self, ctx: &mut ToolContext, id: ObjectId) {
        select_object(&ctx.current, &mut ctx.selection, id);
        self.hover = Some(id);
    }

    /// Drop the hover highlight from the selection.
    pub fn dehover(&mut self, ctx: &mut ToolContext) {
        if let Some(id) = self.hover.take() {
            deselect_object(&ctx.current, &mut ctx.selection, id);
        }
    }

    /// Merge `point` into the nearest other point within the connect radius.
    ///
    /// The first connectable shape (in container order) holding `point` is
    /// rewired onto the found point, which takes `point`'s place in the
    /// selection. When no connectable holds `point` (a rectangle corner, say),
    /// the first connectable holding the found point is rewired onto `point`
    /// instead. Returns whether a connection was made.
    pub fn connect(&self, ctx: &mut ToolContext, point: PointId) -> bool {
        let position = ctx.points.position(point);
        let Some(target) = ctx.hit_test.try_get_point_excluding(
            &ctx.current.shapes,
            &ctx.points,
            position,
            self.settings.connect_test_radius,
            Some(point),
        ) else {
            return false;
        };
        let connected = ctx
            .current
            .shapes
            .iter_mut()
            .filter(|shape| shape.is_connectable())
            .any(|shape| shape.connect(target, point));
        if connected {
            log::debug!("Connected point {:?} to {:?}", point, target);
            ctx.selection.remove(&ObjectId::Point(point));
            ctx.selection.insert(ObjectId::Point(target));
            return true;
        }
        let adopted = ctx
            .current
            .shapes
            .iter_mut()
            .filter(|shape| shape.is_connectable())
            .any(|shape| shape.connect(point, target));
        if adopted {
            log::debug!("Connected point {:?} onto {:?}", target, point);
        }
        adopted
    }

    /// Break `point` away from the first connectable shape holding it.
    ///
    /// That shape receives a fresh copy, which replaces `point` in the
    /// selection. Returns the copy.
    pub fn disconnect(&self, ctx: &mut ToolContext, point: PointId) -> Option<PointId> {
        let copy = ctx
            .current
            .shapes
            .iter_mut()
            .filter(|shape| shape.is_connectable())
            .find_map(|shape| shape.disconnect_point(&mut ctx.points, point))?;
        log::debug!("Disconnected point {:?} as {:?}", point, copy);
        ctx.selection.remove(&ObjectId::Point(point));
        ctx.selection.insert(ObjectId::Point(copy));
        Some(copy)
    }

    /// Give a connectable shape its own copy of every point.
    pub fn disconnect_shape(&self, ctx: &mut ToolContext, id: ShapeId) -> bool {
        let Some(shape) = ctx.current.get_shape_mut(id) else {
            return false;
        };
        if !shape.is_connectable() {
            return false;
        }
        shape.deselect(&mut ctx.selection);
        let disconnected = shape.disconnect_all(&mut ctx.points);
        shape.select(&mut ctx.selection);
        disconnected
    }

    /// The point a drag will move. A single selected point shared by several
    /// shapes is disconnected first, and the copy is dragged instead.
    fn drag_target(&self, ctx: &mut ToolContext, press: Point) -> Option<PointId> {
        let point = ctx.selection.single_point()?;
        if !self.settings.disconnect_points
            || ctx.points.position(point).distance(press) > self.settings.disconnect_test_radius
        {
            return Some(point);
        }
        let holders = ctx.current.shapes.iter().filter(|s| s.references(point)).count();
        if holders < 2 {
            return Some(point);
        }
        Some(self.disconnect(ctx, point).unwrap_or(point))
    }

    fn begin_rectangle(&mut self, ctx: &mut ToolContext, p: Point) {
        let style = ctx.working.add_style(self.settings.selection_style.clone());
        let top_left = ctx.points.add(p.x, p.y, None);
        let bottom_right = ctx.points.add(p.x, p.y, None);
        let rectangle = Rectangle::new(top_left, bottom_right, Some(style));
        let shape = rectangle.id();
        ctx.working.add_shape(rectangle);
        self.state = SelectionState::Rectangle {
            shape,
            top_left,
            bottom_right,
        };
    }

    fn move_selection(&self, ctx: &mut ToolContext, delta: kurbo::Vec2) {
        for point in ctx.selection.points().collect::<Vec<_>>() {
            ctx.points.translate(point, delta);
        }
        let mut moved = ctx.selection.clone();
        for id in ctx.selection.shapes().collect::<Vec<_>>() {
            if let Some(shape) = ctx.current.find(id) {
                shape.move_by(&mut ctx.points, &moved, delta);
                for point in shape.points() {
                    moved.insert(ObjectId::Point(point));
                }
            }
        }
    }
}

fn remove_band(ctx: &mut ToolContext, shape: ShapeId) {
    if let Some(band) = ctx.working.remove_shape(shape) {
        ctx.release_points(&band);
    }
}

impl Tool for SelectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Selection
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, modifiers: Modifiers) {
        self.dehover(ctx);
        if let SelectionState::Rectangle { shape, .. } = self.state {
            remove_band(ctx, shape);
        }
        let origin = filtered(&mut self.filters, ctx, point);
        let (mode, targets, radius) = (self.settings.mode, self.settings.targets, self.settings.hit_test_radius);

        if try_to_select(ctx, mode, targets, point, radius, modifiers) {
            let dragged = self.drag_target(ctx, point);
            self.state = SelectionState::Move { origin, dragged };
        } else {
            if !modifiers.ctrl {
                ctx.selection.clear();
            }
            self.begin_rectangle(ctx, point);
        }
        ctx.capture();
        ctx.invalidate();
    }

    fn left_up(&mut self, ctx: &mut ToolContext, _point: Point, modifiers: Modifiers) {
        match std::mem::take(&mut self.state) {
            SelectionState::None => return,
            SelectionState::Rectangle {
                shape,
                top_left,
                bottom_right,
            } => {
                let rect = rect_from_points(ctx.points.position(top_left), ctx.points.position(bottom_right));
                remove_band(ctx, shape);
                let (mode, targets, radius) = (self.settings.mode, self.settings.targets, self.settings.hit_test_radius);
                try_to_select_rect(ctx, mode, targets, rect, radius, modifiers);
            }
            SelectionState::Move { dragged, .. } => {
                if let Some(dragged) = dragged {
                    if self.settings.connect_points && ctx.selection.single_point() == Some(dragged) {
                        self.connect(ctx, dragged);
                    }
                }
            }
        }
        self.filters.clear(ctx);
        ctx.release();
        ctx.invalidate();
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        match self.state {
            SelectionState::None => {
                let (mode, targets, radius) = (self.settings.mode, self.settings.targets, self.settings.hit_test_radius);
                let candidate = try_to_hover(ctx, mode, targets, point, radius);
                if candidate == self.hover {
                    return;
                }
                self.dehover(ctx);
                if let Some(id) = candidate.filter(|id| !ctx.selection.contains(id)) {
                    self.set_hover(ctx, id);
                }
            }
            SelectionState::Rectangle { bottom_right, .. } => {
                ctx.points.set_position(bottom_right, point.x, point.y);
            }
            SelectionState::Move { origin, dragged } => {
                let p = filtered(&mut self.filters, ctx, point);
                let delta = p - origin;
                if delta.hypot2() > 0.0 {
                    self.move_selection(ctx, delta);
                    self.state = SelectionState::Move { origin: p, dragged };
                }
            }
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        if let SelectionState::Rectangle { shape, .. } = std::mem::take(&mut self.state) {
            remove_band(ctx, shape);
        }
        self.filters.clear(ctx);
        if self.settings.clear_selection_on_clean {
            ctx.selection.clear();
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != SelectionState::None
    }

    fn as_edit(&mut self) -> Option<&mut dyn Edit> {
        Some(self)
    }
}

impl Edit for SelectionTool {
    fn cut(&mut self, ctx: &mut ToolContext) {
        self.copy(ctx);
        self.delete(ctx);
    }

    fn copy(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        self.clipboard = ctx
            .current
            .shapes
            .iter()
            .filter(|shape| ctx.selection.contains(&shape.object_id()))
            .cloned()
            .collect();
        log::debug!("Copied {} shapes", self.clipboard.len());
    }

    fn paste(&mut self, ctx: &mut ToolContext) {
        if self.clipboard.is_empty() {
            return;
        }
        self.dehover(ctx);
        ctx.selection.clear();
        let mut remap = HashMap::new();
        for shape in &self.clipboard {
            let clone = shape.duplicate(&mut ctx.points, &mut remap);
            clone.select(&mut ctx.selection);
            ctx.current.shapes.push(clone);
        }
        log::debug!("Pasted {} shapes", self.clipboard.len());
        self.state = SelectionState::None;
        ctx.invalidate();
    }

    fn delete(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        let selection = &ctx.selection;
        let before = ctx.current.shapes.len() + ctx.current.guides.len();
        ctx.current.shapes.retain(|shape| !selection.contains(&shape.object_id()));
        ctx.current.guides.retain(|shape| !selection.contains(&shape.object_id()));
        for point in selection.points() {
            for shape in &mut ctx.current.shapes {
                shape.remove_point(point);
            }
        }
        let removed = before - ctx.current.shapes.len() - ctx.current.guides.len();
        log::debug!("Deleted {removed} shapes");
        ctx.selection.clear();
        ctx.invalidate();
    }

    fn group(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        let (grouped, rest): (Vec<Shape>, Vec<Shape>) = std::mem::take(&mut ctx.current.shapes)
            .into_iter()
            .partition(|shape| !matches!(shape, Shape::Point(_)) && ctx.selection.contains(&shape.object_id()));
        ctx.current.shapes = rest;
        if grouped.is_empty() {
            return;
        }
        for shape in &grouped {
            shape.deselect(&mut ctx.selection);
        }
        let group = Group::new(grouped);
        log::debug!("Grouped {} shapes into {}", group.shapes.len(), group.id());
        let group = Shape::from(group);
        group.select(&mut ctx.selection);
        ctx.current.shapes.push(group);
        ctx.invalidate();
    }

    fn select_all(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        ctx.selection.clear();
        for shape in &ctx.current.shapes {
            shape.select(&mut ctx.selection);
        }
        log::debug!("Selected all {} shapes", ctx.current.shapes.len());
        ctx.invalidate();
    }

    fn reset(&mut self, ctx: &mut ToolContext) {
        self.dehover(ctx);
        self.clipboard.clear();
        ctx.invalidate();
    }
}
