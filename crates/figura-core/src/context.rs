//! Editing context shared by tools, filters and editing operations.

use kurbo::Point;

use crate::container::Container;
use crate::hit_test::HitTest;
use crate::points::{PointArena, PointId, PointTemplate};
use crate::selection::Selection;
use crate::shapes::{Shape, ShapeId};
use crate::style::StyleId;

/// Host-side callbacks a tool triggers during a gesture.
///
/// While captured, the host routes every pointer event to the active tool.
pub trait ToolHost {
    fn capture(&mut self) {}
    fn release(&mut self) {}
    /// Request a redraw.
    fn invalidate(&mut self) {}
}

/// Host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl ToolHost for NullHost {}

/// Everything a tool needs to read and mutate the document.
pub struct ToolContext {
    /// Point storage for both containers.
    pub points: PointArena,
    /// Committed geometry.
    pub current: Container,
    /// In-progress previews and snap guides.
    pub working: Container,
    pub selection: Selection,
    pub hit_test: HitTest,
    /// Style applied to newly created shapes.
    pub current_style: Option<StyleId>,
    /// Handle template given to newly created points.
    pub point_template: Option<PointTemplate>,
    host: Box<dyn ToolHost>,
    captured: bool,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(Container::default(), HitTest::standard())
    }
}

impl ToolContext {
    pub fn new(current: Container, hit_test: HitTest) -> Self {
        let working = Container::new(current.width, current.height);
        Self {
            points: PointArena::new(),
            current,
            working,
            selection: Selection::new(),
            hit_test,
            current_style: None,
            point_template: None,
            host: Box::new(NullHost),
            captured: false,
        }
    }

    /// Replace the host callbacks.
    pub fn with_host(mut self, host: impl ToolHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn capture(&mut self) {
        self.captured = true;
        self.host.capture();
    }

    pub fn release(&mut self) {
        self.captured = false;
        self.host.release();
    }

    pub fn invalidate(&mut self) {
        self.host.invalidate();
    }

    /// Whether a multi-step gesture holds pointer capture.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Reuse a committed point within `radius` when `connect` is set,
    /// otherwise allocate a new point at (x, y).
    pub fn get_next_point(&mut self, x: f64, y: f64, connect: bool, radius: f64) -> PointId {
        if connect {
            if let Some(existing) = self.find_point(Point::new(x, y), radius) {
                log::debug!("Reusing point {:?} at ({x}, {y})", existing);
                return existing;
            }
        }
        self.new_point(x, y)
    }

    /// First committed point within `radius` of `target`.
    pub fn find_point(&self, target: Point, radius: f64) -> Option<PointId> {
        self.hit_test
            .try_get_point(&self.current.shapes, &self.points, target, radius)
    }

    /// Allocate a fresh point with the current handle template.
    pub fn new_point(&mut self, x: f64, y: f64) -> PointId {
        self.points.add(x, y, self.point_template)
    }

    pub fn working_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.working.get_shape_mut(id)
    }

    /// Move a shape from the working container to the current one.
    pub fn commit(&mut self, id: ShapeId) -> bool {
        match self.working.remove_shape(id) {
            Some(shape) => {
                log::debug!("Committed {:?} {id}", shape.kind());
                self.current.shapes.push(shape);
                true
            }
            None => {
                log::warn!("Shape {id} missing from the working container");
                false
            }
        }
    }

    /// Drop a preview shape, deselecting it first.
    pub fn discard(&mut self, id: ShapeId) {
        if let Some(shape) = self.working.remove_shape(id) {
            shape.deselect(&mut self.selection);
            self.release_points(&shape);
        }
    }

    /// Return the slots of a removed shape that no container still holds.
    pub fn release_points(&mut self, shape: &Shape) {
        for point in shape.points() {
            if !self.current.references(point) && !self.working.references(point) {
                self.points.release(point);
            }
        }
    }
}
