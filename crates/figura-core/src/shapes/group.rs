//! Group shape for combining multiple shapes.

use super::{Shape, ShapeId, ShapeTrait, joints};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of shapes that can be manipulated as a single unit.
/// Groups can contain other groups, enabling nested hierarchies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Child shapes in this group.
    pub shapes: Vec<Shape>,
    /// Free-floating joint points owned by the group.
    #[serde(default)]
    pub aux: Vec<PointId>,
    pub style: Option<StyleId>,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self {
            id: Uuid::new_v4(),
            shapes,
            aux: Vec::new(),
            style: None,
        }
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.shapes
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Shape> {
        self.shapes
    }

    /// Find a shape by ID within this group (including nested groups).
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find_map(|child| child.find(id))
    }

    /// Hand the connection to the first child that accepts it.
    pub fn connect(&mut self, point: PointId, target: PointId) -> bool {
        if joints::connect(&mut self.aux, point, target) {
            log::debug!("Group {} connected joint", self.id);
            return true;
        }
        self.shapes.iter_mut().any(|child| child.connect(point, target))
    }

    pub fn disconnect_point(&mut self, points: &mut PointArena, point: PointId) -> Option<PointId> {
        if let Some(copy) = joints::disconnect(&mut self.aux, points, point) {
            log::debug!("Group {} disconnected joint", self.id);
            return Some(copy);
        }
        self.shapes
            .iter_mut()
            .find_map(|child| child.disconnect_point(points, point))
    }

    pub fn disconnect_all(&mut self, points: &mut PointArena) -> bool {
        joints::disconnect_all(&mut self.aux, points);
        let mut result = !self.aux.is_empty();
        for child in &mut self.shapes {
            result |= child.disconnect_all(points);
        }
        result
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        for child in &self.shapes {
            child.draw(renderer, ctx);
        }
        ctx.draw_handles(renderer, &self.aux);
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        self.aux.clone()
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        let mut handles: Vec<&mut PointId> = self.aux.iter_mut().collect();
        handles.extend(self.shapes.iter_mut().flat_map(|s| s.handles_mut()));
        handles
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        let mut children = self.shapes.iter();
        let Some(first) = children.next() else {
            return Rect::ZERO;
        };
        children.fold(first.bounds(points), |r, s| r.union(s.bounds(points)))
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        let mut path = BezPath::new();
        for child in &self.shapes {
            path.extend(child.to_path(points).elements().iter().copied());
        }
        path
    }
}
