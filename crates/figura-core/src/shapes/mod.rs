//! Shape definitions for the editor.
//!
//! Shapes never own coordinates directly: they hold [`PointId`] handles into the
//! shared [`PointArena`]. Two shapes holding the same handle form a joint.

mod bezier;
mod ellipse;
mod group;
mod joints;
mod line;
mod path;
mod rectangle;
mod scribble;

pub use bezier::{CubicBezier, QuadraticBezier};
pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use path::{FillRule, Figure, Path};
pub use rectangle::Rectangle;
pub use scribble::Scribble;

use std::collections::{HashMap, HashSet};

use kurbo::{BezPath, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::selection::{ObjectId, Selection};
use crate::style::StyleId;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Identity of a concrete shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    Line,
    CubicBezier,
    QuadraticBezier,
    Path,
    Rectangle,
    Ellipse,
    Scribble,
    Group,
}

impl ShapeKind {
    /// Every concrete variant.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Point,
        ShapeKind::Line,
        ShapeKind::CubicBezier,
        ShapeKind::QuadraticBezier,
        ShapeKind::Path,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Scribble,
        ShapeKind::Group,
    ];
}

/// Common trait for the struct-backed shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Style table entry used to paint the shape.
    fn style(&self) -> Option<StyleId>;

    /// The shape's own anchor points, in order.
    fn anchors(&self) -> Vec<PointId>;

    /// Every stored point handle, including auxiliary and nested ones.
    fn handles_mut(&mut self) -> Vec<&mut PointId>;

    /// Get the bounding box.
    fn bounds(&self, points: &PointArena) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self, points: &PointArena) -> BezPath;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Point(PointId),
    Line(Line),
    CubicBezier(CubicBezier),
    QuadraticBezier(QuadraticBezier),
    Path(Path),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Scribble(Scribble),
    Group(Group),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Line(_) => ShapeKind::Line,
            Shape::CubicBezier(_) => ShapeKind::CubicBezier,
            Shape::QuadraticBezier(_) => ShapeKind::QuadraticBezier,
            Shape::Path(_) => ShapeKind::Path,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Scribble(_) => ShapeKind::Scribble,
            Shape::Group(_) => ShapeKind::Group,
        }
    }

    /// Identity used in the selection set.
    pub fn object_id(&self) -> ObjectId {
        match self {
            Shape::Point(p) => ObjectId::Point(*p),
            Shape::Line(s) => ObjectId::Shape(s.id()),
            Shape::CubicBezier(s) => ObjectId::Shape(s.id()),
            Shape::QuadraticBezier(s) => ObjectId::Shape(s.id()),
            Shape::Path(s) => ObjectId::Shape(s.id()),
            Shape::Rectangle(s) => ObjectId::Shape(s.id()),
            Shape::Ellipse(s) => ObjectId::Shape(s.id()),
            Shape::Scribble(s) => ObjectId::Shape(s.id()),
            Shape::Group(s) => ObjectId::Shape(s.id()),
        }
    }

    /// Shape id, or `None` for a bare point.
    pub fn id(&self) -> Option<ShapeId> {
        match self.object_id() {
            ObjectId::Shape(id) => Some(id),
            ObjectId::Point(_) => None,
        }
    }

    pub fn style(&self) -> Option<StyleId> {
        match self {
            Shape::Point(_) => None,
            Shape::Line(s) => s.style(),
            Shape::CubicBezier(s) => s.style(),
            Shape::QuadraticBezier(s) => s.style(),
            Shape::Path(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Scribble(s) => s.style(),
            Shape::Group(s) => s.style(),
        }
    }

    /// Own anchors first, then auxiliary points, then nested shapes' points.
    /// Shared joints may be yielded more than once.
    pub fn points(&self) -> Box<dyn Iterator<Item = PointId> + '_> {
        match self {
            Shape::Point(p) => Box::new(std::iter::once(*p)),
            Shape::Line(l) => Box::new([l.start, l.end].into_iter().chain(l.aux.iter().copied())),
            Shape::CubicBezier(c) => Box::new(c.anchors().into_iter()),
            Shape::QuadraticBezier(q) => Box::new(q.anchors().into_iter()),
            Shape::Path(p) => Box::new(
                p.segments()
                    .flat_map(|s| s.points())
                    .chain(p.aux.iter().copied()),
            ),
            Shape::Rectangle(r) => Box::new(r.anchors().into_iter()),
            Shape::Ellipse(e) => Box::new(e.anchors().into_iter()),
            Shape::Scribble(s) => Box::new(s.points.iter().copied()),
            Shape::Group(g) => Box::new(
                g.aux
                    .iter()
                    .copied()
                    .chain(g.shapes.iter().flat_map(|s| s.points())),
            ),
        }
    }

    /// Distinct points in traversal order.
    pub fn unique_points(&self) -> Vec<PointId> {
        let mut seen = HashSet::new();
        self.points().filter(|p| seen.insert(*p)).collect()
    }

    /// Whether the shape, or anything nested in it, holds `point`.
    pub fn references(&self, point: PointId) -> bool {
        self.points().any(|p| p == point)
    }

    pub fn handles_mut(&mut self) -> Vec<&mut PointId> {
        match self {
            Shape::Point(p) => vec![p],
            Shape::Line(s) => s.handles_mut(),
            Shape::CubicBezier(s) => s.handles_mut(),
            Shape::QuadraticBezier(s) => s.handles_mut(),
            Shape::Path(s) => s.handles_mut(),
            Shape::Rectangle(s) => s.handles_mut(),
            Shape::Ellipse(s) => s.handles_mut(),
            Shape::Scribble(s) => s.handles_mut(),
            Shape::Group(s) => s.handles_mut(),
        }
    }

    pub fn bounds(&self, points: &PointArena) -> Rect {
        match self {
            Shape::Point(p) => {
                let pos = points.position(*p);
                Rect::from_points(pos, pos)
            }
            Shape::Line(s) => s.bounds(points),
            Shape::CubicBezier(s) => s.bounds(points),
            Shape::QuadraticBezier(s) => s.bounds(points),
            Shape::Path(s) => s.bounds(points),
            Shape::Rectangle(s) => s.bounds(points),
            Shape::Ellipse(s) => s.bounds(points),
            Shape::Scribble(s) => s.bounds(points),
            Shape::Group(s) => s.bounds(points),
        }
    }

    pub fn to_path(&self, points: &PointArena) -> BezPath {
        match self {
            Shape::Point(_) => BezPath::new(),
            Shape::Line(s) => s.to_path(points),
            Shape::CubicBezier(s) => s.to_path(points),
            Shape::QuadraticBezier(s) => s.to_path(points),
            Shape::Path(s) => s.to_path(points),
            Shape::Rectangle(s) => s.to_path(points),
            Shape::Ellipse(s) => s.to_path(points),
            Shape::Scribble(s) => s.to_path(points),
            Shape::Group(s) => s.to_path(points),
        }
    }

    /// Line, Path and Group can share their points with other shapes.
    pub fn is_connectable(&self) -> bool {
        matches!(self, Shape::Line(_) | Shape::Path(_) | Shape::Group(_))
    }

    /// Replace this shape's reference to `target` with `point`.
    /// Refuses when the shape already holds `point`.
    pub fn connect(&mut self, point: PointId, target: PointId) -> bool {
        match self {
            Shape::Line(s) => s.connect(point, target),
            Shape::Path(s) => s.connect(point, target),
            Shape::Group(s) => s.connect(point, target),
            _ => false,
        }
    }

    /// Hang a free point on a connectable shape's auxiliary list.
    pub fn attach_point(&mut self, point: PointId) -> bool {
        let aux = match self {
            Shape::Line(s) => &mut s.aux,
            Shape::Path(s) => &mut s.aux,
            Shape::Group(s) => &mut s.aux,
            _ => return false,
        };
        aux.push(point);
        true
    }

    /// Rewire this shape's reference to `point` onto a fresh copy, returning the copy.
    pub fn disconnect_point(&mut self, points: &mut PointArena, point: PointId) -> Option<PointId> {
        match self {
            Shape::Line(s) => s.disconnect_point(points, point),
            Shape::Path(s) => s.disconnect_point(points, point),
            Shape::Group(s) => s.disconnect_point(points, point),
            _ => None,
        }
    }

    /// Give the shape fresh copies of all its points.
    pub fn disconnect_all(&mut self, points: &mut PointArena) -> bool {
        match self {
            Shape::Line(s) => s.disconnect_all(points),
            Shape::Path(s) => s.disconnect_all(points),
            Shape::Group(s) => s.disconnect_all(points),
            _ => false,
        }
    }

    /// Translate every point of the shape that is not itself selected.
    pub fn move_by(&self, points: &mut PointArena, selection: &Selection, delta: Vec2) {
        let mut moved = HashSet::new();
        for p in self.points() {
            if !selection.contains_point(p) && moved.insert(p) {
                points.translate(p, delta);
            }
        }
    }

    /// Add the shape and, recursively, its anchors to the selection.
    pub fn select(&self, selection: &mut Selection) {
        match self {
            Shape::Point(p) => {
                selection.insert(ObjectId::Point(*p));
            }
            Shape::Group(g) => {
                selection.insert(ObjectId::Shape(g.id));
                for p in &g.aux {
                    selection.insert(ObjectId::Point(*p));
                }
                for child in &g.shapes {
                    child.select(selection);
                }
            }
            Shape::Line(l) => {
                selection.insert(ObjectId::Shape(l.id));
                selection.insert(ObjectId::Point(l.start));
                selection.insert(ObjectId::Point(l.end));
            }
            _ => {
                selection.insert(self.object_id());
                for p in self.unique_points() {
                    selection.insert(ObjectId::Point(p));
                }
            }
        }
    }

    /// Remove the shape and, recursively, its anchors from the selection.
    pub fn deselect(&self, selection: &mut Selection) {
        match self {
            Shape::Point(p) => {
                selection.remove(&ObjectId::Point(*p));
            }
            Shape::Group(g) => {
                selection.remove(&ObjectId::Shape(g.id));
                for p in &g.aux {
                    selection.remove(&ObjectId::Point(*p));
                }
                for child in &g.shapes {
                    child.deselect(selection);
                }
            }
            Shape::Line(l) => {
                selection.remove(&ObjectId::Shape(l.id));
                selection.remove(&ObjectId::Point(l.start));
                selection.remove(&ObjectId::Point(l.end));
            }
            _ => {
                selection.remove(&self.object_id());
                for p in self.unique_points() {
                    selection.remove(&ObjectId::Point(p));
                }
            }
        }
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        match self {
            Shape::Point(p) => ctx.draw_point(renderer, *p),
            Shape::Line(s) => s.draw(renderer, ctx),
            Shape::CubicBezier(s) => s.draw(renderer, ctx),
            Shape::QuadraticBezier(s) => s.draw(renderer, ctx),
            Shape::Path(s) => s.draw(renderer, ctx),
            Shape::Rectangle(s) => s.draw(renderer, ctx),
            Shape::Ellipse(s) => s.draw(renderer, ctx),
            Shape::Scribble(s) => s.draw(renderer, ctx),
            Shape::Group(s) => s.draw(renderer, ctx),
        }
    }

    /// Find a shape by ID, searching nested groups.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        if self.id() == Some(id) {
            return Some(self);
        }
        match self {
            Shape::Group(g) => g.find_shape(id),
            _ => None,
        }
    }

    /// Detach `point` from auxiliary point lists, recursively.
    pub fn remove_point(&mut self, point: PointId) -> bool {
        match self {
            Shape::Line(l) => joints::remove(&mut l.aux, point),
            Shape::Path(p) => joints::remove(&mut p.aux, point),
            Shape::Group(g) => {
                let mut removed = joints::remove(&mut g.aux, point);
                for child in &mut g.shapes {
                    removed |= child.remove_point(point);
                }
                removed
            }
            _ => false,
        }
    }

    /// Give the shape and everything nested in it new unique ids.
    pub fn regenerate_ids(&mut self) {
        match self {
            Shape::Point(_) => {}
            Shape::Line(s) => s.id = Uuid::new_v4(),
            Shape::CubicBezier(s) => s.id = Uuid::new_v4(),
            Shape::QuadraticBezier(s) => s.id = Uuid::new_v4(),
            Shape::Path(s) => {
                s.id = Uuid::new_v4();
                for segment in s.figures.iter_mut().flat_map(|f| f.segments.iter_mut()) {
                    segment.regenerate_ids();
                }
            }
            Shape::Rectangle(s) => s.id = Uuid::new_v4(),
            Shape::Ellipse(s) => s.id = Uuid::new_v4(),
            Shape::Scribble(s) => s.id = Uuid::new_v4(),
            Shape::Group(s) => {
                s.id = Uuid::new_v4();
                for child in &mut s.shapes {
                    child.regenerate_ids();
                }
            }
        }
    }

    /// Rewrite every stored handle through `remap`. Unmapped handles are kept.
    pub fn remap_points(&mut self, remap: &HashMap<PointId, PointId>) {
        for handle in self.handles_mut() {
            if let Some(new) = remap.get(handle) {
                *handle = *new;
            }
        }
    }

    /// Deep clone with new ids and fresh points.
    ///
    /// `remap` is shared across one paste so clones share points among
    /// themselves exactly where the originals did, never with the originals.
    pub fn duplicate(&self, points: &mut PointArena, remap: &mut HashMap<PointId, PointId>) -> Shape {
        let mut clone = self.clone();
        clone.regenerate_ids();
        for handle in clone.handles_mut() {
            let old = *handle;
            *handle = *remap.entry(old).or_insert_with(|| points.duplicate(old));
        }
        clone
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<CubicBezier> for Shape {
    fn from(s: CubicBezier) -> Self {
        Shape::CubicBezier(s)
    }
}

impl From<QuadraticBezier> for Shape {
    fn from(s: QuadraticBezier) -> Self {
        Shape::QuadraticBezier(s)
    }
}

impl From<Path> for Shape {
    fn from(s: Path) -> Self {
        Shape::Path(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Shape::Ellipse(s)
    }
}

impl From<Scribble> for Shape {
    fn from(s: Scribble) -> Self {
        Shape::Scribble(s)
    }
}

impl From<Group> for Shape {
    fn from(s: Group) -> Self {
        Shape::Group(s)
    }
}
