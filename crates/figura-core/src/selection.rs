//! Selection set and the hover / click / rectangle selection helpers.

use std::collections::HashSet;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::context::ToolContext;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::shapes::{Shape, ShapeId};

/// Identity of a selectable object: a shape or a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectId {
    Shape(ShapeId),
    Point(PointId),
}

/// Membership set of selected shapes and points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    items: HashSet<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.items.insert(id)
    }

    pub fn remove(&mut self, id: &ObjectId) -> bool {
        self.items.remove(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.items.contains(id)
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        self.items.contains(&ObjectId::Point(point))
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.items.contains(&ObjectId::Shape(id))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.items.iter()
    }

    /// Selected points.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.items.iter().filter_map(|id| match id {
            ObjectId::Point(p) => Some(*p),
            ObjectId::Shape(_) => None,
        })
    }

    /// Selected shapes.
    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.items.iter().filter_map(|id| match id {
            ObjectId::Shape(s) => Some(*s),
            ObjectId::Point(_) => None,
        })
    }

    /// The selected point when the selection is exactly one point.
    pub fn single_point(&self) -> Option<PointId> {
        match self.items.iter().next() {
            Some(ObjectId::Point(p)) if self.items.len() == 1 => Some(*p),
            _ => None,
        }
    }
}

/// What kind of objects a selection gesture may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMode {
    pub point: bool,
    pub shape: bool,
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self {
            point: true,
            shape: true,
        }
    }
}

/// Which container lists a selection gesture searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTargets {
    pub shapes: bool,
    pub guides: bool,
}

impl Default for SelectionTargets {
    fn default() -> Self {
        Self {
            shapes: true,
            guides: true,
        }
    }
}

/// Add an object (and its anchors, for shapes) to the selection.
pub fn select_object(container: &Container, selection: &mut Selection, id: ObjectId) {
    match id {
        ObjectId::Point(p) => {
            selection.insert(ObjectId::Point(p));
        }
        ObjectId::Shape(s) => {
            if let Some(shape) = container.find(s) {
                shape.select(selection);
            }
        }
    }
}

/// Remove an object (and its anchors, for shapes) from the selection.
pub fn deselect_object(container: &Container, selection: &mut Selection, id: ObjectId) {
    match id {
        ObjectId::Point(p) => {
            selection.remove(&ObjectId::Point(p));
        }
        ObjectId::Shape(s) => match container.find(s) {
            Some(shape) => shape.deselect(selection),
            None => {
                selection.remove(&id);
            }
        },
    }
}

/// Candidates under the cursor in precedence order:
/// shape point, shape, guide point, guide.
fn candidates(ctx: &ToolContext, mode: SelectionMode, targets: SelectionTargets, target: Point, radius: f64) -> [Option<ObjectId>; 4] {
    let current = &ctx.current;
    let point_in = |shapes: &[Shape]| {
        ctx.hit_test
            .try_get_point(shapes, &ctx.points, target, radius)
            .map(ObjectId::Point)
    };
    let shape_in = |shapes: &[Shape]| {
        ctx.hit_test
            .try_get_shape(shapes, &ctx.points, target, radius)
            .map(Shape::object_id)
    };
    [
        (mode.point && targets.shapes).then(|| point_in(&current.shapes)).flatten(),
        (mode.shape && targets.shapes).then(|| shape_in(&current.shapes)).flatten(),
        (mode.point && targets.guides).then(|| point_in(&current.guides)).flatten(),
        (mode.shape && targets.guides).then(|| shape_in(&current.guides)).flatten(),
    ]
}

/// The object a hover highlight should show, if any.
pub fn try_to_hover(
    ctx: &ToolContext,
    mode: SelectionMode,
    targets: SelectionTargets,
    target: Point,
    radius: f64,
) -> Option<ObjectId> {
    let hit = candidates(ctx, mode, targets, target, radius).into_iter().flatten().next();
    match hit {
        Some(id) => log::debug!("Hover {:?}", id),
        None => log::trace!("No hover"),
    }
    hit
}

/// Click selection.
///
/// Without Control, a click that hits only already-selected objects keeps the
/// selection (so a drag can move it). Otherwise the winning candidate replaces
/// the selection, or with Control toggles its membership.
pub fn try_to_select(
    ctx: &mut ToolContext,
    mode: SelectionMode,
    targets: SelectionTargets,
    target: Point,
    radius: f64,
    modifiers: Modifiers,
) -> bool {
    let hits = candidates(ctx, mode, targets, target, radius);
    let Some(winner) = hits.iter().flatten().next().copied() else {
        return false;
    };

    let have_new_selection = hits
        .iter()
        .flatten()
        .any(|id| !ctx.selection.contains(id));
    if !ctx.selection.is_empty() && !have_new_selection && !modifiers.ctrl {
        return true;
    }

    if modifiers.ctrl {
        if ctx.selection.contains(&winner) {
            log::debug!("Deselected {:?}", winner);
            deselect_object(&ctx.current, &mut ctx.selection, winner);
        } else {
            log::debug!("Selected {:?}", winner);
            select_object(&ctx.current, &mut ctx.selection, winner);
        }
        !ctx.selection.is_empty()
    } else {
        ctx.selection.clear();
        log::debug!("Selected {:?}", winner);
        select_object(&ctx.current, &mut ctx.selection, winner);
        true
    }
}

/// Rectangle selection over shapes, falling back to guides.
/// Without Control the overlap set replaces the selection; with Control each
/// overlapping object toggles.
pub fn try_to_select_rect(
    ctx: &mut ToolContext,
    mode: SelectionMode,
    targets: SelectionTargets,
    rect: Rect,
    radius: f64,
    modifiers: Modifiers,
) -> bool {
    if !mode.shape {
        return false;
    }
    let overlapping = |shapes: &[Shape]| -> Vec<ObjectId> {
        ctx.hit_test
            .overlaps(shapes, &ctx.points, rect, radius)
            .into_iter()
            .map(Shape::object_id)
            .collect()
    };
    let shapes = if targets.shapes { overlapping(&ctx.current.shapes) } else { Vec::new() };
    let hits = if shapes.is_empty() && targets.guides {
        overlapping(&ctx.current.guides)
    } else {
        shapes
    };
    if hits.is_empty() {
        return false;
    }

    if modifiers.ctrl {
        for id in hits {
            if ctx.selection.contains(&id) {
                deselect_object(&ctx.current, &mut ctx.selection, id);
            } else {
                select_object(&ctx.current, &mut ctx.selection, id);
            }
        }
        !ctx.selection.is_empty()
    } else {
        log::debug!("Selected {} objects", hits.len());
        ctx.selection.clear();
        for id in hits {
            select_object(&ctx.current, &mut ctx.selection, id);
        }
        true
    }
}
