//! Point arena.
//!
//! Points are addressed by stable [`PointId`] handles. Shapes store handles, so two
//! shapes holding the same handle share a joint: moving the point through either
//! shape is observed by both. Breaking a joint allocates a new slot and rewires one
//! holder, leaving every other holder untouched.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::style::StyleId;

/// Stable handle to a point slot in a [`PointArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(u32);

impl PointId {
    /// Slot index of this handle.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Visual template used to draw a point handle. Drawing only, never ownership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointTemplate {
    /// Half extent of the handle on each axis.
    pub half_size: f64,
    /// Draw as a circle instead of a square.
    pub round: bool,
    /// Style used for the handle.
    pub style: Option<StyleId>,
}

impl Default for PointTemplate {
    fn default() -> Self {
        Self {
            half_size: 4.0,
            round: true,
            style: None,
        }
    }
}

impl PointTemplate {
    /// Bounds of the handle drawn around `center`.
    pub fn bounds(&self, center: Point) -> Rect {
        Rect::from_center_size(center, (self.half_size * 2.0, self.half_size * 2.0))
    }
}

/// A 2D point with an optional handle template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointShape {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PointTemplate>,
}

impl PointShape {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            template: None,
        }
    }

    pub fn with_template(mut self, template: Option<PointTemplate>) -> Self {
        self.template = template;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance(&self, target: Point) -> f64 {
        self.position().distance(target)
    }
}

/// Slot storage of points. Released slots are reused by later allocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointArena {
    points: Vec<PointShape>,
    #[serde(skip)]
    free: Vec<PointId>,
}

impl PointArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a slot, reusing a released one when available.
    pub fn insert(&mut self, point: PointShape) -> PointId {
        if let Some(id) = self.free.pop() {
            self[id] = point;
            return id;
        }
        let id = PointId(self.points.len() as u32);
        self.points.push(point);
        id
    }

    /// Return a slot for reuse. The caller must hold the only handle to it.
    pub fn release(&mut self, id: PointId) {
        if self.contains(id) && !self.free.contains(&id) {
            self.free.push(id);
        }
    }

    /// Slots currently allocated.
    pub fn live(&self) -> usize {
        self.points.len() - self.free.len()
    }

    /// Allocate a new point at (x, y) with the given handle template.
    pub fn add(&mut self, x: f64, y: f64, template: Option<PointTemplate>) -> PointId {
        self.insert(PointShape::new(x, y).with_template(template))
    }

    /// Allocate a fresh, unshared copy of `id`.
    pub fn duplicate(&mut self, id: PointId) -> PointId {
        let copy = self[id];
        self.insert(copy)
    }

    pub fn get(&self, id: PointId) -> Option<&PointShape> {
        self.points.get(id.index())
    }

    pub fn contains(&self, id: PointId) -> bool {
        id.index() < self.points.len()
    }

    pub fn position(&self, id: PointId) -> Point {
        self[id].position()
    }

    pub fn set_position(&mut self, id: PointId, x: f64, y: f64) {
        let point = &mut self[id];
        point.x = x;
        point.y = y;
    }

    pub fn translate(&mut self, id: PointId, delta: Vec2) {
        let point = &mut self[id];
        point.x += delta.x;
        point.y += delta.y;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &PointShape)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId(i as u32), p))
    }

    /// Keep only the slots in `reachable` (first occurrence order) and return the
    /// old-to-new handle mapping. Callers must rewrite every stored handle with it.
    pub fn compact(&mut self, reachable: impl IntoIterator<Item = PointId>) -> HashMap<PointId, PointId> {
        let mut remap = HashMap::new();
        let mut points = Vec::new();
        for id in reachable {
            if remap.contains_key(&id) {
                continue;
            }
            remap.insert(id, PointId(points.len() as u32));
            points.push(self[id]);
        }
        log::debug!("Compacted point arena: {} -> {} slots", self.points.len(), points.len());
        self.points = points;
        self.free.clear();
        remap
    }
}

impl Index<PointId> for PointArena {
    type Output = PointShape;

    fn index(&self, id: PointId) -> &PointShape {
        &self.points[id.index()]
    }
}

impl IndexMut<PointId> for PointArena {
    fn index_mut(&mut self, id: PointId) -> &mut PointShape {
        &mut self.points[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_slot_is_reused() {
        let mut arena = PointArena::new();
        let a = arena.add(1.0, 1.0, None);
        let b = arena.add(2.0, 2.0, None);
        arena.release(b);
        arena.release(b);
        assert_eq!(arena.live(), 1);

        let c = arena.add(5.0, 5.0, None);
        assert_eq!(c, b);
        assert_eq!(arena.position(c), Point::new(5.0, 5.0));
        let d = arena.add(6.0, 6.0, None);
        assert_ne!(d, c);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.position(a), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_compact_forgets_released_slots() {
        let mut arena = PointArena::new();
        let a = arena.add(1.0, 1.0, None);
        let b = arena.add(2.0, 2.0, None);
        arena.release(b);
        arena.compact([a]);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.live(), 1);
        let c = arena.add(3.0, 3.0, None);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_duplicate_is_unshared() {
        let mut arena = PointArena::new();
        let a = arena.add(3.0, 4.0, None);
        let b = arena.duplicate(a);
        assert_ne!(a, b);
        assert_eq!(arena.position(a), arena.position(b));

        arena.set_position(b, 10.0, 10.0);
        assert_eq!(arena.position(a), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_translate() {
        let mut arena = PointArena::new();
        let a = arena.add(1.0, 1.0, None);
        arena.translate(a, Vec2::new(2.0, -1.0));
        assert_eq!(arena.position(a), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_compact_remaps_reachable() {
        let mut arena = PointArena::new();
        let _orphan = arena.add(0.0, 0.0, None);
        let a = arena.add(1.0, 1.0, None);
        let b = arena.add(2.0, 2.0, None);

        let remap = arena.compact([b, a, b]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.position(remap[&b]), Point::new(2.0, 2.0));
        assert_eq!(arena.position(remap[&a]), Point::new(1.0, 1.0));
        assert_eq!(remap[&b].index(), 0);
    }

    #[test]
    fn test_template_bounds() {
        let template = PointTemplate::default();
        let bounds = template.bounds(Point::new(10.0, 10.0));
        assert!((bounds.width() - 8.0).abs() < f64::EPSILON);
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }
}
