//! Shape containers.

use serde::{Deserialize, Serialize};

use crate::points::PointId;
use crate::shapes::{Shape, ShapeId};
use crate::style::{Style, StyleId};

/// An ordered collection of shapes, a parallel list of guides and a style table.
///
/// The editor keeps two of these live: the current container with committed
/// geometry and the working container with in-progress previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
    /// Top-level shapes, back to front.
    pub shapes: Vec<Shape>,
    /// Guide lines, drawn but only hit-tested when targeted explicitly.
    #[serde(default)]
    pub guides: Vec<Shape>,
    /// Styles referenced by shapes.
    #[serde(default)]
    pub styles: Vec<Style>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(720.0, 630.0)
    }
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
            guides: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Append a shape on top.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Remove a top-level shape by ID.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == Some(id))?;
        Some(self.shapes.remove(index))
    }

    /// Remove a guide by ID.
    pub fn remove_guide(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.guides.iter().position(|s| s.id() == Some(id))?;
        Some(self.guides.remove(index))
    }

    /// Remove a bare top-level point.
    pub fn remove_point(&mut self, point: PointId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| !matches!(s, Shape::Point(p) if *p == point));
        self.shapes.len() != before
    }

    /// Find a top-level shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == Some(id))
    }

    /// Find a mutable top-level shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == Some(id))
    }

    /// Find a shape or guide by ID, searching nested groups.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes
            .iter()
            .chain(self.guides.iter())
            .find_map(|s| s.find(id))
    }

    /// Check if the container has no shapes and no guides.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.guides.is_empty()
    }

    /// Get the number of top-level shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Look up a style by ID.
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Register a style, replacing any entry with the same ID.
    pub fn add_style(&mut self, style: Style) -> StyleId {
        let id = style.id;
        match self.styles.iter_mut().find(|s| s.id == id) {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
        id
    }

    /// Every point handle held by shapes and guides, in container order.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.shapes
            .iter()
            .chain(self.guides.iter())
            .flat_map(|s| s.points())
    }

    /// Whether any shape or guide holds `point`.
    pub fn references(&self, point: PointId) -> bool {
        self.points().any(|p| p == point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointArena;
    use crate::shapes::{Line, Rectangle, ShapeTrait};

    #[test]
    fn test_remove_shape() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(1.0, 1.0, None);
        let rect = Rectangle::new(a, b, None);
        let id = rect.id();
        let mut container = Container::default();
        container.add_shape(rect);
        container.add_shape(Shape::Point(a));

        assert!(container.remove_shape(id).is_some());
        assert!(container.remove_shape(id).is_none());
        assert!(container.remove_point(a));
        assert!(container.is_empty());
    }

    #[test]
    fn test_add_style_replaces_same_id() {
        let mut container = Container::default();
        let mut style = Style::default_shape();
        let id = container.add_style(style.clone());
        style.thickness = 5.0;
        container.add_style(style);
        assert_eq!(container.styles.len(), 1);
        assert!((container.style(id).map(|s| s.thickness).unwrap_or_default() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_references_includes_guides() {
        let mut points = PointArena::new();
        let a = points.add(0.0, 0.0, None);
        let b = points.add(1.0, 1.0, None);
        let mut container = Container::default();
        container.guides.push(Shape::Line(Line::new(a, b, None)));
        assert!(container.references(b));
    }
}
