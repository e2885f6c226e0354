//! Rectangle shape.

use super::{ShapeId, ShapeTrait};
use crate::points::{PointArena, PointId};
use crate::render::{DrawContext, ShapeRenderer};
use crate::style::StyleId;
use kurbo::{BezPath, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle spanned by two corner points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub top_left: PointId,
    pub bottom_right: PointId,
    pub style: Option<StyleId>,
}

impl Rectangle {
    pub fn new(top_left: PointId, bottom_right: PointId, style: Option<StyleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            top_left,
            bottom_right,
            style,
        }
    }

    /// Normalized rectangle, whatever order the corners were dragged in.
    pub fn rect(&self, points: &PointArena) -> Rect {
        Rect::from_points(points.position(self.top_left), points.position(self.bottom_right))
    }

    pub fn draw(&self, renderer: &mut dyn ShapeRenderer, ctx: &DrawContext) {
        if let Some(style) = ctx.style(self.style) {
            renderer.draw_rectangle(self.rect(ctx.points), style, ctx.offset);
        }
        ctx.draw_selected_handles(renderer, &[self.top_left, self.bottom_right]);
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> Option<StyleId> {
        self.style
    }

    fn anchors(&self) -> Vec<PointId> {
        vec![self.top_left, self.bottom_right]
    }

    fn handles_mut(&mut self) -> Vec<&mut PointId> {
        vec![&mut self.top_left, &mut self.bottom_right]
    }

    fn bounds(&self, points: &PointArena) -> Rect {
        self.rect(points)
    }

    fn to_path(&self, points: &PointArena) -> BezPath {
        self.rect(points).to_path(0.1)
    }
}
