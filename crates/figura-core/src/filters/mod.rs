//! Point filters (snapping).
//!
//! A tool runs its proposed coordinates through a [`FilterChain`] before using
//! them. Every filter may adjust the point; the first filter that reports a snap
//! keeps its feedback guides in the working container.

mod grid;
mod line;

pub use grid::{GridSnapFilter, GridSnapMode, GridSnapSettings};
pub use line::{LineSnapFilter, LineSnapMode, LineSnapSettings, LineSnapTarget};

use kurbo::Point;

use crate::context::ToolContext;
use crate::shapes::{Line, ShapeId, ShapeTrait};
use crate::style::Style;

/// Adjusts a proposed point before a tool uses it.
pub trait PointFilter {
    /// Display name.
    fn title(&self) -> &str;

    /// Possibly rewrite `point`. Returns whether the filter snapped.
    fn process(&mut self, ctx: &mut ToolContext, point: &mut Point) -> bool;

    /// Remove any feedback guides this filter added.
    fn clear(&mut self, ctx: &mut ToolContext);
}

/// Ordered filters attached to a tool.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn PointFilter>>,
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.titles()).finish()
    }
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl PointFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push(&mut self, filter: Box<dyn PointFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.title())
    }

    /// Clear old guides, then run every filter in order.
    pub fn process(&mut self, ctx: &mut ToolContext, point: &mut Point) -> bool {
        self.clear(ctx);
        let mut snapped = false;
        for filter in &mut self.filters {
            if filter.process(ctx, point) {
                if snapped {
                    filter.clear(ctx);
                }
                snapped = true;
            }
        }
        snapped
    }

    pub fn clear(&mut self, ctx: &mut ToolContext) {
        for filter in &mut self.filters {
            filter.clear(ctx);
        }
    }
}

/// Feedback lines a filter owns in the working container.
#[derive(Debug, Default)]
pub(crate) struct GuideLines {
    ids: Vec<ShapeId>,
}

impl GuideLines {
    pub(crate) fn add(&mut self, ctx: &mut ToolContext, start: Point, end: Point, style: &Style) {
        let style = ctx.working.add_style(style.clone());
        let a = ctx.points.add(start.x, start.y, None);
        let b = ctx.points.add(end.x, end.y, None);
        let line = Line::new(a, b, Some(style));
        self.ids.push(line.id());
        ctx.working.guides.push(line.into());
    }

    pub(crate) fn clear(&mut self, ctx: &mut ToolContext) {
        for id in self.ids.drain(..) {
            if let Some(guide) = ctx.working.remove_guide(id) {
                ctx.release_points(&guide);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}
