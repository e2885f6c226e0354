//! Path tool.
//!
//! Builds one [`Path`] in the working container. Each segment is drafted from
//! the previous segment's end point, so consecutive segments share their joint.
//! Segment control points are pinned with the same countdown as the bezier
//! tools. Placing an end point on the figure's first point closes the figure.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::settings::PathToolSettings;
use super::{Tool, ToolKind, filtered};
use crate::container::Container;
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::points::PointId;
use crate::selection::ObjectId;
use crate::shapes::{CubicBezier, Figure, Line, Path, QuadraticBezier, Shape, ShapeId, ShapeTrait};

/// Segment kind the next click drafts, or `Move` to start a new figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathSubTool {
    #[default]
    Line,
    CubicBezier,
    QuadraticBezier,
    Move,
}

impl PathSubTool {
    /// Clicks needed to pin every free point of a segment of this kind.
    fn clicks(self) -> u8 {
        match self {
            PathSubTool::Line => 1,
            PathSubTool::CubicBezier => 3,
            PathSubTool::QuadraticBezier => 2,
            PathSubTool::Move => 0,
        }
    }
}

/// The segment currently following the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draft {
    pub segment: ShapeId,
    pub kind: PathSubTool,
    /// Clicks left before the segment is complete.
    pub remaining: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathState {
    #[default]
    Idle,
    Drawing {
        path: ShapeId,
        draft: Option<Draft>,
    },
}

fn path_mut(working: &mut Container, id: ShapeId) -> Option<&mut Path> {
    match working.get_shape_mut(id)? {
        Shape::Path(path) => Some(path),
        _ => None,
    }
}

/// Points that follow the cursor for a segment with `remaining` clicks left.
fn moving_points(segment: &Shape, remaining: u8) -> Vec<PointId> {
    match (segment, remaining) {
        (Shape::Line(l), 1) => vec![l.end],
        (Shape::CubicBezier(c), 3) => vec![c.point2, c.point3],
        (Shape::CubicBezier(c), 2) => vec![c.point1, c.point2],
        (Shape::CubicBezier(c), 1) => vec![c.point1],
        (Shape::QuadraticBezier(q), 2) => vec![q.point1, q.point2],
        (Shape::QuadraticBezier(q), 1) => vec![q.point1],
        _ => Vec::new(),
    }
}

fn end_handle_mut(segment: &mut Shape) -> Option<&mut PointId> {
    match segment {
        Shape::Line(l) => Some(&mut l.end),
        Shape::CubicBezier(c) => Some(&mut c.point3),
        Shape::QuadraticBezier(q) => Some(&mut q.point2),
        _ => None,
    }
}

/// Draws compound paths segment by segment. Right click finishes the path.
#[derive(Debug)]
pub struct PathTool {
    pub settings: PathToolSettings,
    filters: FilterChain,
    sub_tool: PathSubTool,
    previous: PathSubTool,
    state: PathState,
}

impl PathTool {
    pub fn new(settings: PathToolSettings, filters: FilterChain) -> Self {
        Self {
            settings,
            filters,
            sub_tool: PathSubTool::Line,
            previous: PathSubTool::Line,
            state: PathState::Idle,
        }
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    pub fn sub_tool(&self) -> PathSubTool {
        self.sub_tool
    }

    /// Switch the segment kind. A pending draft is redrafted from its start
    /// with the new kind; `Move` drops it so the next click opens a figure.
    pub fn set_sub_tool(&mut self, ctx: &mut ToolContext, sub_tool: PathSubTool) {
        if sub_tool == self.sub_tool {
            return;
        }
        if sub_tool == PathSubTool::Move {
            self.previous = self.sub_tool;
        }
        self.sub_tool = sub_tool;
        log::debug!("Path sub-tool: {:?}", sub_tool);

        let PathState::Drawing { path, draft: Some(draft) } = self.state else {
            return;
        };
        let anchor = self.drop_draft(ctx, path, draft);
        self.state = PathState::Drawing { path, draft: None };
        if let (Some(anchor), true) = (anchor, sub_tool != PathSubTool::Move) {
            let p = ctx.points.position(anchor);
            let draft = self.begin_draft(ctx, path, anchor, p);
            self.state = PathState::Drawing { path, draft };
        }
        ctx.invalidate();
    }

    /// Remove the draft segment, returning the point it started from.
    fn drop_draft(&mut self, ctx: &mut ToolContext, path: ShapeId, draft: Draft) -> Option<PointId> {
        let Some(shape) = path_mut(&mut ctx.working, path) else { return None };
        let figure = shape.figures.last_mut()?;
        let index = figure.segments.iter().position(|s| s.id() == Some(draft.segment))?;
        let segment = figure.segments.remove(index);
        segment.deselect(&mut ctx.selection);
        segment.points().next()
    }

    /// Append a new segment of the current kind starting at `anchor`.
    fn begin_draft(&mut self, ctx: &mut ToolContext, path: ShapeId, anchor: PointId, p: Point) -> Option<Draft> {
        let kind = self.sub_tool;
        let segment: Shape = match kind {
            PathSubTool::Line => Line::new(anchor, ctx.new_point(p.x, p.y), None).into(),
            PathSubTool::CubicBezier => CubicBezier::new(
                anchor,
                ctx.new_point(p.x, p.y),
                ctx.new_point(p.x, p.y),
                ctx.new_point(p.x, p.y),
                None,
            )
            .into(),
            PathSubTool::QuadraticBezier => {
                QuadraticBezier::new(anchor, ctx.new_point(p.x, p.y), ctx.new_point(p.x, p.y), None).into()
            }
            PathSubTool::Move => return None,
        };
        let id = segment.id()?;
        for point in segment.points() {
            ctx.selection.insert(ObjectId::Point(point));
        }

        let shape = path_mut(&mut ctx.working, path)?;
        match shape.figures.last_mut() {
            Some(figure) if !figure.is_closed => figure.segments.push(segment),
            _ => {
                let mut figure = Figure::new();
                figure.segments.push(segment);
                shape.figures.push(figure);
            }
        }
        Some(Draft {
            segment: id,
            kind,
            remaining: kind.clicks(),
        })
    }

    /// Open a new figure at `p` and draft its first segment.
    fn begin_figure(&mut self, ctx: &mut ToolContext, path: ShapeId, p: Point) -> Option<Draft> {
        if self.sub_tool == PathSubTool::Move {
            self.sub_tool = self.previous;
        }
        let anchor = ctx.get_next_point(p.x, p.y, self.settings.connect_points, self.settings.hit_test_radius);
        if let Some(shape) = path_mut(&mut ctx.working, path) {
            if shape.figures.last().is_none_or(|f| !f.segments.is_empty()) {
                shape.figures.push(Figure::new());
            }
        }
        self.begin_draft(ctx, path, anchor, p)
    }

    /// Pin the free point(s) of the draft at `p`. Returns the next draft.
    fn pin(&mut self, ctx: &mut ToolContext, path: ShapeId, draft: Draft, p: Point) -> Option<Draft> {
        let radius = self.settings.hit_test_radius;
        let pins_end = draft.remaining == draft.kind.clicks();
        let existing = (pins_end && self.settings.connect_points)
            .then(|| ctx.find_point(p, radius))
            .flatten();

        let shape = path_mut(&mut ctx.working, path)?;
        let figure = shape.figures.last_mut()?;
        let first = figure.first_point();
        let count = figure.segments.len();
        let segment = figure.segments.last_mut()?;
        for point in moving_points(segment, draft.remaining) {
            ctx.points.set_position(point, p.x, p.y);
        }

        let mut closed_on = None;
        if pins_end {
            let end = end_handle_mut(segment)?;
            let old = *end;
            match first {
                Some(first) if count >= 2 && ctx.points.position(first).distance(p) <= radius => {
                    *end = first;
                    figure.is_closed = true;
                    closed_on = Some((old, first));
                    log::debug!("Closed figure of path {path}");
                }
                _ => {
                    if let Some(existing) = existing {
                        *end = existing;
                        closed_on = Some((old, existing));
                    }
                }
            }
        }
        let finished = draft.remaining <= 1;
        let closed = figure.is_closed;
        let end = figure.last_point();
        let segment = figure.segments.last()?.clone();

        if let Some((old, new)) = closed_on {
            ctx.selection.remove(&ObjectId::Point(old));
            ctx.selection.insert(ObjectId::Point(new));
        }
        if !finished {
            return Some(Draft {
                remaining: draft.remaining - 1,
                ..draft
            });
        }

        segment.deselect(&mut ctx.selection);
        match (closed, end) {
            (false, Some(end)) => self.begin_draft(ctx, path, end, p),
            _ => None,
        }
    }

    /// Commit the path without its draft. Empty paths are dropped.
    fn finish(&mut self, ctx: &mut ToolContext) {
        if let PathState::Drawing { path, draft } = std::mem::take(&mut self.state) {
            if let Some(draft) = draft {
                self.drop_draft(ctx, path, draft);
            }
            let has_segments = path_mut(&mut ctx.working, path).is_some_and(|shape| {
                shape.figures.retain(|f| !f.segments.is_empty());
                !shape.figures.is_empty()
            });
            if has_segments {
                if let Some(shape) = ctx.working.get_shape(path) {
                    shape.deselect(&mut ctx.selection);
                }
                ctx.commit(path);
            } else {
                ctx.discard(path);
            }
        }
        if self.sub_tool == PathSubTool::Move {
            self.sub_tool = self.previous;
        }
        self.filters.clear(ctx);
        ctx.release();
        ctx.invalidate();
    }
}

impl Tool for PathTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Path
    }

    fn left_down(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        self.state = match self.state {
            PathState::Idle => {
                let shape = Path::new(ctx.current_style);
                let path = shape.id();
                ctx.working.add_shape(shape);
                ctx.capture();
                let draft = self.begin_figure(ctx, path, p);
                PathState::Drawing { path, draft }
            }
            PathState::Drawing { path, draft: None } => {
                let draft = self.begin_figure(ctx, path, p);
                PathState::Drawing { path, draft }
            }
            PathState::Drawing {
                path,
                draft: Some(draft),
            } => {
                let draft = self.pin(ctx, path, draft, p);
                PathState::Drawing { path, draft }
            }
        };
        ctx.invalidate();
    }

    fn right_down(&mut self, ctx: &mut ToolContext, _point: Point, _modifiers: Modifiers) {
        if self.is_active() {
            self.finish(ctx);
        }
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext, point: Point, _modifiers: Modifiers) {
        let p = filtered(&mut self.filters, ctx, point);
        if let PathState::Drawing {
            path,
            draft: Some(draft),
        } = self.state
        {
            let moving = path_mut(&mut ctx.working, path)
                .and_then(|shape| shape.figures.last())
                .and_then(|figure| figure.segments.last())
                .map(|segment| moving_points(segment, draft.remaining))
                .unwrap_or_default();
            for id in moving {
                ctx.points.set_position(id, p.x, p.y);
            }
        }
        ctx.invalidate();
    }

    fn clean(&mut self, ctx: &mut ToolContext) {
        self.filters.clear(ctx);
        if let PathState::Drawing { path, .. } = std::mem::take(&mut self.state) {
            ctx.discard(path);
        }
        if self.sub_tool == PathSubTool::Move {
            self.sub_tool = self.previous;
        }
        ctx.release();
        ctx.invalidate();
    }

    fn is_active(&self) -> bool {
        self.state != PathState::Idle
    }

    fn as_path(&mut self) -> Option<&mut PathTool> {
        Some(self)
    }
}
