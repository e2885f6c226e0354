//! Gesture scenarios for the tool state machines.

use kurbo::Point;

use super::settings::*;
use super::*;
use crate::context::ToolContext;
use crate::filters::FilterChain;
use crate::input::Modifiers;
use crate::intersections::standard_intersections;
use crate::points::PointId;
use crate::selection::{ObjectId, select_object};
use crate::shapes::{Line, Rectangle, Shape, ShapeId, ShapeTrait};

fn click(tool: &mut dyn Tool, ctx: &mut ToolContext, x: f64, y: f64) {
    tool.left_down(ctx, Point::new(x, y), Modifiers::NONE);
}

fn drag_to(tool: &mut dyn Tool, ctx: &mut ToolContext, x: f64, y: f64) {
    tool.pointer_move(ctx, Point::new(x, y), Modifiers::NONE);
}

fn release(tool: &mut dyn Tool, ctx: &mut ToolContext, x: f64, y: f64) {
    tool.left_up(ctx, Point::new(x, y), Modifiers::NONE);
}

fn add_line(ctx: &mut ToolContext, a: PointId, b: PointId) -> ShapeId {
    let line = Line::new(a, b, None);
    let id = line.id();
    ctx.current.add_shape(line);
    id
}

fn line_at(ctx: &ToolContext, index: usize) -> &Line {
    match &ctx.current.shapes[index] {
        Shape::Line(line) => line,
        other => panic!("expected a line, got {:?}", other.kind()),
    }
}

fn all_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(NoneTool),
        Box::new(SelectionTool::new(SelectionToolSettings::default(), FilterChain::new())),
        Box::new(GuideTool::new(GuideToolSettings::default(), FilterChain::new())),
        Box::new(PointTool::new(ShapeToolSettings::default(), FilterChain::new())),
        Box::new(LineTool::new(LineToolSettings::default(), FilterChain::new(), standard_intersections())),
        Box::new(PolyLineTool::new(ShapeToolSettings::default(), FilterChain::new())),
        Box::new(CubicBezierTool::new(ShapeToolSettings::default(), FilterChain::new())),
        Box::new(QuadraticBezierTool::new(ShapeToolSettings::default(), FilterChain::new())),
        Box::new(PathTool::new(ShapeToolSettings::default(), FilterChain::new())),
        Box::new(ScribbleTool::new(ScribbleToolSettings::default(), FilterChain::new())),
        Box::new(RectangleTool::new(RectangleToolSettings::default(), FilterChain::new())),
        Box::new(EllipseTool::new(ShapeToolSettings::default(), FilterChain::new())),
    ]
}

#[test]
fn test_rectangle_two_clicks() {
    let mut ctx = ToolContext::default();
    let mut tool = RectangleTool::new(RectangleToolSettings::default(), FilterChain::new());

    click(&mut tool, &mut ctx, 10.0, 10.0);
    assert!(ctx.is_captured());
    drag_to(&mut tool, &mut ctx, 50.0, 40.0);
    click(&mut tool, &mut ctx, 50.0, 40.0);

    assert_eq!(ctx.current.len(), 1);
    let Shape::Rectangle(rect) = &ctx.current.shapes[0] else {
        panic!("expected a rectangle");
    };
    assert_eq!(ctx.points.position(rect.top_left), Point::new(10.0, 10.0));
    assert_eq!(ctx.points.position(rect.bottom_right), Point::new(50.0, 40.0));
    assert!(ctx.working.is_empty());
    assert_eq!(tool.state(), CornerState::TopLeft);
    assert!(!ctx.is_captured());
}

#[test]
fn test_right_click_aborts_rectangle() {
    let mut ctx = ToolContext::default();
    let mut tool = RectangleTool::new(RectangleToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 10.0, 10.0);
    tool.right_down(&mut ctx, Point::new(20.0, 20.0), Modifiers::NONE);

    assert!(ctx.current.is_empty());
    assert!(ctx.working.is_empty());
    assert!(ctx.selection.is_empty());
    assert_eq!(tool.state(), CornerState::TopLeft);
}

#[test]
fn test_clean_is_idempotent_for_every_tool() {
    for mut tool in all_tools() {
        let mut ctx = ToolContext::default();
        let a = ctx.new_point(300.0, 300.0);
        let b = ctx.new_point(400.0, 300.0);
        add_line(&mut ctx, a, b);

        click(tool.as_mut(), &mut ctx, 10.0, 10.0);
        drag_to(tool.as_mut(), &mut ctx, 40.0, 30.0);
        click(tool.as_mut(), &mut ctx, 40.0, 30.0);
        drag_to(tool.as_mut(), &mut ctx, 60.0, 60.0);

        tool.clean(&mut ctx);
        let current = ctx.current.clone();
        let selection = ctx.selection.clone();
        tool.clean(&mut ctx);

        let name = tool.kind().name();
        assert_eq!(ctx.current, current, "{name}");
        assert_eq!(ctx.selection, selection, "{name}");
        assert!(ctx.working.is_empty(), "{name}");
        assert!(!ctx.is_captured(), "{name}");
        assert!(!tool.is_active(), "{name}");
    }
}

#[test]
fn test_line_splits_at_intersections() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(50.0, 0.0);
    let b = ctx.new_point(50.0, 100.0);
    add_line(&mut ctx, a, b);

    let settings = LineToolSettings {
        split_intersections: true,
        ..Default::default()
    };
    let mut tool = LineTool::new(settings, FilterChain::new(), standard_intersections());
    click(&mut tool, &mut ctx, 0.0, 50.0);
    drag_to(&mut tool, &mut ctx, 100.0, 50.0);
    click(&mut tool, &mut ctx, 100.0, 50.0);

    assert_eq!(ctx.current.len(), 3);
    let first = line_at(&ctx, 1);
    let second = line_at(&ctx, 2);
    assert_eq!(first.start_position(&ctx.points), Point::new(0.0, 50.0));
    assert_eq!(first.end, second.start);
    let joint = ctx.points.position(first.end);
    assert!((joint.x - 50.0).abs() < 1e-9 && (joint.y - 50.0).abs() < 1e-9);
    assert_eq!(second.end_position(&ctx.points), Point::new(100.0, 50.0));
    assert!(ctx.working.is_empty());
}

#[test]
fn test_line_connects_to_existing_point() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    add_line(&mut ctx, a, b);

    let mut tool = LineTool::new(LineToolSettings::default(), FilterChain::new(), Vec::new());
    click(&mut tool, &mut ctx, 103.0, 2.0);
    click(&mut tool, &mut ctx, 100.0, 100.0);

    assert_eq!(line_at(&ctx, 1).start, b);
}

#[test]
fn test_polyline_shares_joints() {
    let mut ctx = ToolContext::default();
    let mut tool = PolyLineTool::new(ShapeToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 100.0);
    assert!(tool.is_active());
    tool.right_down(&mut ctx, Point::new(100.0, 100.0), Modifiers::NONE);

    assert_eq!(ctx.current.len(), 2);
    assert_eq!(line_at(&ctx, 0).end, line_at(&ctx, 1).start);
    assert_eq!(line_at(&ctx, 1).end_position(&ctx.points), Point::new(100.0, 100.0));
    assert!(ctx.working.is_empty());
    assert_eq!(tool.state(), PolyLineState::StartPoint);
}

#[test]
fn test_cubic_bezier_countdown() {
    let mut ctx = ToolContext::default();
    let mut tool = CubicBezierTool::new(ShapeToolSettings::default(), FilterChain::new());

    click(&mut tool, &mut ctx, 0.0, 0.0);
    assert!(matches!(tool.state(), CubicBezierState::Point3(_)));
    drag_to(&mut tool, &mut ctx, 100.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 0.0);
    assert!(matches!(tool.state(), CubicBezierState::Point2(_)));
    drag_to(&mut tool, &mut ctx, 70.0, 50.0);
    click(&mut tool, &mut ctx, 70.0, 50.0);
    assert!(matches!(tool.state(), CubicBezierState::Point1(_)));
    drag_to(&mut tool, &mut ctx, 30.0, 50.0);
    click(&mut tool, &mut ctx, 30.0, 50.0);

    assert_eq!(tool.state(), CubicBezierState::StartPoint);
    let Shape::CubicBezier(curve) = &ctx.current.shapes[0] else {
        panic!("expected a cubic bezier");
    };
    let at = |id| ctx.points.position(id);
    assert_eq!(at(curve.start), Point::new(0.0, 0.0));
    assert_eq!(at(curve.point1), Point::new(30.0, 50.0));
    assert_eq!(at(curve.point2), Point::new(70.0, 50.0));
    assert_eq!(at(curve.point3), Point::new(100.0, 0.0));
    assert!(ctx.working.is_empty());
    assert!(ctx.selection.is_empty());
}

#[test]
fn test_quadratic_bezier_countdown() {
    let mut ctx = ToolContext::default();
    let mut tool = QuadraticBezierTool::new(ShapeToolSettings::default(), FilterChain::new());

    click(&mut tool, &mut ctx, 0.0, 0.0);
    drag_to(&mut tool, &mut ctx, 100.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 0.0);
    assert!(matches!(tool.state(), QuadraticBezierState::Point1(_)));
    drag_to(&mut tool, &mut ctx, 50.0, 80.0);
    click(&mut tool, &mut ctx, 50.0, 80.0);

    let Shape::QuadraticBezier(curve) = &ctx.current.shapes[0] else {
        panic!("expected a quadratic bezier");
    };
    assert_eq!(ctx.points.position(curve.point1), Point::new(50.0, 80.0));
    assert_eq!(ctx.points.position(curve.point2), Point::new(100.0, 0.0));
}

#[test]
fn test_path_closes_on_first_point() {
    let mut ctx = ToolContext::default();
    let mut tool = PathTool::new(ShapeToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 100.0);
    click(&mut tool, &mut ctx, 2.0, 2.0);
    tool.right_down(&mut ctx, Point::ZERO, Modifiers::NONE);

    assert_eq!(tool.state(), PathState::Idle);
    let Shape::Path(path) = &ctx.current.shapes[0] else {
        panic!("expected a path");
    };
    assert_eq!(path.figures.len(), 1);
    let figure = &path.figures[0];
    assert!(figure.is_closed);
    assert_eq!(figure.segments.len(), 3);
    assert_eq!(figure.first_point(), figure.last_point());
    assert!(ctx.working.is_empty());
}

#[test]
fn test_path_move_starts_new_figure() {
    let mut ctx = ToolContext::default();
    let mut tool = PathTool::new(ShapeToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 0.0);
    click(&mut tool, &mut ctx, 50.0, 0.0);
    tool.set_sub_tool(&mut ctx, PathSubTool::Move);
    click(&mut tool, &mut ctx, 200.0, 200.0);
    assert_eq!(tool.sub_tool(), PathSubTool::Line);
    click(&mut tool, &mut ctx, 250.0, 200.0);
    tool.right_down(&mut ctx, Point::ZERO, Modifiers::NONE);

    let Shape::Path(path) = &ctx.current.shapes[0] else {
        panic!("expected a path");
    };
    assert_eq!(path.figures.len(), 2);
    assert!(path.figures.iter().all(|f| f.segments.len() == 1));
}

#[test]
fn test_path_cubic_segments_share_joint() {
    let mut ctx = ToolContext::default();
    let mut tool = PathTool::new(ShapeToolSettings::default(), FilterChain::new());
    tool.set_sub_tool(&mut ctx, PathSubTool::CubicBezier);
    click(&mut tool, &mut ctx, 0.0, 0.0);
    click(&mut tool, &mut ctx, 100.0, 0.0);
    click(&mut tool, &mut ctx, 70.0, 50.0);
    click(&mut tool, &mut ctx, 30.0, 50.0);
    tool.set_sub_tool(&mut ctx, PathSubTool::Line);
    click(&mut tool, &mut ctx, 100.0, 100.0);
    tool.right_down(&mut ctx, Point::ZERO, Modifiers::NONE);

    let Shape::Path(path) = &ctx.current.shapes[0] else {
        panic!("expected a path");
    };
    let segments = &path.figures[0].segments;
    assert_eq!(segments.len(), 2);
    let (Shape::CubicBezier(curve), Shape::Line(line)) = (&segments[0], &segments[1]) else {
        panic!("expected a curve followed by a line");
    };
    assert_eq!(curve.point3, line.start);
    assert_eq!(ctx.points.position(line.end), Point::new(100.0, 100.0));
}

#[test]
fn test_point_tool_attaches_to_connectable() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    add_line(&mut ctx, a, b);
    let mut tool = PointTool::new(ShapeToolSettings::default(), FilterChain::new());

    click(&mut tool, &mut ctx, 50.0, 2.0);
    let line = line_at(&ctx, 0);
    assert_eq!(line.aux.len(), 1);
    assert!(ctx.selection.contains_point(line.aux[0]));

    let allocated = ctx.points.len();
    click(&mut tool, &mut ctx, 300.0, 300.0);
    assert_eq!(ctx.points.len(), allocated);
    assert_eq!(ctx.current.len(), 1);
}

#[test]
fn test_point_tool_ignores_rectangles() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 100.0);
    ctx.current.add_shape(Rectangle::new(a, b, None));
    let mut tool = PointTool::new(ShapeToolSettings::default(), FilterChain::new());

    click(&mut tool, &mut ctx, 0.0, 50.0);
    assert!(ctx.selection.is_empty());
    assert_eq!(ctx.current.shapes[0].unique_points().len(), 2);
}

#[test]
fn test_scribble_commits_on_release() {
    let mut ctx = ToolContext::default();
    let mut tool = ScribbleTool::new(ScribbleToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 0.0);
    drag_to(&mut tool, &mut ctx, 10.0, 0.0);
    drag_to(&mut tool, &mut ctx, 20.0, 10.0);
    drag_to(&mut tool, &mut ctx, 30.0, 30.0);
    release(&mut tool, &mut ctx, 30.0, 30.0);

    assert_eq!(ctx.current.len(), 1);
    let Shape::Scribble(scribble) = &ctx.current.shapes[0] else {
        panic!("expected a scribble");
    };
    assert!(scribble.points.len() >= 2);
    assert!(ctx.working.is_empty());
    assert!(!ctx.is_captured());
}

#[test]
fn test_scribble_single_point_dropped() {
    let mut ctx = ToolContext::default();
    let mut tool = ScribbleTool::new(ScribbleToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 0.0);
    release(&mut tool, &mut ctx, 0.0, 0.0);
    assert!(ctx.current.is_empty());
    assert!(ctx.working.is_empty());
}

#[test]
fn test_guide_tool_adds_guide() {
    let mut ctx = ToolContext::default();
    let mut tool = GuideTool::new(GuideToolSettings::default(), FilterChain::new());
    click(&mut tool, &mut ctx, 0.0, 50.0);
    drag_to(&mut tool, &mut ctx, 200.0, 50.0);
    assert_eq!(ctx.working.guides.len(), 1);
    click(&mut tool, &mut ctx, 200.0, 50.0);

    assert_eq!(ctx.current.guides.len(), 1);
    assert!(ctx.current.shapes.is_empty());
    assert!(ctx.working.is_empty());
    assert_eq!(tool.state(), GuideState::StartPoint);
}

fn selection_tool() -> SelectionTool {
    SelectionTool::new(SelectionToolSettings::default(), FilterChain::new())
}

#[test]
fn test_drag_connects_dropped_point() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let c = ctx.new_point(105.0, 5.0);
    let d = ctx.new_point(200.0, 100.0);
    add_line(&mut ctx, a, b);
    add_line(&mut ctx, c, d);
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, 100.0, 0.0);
    assert_eq!(ctx.selection.single_point(), Some(b));
    drag_to(&mut tool, &mut ctx, 103.0, 3.0);
    release(&mut tool, &mut ctx, 103.0, 3.0);

    assert_eq!(line_at(&ctx, 0).end, c);
    assert_eq!(line_at(&ctx, 1).start, c);
    assert!(!ctx.current.references(b));
    assert_eq!(ctx.selection.single_point(), Some(c));

    // Moving the shared point is seen by both lines
    ctx.points.translate(c, kurbo::Vec2::new(1.0, 1.0));
    assert_eq!(line_at(&ctx, 0).end_position(&ctx.points), line_at(&ctx, 1).start_position(&ctx.points));
}

#[test]
fn test_rectangle_corner_dropped_on_line_end() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    add_line(&mut ctx, a, b);
    let top_left = ctx.new_point(150.0, 150.0);
    let corner = ctx.new_point(200.0, 200.0);
    ctx.current.add_shape(Rectangle::new(top_left, corner, None));
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, 200.0, 200.0);
    assert_eq!(ctx.selection.single_point(), Some(corner));
    drag_to(&mut tool, &mut ctx, 101.0, 1.0);
    release(&mut tool, &mut ctx, 101.0, 1.0);

    // The line adopts the corner since the rectangle cannot be rewired
    assert_eq!(line_at(&ctx, 0).end, corner);
    assert!(!ctx.current.references(b));
    assert_eq!(ctx.points.position(corner), Point::new(101.0, 1.0));
    assert_eq!(ctx.selection.single_point(), Some(corner));
}

#[test]
fn test_rubber_band_reuses_point_slots() {
    let mut ctx = ToolContext::default();
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, 10.0, 10.0);
    release(&mut tool, &mut ctx, 20.0, 20.0);
    let allocated = ctx.points.len();
    for i in 0..50 {
        let offset = i as f64;
        click(&mut tool, &mut ctx, 10.0 + offset, 10.0);
        drag_to(&mut tool, &mut ctx, 40.0 + offset, 40.0);
        release(&mut tool, &mut ctx, 40.0 + offset, 40.0);
    }
    assert_eq!(ctx.points.len(), allocated);
    assert_eq!(ctx.points.live(), 0);
    assert!(ctx.working.is_empty());
}

#[test]
fn test_aborted_preview_frees_its_points() {
    let mut ctx = ToolContext::default();
    let mut tool = RectangleTool::new(RectangleToolSettings::default(), FilterChain::new());
    for _ in 0..20 {
        click(&mut tool, &mut ctx, 10.0, 10.0);
        tool.right_down(&mut ctx, Point::new(10.0, 10.0), Modifiers::NONE);
    }
    assert_eq!(ctx.points.len(), 2);
    assert_eq!(ctx.points.live(), 0);
}

#[test]
fn test_drag_disconnects_shared_point() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let c = ctx.new_point(200.0, 0.0);
    add_line(&mut ctx, a, b);
    add_line(&mut ctx, b, c);
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, 100.0, 0.0);
    let copy = line_at(&ctx, 0).end;
    assert_ne!(copy, b);
    assert_eq!(ctx.selection.single_point(), Some(copy));

    drag_to(&mut tool, &mut ctx, 100.0, 50.0);
    release(&mut tool, &mut ctx, 100.0, 50.0);

    assert_eq!(ctx.points.position(copy), Point::new(100.0, 50.0));
    assert_eq!(ctx.points.position(b), Point::new(100.0, 0.0));
    assert_eq!(line_at(&ctx, 1).start, b);
}

#[test]
fn test_drag_moves_selected_shape() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let c = ctx.new_point(100.0, 100.0);
    add_line(&mut ctx, a, b);
    add_line(&mut ctx, b, c);
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, 50.0, 2.0);
    assert!(matches!(tool.state(), SelectionState::Move { dragged: None, .. }));
    drag_to(&mut tool, &mut ctx, 60.0, 12.0);
    release(&mut tool, &mut ctx, 60.0, 12.0);

    assert_eq!(ctx.points.position(a), Point::new(10.0, 10.0));
    assert_eq!(ctx.points.position(b), Point::new(110.0, 10.0));
    assert_eq!(ctx.points.position(c), Point::new(100.0, 100.0));
    assert_eq!(line_at(&ctx, 1).start_position(&ctx.points), Point::new(110.0, 10.0));
}

#[test]
fn test_rubber_band_selects_overlapping() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let line = add_line(&mut ctx, a, b);
    let c = ctx.new_point(200.0, 200.0);
    let d = ctx.new_point(300.0, 300.0);
    let rect = Rectangle::new(c, d, None);
    let rect_id = rect.id();
    ctx.current.add_shape(rect);
    let mut tool = selection_tool();

    click(&mut tool, &mut ctx, -20.0, -20.0);
    assert_eq!(ctx.working.len(), 1);
    drag_to(&mut tool, &mut ctx, 150.0, 50.0);
    release(&mut tool, &mut ctx, 150.0, 50.0);

    assert!(ctx.selection.contains_shape(line));
    assert!(!ctx.selection.contains_shape(rect_id));
    assert!(ctx.working.is_empty());
    assert_eq!(tool.state(), SelectionState::None);
}

#[test]
fn test_hover_highlights_until_press() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let line = add_line(&mut ctx, a, b);
    let mut tool = selection_tool();

    drag_to(&mut tool, &mut ctx, 50.0, 3.0);
    assert_eq!(tool.hovered(), Some(ObjectId::Shape(line)));
    assert!(ctx.selection.contains_shape(line));

    drag_to(&mut tool, &mut ctx, 400.0, 400.0);
    assert_eq!(tool.hovered(), None);
    assert!(ctx.selection.is_empty());
}

#[test]
fn test_group_excludes_loose_points() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(50.0, 50.0);
    let rect = Rectangle::new(a, b, None);
    let rect_id = rect.id();
    ctx.current.add_shape(rect);
    let loose = ctx.new_point(200.0, 200.0);
    ctx.current.add_shape(Shape::Point(loose));

    select_object(&ctx.current, &mut ctx.selection, ObjectId::Shape(rect_id));
    ctx.selection.insert(ObjectId::Point(loose));
    let mut tool = selection_tool();
    tool.group(&mut ctx);

    assert_eq!(ctx.current.len(), 2);
    assert!(matches!(ctx.current.shapes[0], Shape::Point(p) if p == loose));
    let Shape::Group(group) = &ctx.current.shapes[1] else {
        panic!("expected a group");
    };
    assert_eq!(group.shapes.len(), 1);
    assert_eq!(group.shapes[0].id(), Some(rect_id));
    assert!(ctx.selection.contains_point(loose));
    assert!(ctx.selection.contains_shape(group.id()));
}

#[test]
fn test_paste_shares_points_among_clones_only() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let c = ctx.new_point(100.0, 100.0);
    add_line(&mut ctx, a, b);
    add_line(&mut ctx, b, c);
    let mut tool = selection_tool();

    tool.select_all(&mut ctx);
    tool.copy(&mut ctx);
    assert_eq!(tool.clipboard().len(), 2);
    tool.paste(&mut ctx);

    assert_eq!(ctx.current.len(), 4);
    let (first, second) = (line_at(&ctx, 2), line_at(&ctx, 3));
    assert_eq!(first.end, second.start);
    assert!(![a, b, c].contains(&first.start));
    assert!(![a, b, c].contains(&first.end));
    assert_eq!(ctx.points.position(first.end), Point::new(100.0, 0.0));
    assert!(ctx.selection.contains_shape(first.id()));
    assert!(!ctx.selection.contains_point(b));
}

#[test]
fn test_cut_then_paste_restores() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    add_line(&mut ctx, a, b);
    let mut tool = selection_tool();

    tool.select_all(&mut ctx);
    tool.cut(&mut ctx);
    assert!(ctx.current.is_empty());
    assert!(ctx.selection.is_empty());

    tool.paste(&mut ctx);
    assert_eq!(ctx.current.len(), 1);
    assert_eq!(line_at(&ctx, 0).end_position(&ctx.points), Point::new(100.0, 0.0));
}

#[test]
fn test_delete_detaches_selected_joint() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    add_line(&mut ctx, a, b);
    let joint = ctx.new_point(50.0, 0.0);
    assert!(ctx.current.shapes[0].attach_point(joint));

    ctx.selection.insert(ObjectId::Point(joint));
    let mut tool = selection_tool();
    tool.delete(&mut ctx);

    assert_eq!(ctx.current.len(), 1);
    assert!(line_at(&ctx, 0).aux.is_empty());
    assert!(ctx.selection.is_empty());
}

#[test]
fn test_disconnect_shape_copies_points() {
    let mut ctx = ToolContext::default();
    let a = ctx.new_point(0.0, 0.0);
    let b = ctx.new_point(100.0, 0.0);
    let c = ctx.new_point(100.0, 100.0);
    let first = add_line(&mut ctx, a, b);
    add_line(&mut ctx, b, c);
    let tool = selection_tool();

    assert!(tool.disconnect_shape(&mut ctx, first));
    let line = line_at(&ctx, 0);
    assert_ne!(line.end, b);
    assert_eq!(ctx.points.position(line.end), Point::new(100.0, 0.0));
    assert_eq!(line_at(&ctx, 1).start, b);
    assert!(ctx.selection.contains_point(line.end));
}
