//! Editor facade: bootstraps the tool set from settings and routes host input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::{CanvasDocument, DocumentError};
use crate::container::Container;
use crate::context::{ToolContext, ToolHost};
use crate::filters::{FilterChain, GridSnapFilter, GridSnapSettings, LineSnapFilter, LineSnapSettings};
use crate::hit_test::HitTest;
use crate::input::{Command, Key, Modifiers, MouseButton, PointerEvent};
use crate::intersections::standard_intersections;
use crate::points::PointTemplate;
use crate::render::{ShapeRenderer, draw_container};
use crate::style::Style;
use crate::tools::settings::{
    CubicBezierToolSettings, EllipseToolSettings, GuideToolSettings, LineToolSettings, PathToolSettings,
    PointToolSettings, PolyLineToolSettings, QuadraticBezierToolSettings, RectangleToolSettings,
    ScribbleToolSettings, SelectionToolSettings,
};
use crate::tools::{
    CubicBezierTool, EllipseTool, GuideTool, LineTool, NoneTool, PathSubTool, PathTool, PointTool, PolyLineTool,
    QuadraticBezierTool, RectangleTool, ScribbleTool, SelectionTool, Tool, ToolKind, ToolManager,
};

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

/// Everything needed to bootstrap an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub width: f64,
    pub height: f64,
    /// Style given to new shapes.
    pub shape_style: Style,
    /// Style of point handles.
    pub point_style: Style,
    pub point_template: PointTemplate,
    pub grid_snap: GridSnapSettings,
    /// Grid snapping applied while dragging with the selection tool.
    pub selection_grid_snap: GridSnapSettings,
    pub line_snap: LineSnapSettings,
    pub selection: SelectionToolSettings,
    pub guide: GuideToolSettings,
    pub point: PointToolSettings,
    pub line: LineToolSettings,
    pub polyline: PolyLineToolSettings,
    pub cubic_bezier: CubicBezierToolSettings,
    pub quadratic_bezier: QuadraticBezierToolSettings,
    pub path: PathToolSettings,
    pub scribble: ScribbleToolSettings,
    pub rectangle: RectangleToolSettings,
    pub ellipse: EllipseToolSettings,
    pub default_tool: ToolKind,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let container = Container::default();
        Self {
            width: container.width,
            height: container.height,
            shape_style: Style::default_shape(),
            point_style: Style::default_point(),
            point_template: PointTemplate::default(),
            grid_snap: GridSnapSettings::default(),
            selection_grid_snap: GridSnapSettings {
                enable_guides: false,
                ..GridSnapSettings::default()
            },
            line_snap: LineSnapSettings::default(),
            selection: SelectionToolSettings::default(),
            guide: GuideToolSettings::default(),
            point: PointToolSettings::default(),
            line: LineToolSettings::default(),
            polyline: PolyLineToolSettings::default(),
            cubic_bezier: CubicBezierToolSettings::default(),
            quadratic_bezier: QuadraticBezierToolSettings::default(),
            path: PathToolSettings::default(),
            scribble: ScribbleToolSettings::default(),
            rectangle: RectangleToolSettings::default(),
            ellipse: EllipseToolSettings::default(),
            default_tool: ToolKind::default(),
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Line snapping followed by grid snapping.
    fn snapping(&self) -> FilterChain {
        FilterChain::new()
            .with(LineSnapFilter::new(self.line_snap.clone()))
            .with(GridSnapFilter::new(self.grid_snap.clone()))
    }

    fn build_tools(&self) -> Vec<Box<dyn Tool>> {
        vec![
            Box::new(NoneTool),
            Box::new(SelectionTool::new(
                self.selection.clone(),
                FilterChain::new().with(GridSnapFilter::new(self.selection_grid_snap.clone())),
            )),
            Box::new(GuideTool::new(self.guide.clone(), self.snapping())),
            Box::new(PointTool::new(self.point, self.snapping())),
            Box::new(LineTool::new(self.line, self.snapping(), standard_intersections())),
            Box::new(PolyLineTool::new(self.polyline, self.snapping())),
            Box::new(CubicBezierTool::new(self.cubic_bezier, self.snapping())),
            Box::new(QuadraticBezierTool::new(self.quadratic_bezier, self.snapping())),
            Box::new(PathTool::new(self.path, self.snapping())),
            Box::new(ScribbleTool::new(
                self.scribble,
                FilterChain::new().with(LineSnapFilter::new(self.line_snap.clone())),
            )),
            Box::new(RectangleTool::new(self.rectangle, self.snapping())),
            Box::new(EllipseTool::new(self.ellipse, self.snapping())),
        ]
    }
}

/// A live editing session: document state, tools and settings.
pub struct Editor {
    pub ctx: ToolContext,
    tools: ToolManager,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let mut ctx = ToolContext::new(Container::new(settings.width, settings.height), HitTest::standard());
        Self::install_styles(&mut ctx, &settings);
        let tools = ToolManager::new(settings.build_tools(), settings.default_tool);
        log::info!("Editor ready with {} tool", settings.default_tool.name());
        Self { ctx, tools, settings }
    }

    /// Route host callbacks through `host`.
    pub fn with_host(self, host: impl ToolHost + 'static) -> Self {
        Self {
            ctx: self.ctx.with_host(host),
            ..self
        }
    }

    fn install_styles(ctx: &mut ToolContext, settings: &EditorSettings) {
        let shape = ctx.current.add_style(settings.shape_style.clone());
        let point = ctx.current.add_style(settings.point_style.clone());
        ctx.working.add_style(settings.point_style.clone());
        ctx.current_style = Some(shape);
        ctx.point_template = Some(PointTemplate {
            style: Some(point),
            ..settings.point_template
        });
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_kind()
    }

    /// Switch tools, aborting any gesture of the outgoing tool.
    pub fn set_tool(&mut self, kind: ToolKind) -> bool {
        self.tools.set_tool(&mut self.ctx, kind)
    }

    pub fn set_path_sub_tool(&mut self, sub_tool: PathSubTool) -> bool {
        match self.tools.path_mut() {
            Some(path) => {
                path.set_sub_tool(&mut self.ctx, sub_tool);
                true
            }
            None => false,
        }
    }

    /// Deliver a pointer event to the current tool.
    pub fn handle_pointer(&mut self, event: PointerEvent, modifiers: Modifiers) {
        let Some(tool) = self.tools.current_mut() else {
            return;
        };
        let ctx = &mut self.ctx;
        match event {
            PointerEvent::Down { position, button } => match button {
                MouseButton::Left => tool.left_down(ctx, position, modifiers),
                MouseButton::Right => tool.right_down(ctx, position, modifiers),
                MouseButton::Middle => {}
            },
            PointerEvent::Up { position, button } => match button {
                MouseButton::Left => tool.left_up(ctx, position, modifiers),
                MouseButton::Right => tool.right_up(ctx, position, modifiers),
                MouseButton::Middle => {}
            },
            PointerEvent::Move { position } => tool.pointer_move(ctx, position, modifiers),
        }
    }

    /// Run the command bound to a key chord. Returns whether one ran.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        match Command::from_key(key, modifiers) {
            Some(command) => self.execute(command),
            None => false,
        }
    }

    /// Run an editing command. Any gesture in progress is aborted first.
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("Command: {:?}", command);
        if let Some(tool) = self.tools.current_mut() {
            if command == Command::Cancel || tool.is_active() {
                tool.clean(&mut self.ctx);
            }
        }
        if command == Command::Cancel {
            return true;
        }
        let Some(edit) = self.tools.edit_mut() else {
            log::warn!("No tool provides editing commands");
            return false;
        };
        let ctx = &mut self.ctx;
        match command {
            Command::SelectAll => edit.select_all(ctx),
            Command::Copy => edit.copy(ctx),
            Command::Cut => edit.cut(ctx),
            Command::Paste => edit.paste(ctx),
            Command::Group => edit.group(ctx),
            Command::Delete => edit.delete(ctx),
            Command::Cancel => {}
        }
        true
    }

    /// Serialize the committed container and the points it uses.
    pub fn save(&self) -> Result<String, DocumentError> {
        let mut doc = CanvasDocument::new(self.ctx.points.clone(), self.ctx.current.clone());
        doc.compact();
        doc.to_json()
    }

    /// Replace the committed container with a saved one.
    pub fn load(&mut self, json: &str) -> Result<(), DocumentError> {
        let doc = CanvasDocument::from_json(json)?;
        if let Some(tool) = self.tools.current_mut() {
            tool.clean(&mut self.ctx);
        }
        if let Some(edit) = self.tools.edit_mut() {
            edit.reset(&mut self.ctx);
        }
        self.ctx.points = doc.points;
        self.ctx.current = doc.container;
        self.ctx.working = Container::new(self.ctx.current.width, self.ctx.current.height);
        self.ctx.selection.clear();
        Self::install_styles(&mut self.ctx, &self.settings);
        log::info!("Loaded document {} ({} shapes)", doc.name, self.ctx.current.len());
        self.ctx.invalidate();
        Ok(())
    }

    /// Draw committed geometry, then previews and snap guides on top.
    pub fn draw(&self, renderer: &mut dyn ShapeRenderer) {
        let ctx = &self.ctx;
        draw_container(renderer, &ctx.current, &ctx.points, &ctx.selection, kurbo::Vec2::ZERO);
        draw_container(renderer, &ctx.working, &ctx.points, &ctx.selection, kurbo::Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;
    use kurbo::Point;

    fn down(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(
            PointerEvent::Down {
                position: Point::new(x, y),
                button: MouseButton::Left,
            },
            Modifiers::NONE,
        );
    }

    fn up(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(
            PointerEvent::Up {
                position: Point::new(x, y),
                button: MouseButton::Left,
            },
            Modifiers::NONE,
        );
    }

    fn move_to(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Move { position: Point::new(x, y) }, Modifiers::NONE);
    }

    #[test]
    fn test_default_tool_is_selection() {
        let editor = Editor::new();
        assert_eq!(editor.current_tool(), ToolKind::Selection);
        assert!(editor.ctx.current_style.is_some());
        assert_eq!(editor.ctx.current.styles.len(), 2);
    }

    #[test]
    fn test_rectangle_snaps_to_grid() {
        let mut editor = Editor::new();
        assert!(editor.set_tool(ToolKind::Rectangle));
        down(&mut editor, 11.0, 9.0);
        move_to(&mut editor, 44.0, 31.0);
        down(&mut editor, 44.0, 31.0);

        assert_eq!(editor.ctx.current.len(), 1);
        let Shape::Rectangle(rect) = &editor.ctx.current.shapes[0] else {
            panic!("expected a rectangle");
        };
        assert_eq!(editor.ctx.points.position(rect.top_left), Point::new(15.0, 15.0));
        assert_eq!(editor.ctx.points.position(rect.bottom_right), Point::new(45.0, 30.0));
        assert!(editor.ctx.working.is_empty());
    }

    #[test]
    fn test_escape_cancels_gesture() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Line);
        down(&mut editor, 30.0, 30.0);
        assert_eq!(editor.ctx.working.len(), 1);
        assert!(editor.handle_key(Key::Escape, Modifiers::NONE));
        assert!(editor.ctx.working.is_empty());
        assert!(editor.ctx.current.is_empty());
    }

    #[test]
    fn test_select_all_then_delete() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Ellipse);
        down(&mut editor, 30.0, 30.0);
        down(&mut editor, 90.0, 60.0);
        editor.set_tool(ToolKind::Selection);

        assert!(editor.handle_key(Key::A, Modifiers::CTRL));
        assert!(!editor.ctx.selection.is_empty());
        assert!(editor.handle_key(Key::Delete, Modifiers::NONE));
        assert!(editor.ctx.current.is_empty());
        assert!(editor.ctx.selection.is_empty());
        assert!(!editor.handle_key(Key::A, Modifiers::NONE));
    }

    #[test]
    fn test_selection_drag_through_editor() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Line);
        down(&mut editor, 30.0, 30.0);
        down(&mut editor, 90.0, 30.0);
        editor.set_tool(ToolKind::Selection);

        down(&mut editor, 60.0, 31.0);
        move_to(&mut editor, 60.0, 61.0);
        up(&mut editor, 60.0, 61.0);

        let Shape::Line(line) = &editor.ctx.current.shapes[0] else {
            panic!("expected a line");
        };
        assert_eq!(line.start_position(&editor.ctx.points), Point::new(30.0, 60.0));
        assert_eq!(line.end_position(&editor.ctx.points), Point::new(90.0, 60.0));
        assert!(!editor.ctx.is_captured());
    }

    #[test]
    fn test_save_load_keeps_joints() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::PolyLine);
        down(&mut editor, 30.0, 30.0);
        down(&mut editor, 90.0, 30.0);
        down(&mut editor, 90.0, 90.0);
        editor.handle_pointer(
            PointerEvent::Down {
                position: Point::new(90.0, 90.0),
                button: MouseButton::Right,
            },
            Modifiers::NONE,
        );
        assert_eq!(editor.ctx.current.len(), 2);
        let json = editor.save().expect("save");

        let mut restored = Editor::new();
        restored.load(&json).expect("load");
        let shapes = &restored.ctx.current.shapes;
        assert_eq!(shapes.len(), 2);
        let (Shape::Line(first), Shape::Line(second)) = (&shapes[0], &shapes[1]) else {
            panic!("expected two lines");
        };
        assert_eq!(first.end, second.start);
        assert_eq!(restored.ctx.points.position(first.end), Point::new(90.0, 30.0));
        assert!(restored.ctx.current_style.is_some_and(|id| restored.ctx.current.style(id).is_some()));
    }

    #[test]
    fn test_paste_after_load_ignores_old_clipboard() {
        let mut editor = Editor::new();
        let empty = editor.save().expect("save");
        editor.set_tool(ToolKind::Line);
        for y in [30.0, 60.0, 90.0, 120.0, 150.0] {
            down(&mut editor, 30.0, y);
            down(&mut editor, 90.0, y);
        }
        editor.set_tool(ToolKind::Selection);
        assert!(editor.handle_key(Key::A, Modifiers::CTRL));
        assert!(editor.handle_key(Key::C, Modifiers::CTRL));

        editor.load(&empty).expect("load");
        assert!(editor.handle_key(Key::V, Modifiers::CTRL));
        assert!(editor.ctx.current.is_empty());
        assert!(editor.ctx.selection.is_empty());
    }

    #[test]
    fn test_snap_feedback_does_not_grow_arena() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Line);
        move_to(&mut editor, 11.0, 9.0);
        let allocated = editor.ctx.points.len();
        for i in 0..1000 {
            let offset = (i % 40) as f64;
            move_to(&mut editor, 11.0 + offset, 9.0 + offset);
        }
        assert_eq!(editor.ctx.points.len(), allocated);
        assert!(editor.ctx.current.is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut editor = Editor::new();
        assert!(editor.load("not json").is_err());
    }

    #[test]
    fn test_path_sub_tool_routing() {
        let mut editor = Editor::new();
        assert!(editor.set_path_sub_tool(PathSubTool::QuadraticBezier));
        editor.set_tool(ToolKind::Path);
        down(&mut editor, 30.0, 30.0);
        down(&mut editor, 90.0, 30.0);
        down(&mut editor, 60.0, 90.0);
        editor.handle_pointer(
            PointerEvent::Down {
                position: Point::ZERO,
                button: MouseButton::Right,
            },
            Modifiers::NONE,
        );

        let Shape::Path(path) = &editor.ctx.current.shapes[0] else {
            panic!("expected a path");
        };
        assert!(matches!(path.figures[0].segments[0], Shape::QuadraticBezier(_)));
    }

    #[test]
    fn test_settings_json() {
        let mut settings = EditorSettings::default();
        settings.grid_snap.grid_size_x = 20.0;
        settings.default_tool = ToolKind::Line;
        let json = settings.to_json().expect("serialize");
        let parsed = EditorSettings::from_json(&json).expect("parse");
        assert_eq!(parsed, settings);

        let partial = EditorSettings::from_json(r#"{ "width": 100.0 }"#).expect("parse");
        assert_eq!(partial.width, 100.0);
        assert_eq!(partial.selection.connect_test_radius, 10.0);

        assert!(EditorSettings::from_json(r#"{ "width": "wide" }"#).is_err());
    }

    #[test]
    fn test_settings_drive_tools() {
        let settings = EditorSettings {
            default_tool: ToolKind::Scribble,
            ..EditorSettings::default()
        };
        let editor = Editor::with_settings(settings);
        assert_eq!(editor.current_tool(), ToolKind::Scribble);
    }
}
