//! Figura Core Library
//!
//! Geometry model and interaction engine for the Figura vector editor:
//! shared point handles, shapes, hit testing, snapping filters and tools.

pub mod canvas;
pub mod container;
pub mod context;
pub mod editor;
pub mod filters;
pub mod geometry;
pub mod hit_test;
pub mod input;
pub mod intersections;
pub mod points;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod style;
pub mod tools;

pub use canvas::{CanvasDocument, DocumentError};
pub use container::Container;
pub use context::{NullHost, ToolContext, ToolHost};
pub use editor::{Editor, EditorSettings, SettingsError};
pub use filters::{FilterChain, GridSnapFilter, GridSnapSettings, LineSnapFilter, LineSnapSettings, PointFilter};
pub use hit_test::{HitTest, HitTestBuilder, HitTestError, HitTestStrategy};
pub use input::{Command, Key, Modifiers, MouseButton, PointerEvent};
pub use points::{PointArena, PointId, PointShape, PointTemplate};
pub use render::{DrawContext, ShapeRenderer, draw_container};
pub use selection::{ObjectId, Selection};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeTrait};
pub use style::{SerializableColor, Style, StyleId};
pub use tools::{Edit, PathSubTool, Tool, ToolKind, ToolManager};
