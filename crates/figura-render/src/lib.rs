//! Figura Render Library
//!
//! Renderer abstraction and implementations for Figura.
//! Shapes are flattened into fill and stroke commands by a [`Painter`];
//! the default backend records them into a Vello scene.

mod painter;
mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use painter::{Painter, PathSink, paint_frame};
pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{GridStyle, RenderContext, Renderer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
