//! Paint and stroke styles shared by shapes through the container's style table.

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a style entry.
pub type StyleId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from an alpha-first tuple, the order the bootstrap palette is written in.
    pub fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint attributes for a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub id: StyleId,
    /// Stroke color.
    pub stroke: SerializableColor,
    /// Fill color.
    pub fill: SerializableColor,
    /// Stroke thickness.
    pub thickness: f64,
    /// Whether the outline is painted.
    pub is_stroked: bool,
    /// Whether the interior is painted.
    pub is_filled: bool,
}

impl Style {
    pub fn new(
        stroke: SerializableColor,
        fill: SerializableColor,
        thickness: f64,
        is_stroked: bool,
        is_filled: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            stroke,
            fill,
            thickness,
            is_stroked,
            is_filled,
        }
    }

    /// Get the stroke color as a peniko Color, if stroking is enabled.
    pub fn stroke_color(&self) -> Option<Color> {
        self.is_stroked.then(|| self.stroke.into())
    }

    /// Get the fill color as a peniko Color, if filling is enabled.
    pub fn fill_color(&self) -> Option<Color> {
        self.is_filled.then(|| self.fill.into())
    }

    /// Default style for committed geometry.
    pub fn default_shape() -> Self {
        Self::new(
            SerializableColor::argb(255, 0, 255, 0),
            SerializableColor::argb(80, 0, 255, 0),
            2.0,
            true,
            true,
        )
    }

    /// Default style for guides and snap feedback.
    pub fn default_guide() -> Self {
        Self::new(
            SerializableColor::argb(128, 0, 255, 255),
            SerializableColor::argb(128, 0, 255, 255),
            2.0,
            true,
            true,
        )
    }

    /// Default style for the selection marquee.
    pub fn default_selection() -> Self {
        Self::new(
            SerializableColor::argb(255, 0, 120, 215),
            SerializableColor::argb(60, 170, 204, 238),
            2.0,
            true,
            true,
        )
    }

    /// Default style for point handles.
    pub fn default_point() -> Self {
        Self::new(
            SerializableColor::argb(0, 0, 0, 0),
            SerializableColor::argb(255, 255, 255, 0),
            2.0,
            false,
            true,
        )
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::default_shape()
    }
}
