//! Per-tool settings.

use serde::{Deserialize, Serialize};

use crate::selection::{SelectionMode, SelectionTargets};
use crate::style::Style;

/// Connection behavior shared by the shape drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeToolSettings {
    /// Reuse a committed point under the cursor instead of creating one.
    pub connect_points: bool,
    pub hit_test_radius: f64,
}

impl Default for ShapeToolSettings {
    fn default() -> Self {
        Self {
            connect_points: true,
            hit_test_radius: 7.0,
        }
    }
}

pub type PointToolSettings = ShapeToolSettings;
pub type PolyLineToolSettings = ShapeToolSettings;
pub type CubicBezierToolSettings = ShapeToolSettings;
pub type QuadraticBezierToolSettings = ShapeToolSettings;
pub type PathToolSettings = ShapeToolSettings;
pub type EllipseToolSettings = ShapeToolSettings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleToolSettings {
    pub connect_points: bool,
    pub hit_test_radius: f64,
}

impl Default for RectangleToolSettings {
    fn default() -> Self {
        Self {
            connect_points: false,
            hit_test_radius: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineToolSettings {
    pub connect_points: bool,
    pub hit_test_radius: f64,
    /// Break the new line where it crosses committed shapes.
    pub split_intersections: bool,
}

impl Default for LineToolSettings {
    fn default() -> Self {
        Self {
            connect_points: true,
            hit_test_radius: 7.0,
            split_intersections: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScribbleToolSettings {
    pub simplify: bool,
    /// Ramer-Douglas-Peucker tolerance.
    pub epsilon: f64,
}

impl Default for ScribbleToolSettings {
    fn default() -> Self {
        Self {
            simplify: true,
            epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideToolSettings {
    #[serde(default = "Style::default_guide")]
    pub guide_style: Style,
}

impl Default for GuideToolSettings {
    fn default() -> Self {
        Self {
            guide_style: Style::default_guide(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionToolSettings {
    pub mode: SelectionMode,
    pub targets: SelectionTargets,
    /// Style of the rubber-band rectangle.
    #[serde(default = "Style::default_selection")]
    pub selection_style: Style,
    pub clear_selection_on_clean: bool,
    pub hit_test_radius: f64,
    /// Merge a dropped point into a point it lands on.
    pub connect_points: bool,
    pub connect_test_radius: f64,
    /// Break a shared point away from its other holders when dragging starts.
    pub disconnect_points: bool,
    pub disconnect_test_radius: f64,
}

impl Default for SelectionToolSettings {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            targets: SelectionTargets::default(),
            selection_style: Style::default_selection(),
            clear_selection_on_clean: false,
            hit_test_radius: 7.0,
            connect_points: true,
            connect_test_radius: 10.0,
            disconnect_points: true,
            disconnect_test_radius: 10.0,
        }
    }
}
