//! Grid snapping.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::{GuideLines, PointFilter};
use crate::context::ToolContext;
use crate::style::Style;

/// Axes snapped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapMode {
    /// Snap x to the nearest grid column.
    pub horizontal: bool,
    /// Snap y to the nearest grid row.
    pub vertical: bool,
}

impl Default for GridSnapMode {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapSettings {
    pub is_enabled: bool,
    pub enable_guides: bool,
    pub mode: GridSnapMode,
    pub grid_size_x: f64,
    pub grid_size_y: f64,
    #[serde(default = "Style::default_guide")]
    pub guide_style: Style,
}

impl Default for GridSnapSettings {
    fn default() -> Self {
        Self {
            is_enabled: true,
            enable_guides: true,
            mode: GridSnapMode::default(),
            grid_size_x: 15.0,
            grid_size_y: 15.0,
            guide_style: Style::default_guide(),
        }
    }
}

fn snap(value: f64, size: f64) -> f64 {
    if size <= 0.0 {
        return value;
    }
    (value / size).round() * size
}

/// Rounds coordinates to the grid and draws a guide through each snapped axis.
#[derive(Debug, Default)]
pub struct GridSnapFilter {
    pub settings: GridSnapSettings,
    guides: GuideLines,
}

impl GridSnapFilter {
    pub fn new(settings: GridSnapSettings) -> Self {
        Self {
            settings,
            guides: GuideLines::default(),
        }
    }
}

impl PointFilter for GridSnapFilter {
    fn title(&self) -> &str {
        "Grid-Snap"
    }

    fn process(&mut self, ctx: &mut ToolContext, point: &mut Point) -> bool {
        let settings = &self.settings;
        if !settings.is_enabled || !(settings.mode.horizontal || settings.mode.vertical) {
            return false;
        }

        if settings.mode.horizontal {
            point.x = snap(point.x, settings.grid_size_x);
        }
        if settings.mode.vertical {
            point.y = snap(point.y, settings.grid_size_y);
        }

        if settings.enable_guides {
            let (width, height) = (ctx.current.width, ctx.current.height);
            let style = settings.guide_style.clone();
            if settings.mode.vertical {
                self.guides
                    .add(ctx, Point::new(0.0, point.y), Point::new(width, point.y), &style);
            }
            if settings.mode.horizontal {
                self.guides
                    .add(ctx, Point::new(point.x, 0.0), Point::new(point.x, height), &style);
            }
        }
        true
    }

    fn clear(&mut self, ctx: &mut ToolContext) {
        self.guides.clear(ctx);
    }
}
