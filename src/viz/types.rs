//! Public types and constants for the visualization module.
//!
//! Everything here is plain data in canvas pixels (origin top-left, y down).
//! Backends read these values; they never compute geometry themselves.

use crate::style::Rgb;
use serde::Serialize;

/// Canvas width used by the river pollution chart.
pub const DEFAULT_CANVAS_WIDTH: u32 = 900;
/// Canvas height used by the river pollution chart.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 500;

/// Font size of tick labels, legend labels and tooltip text.
pub const LABEL_FONT_PX: u32 = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges inclusive, so a pointer resting on the outline still counts.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and margins. The plot area is the canvas minus the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl ChartLayout {
    /// Layout with the default margins and a custom canvas size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width as f64 - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height as f64 - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Top-left corner of the plot area on the canvas.
    pub fn plot_origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            margin: Margin {
                top: 40.0,
                right: 30.0,
                bottom: 80.0,
                left: 100.0,
            },
        }
    }
}

/// Straight line between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
}

/// Which end of the text sits on the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub text: String,
    /// Anchor point; the text is vertically centered on it.
    pub at: Point,
    pub anchor: TextAnchor,
    /// Rotated a quarter turn counter-clockwise around `at` (reads bottom to top).
    pub rotated: bool,
    pub font_px: u32,
    pub color: Rgb,
}

/// Index of a bar in [`DrawPlan::bars`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BarId(pub usize);

/// One rectangle for a (category, parameter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub id: BarId,
    pub category: String,
    /// Position of the parameter in the spec.
    pub param_index: usize,
    pub param_name: String,
    /// Aggregated mean; `None` renders as a zero-height bar.
    pub value: Option<f64>,
    pub rect: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub param_index: usize,
    pub swatch: Rect,
    pub color: Rgb,
    pub label: TextLabel,
}

/// Everything a backend needs to draw the static chart, in paint order:
/// gridlines, axes, bars, tick labels, legend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawPlan {
    pub width: u32,
    pub height: u32,
    pub gridlines: Vec<Segment>,
    pub axes: Vec<Segment>,
    pub x_ticks: Vec<TextLabel>,
    pub y_ticks: Vec<TextLabel>,
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
}

impl DrawPlan {
    /// A canvas with nothing on it.
    pub fn empty(layout: &ChartLayout) -> Self {
        Self {
            width: layout.width,
            height: layout.height,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
            && self.axes.is_empty()
            && self.gridlines.is_empty()
            && self.x_ticks.is_empty()
            && self.y_ticks.is_empty()
            && self.legend.is_empty()
    }

    pub fn bar(&self, id: BarId) -> Option<&Bar> {
        self.bars.get(id.0)
    }

    /// Bar for a category and parameter name, if drawn.
    pub fn find_bar(&self, category: &str, param_name: &str) -> Option<&Bar> {
        self.bars
            .iter()
            .find(|b| b.category == category && b.param_name == param_name)
    }
}
