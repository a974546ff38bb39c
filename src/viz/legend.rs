//! Legend layout: one swatch and label per parameter, stacked vertically.
//!
//! The legend is pinned near the top-right corner of the plot area and does not
//! move with the data, so it only depends on the parameter list and the layout.

use super::types::{ChartLayout, LABEL_FONT_PX, LegendEntry, Point, Rect, TextAnchor, TextLabel};
use crate::models::ParameterSpec;
use crate::style::LABEL;

pub const SWATCH_PX: f64 = 15.0;
pub const ROW_STEP_PX: f64 = 20.0;
/// Distance from the swatch's left edge to the label start.
pub const LABEL_OFFSET_PX: f64 = 20.0;

/// Canvas position of the legend's top-left corner: the plot width measured from the
/// canvas edge (not the plot origin), which leaves room for labels on the right.
pub fn legend_origin(layout: &ChartLayout) -> Point {
    Point::new(layout.plot_width() - 5.0, 10.0)
}

pub fn legend_entries(spec: &ParameterSpec, layout: &ChartLayout) -> Vec<LegendEntry> {
    let origin = legend_origin(layout);
    spec.iter()
        .map(|(i, param)| {
            let row_top = origin.y + i as f64 * ROW_STEP_PX;
            LegendEntry {
                param_index: i,
                swatch: Rect::new(origin.x, row_top, SWATCH_PX, SWATCH_PX),
                color: param.color,
                label: TextLabel {
                    text: param.name.clone(),
                    at: Point::new(origin.x + LABEL_OFFSET_PX, row_top + SWATCH_PX / 2.0),
                    anchor: TextAnchor::Start,
                    rotated: false,
                    font_px: LABEL_FONT_PX,
                    color: LABEL,
                },
            }
        })
        .collect()
}
