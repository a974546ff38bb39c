//! Turn aggregated rows and scales into a backend-independent [`DrawPlan`].

use super::legend::legend_entries;
use super::scale::{Scales, VALUE_TICK_COUNT};
use super::text::fit_to_width;
use super::types::{
    Bar, BarId, ChartLayout, DrawPlan, LABEL_FONT_PX, Point, Rect, Segment, TextAnchor,
    TextLabel,
};
use super::util::format_tick;
use crate::error::ChartError;
use crate::models::{AggregatedRow, ParameterSpec};
use crate::style::{AXIS, GRIDLINE, LABEL};

/// Gap between the x axis and the end of a category label.
const X_LABEL_PAD_PX: f64 = 6.0;
/// Space left free between a category label and the canvas bottom edge.
const X_LABEL_BOTTOM_GAP_PX: f64 = 2.0;
/// Category labels shrink down to this size before they get truncated.
const MIN_X_LABEL_FONT_PX: u32 = 9;
/// Gap between the y axis and the end of a tick label.
const Y_LABEL_PAD_PX: f64 = 6.0;

/// Build the full static chart for one set of rows.
///
/// Empty rows produce [`DrawPlan::empty`]. Fails only if `scales` was built
/// from other rows than `rows` (unknown category).
pub fn build_plan(
    rows: &[AggregatedRow],
    scales: &Scales,
    spec: &ParameterSpec,
    layout: &ChartLayout,
    locale_tag: &str,
) -> Result<DrawPlan, ChartError> {
    if rows.is_empty() {
        return Ok(DrawPlan::empty(layout));
    }

    let origin = layout.plot_origin();
    let plot_w = layout.plot_width();
    let plot_h = layout.plot_height();
    let to_canvas = |x: f64, y: f64| Point::new(origin.x + x, origin.y + y);

    let mut plan = DrawPlan::empty(layout);

    plan.axes.push(Segment {
        from: to_canvas(0.0, plot_h),
        to: to_canvas(plot_w, plot_h),
        color: AXIS,
    });
    plan.axes.push(Segment {
        from: to_canvas(0.0, 0.0),
        to: to_canvas(0.0, plot_h),
        color: AXIS,
    });

    // Category labels read upward and end just below the axis.
    let max_label_px =
        (layout.margin.bottom - X_LABEL_PAD_PX - X_LABEL_BOTTOM_GAP_PX).max(0.0) as u32;
    for row in rows {
        let cx = scales.x.center(&row.category)?;
        let (text, font_px) =
            fit_to_width(&row.category, LABEL_FONT_PX, MIN_X_LABEL_FONT_PX, max_label_px);
        plan.x_ticks.push(TextLabel {
            text,
            at: to_canvas(cx, plot_h + X_LABEL_PAD_PX),
            anchor: TextAnchor::End,
            rotated: true,
            font_px,
            color: LABEL,
        });
    }

    let decimals = scales.y.tick_precision(VALUE_TICK_COUNT);
    for tick in scales.y.ticks(VALUE_TICK_COUNT) {
        let y = scales.y.map(tick);
        plan.gridlines.push(Segment {
            from: to_canvas(0.0, y),
            to: to_canvas(plot_w, y),
            color: GRIDLINE,
        });
        plan.y_ticks.push(TextLabel {
            text: format_tick(tick, decimals, locale_tag),
            at: to_canvas(-Y_LABEL_PAD_PX, y),
            anchor: TextAnchor::End,
            rotated: false,
            font_px: LABEL_FONT_PX,
            color: LABEL,
        });
    }

    // Parameter-major order, like drawing one series after another.
    for (i, param) in spec.iter() {
        for row in rows {
            let (left, width) = scales.bar_slot(&row.category, i)?;
            let value = row.mean(i);
            let (top, height) = scales.bar_extent(value);
            let (x, y) = (origin.x + left, origin.y + top);
            plan.bars.push(Bar {
                id: BarId(plan.bars.len()),
                category: row.category.clone(),
                param_index: i,
                param_name: param.name.clone(),
                value,
                rect: Rect::new(x, y, width, height),
                color: param.color,
            });
        }
    }

    plan.legend = legend_entries(spec, layout);
    Ok(plan)
}
