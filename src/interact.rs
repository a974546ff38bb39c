//! Pointer interaction: one shared tooltip driven by enter/move/leave on bars.
//!
//! The controller only knows the bars of the plan it was bound to. Hosts either
//! forward per-bar events (`pointer_enter`/`pointer_move`/`pointer_leave`) or raw
//! pointer positions (`pointer_at`), which are hit-tested against the bars.

use crate::viz::text::wrap_text_to_width;
use crate::viz::types::{BarId, DrawPlan, LABEL_FONT_PX, Point, Rect};
use crate::viz::util::format_value;
use log::debug;

pub const TOOLTIP_WIDTH_PX: f64 = 100.0;
pub const TOOLTIP_HEIGHT_PX: f64 = 40.0;
pub const TOOLTIP_PADDING_PX: f64 = 5.0;
/// How far above the bar's top edge the tooltip box starts.
pub const TOOLTIP_LIFT_PX: f64 = 20.0;

/// The single floating tooltip. Hidden until a bar is hovered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    visible: bool,
    raised: bool,
    anchor: Point,
    text: String,
}

impl TooltipState {
    /// Show `text` with the box's top-left corner at `at`, above all other drawing.
    pub fn show(&mut self, text: impl Into<String>, at: Point) {
        self.text = text.into();
        self.anchor = at;
        self.visible = true;
        self.raised = true;
    }

    pub fn move_to(&mut self, at: Point) {
        self.anchor = at;
    }

    /// Hide the box; the last text is kept until the next `show`.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the tooltip must be painted after (on top of) the chart.
    pub fn is_raised(&self) -> bool {
        self.raised
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Canvas rectangle of the tooltip box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.anchor.x,
            self.anchor.y,
            TOOLTIP_WIDTH_PX,
            TOOLTIP_HEIGHT_PX,
        )
    }

    /// Text broken into the lines that fit the box.
    pub fn lines(&self) -> Vec<String> {
        let inner = (TOOLTIP_WIDTH_PX - 2.0 * TOOLTIP_PADDING_PX) as u32;
        wrap_text_to_width(&self.text, LABEL_FONT_PX, inner)
    }
}

/// What the controller needs to know about one drawn bar.
#[derive(Debug, Clone, PartialEq)]
struct HitTarget {
    rect: Rect,
    label: String,
}

/// Tooltip text for a parameter and its (possibly undefined) mean.
pub fn tooltip_text(param_name: &str, value: Option<f64>) -> String {
    format!("{}: {}", param_name, format_value(value))
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    targets: Vec<HitTarget>,
    hovered: Option<BarId>,
    tooltip: TooltipState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to freshly drawn bars. Any visible tooltip belongs to the old drawing
    /// and is hidden.
    pub fn bind(&mut self, plan: &DrawPlan) {
        self.targets = plan
            .bars
            .iter()
            .map(|b| HitTarget {
                rect: b.rect,
                label: tooltip_text(&b.param_name, b.value),
            })
            .collect();
        self.hovered = None;
        self.tooltip.hide();
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<BarId> {
        self.hovered
    }

    fn anchor_for(target: &HitTarget) -> Point {
        Point::new(target.rect.x, target.rect.y - TOOLTIP_LIFT_PX)
    }

    /// Pointer entered a bar: retarget the single tooltip onto it.
    pub fn pointer_enter(&mut self, bar: BarId) {
        let Some(target) = self.targets.get(bar.0) else {
            debug!("pointer_enter on unknown bar {:?}", bar);
            return;
        };
        self.tooltip.show(target.label.clone(), Self::anchor_for(target));
        self.hovered = Some(bar);
    }

    /// Pointer moved within a bar: keep the tooltip pinned to that bar.
    pub fn pointer_move(&mut self, bar: BarId) {
        if self.hovered != Some(bar) || !self.tooltip.is_visible() {
            return;
        }
        if let Some(target) = self.targets.get(bar.0) {
            self.tooltip.move_to(Self::anchor_for(target));
        }
    }

    pub fn pointer_leave(&mut self, bar: BarId) {
        if self.hovered == Some(bar) {
            self.hovered = None;
        }
        self.tooltip.hide();
    }

    /// Topmost bar under `p`; later bars are drawn over earlier ones.
    pub fn hit_test(&self, p: Point) -> Option<BarId> {
        self.targets
            .iter()
            .rposition(|t| t.rect.width > 0.0 && t.rect.height > 0.0 && t.rect.contains(p))
            .map(BarId)
    }

    /// Feed a raw pointer position (`None` = pointer left the canvas) and emit the
    /// matching leave/enter/move transitions.
    pub fn pointer_at(&mut self, pos: Option<Point>) {
        let over = pos.and_then(|p| self.hit_test(p));
        match (self.hovered, over) {
            (Some(prev), Some(cur)) if prev == cur => self.pointer_move(cur),
            (prev, cur) => {
                if let Some(prev) = prev {
                    self.pointer_leave(prev);
                }
                if let Some(cur) = cur {
                    self.pointer_enter(cur);
                }
            }
        }
    }
}
