//! Visualization: scales, draw plan, and rendering of the plan to **SVG** or **PNG**.
//!
//! - `scale`: band + linear scales (D3-compatible nice domain and ticks)
//! - `plan`: aggregated rows → backend-independent [`DrawPlan`]
//! - `legend`: fixed legend layout
//! - this module: plotters backend that paints a plan (and a visible tooltip)
//!
//! The plan is drawn from primitives straight onto the drawing area. PNG text goes
//! through the `ab_glyph` path, which uses the bundled DejaVu Sans unless
//! [`register_font_file`] supplied another font.

pub mod legend;
pub mod plan;
pub mod scale;
pub mod text;
pub mod types;
pub mod util;

pub use types::{
    Bar, BarId, ChartLayout, DrawPlan, LegendEntry, Margin, Point, Rect, Segment, TextAnchor,
    TextLabel,
};

use crate::chart::Chart;
use crate::interact::{TOOLTIP_PADDING_PX, TooltipState};
use crate::style::{Rgb, TOOLTIP_BACKGROUND, TOOLTIP_OPACITY, TOOLTIP_TEXT};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle, FontTransform};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use types::LABEL_FONT_PX;

/// One-time registration of the bundled "sans-serif" font for the `ab_glyph` text path,
/// which cannot discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if let Err(e) = plotters::style::register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        ) {
            let _ = e; // plotters' InvalidFont carries no details and implements no Debug
            warn!("bundled font rejected, bitmap text will fail");
        }
    });
}

/// Replace the bundled "sans-serif" font with a TTF/OTF file. The last registration wins.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    ensure_fonts_registered();
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // plotters keeps a 'static reference to the font data for the process lifetime.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    debug!("registered font {}", path.display());
    Ok(())
}

/// Render the chart's current plan, plus its tooltip when visible, to `.svg` or `.png`.
pub fn render_to_file<P: AsRef<Path>>(chart: &Chart, out_path: P) -> Result<()> {
    render_plan_to_file(chart.plan(), Some(chart.controller().tooltip()), out_path)
}

/// Render a plan to a file; the format follows the extension (`.svg`, anything else = PNG).
/// An empty plan still produces a blank canvas.
pub fn render_plan_to_file<P: AsRef<Path>>(
    plan: &DrawPlan,
    tooltip: Option<&TooltipState>,
    out_path: P,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (plan.width, plan.height);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_plan(&root, plan, tooltip)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_plan(&root, plan, tooltip)?;
    }
    Ok(())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn text_style(label: &TextLabel) -> TextStyle<'static> {
    let h = match label.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let mut font = (FontFamily::SansSerif, label.font_px as f64).into_font();
    if label.rotated {
        font = font.transform(FontTransform::Rotate270);
    }
    let color = rgb(label.color);
    font.color(&color).pos(Pos::new(h, VPos::Center))
}

fn draw_label<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, label: &TextLabel) -> Result<()> {
    root.draw(&Text::new(
        label.text.clone(),
        (px(label.at.x), px(label.at.y)),
        text_style(label),
    ))
    .map_err(|e| anyhow!("{:?}", e))
}

fn fill_rect<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    rect: &Rect,
    style: ShapeStyle,
) -> Result<()> {
    let (x0, y0, x1, y1) = (px(rect.x), px(rect.y), px(rect.right()), px(rect.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return Ok(());
    }
    root.draw(&Rectangle::new([(x0, y0), (x1, y1)], style))
        .map_err(|e| anyhow!("{:?}", e))
}

/// Paint a plan onto any plotters drawing area, in plan order, then the tooltip on top.
pub fn draw_plan<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plan: &DrawPlan,
    tooltip: Option<&TooltipState>,
) -> Result<()> {
    ensure_fonts_registered();
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    for seg in plan.gridlines.iter().chain(plan.axes.iter()) {
        root.draw(&PathElement::new(
            vec![(px(seg.from.x), px(seg.from.y)), (px(seg.to.x), px(seg.to.y))],
            rgb(seg.color).stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    for bar in &plan.bars {
        fill_rect(root, &bar.rect, rgb(bar.color).filled())?;
    }

    for label in plan.x_ticks.iter().chain(plan.y_ticks.iter()) {
        draw_label(root, label)?;
    }

    for entry in &plan.legend {
        fill_rect(root, &entry.swatch, rgb(entry.color).filled())?;
        draw_label(root, &entry.label)?;
    }

    if let Some(tip) = tooltip.filter(|t| t.is_visible()) {
        draw_tooltip(root, tip)?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_tooltip<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    tip: &TooltipState,
) -> Result<()> {
    let bounds = tip.bounds();
    fill_rect(
        root,
        &bounds,
        rgb(TOOLTIP_BACKGROUND).mix(TOOLTIP_OPACITY).filled(),
    )?;
    let line_h = LABEL_FONT_PX as f64 + 2.0;
    let cx = bounds.x + bounds.width / 2.0;
    for (i, line) in tip.lines().into_iter().enumerate() {
        let label = TextLabel {
            text: line,
            at: Point::new(cx, bounds.y + TOOLTIP_PADDING_PX + line_h * (i as f64 + 0.5)),
            anchor: TextAnchor::Middle,
            rotated: false,
            font_px: LABEL_FONT_PX,
            color: TOOLTIP_TEXT,
        };
        draw_label(root, &label)?;
    }
    Ok(())
}
