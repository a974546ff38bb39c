/*!
 * Interactive viewer for pollution-chart
 *
 * Opens a CSV/JSON file of measurements, draws the grouped bar chart and shows
 * the hover tooltip of whichever bar is under the pointer. Export writes the
 * current drawing to SVG/PNG.
 */

use eframe::egui;
use pollution_chart::interact::{TOOLTIP_PADDING_PX, TooltipState};
use pollution_chart::models::{DEFAULT_CATEGORY_FIELD, parse_param_list};
use pollution_chart::style::{Rgb, TOOLTIP_OPACITY};
use pollution_chart::viz::types::{DrawPlan, LABEL_FONT_PX, TextAnchor, TextLabel};
use pollution_chart::{Chart, ChartLayout, ParameterSpec, storage, viz};
use std::path::PathBuf;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let layout = ChartLayout::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([layout.width as f32 + 40.0, layout.height as f32 + 160.0])
            .with_title("River Pollution Parameters Across States"),
        ..Default::default()
    };

    eframe::run_native(
        "River Pollution Chart",
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new()))),
    )
}

struct ChartApp {
    chart: Chart,
    category_field: String,
    params: String,
    loaded_from: Option<PathBuf>,
    status_message: String,
    error_message: String,
}

impl ChartApp {
    fn new() -> Self {
        Self {
            chart: Chart::new(ParameterSpec::river_pollution(), ChartLayout::default()),
            category_field: DEFAULT_CATEGORY_FIELD.to_string(),
            params: String::new(),
            loaded_from: None,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    fn open_file(&mut self) {
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Measurements", &["csv", "json"])
            .set_directory(start_dir)
            .pick_file()
        {
            self.loaded_from = Some(path);
            self.reload();
        }
    }

    /// Re-read the file and rebuild the chart from scratch.
    fn reload(&mut self) {
        let Some(path) = self.loaded_from.clone() else {
            return;
        };
        let result = (|| -> anyhow::Result<String> {
            let spec = if self.params.trim().is_empty() {
                ParameterSpec::river_pollution()
            } else {
                parse_param_list(&self.params)?
            };
            let loaded = storage::load_records(&path, &self.category_field)?;
            let mut chart = Chart::new(spec, ChartLayout::default());
            chart.set_data(&loaded.records)?;
            let msg = format!(
                "{}: {} records, {} states, {} skipped",
                path.display(),
                loaded.records.len(),
                chart.rows().len(),
                loaded.skipped
            );
            self.chart = chart;
            Ok(msg)
        })();
        match result {
            Ok(msg) => {
                self.status_message = msg;
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Failed to load: {}", err);
                self.status_message.clear();
            }
        }
    }

    fn export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .set_file_name("pollution_chart.svg")
            .save_file()
        else {
            return;
        };
        // The exported file shows the bare chart, not the hover state.
        match viz::render_plan_to_file(self.chart.plan(), None, &path) {
            Ok(()) => self.status_message = format!("Wrote chart to {}", path.display()),
            Err(err) => self.error_message = format!("Failed to export: {}", err),
        }
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn font(px: u32) -> egui::FontId {
    egui::FontId::proportional(px as f32)
}

/// Paint a label; rotated labels read bottom to top with their end on the anchor.
fn paint_label(painter: &egui::Painter, origin: egui::Pos2, label: &TextLabel) {
    let at = origin + egui::vec2(label.at.x as f32, label.at.y as f32);
    let color = color32(label.color);
    if label.rotated {
        let galley = painter.layout_no_wrap(label.text.clone(), font(label.font_px), color);
        let size = galley.size();
        // After a -90° turn the galley's width runs upward and its height to the right.
        let along = match label.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => size.x / 2.0,
            TextAnchor::End => size.x,
        };
        let pos = egui::pos2(at.x - size.y / 2.0, at.y + along);
        painter.add(
            egui::epaint::TextShape::new(pos, galley, color)
                .with_angle(-std::f32::consts::FRAC_PI_2),
        );
    } else {
        let align = match label.anchor {
            TextAnchor::Start => egui::Align2::LEFT_CENTER,
            TextAnchor::Middle => egui::Align2::CENTER_CENTER,
            TextAnchor::End => egui::Align2::RIGHT_CENTER,
        };
        painter.text(at, align, &label.text, font(label.font_px), color);
    }
}

fn to_rect(origin: egui::Pos2, r: &viz::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(r.x as f32, r.y as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

fn paint_plan(painter: &egui::Painter, origin: egui::Pos2, plan: &DrawPlan) {
    painter.rect_filled(
        egui::Rect::from_min_size(origin, egui::vec2(plan.width as f32, plan.height as f32)),
        0.0,
        egui::Color32::WHITE,
    );
    for seg in plan.gridlines.iter().chain(plan.axes.iter()) {
        painter.line_segment(
            [
                origin + egui::vec2(seg.from.x as f32, seg.from.y as f32),
                origin + egui::vec2(seg.to.x as f32, seg.to.y as f32),
            ],
            egui::Stroke::new(1.0, color32(seg.color)),
        );
    }
    for bar in &plan.bars {
        painter.rect_filled(to_rect(origin, &bar.rect), 0.0, color32(bar.color));
    }
    for label in plan.x_ticks.iter().chain(plan.y_ticks.iter()) {
        paint_label(painter, origin, label);
    }
    for entry in &plan.legend {
        painter.rect_filled(to_rect(origin, &entry.swatch), 0.0, color32(entry.color));
        paint_label(painter, origin, &entry.label);
    }
}

fn paint_tooltip(painter: &egui::Painter, origin: egui::Pos2, tip: &TooltipState) {
    let bounds = to_rect(origin, &tip.bounds());
    let alpha = (TOOLTIP_OPACITY * 255.0).round() as u8;
    painter.rect_filled(bounds, 5.0, egui::Color32::from_black_alpha(alpha));
    let line_h = LABEL_FONT_PX as f32 + 2.0;
    for (i, line) in tip.lines().iter().enumerate() {
        let pos = egui::pos2(
            bounds.center().x,
            bounds.min.y + TOOLTIP_PADDING_PX as f32 + line_h * (i as f32 + 0.5),
        );
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            line,
            font(LABEL_FONT_PX),
            egui::Color32::WHITE,
        );
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    self.open_file();
                }
                let has_file = self.loaded_from.is_some();
                if ui.add_enabled(has_file, egui::Button::new("Reload")).clicked() {
                    self.reload();
                }
                if ui.add_enabled(has_file, egui::Button::new("Export…")).clicked() {
                    self.export();
                }
                ui.separator();
                ui.label("State column:");
                ui.add(egui::TextEdit::singleline(&mut self.category_field).desired_width(80.0));
                ui.label("Parameters:");
                ui.add(egui::TextEdit::singleline(&mut self.params).desired_width(220.0))
                    .on_hover_text("NAME=#rrggbb separated by commas; empty = default set");
            });
            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("River Pollution Parameters Across States Where Ganga River Flows");
            let plan = self.chart.plan();
            let (response, painter) = ui.allocate_painter(
                egui::vec2(plan.width as f32, plan.height as f32),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;
            paint_plan(&painter, origin, plan);

            let pointer = response
                .hover_pos()
                .map(|p| viz::Point::new((p.x - origin.x) as f64, (p.y - origin.y) as f64));
            self.chart.pointer_at(pointer);

            let tip = self.chart.controller().tooltip();
            if tip.is_visible() {
                // Tooltip layer sits above every panel, i.e. the tooltip is raised.
                let layer = egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("bar_tooltip"));
                paint_tooltip(&ctx.layer_painter(layer), origin, tip);
            }
        });
    }
}
