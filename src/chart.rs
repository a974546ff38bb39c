//! The chart as a whole: data changes rebuild everything, pointer events only
//! touch the tooltip.

use crate::error::ChartError;
use crate::interact::InteractionController;
use crate::models::{AggregatedRow, ParameterSpec, Record};
use crate::stats::aggregate_by_category;
use crate::viz::plan::build_plan;
use crate::viz::scale::Scales;
use crate::viz::types::{BarId, ChartLayout, DrawPlan, Point};
use log::debug;

#[derive(Debug, Clone)]
pub struct Chart {
    spec: ParameterSpec,
    layout: ChartLayout,
    locale: String,
    rows: Vec<AggregatedRow>,
    scales: Option<Scales>,
    plan: DrawPlan,
    controller: InteractionController,
}

impl Chart {
    /// An empty chart; nothing is drawn until [`Chart::set_data`] gets records.
    pub fn new(spec: ParameterSpec, layout: ChartLayout) -> Self {
        Self {
            plan: DrawPlan::empty(&layout),
            spec,
            layout,
            locale: "en".to_string(),
            rows: Vec::new(),
            scales: None,
            controller: InteractionController::new(),
        }
    }

    /// Locale tag for y tick labels (see [`crate::viz::util::map_locale`]).
    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    /// Replace the data: aggregate, rebuild scales and plan, rebind the pointer
    /// handlers. The previous drawing is discarded, never patched.
    pub fn set_data(&mut self, records: &[Record]) -> Result<(), ChartError> {
        let rows = aggregate_by_category(records, &self.spec);
        let (scales, plan) = if rows.is_empty() {
            (None, DrawPlan::empty(&self.layout))
        } else {
            let scales = Scales::build(
                &rows,
                &self.spec,
                self.layout.plot_width(),
                self.layout.plot_height(),
            );
            let plan = build_plan(&rows, &scales, &self.spec, &self.layout, &self.locale)?;
            (Some(scales), plan)
        };
        debug!(
            "chart rebuilt: {} records, {} categories, {} bars",
            records.len(),
            rows.len(),
            plan.bars.len()
        );
        self.rows = rows;
        self.scales = scales;
        self.plan = plan;
        self.controller.bind(&self.plan);
        Ok(())
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// `None` until data with at least one category has been set.
    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    /// Forward a raw pointer position in canvas pixels to the controller.
    pub fn pointer_at(&mut self, pos: Option<Point>) {
        self.controller.pointer_at(pos);
    }

    /// Show the tooltip of the bar for `category` and `param_name`, as if hovered.
    pub fn hover(&mut self, category: &str, param_name: &str) -> Option<BarId> {
        let id = self.plan.find_bar(category, param_name)?.id;
        self.controller.pointer_enter(id);
        Some(id)
    }
}
