//! pollution_chart
//!
//! Grouped bar chart of river pollution parameters per state. Raw measurement rows
//! are averaged per state, mapped onto band/linear scales, laid out as a
//! backend-independent draw plan, and made interactive through a single hover
//! tooltip. Pairs with the `pollution-chart` CLI and the `pollution-chart-gui` viewer.
//!
//! ### Features
//! - Per-state means with missing values excluded (undefined, not zero)
//! - D3-compatible nice value domain and ticks, sub-banded bars, fixed legend
//! - Hover tooltip state machine usable from any host
//! - SVG/PNG output via plotters, interactive window via egui
//!
//! ### Example
//! ```no_run
//! use pollution_chart::{Chart, ChartLayout, ParameterSpec, Record};
//!
//! let records = vec![
//!     Record::new("Bihar").with("TempMean", 25.0).with("DOMean", 7.1),
//!     Record::new("Bihar").with("TempMean", 27.0),
//!     Record::new("Uttarakhand").with("TempMean", 15.5),
//! ];
//! let mut chart = Chart::new(ParameterSpec::river_pollution(), ChartLayout::default());
//! chart.set_data(&records)?;
//! chart.hover("Uttarakhand", "DOMean");
//! assert_eq!(chart.controller().tooltip().text(), "DOMean: N/A");
//! pollution_chart::viz::render_to_file(&chart, "pollution.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod error;
pub mod interact;
pub mod models;
pub mod stats;
pub mod storage;
pub mod style;
pub mod viz;

pub use chart::Chart;
pub use error::ChartError;
pub use interact::{InteractionController, TooltipState};
pub use models::{AggregatedRow, Parameter, ParameterSpec, Record};
pub use viz::types::ChartLayout;
