use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;
use pollution_chart::models::{DEFAULT_CATEGORY_FIELD, parse_param_list};
use pollution_chart::{Chart, ChartLayout, ParameterSpec};
use pollution_chart::{stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pollution-chart",
    version,
    about = "Average river pollution measurements per state and chart them as grouped bars"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a CSV/JSON file and render the chart (optionally export and print stats).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input rows (.csv with header, or .json array of objects).
    #[arg(short, long)]
    input: PathBuf,
    /// Chart output path (.svg or .png).
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Column holding the category (state) of each row.
    #[arg(long, default_value = DEFAULT_CATEGORY_FIELD)]
    category_field: String,
    /// Parameters to chart as NAME=#rrggbb separated by comma or semicolon
    /// (default: TempMean, DOMean, PHMean, BODMean).
    #[arg(long)]
    params: Option<String>,
    /// Canvas width (default 900).
    #[arg(long, default_value_t = 900)]
    width: u32,
    /// Canvas height (default 500).
    #[arg(long, default_value_t = 500)]
    height: u32,
    /// Locale for y tick labels (e.g. en, de).
    #[arg(long, default_value = "en")]
    locale: String,
    /// TTF/OTF font for PNG text (replaces the bundled DejaVu Sans).
    #[arg(long)]
    font: Option<PathBuf>,
    /// Render with the tooltip of one bar shown, given as CATEGORY:PARAM.
    #[arg(long)]
    hover: Option<String>,
    /// Export the aggregated rows (format by extension: .csv or .json).
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Print per-state statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "N/A".to_string(),
    }
}

fn parse_hover(s: &str) -> Option<(&str, &str)> {
    let (category, param) = s.rsplit_once(':')?;
    let (category, param) = (category.trim(), param.trim());
    (!category.is_empty() && !param.is_empty()).then_some((category, param))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    // Validate everything that can fail before touching the input.
    let spec = match args.params.as_deref() {
        Some(s) => parse_param_list(s)?,
        None => ParameterSpec::river_pollution(),
    };
    let hover = match args.hover.as_deref() {
        Some(s) => Some(
            parse_hover(s)
                .ok_or_else(|| anyhow::anyhow!("invalid --hover, expected CATEGORY:PARAM"))?,
        ),
        None => None,
    };
    if let Some(font) = args.font.as_ref() {
        viz::register_font_file(font)?;
    }

    let loaded = storage::load_records(&args.input, &args.category_field)?;
    if loaded.skipped > 0 {
        eprintln!(
            "Skipped {} row(s) without a {} value",
            loaded.skipped, args.category_field
        );
    }
    info!("loaded {} records from {}", loaded.records.len(), args.input.display());

    let layout = ChartLayout::with_size(args.width, args.height);
    let mut chart = Chart::new(spec, layout).with_locale(args.locale.clone());
    chart.set_data(&loaded.records)?;
    if chart.rows().is_empty() {
        eprintln!("No records to chart; output will be blank");
    }

    if let Some((category, param)) = hover
        && chart.hover(category, param).is_none()
    {
        anyhow::bail!("no bar for category `{}` and parameter `{}`", category, param);
    }

    if let Some(path) = args.out.as_ref() {
        viz::render_to_file(&chart, path)?;
        eprintln!("Wrote chart to {}", path.display());
    }

    if let Some(path) = args.summary.as_ref() {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => storage::save_rows_csv(chart.rows(), chart.spec(), &args.category_field, path)?,
            "json" => {
                storage::save_rows_json(chart.rows(), chart.spec(), &args.category_field, path)?
            }
            other => anyhow::bail!("unsupported summary format: {}", other),
        }
        eprintln!("Saved {} aggregated rows to {}", chart.rows().len(), path.display());
    }

    if args.stats {
        for s in stats::summaries(&loaded.records, chart.spec()) {
            println!(
                "{} • {}  count={} missing={}  mean={}",
                s.category,
                s.parameter,
                s.count,
                s.missing,
                fmt_opt(s.mean)
            );
        }
    }

    Ok(())
}
