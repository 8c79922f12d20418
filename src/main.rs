use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use echarts_config::csv_reader;
use echarts_config::data::ChartInput;
use echarts_config::telemetry;
use echarts_config::{ChartDefaults, ChartKind};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "echarts-config")]
#[command(about = "Build ECharts option objects from data on stdin", long_about = None)]
struct Args {
    /// Chart kind: line, bar, pie or map
    kind: ChartKind,

    /// Chart title (overrides the title of a JSON request)
    #[arg(long)]
    title: Option<String>,

    /// Format of the data read from stdin
    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    format: InputFormat,

    /// JSON file overriding the palette, axis color and other defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tooltip template, e.g. '{b}: {c}'
    #[arg(long)]
    tooltip: Option<String>,

    /// Upper bound of the map color range or the pie funnel
    #[arg(long)]
    max: Option<f64>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Emit a JavaScript object literal with formatter functions inlined
    #[arg(long, conflicts_with = "compact")]
    js: bool,
}

fn main() -> Result<()> {
    let _ = telemetry::init_default_tracing();
    let args = Args::parse();

    let defaults = match &args.config {
        Some(path) => ChartDefaults::load(path)?,
        None => ChartDefaults::default(),
    };

    let mut input = match args.format {
        InputFormat::Csv => {
            let csv_data = csv_reader::read_csv_from_stdin()
                .context("Failed to read CSV from stdin")?;
            ChartInput::from_csv(&csv_data, args.kind)?
        }
        InputFormat::Json => {
            let value: Value = serde_json::from_reader(io::stdin().lock())
                .context("Failed to parse JSON from stdin")?;
            ChartInput::from_json(&value)?
        }
    };

    if let Some(title) = args.title {
        input.title = title;
    }
    if args.tooltip.is_some() {
        input.tooltip = args.tooltip;
    }
    if args.max.is_some() {
        input.max = args.max;
    }

    let option = input
        .build(args.kind, &defaults)
        .context("Failed to build chart option")?;
    info!(kind = %args.kind, series = option.len_of("series"), "built chart option");

    let text = if args.js {
        option.to_js_literal()?
    } else if args.compact {
        option.to_json()?
    } else {
        option.to_json_pretty()?
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", text).context("Failed to write option to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
