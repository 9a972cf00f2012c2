//! # ahma
//!
//! Reads a price series, computes the Hull and Adaptive Hull moving averages
//! and writes them as CSV or JSON.

mod logging;
mod metrics;
mod output;
mod parser;

use ahma_core::{AhmaConfig, Analyzer, PartialConfig};
use clap::Parser;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::output::{OutputFormat, Report};

#[derive(Parser)]
#[command(name = "ahma")]
#[command(about = "Adaptive Hull Moving Average calculator", long_about = None)]
struct Cli {
    /// Input file with one `label, value` row per line (`-` for stdin)
    input: PathBuf,

    /// JSON file with a partial configuration, e.g. {"hullLength": 9}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hull moving average length
    #[arg(long)]
    hull_length: Option<f64>,

    /// Efficiency ratio lookback window
    #[arg(long)]
    adaptive_window: Option<f64>,

    /// Fast smoothing period
    #[arg(long)]
    fast_period: Option<f64>,

    /// Slow smoothing period
    #[arg(long)]
    slow_period: Option<f64>,

    /// Output format (csv, json)
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn flag_config(&self) -> PartialConfig {
        PartialConfig {
            hull_length: self.hull_length,
            adaptive_window: self.adaptive_window,
            fast_period: self.fast_period,
            slow_period: self.slow_period,
        }
    }
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn load_config(cli: &Cli) -> Result<AhmaConfig, Box<dyn Error>> {
    let file_config = match &cli.config {
        Some(path) => PartialConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => PartialConfig::default(),
    };
    Ok(AhmaConfig::resolve(&file_config.merge(&cli.flag_config())))
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logging();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!(?config, "configuration");

    let text = read_input(&cli.input)?;
    let parsed = parser::parse_series(&text);
    for issue in &parsed.issues {
        warn!(line = issue.line, content = %issue.content, "skipped row: {}", issue.reason);
    }
    if parsed.is_empty() {
        warn!(input = ?cli.input, "no price rows found");
    }

    let series = Analyzer::new(config).run(&parsed.values);
    let summary = metrics::summarize(&parsed.values, &series);
    info!(
        rows = parsed.len(),
        skipped = parsed.issues.len(),
        latest_ahma = ?summary.latest_ahma.map(|p| p.value),
        slope = ?summary.slope,
        spread_pct = ?summary.spread_pct,
        "analysis completed"
    );
    if let Some(cross) = summary.last_crossover {
        info!(
            label = %parsed.labels[cross.index],
            direction = %cross.direction,
            "last crossover"
        );
    }

    let rows = output::build_rows(&parsed.labels, &parsed.values, &series);
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.format {
        OutputFormat::Csv => output::write_csv(writer, &rows)?,
        OutputFormat::Json => {
            let report = Report {
                config: &config,
                rows: &rows,
                summary: &summary,
                issues: &parsed.issues,
            };
            let mut writer = writer;
            output::write_json(&mut writer, &report)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
