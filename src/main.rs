//! Takken Radar - exam score radar chart CLI
//!
//! Renders per-subject scores from a CSV file (or the built-in sample) to a
//! PNG radar chart and prints score breakdowns.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};
use takken_radar::{DataLoader, RadarChartBuilder, RadarData, RenderOptions, ScoreCalculator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_TITLE: &str = "Takken Radar";

#[derive(Parser, Debug)]
#[command(author, version, about = "Exam score radar charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a radar chart PNG from a score CSV
    Render {
        /// Input CSV: `Category,Value` rows or a category header plus one row per series
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Output PNG path
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render the built-in 宅建 sample scores
    Sample {
        /// Output PNG path
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print totals and per-subject percentages
    Summary {
        /// Input CSV (omit with --sample)
        #[arg(required_unless_present = "sample", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Use the built-in sample scores
        #[arg(long)]
        sample: bool,
        /// Minimum total needed to pass
        #[arg(long)]
        pass_line: Option<f64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Font file (.ttf/.otf/.ttc) able to draw the labels
    #[arg(long, value_hint = ValueHint::FilePath)]
    font: Option<PathBuf>,
    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,
    /// Label font size in points
    #[arg(long = "fontsize")]
    font_size: Option<u32>,
    /// Chart title
    #[arg(long)]
    title: Option<String>,
    /// Fixed radial axis maximum
    #[arg(long)]
    r_max: Option<f64>,
    /// JSON file with render options; flags take precedence
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Also print the score summary against this pass line
    #[arg(long)]
    pass_line: Option<f64>,
}

impl RenderArgs {
    fn options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => RenderOptions::from_json_file(path)?,
            None => RenderOptions::default(),
        };
        if let Some(font) = &self.font {
            options.font_path = Some(font.clone());
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if let Some(font_size) = self.font_size {
            options.font_size = font_size;
        }
        if let Some(r_max) = self.r_max {
            options.r_max = Some(r_max);
        }
        options.title = self
            .title
            .clone()
            .or(options.title)
            .or_else(|| Some(DEFAULT_TITLE.to_string()));
        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            input,
            output,
            render,
        } => {
            let data = DataLoader::load_csv(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            render_chart(&data, &output, &render)
        }
        Command::Sample { output, render } => {
            render_chart(&RadarData::takken_sample(), &output, &render)
        }
        Command::Summary {
            input,
            sample,
            pass_line,
            json,
        } => {
            let data = match input {
                Some(path) if !sample => DataLoader::load_csv(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                _ => RadarData::takken_sample(),
            };
            print_summary(&data, pass_line, json)
        }
    }
}

fn render_chart(data: &RadarData, output: &Path, args: &RenderArgs) -> Result<()> {
    let options = args.options().context("invalid render options")?;
    let figure = RadarChartBuilder::new(options)
        .render_to_file(data, output)
        .with_context(|| format!("rendering {}", output.display()))?;

    if !figure.warnings().is_empty() {
        warn!(
            count = figure.warnings().len(),
            "chart rendered with font fallbacks"
        );
    }
    info!(
        output = %output.display(),
        width = figure.width(),
        height = figure.height(),
        "chart written"
    );

    if args.pass_line.is_some() {
        print_summary(data, args.pass_line, false)?;
    }
    Ok(())
}

fn print_summary(data: &RadarData, pass_line: Option<f64>, json: bool) -> Result<()> {
    let summary = ScoreCalculator::summarize(data, pass_line);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.to_table());
    }
    Ok(())
}
