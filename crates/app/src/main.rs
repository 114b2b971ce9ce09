use std::path::PathBuf;

use clap::{Parser, Subcommand};
use homepage_fx_core::{
    active_section, progress_percent, FxConfig, ScrollMetrics, SectionExtent,
};
use tracing_subscriber::EnvFilter;

fn main() -> homepage_fx_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { overrides } => run_config(overrides.as_deref()),
        Commands::Sweep {
            height,
            viewport,
            sections,
            steps,
        } => run_sweep(height, viewport, sections, steps),
    }
}

/// Prints the resolved configuration, optionally merged with a JSON
/// override file, so pages can be tuned without rebuilding the wasm bundle.
fn run_config(overrides: Option<&std::path::Path>) -> homepage_fx_core::Result<()> {
    let config = match overrides {
        Some(path) => {
            tracing::info!(?path, "merging config overrides");
            let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
            FxConfig::from_json(&json)?
        }
        None => FxConfig::default(),
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Tabulates the scroll synchronizer's outputs across a simulated page so
/// progress and indicator behaviour can be checked against a real layout.
fn run_sweep(
    height: f64,
    viewport: f64,
    sections: usize,
    steps: usize,
) -> homepage_fx_core::Result<()> {
    tracing::info!(height, viewport, sections, "simulating scroll sweep");

    if height <= 0.0 || viewport <= 0.0 {
        return Err("page and viewport heights must be positive".into());
    }

    let section_height = height / sections.max(1) as f64;
    let extents: Vec<SectionExtent> = (0..sections)
        .map(|i| SectionExtent::new(i as f64 * section_height, section_height))
        .collect();

    let max_scroll = (height - viewport).max(0.0);
    println!("{:>10}  {:>8}  {:>6}", "scrollTop", "progress", "dot");
    for step in 0..=steps {
        let scroll_top = max_scroll * step as f64 / steps.max(1) as f64;
        let metrics = ScrollMetrics::new(scroll_top, height, viewport);
        let progress = progress_percent(metrics);
        let dot = active_section(metrics, &extents)
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{scroll_top:>10.0}  {progress:>7.1}%  {dot:>6}");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Tuning tool for the homepage decoration layer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved effect configuration as JSON.
    Config {
        /// Optional JSON file with partial overrides.
        #[arg(short, long)]
        overrides: Option<PathBuf>,
    },
    /// Tabulate scroll progress and the active indicator dot for a
    /// simulated page.
    Sweep {
        /// Total document height in px.
        #[arg(long, default_value_t = 2_000.0)]
        height: f64,
        /// Viewport height in px.
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
        /// Number of equal-height sections.
        #[arg(long, default_value_t = 4)]
        sections: usize,
        /// Number of sweep steps between top and bottom.
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
}
