//! `obd-dashboard` binary: wires a sample source to the dashboard window.
//!
//! Usage:
//!   obd-dashboard                      # synthetic demo feed, one sample every 500 ms
//!   some-publisher | obd-dashboard --source stdin
//!   obd-dashboard --source file --input drive.jsonl --export-dir ./logs
//!
//! Input for `stdin`/`file` is one JSON object per line, e.g.
//!   {"RPM": 2100, "SPEED": 54, "GEAR": "3"}

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use obd_dashboard::feed::{spawn_demo_feed, spawn_line_feed, DEMO_INTERVAL};
use obd_dashboard::{channel_samples, run_dashboard, DashboardConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Synthetic drive cycle.
    Demo,
    /// Newline-delimited JSON on standard input.
    Stdin,
    /// Newline-delimited JSON read from `--input`.
    File,
}

#[derive(Debug, Parser)]
#[command(name = "obd-dashboard", about = "Live OBD-II telemetry charts and session recorder")]
struct Args {
    /// Where samples come from.
    #[arg(long, value_enum, default_value_t = Source::Demo)]
    source: Source,

    /// Input file for `--source file`.
    #[arg(long, required_if_eq("source", "file"))]
    input: Option<PathBuf>,

    /// YAML config file (defaults to ~/.obd_dashboard/config.yaml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of chart panels.
    #[arg(long)]
    panels: Option<usize>,

    /// Rolling window size (points per chart).
    #[arg(long)]
    window: Option<usize>,

    /// Write exports to this directory instead of asking with a save dialog.
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => DashboardConfig::load_from_path(path)?,
        None => DashboardConfig::load_from_default_path()?,
    };
    if let Some(n) = args.panels {
        cfg.panel_count = n;
    }
    if let Some(n) = args.window {
        cfg.window_size = n;
    }
    if args.export_dir.is_some() {
        cfg.export_dir = args.export_dir.clone();
    }
    cfg.validate()?;

    let (sink, stream) = channel_samples();
    match args.source {
        Source::Demo => {
            spawn_demo_feed(sink, DEMO_INTERVAL);
        }
        Source::Stdin => {
            spawn_line_feed(BufReader::new(std::io::stdin()), sink);
        }
        Source::File => {
            let path = args.input.as_ref().ok_or("--input is required for --source file")?;
            let file = File::open(path)?;
            tracing::info!(path = %path.display(), "reading samples from file");
            spawn_line_feed(BufReader::new(file), sink);
        }
    }

    run_dashboard(stream, cfg)?;
    Ok(())
}
