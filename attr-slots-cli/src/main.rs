//! Attribute Slots CLI Application
//!
//! Runs the demonstrations built on the attr-slots library:
//! - Callback invocation with a call counter
//! - Integer-validated point coordinates
//! - Lazily computed circle attributes

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

mod callbacks;
mod config;
mod demos;
mod report;

use config::AppConfig;

/// Attribute Slots - validated and lazily computed attributes
#[derive(Parser, Debug)]
#[command(name = "attr-slots-cli")]
#[command(about = "Run the attribute slot demonstrations", long_about = None)]
#[command(version)]
struct Args {
    /// Demonstration to run (default: all)
    #[command(subcommand)]
    demo: Option<Demo>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print instance snapshots as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    /// Invoke add() repeatedly with a counting callback
    Callback,
    /// Construct points through integer slots
    Point,
    /// Compute, cache and reset circle area/perimeter
    Circle,
    /// Run every demonstration
    All,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Attribute Slots CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using attr-slots library v{}", attr_slots::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    let json = args.json || config.output.json;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(args.demo.unwrap_or(Demo::All), &config, json, &mut out)
}

fn run<W: Write>(demo: Demo, config: &AppConfig, json: bool, out: &mut W) -> Result<()> {
    if matches!(demo, Demo::Callback | Demo::All) {
        writeln!(out, "── callback ──")?;
        let count = callbacks::run(&config.callback, out)?;
        writeln!(out, "add() was called {} times", count)?;
    }
    if matches!(demo, Demo::Point | Demo::All) {
        writeln!(out, "── point ──")?;
        demos::run_point(&config.point, json, out)?;
    }
    if matches!(demo, Demo::Circle | Demo::All) {
        writeln!(out, "── circle ──")?;
        demos::run_circle(&config.circle, json, out)?;
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
