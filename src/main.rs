// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use shop_schedule::{run, ScheduleConfig, ScheduleError, DEFAULT_CONFIG_FILE};

fn main() -> Result<()> {
    // RUST_LOG overrides; default keeps per-block details quiet
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = ScheduleConfig::load_or_default(DEFAULT_CONFIG_FILE)
        .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))?;

    if args.len() > 1 && args[1] == "preview" {
        // Preview mode
        run_preview_mode(&config)?;
    } else {
        // Export mode (default)
        run_export(&config)?;
    }

    Ok(())
}

fn run_export(config: &ScheduleConfig) -> Result<()> {
    println!("=== Schedule parser start ===");
    println!("📂 Input: {}", config.input_path.display());

    let report = match run(config) {
        Ok(report) => report,
        Err(ScheduleError::MissingInput(path)) => {
            eprintln!("❌ Input document not found: {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e).context("Schedule run failed"),
    };

    println!("✓ {}", report.summary_line());
    println!("✓ Matrix written: {}", report.output_path.display());
    if let Some(entries_path) = &report.entries_path {
        println!("✓ Entries written: {}", entries_path.display());
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_preview_mode(config: &ScheduleConfig) -> Result<()> {
    let (table, matrix) = match shop_schedule::build_schedule(config) {
        Ok(built) => built,
        Err(ScheduleError::MissingInput(path)) => {
            eprintln!("❌ Input document not found: {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e).context("Schedule parse failed"),
    };

    println!("✓ Parsed {} entries\n", table.summary.entry_count);
    println!("Starting preview... (Press 'q' to quit)\n");

    let mut app = ui::App::new(matrix);
    ui::run_ui(&mut app)?;

    println!("\n✅ Preview closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_preview_mode(_config: &ScheduleConfig) -> Result<()> {
    eprintln!("❌ Preview mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
