//! Application entry point for the nodiverse viewer.
//!
//! This binary loads the configuration, then either opens the eframe/egui
//! window (delegating everything to [`Viewer`]) or, with `--headless`, runs
//! a fixed number of ticks without a window and logs the diagnostics.

mod renderer;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use renderer::EguiRenderer;
use sim_core::{Nodiverse, config::Config, diagnostics::LogSink};
use std::path::PathBuf;
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(about = "A bounded 2-D universe of colliding discs")]
struct Args {
    /// YAML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run (overrides the config file).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many ticks without a window and exit.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run_headless(cfg: Config, ticks: u64) -> Result<()> {
    let mut renderer = EguiRenderer::new();
    let mut nodiverse = Nodiverse::new(cfg, &mut renderer)?;

    for _ in 0..ticks {
        nodiverse.step(&mut LogSink)?;
    }
    nodiverse.render(&mut renderer);

    info!(
        "{} ticks done: momentum {:.3}, kinetic energy {:.3}, {} drawables, {} frames presented",
        nodiverse.tick(),
        nodiverse.net_momentum(),
        nodiverse.net_kinetic_energy(),
        renderer.drawable_count(),
        renderer.frames_presented()
    );
    Ok(())
}

/// Starts the native eframe application titled `"Nodiverse"`, unless a
/// headless run was requested.
///
/// ### Returns
/// - `Ok(())` if the run completes without errors.
/// - `Err` if the configuration is invalid, a headless tick fails, or eframe
///   fails to create the native window or event loop.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;

    if let Some(ticks) = args.headless {
        return run_headless(cfg, ticks);
    }

    let viewer = Viewer::new(cfg)?;
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Nodiverse",
        options,
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
