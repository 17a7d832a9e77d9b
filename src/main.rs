//! Waterfall executable
//!
//! Loads a text map and animates it in the terminal until interrupted
//! (Ctrl-C, q or Esc) or until `--frames` frames have run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use waterfall::constants::frame::DEFAULT_MAP;
use waterfall::{FlowModelKind, MapLayout, SimConfig, Simulation, TerminalGuard};

/// ASCII water simulator
#[derive(Parser)]
#[command(name = "waterfall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grid water simulation rendered as ASCII animation", long_about = None)]
struct Cli {
    /// Map file: '#' walls, spaces empty, anything else water
    #[arg(default_value = DEFAULT_MAP)]
    map: PathBuf,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Flow model (overrides the config file)
    #[arg(short, long, value_enum)]
    model: Option<FlowModelKind>,

    /// Draw velocity arrows instead of water intensity
    #[arg(short, long)]
    debug: bool,

    /// Seed for the water inlet
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Milliseconds to sleep after each frame
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Use the fixed 80x24 grid instead of sizing to the map
    #[arg(long)]
    classic: bool,
}

impl Cli {
    /// Config file (or defaults) with command line overrides applied
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(model) = self.model {
            config.flow_model = model;
        }
        if self.debug {
            config.debug_render = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.frames.is_some() {
            config.max_frames = self.frames;
        }
        if self.interval_ms.is_some() {
            config.frame_interval_ms = self.interval_ms;
        }
        if self.classic {
            config.fixed_size = Some(waterfall::FixedSize::classic());
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let layout = MapLayout::load(&cli.map, config.fixed_dimensions())
        .with_context(|| format!("cannot start without a map ({})", cli.map.display()))?;

    let mut simulation = Simulation::from_layout(&layout, &config);
    let interval = config.frame_interval();
    log::info!(
        "running {} on {}x{} every {:?}",
        simulation.model_name(),
        layout.width(),
        layout.height(),
        interval
    );

    let mut terminal = TerminalGuard::acquire()?;
    terminal.draw(&simulation.render())?;

    loop {
        let frame = simulation.step();
        terminal.draw(&simulation.render())?;

        if config.max_frames.is_some_and(|max| frame >= max) {
            break;
        }
        if terminal.wait(interval)? {
            log::info!("interrupted after {} frames", frame);
            break;
        }
    }

    drop(terminal);
    let ledger = simulation.ledger();
    log::info!(
        "finished: total water {:.2}, added {:.2}, decayed {:.2}",
        ledger.total_water(),
        ledger.total_added(),
        ledger.total_decayed()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{:#}", e);
        eprintln!("waterfall: {:#}", e);
        std::process::exit(1);
    }
}
