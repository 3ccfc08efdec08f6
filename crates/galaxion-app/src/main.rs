//! Headless GALAXION runner.
//!
//! Plays an attract-mode session with the autopilot at a fixed tick and
//! prints JSON status lines to stdout. Logs go to stderr. Lines on stdin
//! (`new`, `quit`, `pause`, `resume`, `stop`) are forwarded to the session.

mod autopilot;
mod config;
mod game_loop;
mod logging;

use crate::config::RunConfig;
use crate::game_loop::LoopCommand;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON run config; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
    /// Milliseconds per tick.
    #[arg(long)]
    tick_ms: Option<f32>,
    /// Wave file to play instead of the built-in campaign.
    #[arg(long)]
    waves: Option<PathBuf>,
    /// Print a status line every N ticks (0 disables).
    #[arg(long)]
    report_every: Option<u64>,
    /// Sleep out each tick instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.max_ticks = Some(ticks);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(waves) = &self.waves {
            config.waves = Some(waves.clone());
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
        }
        config.realtime |= self.realtime;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    args.apply(&mut config);

    let sim = config.sim_config()?;
    info!(
        "starting run: seed {}, {} waves, {} ms ticks",
        sim.seed,
        sim.waves.len(),
        config.tick_ms
    );

    let game = game_loop::start(config, sim, io::stdout());
    spawn_operator_input(game.commands());
    let summary = game
        .join()
        .map_err(|_| anyhow!("game loop panicked"))?
        .context("writing status report")?;

    info!(
        "finished after {} ticks ({:?}) in wave {}, score {}",
        summary.ticks, summary.reason, summary.wave, summary.score.score
    );
    Ok(())
}

/// Forward operator commands typed on stdin to the game loop.
fn spawn_operator_input(tx: mpsc::Sender<LoopCommand>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match LoopCommand::parse(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("unknown command `{}`", line.trim()),
            }
        }
    });
}
