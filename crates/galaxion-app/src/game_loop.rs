use crate::autopilot::Autopilot;
use crate::config::RunConfig;
use galaxion_core::commands::SessionCommand;
use galaxion_core::enums::{EntityKind, GamePhase};
use galaxion_core::events::GameEvent;
use galaxion_core::state::{GameSnapshot, ScoreView};
use galaxion_sim::{GameManager, SimConfig};
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Ticks between autopilot shots.
const AUTOPILOT_FIRE_EVERY: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Session(SessionCommand),
    Shutdown,
}

impl LoopCommand {
    /// Parse one line of operator input (`new`, `quit`, `pause`, `resume`, `stop`).
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = match line.trim().to_ascii_lowercase().as_str() {
            "new" => LoopCommand::Session(SessionCommand::NewGame),
            "quit" => LoopCommand::Session(SessionCommand::Quit),
            "pause" => LoopCommand::Session(SessionCommand::Pause),
            "resume" => LoopCommand::Session(SessionCommand::Resume),
            "stop" => LoopCommand::Shutdown,
            _ => return None,
        };
        Some(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    GameOver,
    TickLimit,
    Shutdown,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub wave: u32,
    pub score: ScoreView,
    pub reason: StopReason,
}

/// One status line on the report stream.
#[derive(Debug, Serialize)]
struct StatusLine<'a> {
    tick: u64,
    elapsed_ms: f64,
    phase: GamePhase,
    paused: bool,
    wave: u32,
    enemies: usize,
    score: &'a ScoreView,
}

impl<'a> StatusLine<'a> {
    fn from_snapshot(snapshot: &'a GameSnapshot) -> Self {
        Self {
            tick: snapshot.time.tick,
            elapsed_ms: snapshot.time.elapsed_ms,
            phase: snapshot.phase,
            paused: snapshot.paused,
            wave: snapshot.wave,
            enemies: snapshot
                .entities
                .iter()
                .filter(|view| view.kind == EntityKind::Enemy)
                .count(),
            score: &snapshot.score,
        }
    }
}

/// Handle to a game loop running on its own thread.
pub struct GameLoop {
    command_tx: mpsc::Sender<LoopCommand>,
    handle: thread::JoinHandle<io::Result<RunSummary>>,
}

impl GameLoop {
    /// A sender for feeding commands from another thread.
    pub fn commands(&self) -> mpsc::Sender<LoopCommand> {
        self.command_tx.clone()
    }

    pub fn join(self) -> thread::Result<io::Result<RunSummary>> {
        self.handle.join()
    }
}

/// Start the game loop on a background thread, reporting to `out`.
///
/// The session is built on the loop thread since the manager's event
/// emitter is not `Send`.
pub fn start<W>(config: RunConfig, sim: SimConfig, mut out: W) -> GameLoop
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || run_loop(&rx, &config, sim, &mut out));
    GameLoop {
        command_tx: tx,
        handle,
    }
}

/// Drive one session until game over, the tick limit, or a shutdown.
pub fn run_loop(
    rx: &mpsc::Receiver<LoopCommand>,
    config: &RunConfig,
    sim: SimConfig,
    out: &mut impl Write,
) -> io::Result<RunSummary> {
    let mut manager = GameManager::new(sim);
    let mut pilot = Autopilot::new(AUTOPILOT_FIRE_EVERY);
    let tick_duration = Duration::from_secs_f32(config.tick_ms / 1000.0);

    manager.queue_command(SessionCommand::NewGame);
    let mut snapshot = GameSnapshot::default();
    let mut ticks: u64 = 0;

    let reason = 'run: loop {
        let start = Instant::now();

        while let Ok(cmd) = rx.try_recv() {
            match cmd {
                LoopCommand::Session(session) => manager.queue_command(session),
                LoopCommand::Shutdown => break 'run StopReason::Shutdown,
            }
        }

        let input = pilot.next_frame(&snapshot);
        snapshot = manager.tick(config.tick_ms, &input);
        ticks += 1;
        log_events(&snapshot.events);

        if config.report_every > 0 && ticks % config.report_every == 0 {
            report(out, &snapshot)?;
        }

        if snapshot.phase == GamePhase::GameOver {
            break StopReason::GameOver;
        }
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            break StopReason::TickLimit;
        }

        if config.realtime {
            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                thread::sleep(tick_duration - elapsed);
            }
        }
    };

    report(out, &snapshot)?;
    out.flush()?;
    info!(
        "run stopped ({reason:?}) after {ticks} ticks: wave {}, score {}",
        snapshot.wave, snapshot.score.score
    );

    Ok(RunSummary {
        ticks,
        wave: snapshot.wave,
        score: snapshot.score,
        reason,
    })
}

fn report(out: &mut impl Write, snapshot: &GameSnapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, &StatusLine::from_snapshot(snapshot))?;
    writeln!(out)
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::WaveCleared { wave } => info!("wave {wave} cleared"),
            GameEvent::PlayerDestroyed { lives_remaining } => {
                info!("ship destroyed, {lives_remaining} lives left")
            }
            GameEvent::GameOver { final_score } => info!("game over, final score {final_score}"),
            GameEvent::Collision { .. }
            | GameEvent::ShotFired { .. }
            | GameEvent::EnemyFired { .. } => {}
            other => debug!("{other:?}"),
        }
    }
}
