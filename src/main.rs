//! Autotris runner (default binary).
//!
//! Plays the game in the terminal with the autopilot at the controls (keys
//! still work alongside it), or runs the autopilot headless and prints a JSON
//! summary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use serde::Serialize;

use autotris::core::{GameSnapshot, GameState};
use autotris::engine::{Autopilot, DropStyle, ExecuteError};
use autotris::input::{handle_key_event, should_quit};
use autotris::session_log::SessionLog;
use autotris::term::{AutopilotView, FrameBuffer, GameView, RenderReport, TerminalRenderer};
use autotris::types::{GameAction, BOARD_COLS, BOARD_ROWS, MAX_FPS};

/// Upper bound on primitives the autopilot may issue in one frame
const MAX_STEPS_PER_FRAME: usize = 64;

/// Largest board side accepted on the command line
const MAX_BOARD_SIDE: usize = 255;

#[derive(Parser, Debug)]
#[command(name = "autotris", version, about = "Falling-block puzzle played by a heuristic search")]
struct Args {
    /// Seed for the piece sequence.
    #[arg(long, env = "AUTOTRIS_SEED", default_value_t = 1)]
    seed: u32,

    /// Playable board rows.
    #[arg(long, env = "AUTOTRIS_ROWS", default_value_t = BOARD_ROWS)]
    rows: usize,

    /// Board columns.
    #[arg(long, env = "AUTOTRIS_COLS", default_value_t = BOARD_COLS)]
    cols: usize,

    /// Frames per second of the interactive loop.
    #[arg(long, env = "AUTOTRIS_FPS", default_value_t = MAX_FPS)]
    fps: u32,

    /// Directory for session_data_<n>.csv files.
    #[arg(long, env = "AUTOTRIS_LOG_DIR", default_value = ".")]
    log_dir: PathBuf,

    /// Do not write a session log.
    #[arg(long, env = "AUTOTRIS_NO_LOG")]
    no_log: bool,

    /// Keyboard only; the autopilot stays off.
    #[arg(long)]
    manual: bool,

    /// Finish each placement with a single hard drop instead of one soft drop per frame.
    #[arg(long)]
    hard_drop: bool,

    /// Run the autopilot without a terminal and print a JSON summary.
    #[arg(long)]
    headless: bool,

    /// Headless only: stop after this many locked pieces.
    #[arg(long, default_value_t = 500)]
    pieces: u32,
}

impl Args {
    fn validate(&self) -> Result<()> {
        ensure!(
            (4..=MAX_BOARD_SIDE).contains(&self.rows),
            "--rows must be between 4 and {} (got {})",
            MAX_BOARD_SIDE,
            self.rows
        );
        ensure!(
            (4..=MAX_BOARD_SIDE).contains(&self.cols),
            "--cols must be between 4 and {} (got {})",
            MAX_BOARD_SIDE,
            self.cols
        );
        ensure!(
            (1..=1000).contains(&self.fps),
            "--fps must be between 1 and 1000 (got {})",
            self.fps
        );
        Ok(())
    }

    fn drop_style(&self) -> DropStyle {
        if self.hard_drop {
            DropStyle::Hard
        } else {
            DropStyle::Soft
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u32,
    rows: usize,
    cols: usize,
    score: u32,
    lines: u32,
    level: u32,
    pieces: u32,
    decisions: u32,
    fallbacks: u32,
    game_over: bool,
    elapsed_ms: u64,
}

/// Run the autopilot for one frame: every rotation and shift it wants, then
/// one drop. Rejected steps fall back to a hard drop.
fn drive_frame(pilot: &mut Autopilot, game: &mut GameState, fallbacks: &mut u32) {
    for _ in 0..MAX_STEPS_PER_FRAME {
        match pilot.step(game) {
            Ok(out) => {
                let dropped = matches!(out.action, GameAction::SoftDrop | GameAction::HardDrop);
                if out.done || dropped {
                    return;
                }
            }
            Err(ExecuteError::NotPlayable | ExecuteError::NoActive) => return,
            Err(_) => {
                game.apply_action(GameAction::HardDrop);
                *fallbacks += 1;
                return;
            }
        }
    }
}

fn autopilot_view(pilot: &Autopilot, fallbacks: u32) -> AutopilotView {
    let best = pilot.current();
    AutopilotView {
        enabled: true,
        target: best.map(|b| (b.placement.rotation, b.placement.column)),
        score: best.and_then(|b| b.score),
        fallbacks,
    }
}

fn run_headless(args: &Args) -> Result<()> {
    let started = Instant::now();
    let mut game = GameState::with_size(args.seed, args.rows, args.cols);
    game.start();

    let mut pilot = Autopilot::new(args.drop_style());
    let mut fallbacks = 0;
    while !game.game_over() && game.pieces_locked() < args.pieces {
        drive_frame(&mut pilot, &mut game, &mut fallbacks);
    }

    let summary = Summary {
        seed: args.seed,
        rows: args.rows,
        cols: args.cols,
        score: game.score(),
        lines: game.lines(),
        level: game.level(),
        pieces: game.pieces_locked(),
        decisions: pilot.decisions(),
        fallbacks,
        game_over: game.game_over(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{}", json);
    Ok(())
}

struct Outcome {
    score: u32,
    lines: u32,
    level: u32,
    report: RenderReport,
}

fn run_interactive(args: &Args, term: &mut TerminalRenderer, mut log: Option<SessionLog>) -> Result<Outcome> {
    let mut game = GameState::with_size(args.seed, args.rows, args.cols);
    game.start();

    let mut pilot = (!args.manual).then(|| Autopilot::new(args.drop_style()));
    let mut fallbacks = 0;

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut report = RenderReport::default();

    let frame = Duration::from_millis(1000 / args.fps as u64);
    let mut last_tick = Instant::now();
    let mut was_game_over = false;

    loop {
        let frame_start = Instant::now();

        if let Some(log) = log.as_mut() {
            log.maybe_record(frame_start, game.score())?;
            if game.game_over() && !was_game_over {
                log.record(frame_start, game.score())?;
            }
        }
        was_game_over = game.game_over();

        if let Some(pilot) = pilot.as_mut() {
            drive_frame(pilot, &mut game, &mut fallbacks);
        }

        game.snapshot_into(&mut snap);
        let ap_view = pilot.as_ref().map(|p| autopilot_view(p, fallbacks));
        let viewport = TerminalRenderer::viewport()?;
        report.absorb(view.render_into(&snap, ap_view.as_ref(), viewport, &mut fb));
        term.draw_swap(&mut fb)?;

        // Input until the frame deadline.
        loop {
            let timeout = frame.saturating_sub(frame_start.elapsed());
            if !event::poll(timeout).context("failed to poll terminal events")? {
                break;
            }
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(Outcome {
                            score: game.score(),
                            lines: game.lines(),
                            level: game.level(),
                            report,
                        });
                    }
                    if let Some(action) = handle_key_event(key) {
                        if game.apply_action(action) && action == GameAction::Restart {
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_tick.elapsed();
        last_tick = Instant::now();
        game.tick(elapsed.as_millis() as u32);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;

    if args.headless {
        return run_headless(&args);
    }

    let log = if args.no_log {
        None
    } else {
        let log = SessionLog::create(&args.log_dir)?;
        println!("[SessionLog] writing {}", log.path().display());
        Some(log)
    };

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|_| run_interactive(&args, &mut term, log));

    // Always try to restore terminal state.
    let restored = term.exit();
    let outcome = result?;
    restored?;

    println!(
        "[Autotris] score {} lines {} level {}",
        outcome.score, outcome.lines, outcome.level
    );
    if let Some(first) = outcome.report.first_unknown {
        eprintln!(
            "[Render] {} cell(s) had no palette color and were drawn as background (first: value {} at {},{})",
            outcome.report.unknown_cells, first.value, first.x, first.y
        );
    }
    Ok(())
}
