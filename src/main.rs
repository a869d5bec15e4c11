mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ray_invaders::compute::{new_game, step, TickInput};
use ray_invaders::snapshot;

/// Terminal Space Invaders.
#[derive(Parser, Debug)]
#[command(name = "ray_invaders", version, about)]
struct Args {
    /// Target frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Seed for enemy fire cadence and barrier placement (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file; `RUST_LOG` picks the level (default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key detection ────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// window.  Covers terminals that never send release events: OS key-repeat
/// runs at ≥ 15 Hz, so a held key refreshes well before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Longest frame the simulation will accept; a stalled terminal must not
/// teleport the formation.
const MAX_DT: f32 = 0.1;

fn is_held(key_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|key| {
        key_seen
            .get(key)
            .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn read_input(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> TickInput {
    TickInput {
        left: is_held(
            key_seen,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            now,
        ),
        right: is_held(
            key_seen,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            now,
        ),
        fire: is_held(key_seen, &[KeyCode::Char(' ')], now),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  One simulation step per rendered frame, with
/// `dt` sampled once at the top of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
) -> std::io::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = new_game(&mut rng);
    let frame_budget = Duration::from_secs(1) / args.fps;

    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start
            .duration_since(last_frame)
            .as_secs_f32()
            .min(MAX_DT);
        last_frame = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_seen.insert(code.clone(), frame_start);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_seen.insert(code.clone(), frame_start);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let input = read_input(&key_seen, frame_start);
        step(&mut state, &input, dt, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &snapshot::build(&state), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Everything between entering and leaving raw mode; any failure here still
/// lets `main` restore the terminal.
fn run<W: Write>(
    out: &mut W,
    args: &Args,
    keyboard_enhanced: &mut bool,
) -> std::io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    *keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    game_loop(out, &rx, args)
}

/// stderr shares the terminal with the game, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    info!("starting at {} fps, seed {:?}", args.fps, args.seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    let mut keyboard_enhanced = false;
    let result = run(&mut out, &args, &mut keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result.context("terminal I/O failed")
}
