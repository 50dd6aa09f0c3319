mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use musou_shooter::compute::{init_state, tick};
use musou_shooter::constants::{LOSS_FREEZE_MS, TICKS_PER_SECOND};
use musou_shooter::entities::GameStatus;
use musou_shooter::input::{Action, HeldKeys, InputFrame};

const FRAME: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 7 frames (≈140 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 7;

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const BOOST_KEYS: [KeyCode; 2] = [KeyCode::Char('z'), KeyCode::Char('Z')];

#[derive(Parser, Debug)]
#[command(name = "musou_shooter")]
#[command(about = "Terminal arcade shooter: dodge the bombs, shoot the aliens")]
struct Cli {
    /// Seed for enemy and bomb randomness; the same seed and inputs replay a session
    #[arg(long)]
    seed: Option<u64>,
    /// Write tracing output to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// One-shot trigger bound to a key press, if any.
fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') => Some(Action::FireBeam),
        KeyCode::Tab => Some(Action::Gravity),
        KeyCode::Enter => Some(Action::NeoGravity),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::Hyper),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Shield),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one session until the player quits or loses.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, so movement keys count as held while
/// they keep generating events (or until a release event on terminals that
/// report them).  Trigger keys act once per `Press`, never on `Repeat`.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = init_state();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shift_frame: Option<u64> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut presses = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        shift_frame = Some(frame);
                    }
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!(tick = state.tick, score = state.score.value(), "quit");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            info!(tick = state.tick, score = state.score.value(), "quit");
                            return Ok(());
                        }
                        _ => {}
                    }
                    if let Some(action) = action_for(&code) {
                        presses.push(action);
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        shift_frame = Some(frame);
                    }
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Sample held keys ──────────────────────────────────────────────────
        let shifted = shift_frame
            .map(|last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false);
        let held = HeldKeys {
            up: any_held(&key_frame, &UP_KEYS, frame),
            down: any_held(&key_frame, &DOWN_KEYS, frame),
            left: any_held(&key_frame, &LEFT_KEYS, frame),
            right: any_held(&key_frame, &RIGHT_KEYS, frame),
            boost: shifted || any_held(&key_frame, &BOOST_KEYS, frame),
        };

        state = tick(&state, &InputFrame { held, presses }, &mut rng);
        display::render(out, &state).context("failed to draw frame")?;

        if state.status == GameStatus::Ended {
            thread::sleep(Duration::from_millis(LOSS_FREEZE_MS));
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "session start");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, seed);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("session aborted: {err:#}");
    }
    result
}
