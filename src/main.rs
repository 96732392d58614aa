mod display;

use std::collections::{HashMap, HashSet};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use homing_survival::clock::SystemClock;
use homing_survival::input::{InputEvent, MoveKey};
use homing_survival::{GameConfig, GameError, Session};

use display::TerminalCanvas;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: OS
/// key-repeat refreshes the key well before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Parser, Debug)]
#[command(about = "Top-down arcade survival: dodge homing enemies, shoot them down.")]
struct Args {
    /// TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy placement (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn move_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveKey::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveKey::Right),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: movement keys are tracked in `key_seen` (last press/repeat per
/// key).  Each frame the set of live keys is diffed against the previous frame
/// and turned into `KeyDown` / `KeyUp` events, so the session only ever sees
/// clean press/release pairs.  With keyboard enhancement the terminal reports
/// releases directly and the hold window is not needed.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    canvas: &mut TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame: Duration,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let clock = SystemClock::new();
    let mut key_seen: HashMap<MoveKey, Instant> = HashMap::new();
    let mut held: HashSet<MoveKey> = HashSet::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending terminal events (non-blocking) ──────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if let Some(key) = move_key(code) {
                        match kind {
                            KeyEventKind::Press | KeyEventKind::Repeat => {
                                key_seen.insert(key, frame_start);
                            }
                            KeyEventKind::Release => {
                                key_seen.remove(&key);
                            }
                        }
                        continue;
                    }
                    if kind != KeyEventKind::Press {
                        continue;
                    }
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    match code {
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            session.push(InputEvent::SpecialFire)
                        }
                        KeyCode::Enter => session.push(InputEvent::Start),
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    let pos = canvas.cell_center(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            session.push(InputEvent::Click(pos))
                        }
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            session.push(InputEvent::PointerMoved(pos))
                        }
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => {
                    canvas.resize(cols, rows);
                    session.push(InputEvent::Resize(canvas.viewport()));
                }
                _ => {}
            }
        }

        // ── Turn key freshness into press/release events ──────────────────────
        if !keyboard_enhanced {
            key_seen.retain(|_, seen| frame_start.duration_since(*seen) <= HOLD_WINDOW);
        }
        let live: HashSet<MoveKey> = key_seen.keys().copied().collect();
        for key in live.difference(&held) {
            session.push(InputEvent::KeyDown(*key));
        }
        for key in held.difference(&live) {
            session.push(InputEvent::KeyUp(*key));
        }
        held = live;

        session.step(&clock, rng);
        session.render(canvas, &clock);
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for key-release events where the terminal supports them.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        warn!("terminal reports no key releases; falling back to hold expiry");
    }

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

    let result = run(&mut out, &rx, config, &mut rng, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut StdRng,
    keyboard_enhanced: bool,
) -> Result<(), GameError> {
    let (cols, rows) = terminal::size()?;
    let cell = Vec2::new(config.display.cell_width, config.display.cell_height);
    let mut canvas = TerminalCanvas::new(cols, rows, cell);
    let mut session = Session::new(config, canvas.viewport());
    let frame = Duration::from_millis(config.display.frame_ms);

    info!("terminal {cols}x{rows}, viewport {:?}", canvas.viewport());
    game_loop(out, &mut session, &mut canvas, rx, rng, frame, keyboard_enhanced)?;
    info!("quit with score {}", session.state().score);
    Ok(())
}
