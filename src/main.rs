//! Holdout entry point
//!
//! Terminal front-end for the simulation core: owns the menu, maps key
//! events to logical controls, paces the frame loop, and hands every
//! frame snapshot to the rendering layer. No gameplay decisions are made
//! here; the session in `holdout::sim` is the single source of truth.

mod display;

use std::collections::HashMap;
use std::io::{BufWriter, Write, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use holdout::Tuning;
use holdout::sim::{Control, GameEvent, GameState, tick};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate keeps refreshing the timestamp while the key is
/// physically down.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|&k| is_held(key_frame, k, frame))
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    last_outcome: Option<&GameEvent>,
) -> std::io::Result<MenuResult> {
    display::draw_menu(out, last_outcome)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) => {
                if kind == KeyEventKind::Release {
                    continue;
                }
                match code {
                    KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(MenuResult::Quit);
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            // Input thread is gone; nothing left to wait for
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    /// Quit the program entirely
    Quit,
    /// Session reached a terminal phase; show the menu again
    Finished(GameEvent),
}

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP_KEYS: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const FIRE_KEYS: &[KeyCode] = &[KeyCode::Char(' ')];

/// Drive one session until it ends or the user quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the set of "fresh" keys
/// is forwarded to the session as the five logical control flags; the
/// session itself handles fire press-edge semantics.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        _ => {}
                    }
                }
                // Keyboard-enhancement path: drop the key immediately
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // Forward held-key state as logical controls
        state.set_input(Control::Left, any_held(&key_frame, LEFT_KEYS, frame));
        state.set_input(Control::Right, any_held(&key_frame, RIGHT_KEYS, frame));
        state.set_input(Control::Up, any_held(&key_frame, UP_KEYS, frame));
        state.set_input(Control::Down, any_held(&key_frame, DOWN_KEYS, frame));
        state.set_input(Control::Fire, any_held(&key_frame, FIRE_KEYS, frame));

        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();
        tick(state, dt);

        display::render(out, &state.frame_state())?;

        if let Some(event) = state.drain_events().pop() {
            return Ok(LoopExit::Finished(event));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Holdout starting...");

    let tuning = Tuning::load_or_default(Path::new("tuning.json"));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them;
    // others fall back to the hold-window model.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, tuning);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
) -> std::io::Result<()> {
    let mut state = GameState::with_tuning(session_seed(), tuning);
    let mut last_outcome: Option<GameEvent> = None;

    loop {
        match show_menu(out, rx, last_outcome.as_ref())? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                state.start();
                match game_loop(out, &mut state, rx)? {
                    LoopExit::Quit => break,
                    LoopExit::Finished(event) => last_outcome = Some(event),
                }
            }
        }
    }
    Ok(())
}
