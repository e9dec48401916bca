use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use yar::compute::{init_game, update};
use yar::consts::TARGET_FRAME_SECS;
use yar::display::{draw_game, TerminalRenderer, Viewport};
use yar::input::InputState;

const TITLE: &str = "YAR - Yet Another Raider";

// ── Event routing ─────────────────────────────────────────────────────────────

fn route_event<W: Write>(
    ev: Event,
    input: &mut InputState,
    renderer: &mut TerminalRenderer<W>,
    now: Instant,
) {
    match ev {
        Event::Key(key) => input.on_key(&key, now),
        Event::Mouse(MouseEvent { kind, column, row, .. }) => {
            let pointer = renderer.viewport().to_field(column, row);
            match kind {
                MouseEventKind::Down(MouseButton::Left) => input.on_fire(pointer),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => input.on_pointer_moved(pointer),
                _ => {}
            }
        }
        Event::Resize(cols, rows) => renderer.resize(Viewport::new(cols, rows)),
        _ => {}
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until quit. Delta time is the measured wall time since the previous
/// frame started, so motion does not depend on the achieved frame rate.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    rx: &mpsc::Receiver<Event>,
    mut input: InputState,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut state = init_game(&mut rng);

    let frame_budget = Duration::from_secs_f32(TARGET_FRAME_SECS);
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(ev) => route_event(ev, &mut input, renderer, frame_start),
                Err(mpsc::TryRecvError::Empty) => break,
                // Input thread died → treat as the session closing.
                Err(mpsc::TryRecvError::Disconnected) => {
                    input.on_close();
                    break;
                }
            }
        }
        let frame = input.take_frame(frame_start);

        update(&mut state, &frame, dt, &mut rng);

        if frame.quit {
            log::info!("quit with score {}", state.score);
            return Ok(());
        }

        draw_game(renderer, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    // The query reads stdin, so it runs before the input thread starts.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("session start (key releases reported: {keyboard_enhanced})");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::warn!("input thread stopped: {err}");
                break;
            }
        }
    });

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut renderer = TerminalRenderer::new(&mut out, Viewport::new(cols, rows));
        game_loop(&mut renderer, &rx, InputState::with_releases(keyboard_enhanced))
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("terminal error: {err}");
    }
    result
}
