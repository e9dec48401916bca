/// Input model for the terminal front end.
///
/// Terminals deliver key events, not key state. `KeyTracker` records when
/// each key was last seen (press or repeat) and drops it on release. On
/// terminals that never report releases a key expires after `HOLD_WINDOW`
/// without a repeat, which is shorter than any OS repeat interval. Once a
/// terminal is known to report releases, keys stay held until released.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// W/S/A/D and the arrow keys are aliases for the same four directions.
pub fn direction_for(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the simulation reads for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub held: HeldDirections,
    /// Edge-triggered: fire was pressed this frame.
    pub fire: bool,
    /// Edge-triggered: restart was pressed this frame.
    pub restart: bool,
    /// Edge-triggered: quit was pressed this frame, or the session was closed.
    pub quit: bool,
    /// Aim point in field coordinates.
    pub pointer: Vec2,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            held: HeldDirections::default(),
            fire: false,
            restart: false,
            quit: false,
            pointer: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
        }
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<Direction, Instant>,
    releases_reported: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker for a terminal already known to report key releases.
    pub fn with_releases(releases_reported: bool) -> Self {
        Self {
            releases_reported,
            ..Self::default()
        }
    }

    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    /// Any release event proves the terminal reports them.
    pub fn note_release(&mut self) {
        self.releases_reported = true;
    }

    pub fn press(&mut self, direction: Direction, now: Instant) {
        self.last_seen.insert(direction, now);
    }

    pub fn release(&mut self, direction: Direction) {
        self.last_seen.remove(&direction);
    }

    pub fn is_held(&self, direction: Direction, now: Instant) -> bool {
        self.last_seen
            .get(&direction)
            .map(|&last| {
                self.releases_reported || now.saturating_duration_since(last) <= HOLD_WINDOW
            })
            .unwrap_or(false)
    }

    pub fn held(&self, now: Instant) -> HeldDirections {
        HeldDirections {
            up: self.is_held(Direction::Up, now),
            down: self.is_held(Direction::Down, now),
            left: self.is_held(Direction::Left, now),
            right: self.is_held(Direction::Right, now),
        }
    }
}

// ── Per-frame collection ──────────────────────────────────────────────────────

/// Accumulates one frame's worth of events into a `FrameInput`.
#[derive(Debug)]
pub struct InputState {
    keys: KeyTracker,
    pointer: Vec2,
    fire: bool,
    restart: bool,
    quit: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::with_releases(false)
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `releases_reported` is what the terminal advertised at startup. It is
    /// also latched on the first release event seen.
    pub fn with_releases(releases_reported: bool) -> Self {
        Self {
            keys: KeyTracker::with_releases(releases_reported),
            pointer: FrameInput::default().pointer,
            fire: false,
            restart: false,
            quit: false,
        }
    }

    pub fn on_key(&mut self, event: &KeyEvent, now: Instant) {
        match event.kind {
            KeyEventKind::Press => {
                if let Some(direction) = direction_for(&event.code) {
                    self.keys.press(direction, now);
                }
                match event.code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
                    KeyCode::Char(' ') => self.fire = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                if let Some(direction) = direction_for(&event.code) {
                    self.keys.press(direction, now);
                }
            }
            KeyEventKind::Release => {
                self.keys.note_release();
                if let Some(direction) = direction_for(&event.code) {
                    self.keys.release(direction);
                }
            }
        }
    }

    pub fn on_pointer_moved(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn on_fire(&mut self, pointer: Vec2) {
        self.pointer = pointer;
        self.fire = true;
    }

    pub fn on_close(&mut self) {
        self.quit = true;
    }

    /// Snapshot for this frame and clear the edge-triggered flags.
    pub fn take_frame(&mut self, now: Instant) -> FrameInput {
        let frame = FrameInput {
            held: self.keys.held(now),
            fire: self.fire,
            restart: self.restart,
            quit: self.quit,
            pointer: self.pointer,
        };
        self.fire = false;
        self.restart = false;
        self.quit = false;
        frame
    }
}
