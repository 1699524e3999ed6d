//! Translates terminal key events into per-frame `FrameInput` snapshots.
//!
//! Instead of acting on each key event individually we record the frame
//! number of the last press/repeat event for every key.  Each frame we check
//! which keys are still "fresh" (within `HOLD_WINDOW` frames), so several
//! movement keys can be held at once.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events, keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::FrameInput;
use crate::entities::HeldKeys;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 50 FPS that is 100 ms, shorter than typical OS repeat delays
/// once repeating has started.
pub const HOLD_WINDOW: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSignal {
    Continue,
    Quit,
}

#[derive(Debug, Default)]
pub struct InputTracker {
    /// Held key → frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    fire_presses: u32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event observed during `frame`.
    pub fn handle_event(&mut self, event: &Event, frame: u64) -> InputSignal {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return InputSignal::Continue;
        };

        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return InputSignal::Quit;
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return InputSignal::Quit;
                    }
                    KeyCode::Char(' ') => self.fire_presses += 1,
                    _ => {}
                }
                self.key_frame.insert(normalize(code.clone()), frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(normalize(code.clone()), frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&normalize(code.clone()));
            }
        }
        InputSignal::Continue
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Movement keys held at `frame`.
    pub fn held(&self, frame: u64) -> HeldKeys {
        HeldKeys {
            up: self.is_held(KeyCode::Up, frame),
            down: self.is_held(KeyCode::Down, frame),
            left: self.is_held(KeyCode::Left, frame),
            right: self.is_held(KeyCode::Right, frame),
        }
    }

    /// Input for `frame`.  Pending fire presses are consumed.
    pub fn snapshot(&mut self, frame: u64) -> FrameInput {
        FrameInput {
            held: self.held(frame),
            fire_presses: std::mem::take(&mut self.fire_presses),
        }
    }
}

/// Fold WASD onto the arrow keys so both layouts share one entry.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => KeyCode::Up,
        KeyCode::Char('s') | KeyCode::Char('S') => KeyCode::Down,
        KeyCode::Char('a') | KeyCode::Char('A') => KeyCode::Left,
        KeyCode::Char('d') | KeyCode::Char('D') => KeyCode::Right,
        other => other,
    }
}
