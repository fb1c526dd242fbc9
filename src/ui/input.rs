/// Input state tracker.
///
/// Direction changes are buffered by the player until the turn is legal,
/// so everything here is edge-triggered: each frame we drain the pending
/// terminal events and record fresh presses in arrival order. Applying
/// them in that order means the LAST direction key pressed within a
/// frame wins the buffer, which is what fast players expect.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};

pub struct InputState {
    /// Press events collected this frame, oldest first.
    presses: Vec<KeyCode>,

    /// Raw key events this frame, for modifier handling.
    raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.raw_events.push(key);
                // Some terminals report Release events; only Press/Repeat count
                if key.kind != KeyEventKind::Release {
                    self.presses.push(key.code);
                }
            }
        }
    }

    /// Presses this frame, in the order the terminal delivered them.
    pub fn presses(&self) -> &[KeyCode] {
        &self.presses
    }

    /// Was this key pressed this frame?
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.presses.contains(&code)
    }

    /// Convenience: was any of these keys pressed?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
