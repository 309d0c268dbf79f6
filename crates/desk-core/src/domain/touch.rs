//! Touch gesture translation.
//!
//! Touch-primary devices have no hover and no mouse buttons, so raw touch
//! sequences are turned into discrete intents instead of absolute positions:
//!
//! | Gesture                  | Emitted event                      |
//! |--------------------------|------------------------------------|
//! | 1 finger down            | nothing (reserved for dragging)    |
//! | 2 fingers down           | `Click { button: Right }`          |
//! | 3+ fingers down          | nothing (unsupported)              |
//! | first finger moves       | `TouchMove { x: dx, y: dy }`       |
//! | lift / cancel            | nothing; the anchor is discarded   |
//!
//! Moves are *relative*: the controlled side nudges its cursor by the delta
//! rather than jumping to an absolute point, which is what makes a small
//! phone screen usable as a trackpad for a large desktop.

use tracing::debug;

use crate::protocol::messages::{InputEvent, MouseButton};

/// A single contact point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Last recorded position of the first touch in the active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchTrackState {
    pub last_x: f64,
    pub last_y: f64,
}

/// State machine over one touch sequence at a time.
#[derive(Debug, Default)]
pub struct TouchGestureTranslator {
    anchor: Option<TouchTrackState>,
}

impl TouchGestureTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current anchor, or `None` outside a touch sequence.
    pub fn anchor(&self) -> Option<TouchTrackState> {
        self.anchor
    }

    /// Starts a sequence.
    ///
    /// `touches` is every contact currently on the surface; the first one
    /// becomes the anchor.  The intent is classified purely from the number of
    /// simultaneous contacts.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> Option<InputEvent> {
        let first = touches.first()?;
        self.anchor = Some(TouchTrackState {
            last_x: first.x,
            last_y: first.y,
        });

        match touches.len() {
            2 => Some(InputEvent::Click {
                button: MouseButton::Right,
            }),
            1 => None,
            n => {
                debug!("unsupported {n}-finger gesture ignored");
                None
            }
        }
    }

    /// Advances the sequence and returns the first touch's displacement since
    /// the previous event, rounded to whole pixels.
    ///
    /// A move with no active anchor (e.g. after the sequence ended) only seeds
    /// the anchor.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<InputEvent> {
        let current = touches.first()?;
        let next = TouchTrackState {
            last_x: current.x,
            last_y: current.y,
        };

        let Some(previous) = self.anchor.replace(next) else {
            debug!("touch move without an active sequence; anchoring");
            return None;
        };

        Some(InputEvent::TouchMove {
            x: (current.x - previous.last_x).round() as i32,
            y: (current.y - previous.last_y).round() as i32,
        })
    }

    /// Ends the sequence.  No protocol message is produced.
    pub fn touch_end(&mut self) {
        self.anchor = None;
    }

    /// Aborts the sequence.  No protocol message is produced.
    pub fn touch_cancel(&mut self) {
        self.anchor = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
