//! All Remote Desk data-channel message types.
//!
//! Every message on the wire is a JSON object carrying a `command` name and a
//! `data` object whose shape depends on the command:
//!
//! | command          | data                                   | direction             |
//! |------------------|----------------------------------------|-----------------------|
//! | `mousemove`      | `{x, y}` remote-space pixels           | viewer → controlled   |
//! | `click`          | `{button: "left"/"center"/"right"}`    | viewer → controlled   |
//! | `dblclick`       | `{button}`                             | viewer → controlled   |
//! | `mousescroll`    | `{direction: "up"/"down"}`             | viewer → controlled   |
//! | `mousetouchmove` | `{x, y}`                               | both                  |
//! | `keydown`        | `{keyCode}`                            | viewer → controlled   |
//! | `screensize`     | `{}` query, `{width,height,mouseX,mouseY}` report | both       |
//! | `terminate`      | `{}`                                   | viewer → controlled   |
//!
//! There are no sequence numbers or acknowledgements: the data channel is
//! ordered and reliable.

use serde::{Deserialize, Serialize};

// ── Command names ─────────────────────────────────────────────────────────────

/// The closed set of command names understood by this protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MouseMove,
    Click,
    DoubleClick,
    MouseScroll,
    MouseTouchMove,
    KeyDown,
    ScreenSize,
    Terminate,
}

impl Command {
    /// Every command, in wire-table order.
    pub const ALL: [Command; 8] = [
        Command::MouseMove,
        Command::Click,
        Command::DoubleClick,
        Command::MouseScroll,
        Command::MouseTouchMove,
        Command::KeyDown,
        Command::ScreenSize,
        Command::Terminate,
    ];

    /// Returns the name used in the `command` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::MouseMove => "mousemove",
            Command::Click => "click",
            Command::DoubleClick => "dblclick",
            Command::MouseScroll => "mousescroll",
            Command::MouseTouchMove => "mousetouchmove",
            Command::KeyDown => "keydown",
            Command::ScreenSize => "screensize",
            Command::Terminate => "terminate",
        }
    }

    /// Looks up a command by its wire name.
    ///
    /// Returns `None` for names this version does not know; receivers ignore
    /// those messages so newer peers can add commands.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

// ── Field value types ─────────────────────────────────────────────────────────

/// Mouse button identifier carried by `click` and `dblclick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Center,
    Right,
}

impl MouseButton {
    /// Classifies a raw pointer-event button code (1-based, as reported by
    /// `which`): `1` left, `2` center, `3` right.
    ///
    /// Any other code falls back to [`MouseButton::Left`].
    pub fn from_code(code: u16) -> Self {
        match code {
            2 => MouseButton::Center,
            3 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Wheel direction carried by `mousescroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Derives the direction from a wheel event's vertical delta.
    ///
    /// Positive deltas scroll down; zero and negative deltas scroll up.
    pub fn from_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }
}

/// Payload of a `screensize` report sent by the controlled side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSizeReport {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// Current cursor X in remote-screen pixels.
    #[serde(rename = "mouseX")]
    pub mouse_x: i32,
    /// Current cursor Y in remote-screen pixels.
    #[serde(rename = "mouseY")]
    pub mouse_y: i32,
}

// ── Top-level event enum ──────────────────────────────────────────────────────

/// Every message that can travel over the data channel.
///
/// Created by the sender, consumed exactly once by the receiver, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Absolute cursor position in remote-screen pixels.
    MouseMove { x: i32, y: i32 },
    Click { button: MouseButton },
    DoubleClick { button: MouseButton },
    Scroll { direction: ScrollDirection },
    /// Relative touch displacement when sent by the viewer.  When sent by the
    /// controlled side it carries the resulting absolute cursor position.
    TouchMove { x: i32, y: i32 },
    /// Browser `keyCode` of the pressed key.
    KeyDown { key_code: u32 },
    /// Asks the controlled side to report its screen size and cursor.
    ScreenSizeQuery,
    ScreenSizeReport(ScreenSizeReport),
    /// Tells the controlled side the viewer is ending the session.
    Terminate,
}

impl InputEvent {
    /// Returns the wire command this event is sent as.
    pub fn command(&self) -> Command {
        match self {
            InputEvent::MouseMove { .. } => Command::MouseMove,
            InputEvent::Click { .. } => Command::Click,
            InputEvent::DoubleClick { .. } => Command::DoubleClick,
            InputEvent::Scroll { .. } => Command::MouseScroll,
            InputEvent::TouchMove { .. } => Command::MouseTouchMove,
            InputEvent::KeyDown { .. } => Command::KeyDown,
            InputEvent::ScreenSizeQuery | InputEvent::ScreenSizeReport(_) => Command::ScreenSize,
            InputEvent::Terminate => Command::Terminate,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
