//! JSON codec for Remote Desk data-channel messages.
//!
//! Wire format (one UTF-8 text frame per message):
//! ```text
//! {"command": "<name>", "data": { ...command-specific fields... }}
//! ```
//!
//! Decoding is deliberately forgiving in two places:
//!
//! - Messages whose `command` is not recognised decode to `Ok(None)` and are
//!   dropped by the caller, so a newer peer can add commands.
//! - Integer fields accept numbers written as strings (`"480"`) and
//!   floating-point numbers (`480.4`, rounded).  Browser peers build payloads
//!   from DOM values and do not always convert them.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::protocol::messages::{
    Command, InputEvent, MouseButton, ScreenSizeReport, ScrollDirection,
};

/// Errors that can occur while decoding a data-channel message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The text is not a JSON object with a string `command` field.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// The command is known but its `data` does not have the expected shape.
    #[error("invalid payload for `{command}`: {reason}")]
    InvalidPayload {
        command: &'static str,
        reason: String,
    },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an [`InputEvent`] into its JSON text form.
///
/// # Examples
///
/// ```rust
/// use desk_core::protocol::{decode_event, encode_event, InputEvent};
///
/// let event = InputEvent::MouseMove { x: 480, y: 270 };
/// let text = encode_event(&event);
/// assert_eq!(decode_event(&text).unwrap(), Some(event));
/// ```
pub fn encode_event(event: &InputEvent) -> String {
    let data = match event {
        InputEvent::MouseMove { x, y } | InputEvent::TouchMove { x, y } => json!({ "x": x, "y": y }),
        InputEvent::Click { button } | InputEvent::DoubleClick { button } => {
            json!({ "button": button })
        }
        InputEvent::Scroll { direction } => json!({ "direction": direction }),
        InputEvent::KeyDown { key_code } => json!({ "keyCode": key_code }),
        InputEvent::ScreenSizeReport(report) => json!(report),
        InputEvent::ScreenSizeQuery | InputEvent::Terminate => json!({}),
    };

    json!({ "command": event.command().as_str(), "data": data }).to_string()
}

/// Decodes one JSON text frame.
///
/// Returns `Ok(None)` when the command name is not recognised.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the text is not a JSON object with a
/// string `command`, and [`DecodeError::InvalidPayload`] if a known command's
/// `data` is missing fields or carries values of the wrong type.
pub fn decode_event(text: &str) -> Result<Option<InputEvent>, DecodeError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let Some(command) = Command::from_name(&envelope.command) else {
        debug!(command = %envelope.command, "ignoring unknown command");
        return Ok(None);
    };

    let event = match command {
        Command::MouseMove => {
            let p: PointPayload = payload(command, envelope.data)?;
            InputEvent::MouseMove { x: p.x, y: p.y }
        }
        Command::MouseTouchMove => {
            let p: PointPayload = payload(command, envelope.data)?;
            InputEvent::TouchMove { x: p.x, y: p.y }
        }
        Command::Click => {
            let p: ButtonPayload = payload(command, envelope.data)?;
            InputEvent::Click { button: p.button }
        }
        Command::DoubleClick => {
            let p: ButtonPayload = payload(command, envelope.data)?;
            InputEvent::DoubleClick { button: p.button }
        }
        Command::MouseScroll => {
            let p: ScrollPayload = payload(command, envelope.data)?;
            InputEvent::Scroll {
                direction: p.direction,
            }
        }
        Command::KeyDown => {
            let p: KeyPayload = payload(command, envelope.data)?;
            InputEvent::KeyDown {
                key_code: p.key_code,
            }
        }
        Command::ScreenSize => decode_screen_size(envelope.data)?,
        Command::Terminate => InputEvent::Terminate,
    };

    Ok(Some(event))
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Envelope {
    command: String,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct PointPayload {
    #[serde(deserialize_with = "lenient_int")]
    x: i32,
    #[serde(deserialize_with = "lenient_int")]
    y: i32,
}

#[derive(Deserialize)]
struct ButtonPayload {
    button: MouseButton,
}

#[derive(Deserialize)]
struct ScrollPayload {
    direction: ScrollDirection,
}

#[derive(Deserialize)]
struct KeyPayload {
    #[serde(rename = "keyCode", deserialize_with = "lenient_int")]
    key_code: u32,
}

#[derive(Deserialize)]
struct ReportPayload {
    #[serde(deserialize_with = "lenient_int")]
    width: u32,
    #[serde(deserialize_with = "lenient_int")]
    height: u32,
    #[serde(rename = "mouseX", deserialize_with = "lenient_int")]
    mouse_x: i32,
    #[serde(rename = "mouseY", deserialize_with = "lenient_int")]
    mouse_y: i32,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn payload<T: DeserializeOwned>(command: Command, data: Value) -> Result<T, DecodeError> {
    serde_json::from_value(data).map_err(|e| DecodeError::InvalidPayload {
        command: command.as_str(),
        reason: e.to_string(),
    })
}

/// `screensize` is a query when `data` is empty or absent and a report when
/// it carries all four fields.
fn decode_screen_size(data: Value) -> Result<InputEvent, DecodeError> {
    let is_empty = match &data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Ok(InputEvent::ScreenSizeQuery);
    }

    let r: ReportPayload = payload(Command::ScreenSize, data)?;
    Ok(InputEvent::ScreenSizeReport(ScreenSizeReport {
        width: r.width,
        height: r.height,
        mouse_x: r.mouse_x,
        mouse_y: r.mouse_y,
    }))
}

/// Deserializes an integer that may arrive as a JSON number, a float, or a
/// numeric string.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Int(v) => v,
        Raw::Float(v) => float_to_i64(v)
            .ok_or_else(|| de::Error::custom(format!("{v} is not a usable integer")))?,
        Raw::Text(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(v) => v,
                Err(_) => trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(float_to_i64)
                    .ok_or_else(|| de::Error::custom(format!("`{s}` is not a number")))?,
            }
        }
    };

    T::try_from(value).map_err(|_| de::Error::custom(format!("{value} is out of range")))
}

fn float_to_i64(v: f64) -> Option<i64> {
    if v.is_finite() && v.abs() < i64::MAX as f64 {
        Some(v.round() as i64)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
