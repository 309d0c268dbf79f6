//! Local input events as the viewer's UI layer reports them.
//!
//! The UI layer (window, canvas, touch surface) is not part of this crate.  It
//! translates its native events into [`LocalInput`] values and hands them to
//! the session controller, which decides what, if anything, goes on the wire.

use desk_core::{SurfaceOrigin, TouchPoint};
use serde::{Deserialize, Serialize};

/// How the local device produces pointer input.
///
/// Supplied by the embedder instead of being guessed from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputCapability {
    /// Mouse or trackpad with hover: absolute `mousemove` is sent.
    #[default]
    PointerFine,
    /// Touch screen: only relative `mousetouchmove` is sent, never `mousemove`.
    TouchPrimary,
}

/// One input event from the local UI.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalInput {
    /// Pointer moved to `(client_x, client_y)` in window coordinates.
    PointerMove {
        client_x: f64,
        client_y: f64,
        origin: SurfaceOrigin,
    },
    /// Pointer button pressed; `button_code` is 1-based (1 left, 2 middle, 3 right).
    PointerDown { button_code: u16 },
    DoubleClick { button_code: u16 },
    /// Wheel turned; only the sign of the vertical delta matters.
    Wheel { delta_y: f64 },
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
    TouchCancel,
    KeyDown { key_code: u32 },
    /// The on-screen "left click" helper button on touch devices.
    LeftClickButton,
    /// The on-screen "right click" helper button on touch devices.
    RightClickButton,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_uses_kebab_case_names() {
        let json = serde_json::to_string(&InputCapability::TouchPrimary).unwrap();
        assert_eq!(json, r#""touch-primary""#);
        let parsed: InputCapability = serde_json::from_str(r#""pointer-fine""#).unwrap();
        assert_eq!(parsed, InputCapability::PointerFine);
    }
}
