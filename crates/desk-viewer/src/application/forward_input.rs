//! InputForwarder: turns local UI input into outbound protocol events.
//!
//! | Local input            | Outbound event                                  |
//! |------------------------|-------------------------------------------------|
//! | pointer move           | `mousemove` in remote pixels (pointer-fine only)|
//! | button press           | `click` with the classified button              |
//! | double click           | `dblclick`                                      |
//! | wheel                  | `mousescroll` from the delta's sign             |
//! | touch start/move       | see [`TouchGestureTranslator`]                  |
//! | touch end/cancel       | nothing                                         |
//! | key down               | `keydown` with the browser key code             |
//! | left/right helper      | `click` left / right                            |

use desk_core::{
    CoordinateMapper, InputEvent, MouseButton, ScrollDirection, TouchGestureTranslator,
};
use tracing::debug;

use crate::domain::{InputCapability, LocalInput};

/// Stateful translator from [`LocalInput`] to [`InputEvent`].
///
/// The only state is the touch anchor; coordinate mapping reads the
/// controller's [`CoordinateMapper`] on every call.
#[derive(Debug)]
pub struct InputForwarder {
    capability: InputCapability,
    touch: TouchGestureTranslator,
}

impl InputForwarder {
    pub fn new(capability: InputCapability) -> Self {
        Self {
            capability,
            touch: TouchGestureTranslator::new(),
        }
    }

    pub fn capability(&self) -> InputCapability {
        self.capability
    }

    /// Translates one local input.
    ///
    /// Returns `None` when the input produces no message: touch-end/cancel,
    /// single-finger touch-start, pointer moves on touch-primary devices, and
    /// pointer moves while the resolution map is still unknown.
    pub fn translate(&mut self, input: LocalInput, mapper: &CoordinateMapper) -> Option<InputEvent> {
        match input {
            LocalInput::PointerMove {
                client_x,
                client_y,
                origin,
            } => {
                if self.capability == InputCapability::TouchPrimary {
                    return None;
                }
                let Some((x, y)) = mapper.local_to_remote(client_x, client_y, origin) else {
                    debug!("pointer move dropped: resolution not known yet");
                    return None;
                };
                Some(InputEvent::MouseMove { x, y })
            }
            LocalInput::PointerDown { button_code } => Some(InputEvent::Click {
                button: MouseButton::from_code(button_code),
            }),
            LocalInput::DoubleClick { button_code } => Some(InputEvent::DoubleClick {
                button: MouseButton::from_code(button_code),
            }),
            LocalInput::Wheel { delta_y } => Some(InputEvent::Scroll {
                direction: ScrollDirection::from_delta(delta_y),
            }),
            LocalInput::TouchStart { touches } => self.touch.touch_start(&touches),
            LocalInput::TouchMove { touches } => self.touch.touch_move(&touches),
            LocalInput::TouchEnd => {
                self.touch.touch_end();
                None
            }
            LocalInput::TouchCancel => {
                self.touch.touch_cancel();
                None
            }
            LocalInput::KeyDown { key_code } => Some(InputEvent::KeyDown { key_code }),
            LocalInput::LeftClickButton => Some(InputEvent::Click {
                button: MouseButton::Left,
            }),
            LocalInput::RightClickButton => Some(InputEvent::Click {
                button: MouseButton::Right,
            }),
        }
    }

    /// Drops any in-progress touch sequence (e.g. when the session ends).
    pub fn reset(&mut self) {
        self.touch.touch_cancel();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
