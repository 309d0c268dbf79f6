//! # desk-core
//!
//! Shared library for Remote Desk containing the data-channel input protocol,
//! the coordinate mapper, and the touch gesture translator.
//!
//! It has zero dependencies on OS APIs, UI frameworks, async runtimes, or
//! network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! Remote Desk lets a *viewer* watch and drive a *controlled* machine's
//! screen over a peer connection.  Video flows from the controlled machine
//! to the viewer; input intent (mouse, keyboard, touch) flows back as small
//! JSON messages on a reliable data channel.
//!
//! This crate (`desk-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – The message schema carried on the data channel.  Every
//!   message is a JSON object `{"command": ..., "data": {...}}` that is
//!   decoded into the closed [`InputEvent`] enum.
//!
//! - **`domain`** – Pure logic with no I/O.  The [`CoordinateMapper`] converts
//!   between the viewer's rendering surface and the controlled screen, and
//!   the [`TouchGestureTranslator`] turns raw multi-touch sequences into
//!   clicks and relative cursor nudges.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `desk_core::CoordinateMapper` instead of the full module path.
pub use domain::resolution::{CoordinateMapper, ResolutionMap, SurfaceOrigin};
pub use domain::touch::{TouchGestureTranslator, TouchPoint, TouchTrackState};
pub use protocol::codec::{decode_event, encode_event, DecodeError};
pub use protocol::messages::{InputEvent, MouseButton, ScreenSizeReport, ScrollDirection};
