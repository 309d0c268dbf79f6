//! Domain layer for desk-viewer.
//!
//! Pure types with no I/O: configuration, session lifecycle, media
//! descriptions, and local input events.
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `reqwest`, or transport types
//! - File I/O or environment variable reading

pub mod config;
pub mod local_input;
pub mod session;

pub use config::{IceServer, OfferOptions, ViewerConfig};
pub use local_input::{InputCapability, LocalInput};
pub use session::{
    LocalMedia, LocalTrack, RemoteCursorPosition, RemoteTrack, ScreenSelector, SdpType,
    SessionDescription, SessionState, TrackKind,
};
