//! Viewer configuration types.
//!
//! [`ViewerConfig`] is the single source of truth for all runtime settings.
//! It is loaded from a TOML file by the storage layer, overridden by CLI
//! arguments in `main.rs`, and then handed to the application layer by value.
//!
//! Every field carries a serde default so that a partial config file (or no
//! file at all) still produces a usable configuration.

use serde::{Deserialize, Serialize};

use super::local_input::InputCapability;
use super::session::ScreenSelector;

/// A STUN/TURN server the peer connection may use for ICE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServer {
    /// One or more `stun:`/`turn:` URLs for the same server.
    pub urls: Vec<String>,
    /// TURN username, if the server requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// TURN credential, if the server requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServer {
    /// Creates an unauthenticated server entry with a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// What the local offer asks the controlled side to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferOptions {
    /// Ask for the remote screen as a video track.
    #[serde(default = "default_true")]
    pub receive_video: bool,
    /// Ask for a remote audio track.
    #[serde(default)]
    pub receive_audio: bool,
}

impl Default for OfferOptions {
    fn default() -> Self {
        Self {
            receive_video: true,
            receive_audio: false,
        }
    }
}

/// All runtime configuration for the viewer.
///
/// # Example
///
/// ```rust
/// use desk_viewer::domain::ViewerConfig;
///
/// let cfg = ViewerConfig::default();
/// assert_eq!(cfg.channel_label, "messages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// HTTP endpoint that accepts `{offer, screen}` and returns `{answer}`.
    #[serde(default = "default_signaling_url")]
    pub signaling_url: String,

    /// Which of the controlled machine's screens to request.
    #[serde(default)]
    pub screen: ScreenSelector,

    /// Label of the data channel carrying input events.
    #[serde(default = "default_channel_label")]
    pub channel_label: String,

    /// How the local device produces pointer input.
    #[serde(default)]
    pub capability: InputCapability,

    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub offer: OfferOptions,

    /// ICE servers the peer connection is created with.
    #[serde(default = "default_ice_servers")]
    pub ice_servers: Vec<IceServer>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_signaling_url() -> String {
    "http://127.0.0.1:8080/api/session".to_string()
}
fn default_ice_servers() -> Vec<IceServer> {
    vec![IceServer::new("stun:stun.l.google.com:19302")]
}
fn default_channel_label() -> String {
    "messages".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ViewerConfig {
    /// | Field           | Default                               |
    /// |-----------------|---------------------------------------|
    /// | signaling_url   | `http://127.0.0.1:8080/api/session`   |
    /// | ice_servers     | `stun:stun.l.google.com:19302`        |
    /// | screen          | `0`                                   |
    /// | channel_label   | `messages`                            |
    /// | offer           | video only                            |
    /// | capability      | `pointer-fine`                        |
    /// | log_level       | `info`                                |
    fn default() -> Self {
        Self {
            signaling_url: default_signaling_url(),
            ice_servers: default_ice_servers(),
            screen: ScreenSelector::default(),
            channel_label: default_channel_label(),
            offer: OfferOptions::default(),
            capability: InputCapability::default(),
            log_level: default_log_level(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
