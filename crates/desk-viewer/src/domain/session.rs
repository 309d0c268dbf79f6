//! Session lifecycle and media description types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of the single viewer session.
///
/// ```text
///  Idle ──start──▶ Negotiating ──ok──▶ Established ──terminate/stop──▶ Terminating ──▶ Idle
///                       │
///                       └──error──▶ Idle
/// ```
///
/// Only one session may be `Negotiating` or `Established` at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Negotiating,
    Established,
    Terminating,
}

impl SessionState {
    /// Returns `true` for the states in which a session exists.
    pub fn is_active(self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Negotiating => "negotiating",
            SessionState::Established => "established",
            SessionState::Terminating => "terminating",
        };
        f.write_str(name)
    }
}

/// Last known cursor position on the controlled machine, in remote-screen
/// pixels.
///
/// Only inbound `screensize` and `mousetouchmove` messages update it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoteCursorPosition {
    pub x: i32,
    pub y: i32,
}

/// Index of the controlled machine's screen to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenSelector(pub u32);

impl fmt::Display for ScreenSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Media ─────────────────────────────────────────────────────────────────────

/// Kind of a media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// A track the viewer attaches to the connection before the offer is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTrack {
    pub id: String,
    pub kind: TrackKind,
}

/// The local media the viewer sends, possibly none.
///
/// Viewing a remote screen normally needs no local media; some platforms only
/// negotiate video after a local capture track has been added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalMedia {
    pub tracks: Vec<LocalTrack>,
}

impl LocalMedia {
    /// No local tracks.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, track: LocalTrack) -> Self {
        self.tracks.push(track);
        self
    }
}

/// A track delivered by the controlled side (normally the screen video).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub id: String,
    pub kind: TrackKind,
}

/// Whether a session description is the local offer or the remote answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpType {
    Offer,
    Answer,
}

/// A session description produced or consumed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub kind: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
