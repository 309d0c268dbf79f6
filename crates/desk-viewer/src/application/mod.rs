//! Application layer for desk-viewer.
//!
//! The application layer knows *what* to do (negotiate, forward input, track
//! the remote cursor) and delegates *how* to collaborator traits implemented
//! in the infrastructure layer.
//!
//! # What does NOT belong here?
//!
//! - HTTP requests (that is `infrastructure::signaling`)
//! - The media stack behind a peer connection
//! - Reading config files

pub mod forward_input;
pub mod negotiate_session;
pub mod session_controller;

pub use forward_input::InputForwarder;
pub use negotiate_session::{
    ChannelEvent, ChannelHandle, DataChannel, EstablishedSession, NegotiationError,
    PeerConnection, PeerConnector, PeerError, SessionNegotiator, SignalingClient, SignalingError,
};
pub use session_controller::{ControllerError, SessionController};
