//! Peer transport implementations.
//!
//! The real-time media stack is supplied by the embedder through the
//! [`PeerConnector`](crate::application::negotiate_session::PeerConnector)
//! trait.  This crate ships only the scripted in-memory transport.

pub mod mock;
