//! Infrastructure layer for desk-viewer.
//!
//! Concrete implementations of the application layer's collaborator traits
//! plus config-file persistence.

pub mod peer;
pub mod signaling;
pub mod storage;

pub use signaling::HttpSignalingClient;
