//! Persistent storage for viewer settings.

pub mod config;
