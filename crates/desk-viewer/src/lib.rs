//! desk-viewer library crate.
//!
//! The viewer side of Remote Desk: it negotiates a peer session with a
//! controlled machine, forwards local pointer/keyboard/touch input over the
//! session's data channel, and tracks the remote cursor for drawing.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! UI layer (not in this crate)
//!         ↕  LocalInput / ChannelEvent / SessionState
//! [desk-viewer]
//!   ├── domain/           Pure types: ViewerConfig, SessionState, LocalInput
//!   ├── application/      SessionNegotiator, InputForwarder, SessionController
//!   └── infrastructure/
//!         ├── signaling/  HTTP offer/answer exchange (reqwest)
//!         ├── peer/       Scripted in-memory transport
//!         └── storage/    TOML config file
//!         ↕
//! desk-core (protocol codec, coordinate mapper, touch translator)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain`, `desk-core`, and its own collaborator
//!   traits; it never names a concrete transport.
//! - `infrastructure` implements those traits.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use desk_viewer::application::{SessionController, SessionNegotiator};
//! use desk_viewer::domain::{LocalMedia, ViewerConfig};
//! use desk_viewer::infrastructure::peer::mock::MockPeerConnector;
//! use desk_viewer::infrastructure::HttpSignalingClient;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ViewerConfig::default();
//! let signaling = HttpSignalingClient::new(config.signaling_url.clone())?;
//! let negotiator = SessionNegotiator::new(
//!     Arc::new(MockPeerConnector::new()),
//!     Arc::new(signaling),
//!     &config,
//! );
//! let mut controller = SessionController::new(negotiator, &config);
//! controller.start(LocalMedia::none(), config.screen).await?;
//! # Ok(())
//! # }
//! ```

/// Domain layer: pure types (no I/O).
pub mod domain;

/// Application layer: negotiation, input forwarding, session control.
pub mod application;

/// Infrastructure layer: signaling client, mock transport, config storage.
pub mod infrastructure;
