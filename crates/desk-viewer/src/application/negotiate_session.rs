//! SessionNegotiator: turns local media plus a screen selector into an
//! established peer session.
//!
//! The negotiation is a straight pipeline of awaited steps:
//!
//! ```text
//! connect(ice servers) ─▶ add local tracks ─▶ open data channel
//!        ─▶ create offer ─▶ wait for ICE gathering to complete
//!        ─▶ signaling round-trip (offer, screen) → answer
//!        ─▶ apply remote answer ─▶ EstablishedSession
//! ```
//!
//! The offer is only sent once gathering has finished, so it carries the
//! complete candidate set (there is no trickle ICE).  Any failing step aborts
//! the whole pipeline; a connection object that was already created is closed
//! before the error is returned.  Retrying is the caller's decision.
//!
//! # Architecture
//!
//! The transport (peer connection, ICE, media, data channel) and the
//! signaling endpoint are collaborators behind the [`PeerConnector`] and
//! [`SignalingClient`] traits.  Infrastructure provides the implementations;
//! tests inject scripted ones.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    IceServer, LocalMedia, LocalTrack, OfferOptions, RemoteTrack, ScreenSelector,
    SessionDescription, ViewerConfig,
};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failure reported by the transport collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeerError {
    #[error("failed to create peer connection: {0}")]
    Connect(String),
    #[error("failed to attach local track: {0}")]
    Track(String),
    #[error("failed to create offer: {0}")]
    Offer(String),
    #[error("ICE gathering failed: {0}")]
    IceGathering(String),
    #[error("remote description rejected: {0}")]
    RemoteDescription(String),
    #[error("data channel error: {0}")]
    Channel(String),
    #[error("connection is closed")]
    Closed,
}

/// Failure reported by the signaling collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalingError {
    /// The request never produced a response (DNS, connect, TLS, I/O).
    #[error("signaling request failed: {0}")]
    Request(String),
    /// The endpoint answered with a non-2xx status.
    #[error("signaling endpoint returned HTTP {status}")]
    Status { status: u16 },
    /// The response body was not `{"answer": "<sdp>"}`.
    #[error("signaling response could not be parsed: {0}")]
    InvalidResponse(String),
}

/// The single error surfaced for a failed negotiation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("peer connection failed: {0}")]
    Peer(#[from] PeerError),
    #[error("signaling failed: {0}")]
    Signaling(#[from] SignalingError),
    #[error("signaling returned an unusable answer: {0}")]
    MalformedAnswer(String),
}

// ── Collaborator traits ───────────────────────────────────────────────────────

/// Something that happened on the data channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel is open and `send` will be delivered.
    Open,
    /// One inbound text frame.
    Message(String),
    /// The channel closed; no further events follow.
    Closed,
}

/// Ordered, reliable text channel carrying the input-event protocol.
#[async_trait]
pub trait DataChannel: Send + Sync {
    /// The label the channel was created with.
    fn label(&self) -> &str;

    /// Queues one text frame for delivery.
    async fn send(&self, text: String) -> Result<(), PeerError>;
}

/// A data channel plus the stream of events it produces.
pub struct ChannelHandle {
    pub channel: Box<dyn DataChannel>,
    pub events: mpsc::UnboundedReceiver<ChannelEvent>,
}

/// One peer connection, as exposed by the underlying real-time library.
#[async_trait]
pub trait PeerConnection: Send {
    /// Attaches a local media track before the offer is created.
    fn add_track(&mut self, track: &LocalTrack) -> Result<(), PeerError>;

    /// Creates the data channel.  Must be called before the offer so the
    /// channel is part of the negotiated session.
    fn create_data_channel(&mut self, label: &str) -> Result<ChannelHandle, PeerError>;

    /// Creates the local offer and starts ICE gathering.
    async fn create_offer(&mut self, options: &OfferOptions) -> Result<(), PeerError>;

    /// Resolves once ICE gathering has signalled completion, with the final
    /// local description including every candidate.
    async fn wait_for_gathering(&mut self) -> Result<SessionDescription, PeerError>;

    /// Applies the remote answer.
    async fn set_remote_description(&mut self, answer: SessionDescription)
        -> Result<(), PeerError>;

    /// Drains the inbound media tracks delivered so far.
    fn take_remote_tracks(&mut self) -> Vec<RemoteTrack>;

    /// Closes the connection and its channels.  Safe to call more than once.
    async fn close(&mut self);
}

/// Factory for peer connections.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(&self, ice_servers: &[IceServer]) -> Result<Box<dyn PeerConnection>, PeerError>;
}

/// Out-of-band exchange of the offer for an answer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignalingClient: Send + Sync {
    /// Submits the finalized offer SDP with the requested screen and returns
    /// the answer SDP.
    async fn exchange(&self, offer_sdp: String, screen: ScreenSelector)
        -> Result<String, SignalingError>;
}

// ── Use case ──────────────────────────────────────────────────────────────────

/// A negotiated session, ready for the data channel to open.
pub struct EstablishedSession {
    /// Identifies the session in log output.
    pub id: Uuid,
    pub connection: Box<dyn PeerConnection>,
    pub channel: Box<dyn DataChannel>,
    pub events: mpsc::UnboundedReceiver<ChannelEvent>,
}

impl std::fmt::Debug for EstablishedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstablishedSession")
            .field("id", &self.id)
            .field("channel", &self.channel.label())
            .finish_non_exhaustive()
    }
}

/// Drives the offer → signaling → answer pipeline.
///
/// Holds no session state of its own; every call to [`negotiate`] is an
/// independent attempt.
///
/// [`negotiate`]: SessionNegotiator::negotiate
pub struct SessionNegotiator {
    connector: Arc<dyn PeerConnector>,
    signaling: Arc<dyn SignalingClient>,
    ice_servers: Vec<IceServer>,
    channel_label: String,
    offer_options: OfferOptions,
}

impl SessionNegotiator {
    /// Creates a negotiator using the ICE servers, channel label, and offer
    /// options from `config`.
    pub fn new(
        connector: Arc<dyn PeerConnector>,
        signaling: Arc<dyn SignalingClient>,
        config: &ViewerConfig,
    ) -> Self {
        Self {
            connector,
            signaling,
            ice_servers: config.ice_servers.clone(),
            channel_label: config.channel_label.clone(),
            offer_options: config.offer,
        }
    }

    /// Negotiates a new session.
    ///
    /// No timeout is applied to any step; wrap the future in
    /// `tokio::time::timeout` if bounded latency is needed.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError`] if any step fails.  The partially set up
    /// connection, if any, has been closed by then.
    pub async fn negotiate(
        &self,
        media: LocalMedia,
        screen: ScreenSelector,
    ) -> Result<EstablishedSession, NegotiationError> {
        let id = Uuid::new_v4();
        info!(session = %id, %screen, "negotiating session");

        let mut connection = self.connector.connect(&self.ice_servers).await?;

        match self.run_pipeline(connection.as_mut(), &media, screen).await {
            Ok(handle) => {
                info!(session = %id, "session established");
                Ok(EstablishedSession {
                    id,
                    connection,
                    channel: handle.channel,
                    events: handle.events,
                })
            }
            Err(e) => {
                warn!(session = %id, "negotiation failed: {e}");
                connection.close().await;
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        connection: &mut dyn PeerConnection,
        media: &LocalMedia,
        screen: ScreenSelector,
    ) -> Result<ChannelHandle, NegotiationError> {
        for track in &media.tracks {
            connection.add_track(track)?;
        }
        let handle = connection.create_data_channel(&self.channel_label)?;

        connection.create_offer(&self.offer_options).await?;
        let offer = connection.wait_for_gathering().await?;
        debug!(offer_len = offer.sdp.len(), "ICE gathering complete");

        let answer = self.signaling.exchange(offer.sdp, screen).await?;
        if answer.trim().is_empty() {
            return Err(NegotiationError::MalformedAnswer(
                "answer SDP is empty".to_string(),
            ));
        }
        debug!(answer_len = answer.len(), "received answer");

        connection
            .set_remote_description(SessionDescription::answer(answer))
            .await?;
        Ok(handle)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
