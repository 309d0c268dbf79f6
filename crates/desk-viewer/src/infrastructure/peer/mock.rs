//! Scripted in-memory peer transport.
//!
//! # Why a mock transport?
//!
//! A real peer connection needs a media stack, ICE servers, and a controlled
//! machine on the other end.  [`MockPeerConnector`] replaces all of that with
//! in-memory bookkeeping so that negotiation and the session controller can
//! be exercised end to end:
//!
//! - Every connection it hands out shares one recorded state, readable
//!   through accessor methods (`sent_messages`, `is_closed`, ...).
//! - The "controlled side" is simulated with [`push_inbound`] and
//!   [`close_channel`].
//! - [`failing_at`] makes a chosen pipeline step fail.
//!
//! By default the data channel reports `Open` as soon as the remote answer is
//! applied, the way a real channel opens once the connection is up.
//!
//! [`push_inbound`]: MockPeerConnector::push_inbound
//! [`close_channel`]: MockPeerConnector::close_channel
//! [`failing_at`]: MockPeerConnector::failing_at

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::negotiate_session::{
    ChannelEvent, ChannelHandle, DataChannel, PeerConnection, PeerConnector, PeerError,
};
use crate::domain::{
    IceServer, LocalTrack, OfferOptions, RemoteTrack, SessionDescription, TrackKind,
};

/// The pipeline step a [`MockPeerConnector`] should fail at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Connect,
    Offer,
    Gathering,
    RemoteDescription,
    Send,
}

#[derive(Default)]
struct Recorded {
    connections: usize,
    ice_servers: Vec<IceServer>,
    added_tracks: Vec<LocalTrack>,
    channel_labels: Vec<String>,
    offer_options: Option<OfferOptions>,
    remote_description: Option<SessionDescription>,
    sent: Vec<String>,
    closed: bool,
    events: Option<mpsc::UnboundedSender<ChannelEvent>>,
}

type Shared = Arc<Mutex<Recorded>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Recorded> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A [`PeerConnector`] that records everything and talks to nobody.
#[derive(Clone)]
pub struct MockPeerConnector {
    shared: Shared,
    offer_sdp: String,
    failure: Option<MockFailure>,
    remote_tracks: Vec<RemoteTrack>,
    open_on_answer: bool,
}

impl Default for MockPeerConnector {
    fn default() -> Self {
        Self {
            shared: Shared::default(),
            offer_sdp: "v=0\r\no=- 0 0 IN IP4 127.0.0.1\r\ns=-\r\n".to_string(),
            failure: None,
            remote_tracks: vec![RemoteTrack {
                id: "screen".to_string(),
                kind: TrackKind::Video,
            }],
            open_on_answer: true,
        }
    }
}

impl MockPeerConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SDP returned once gathering completes.
    pub fn with_offer_sdp(mut self, sdp: impl Into<String>) -> Self {
        self.offer_sdp = sdp.into();
        self
    }

    /// Sets the tracks the "controlled side" delivers.
    pub fn with_remote_tracks(mut self, tracks: Vec<RemoteTrack>) -> Self {
        self.remote_tracks = tracks;
        self
    }

    pub fn failing_at(mut self, step: MockFailure) -> Self {
        self.failure = Some(step);
        self
    }

    /// When `false`, the channel stays closed until [`open_channel`] is called.
    ///
    /// [`open_channel`]: MockPeerConnector::open_channel
    pub fn open_on_answer(mut self, open: bool) -> Self {
        self.open_on_answer = open;
        self
    }

    // ── Simulating the controlled side ────────────────────────────────────────

    /// Delivers `ChannelEvent::Open`.  Returns `false` if no channel exists.
    pub fn open_channel(&self) -> bool {
        self.emit(ChannelEvent::Open)
    }

    /// Delivers one inbound text frame.  Returns `false` if no channel exists.
    pub fn push_inbound(&self, text: impl Into<String>) -> bool {
        self.emit(ChannelEvent::Message(text.into()))
    }

    /// Delivers `ChannelEvent::Closed`.  Returns `false` if no channel exists.
    pub fn close_channel(&self) -> bool {
        self.emit(ChannelEvent::Closed)
    }

    fn emit(&self, event: ChannelEvent) -> bool {
        lock(&self.shared)
            .events
            .as_ref()
            .is_some_and(|tx| tx.send(event).is_ok())
    }

    // ── Recorded state ────────────────────────────────────────────────────────

    /// Text frames sent on the data channel, oldest first.
    pub fn sent_messages(&self) -> Vec<String> {
        lock(&self.shared).sent.clone()
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }

    pub fn connection_count(&self) -> usize {
        lock(&self.shared).connections
    }

    pub fn ice_servers(&self) -> Vec<IceServer> {
        lock(&self.shared).ice_servers.clone()
    }

    pub fn added_tracks(&self) -> Vec<LocalTrack> {
        lock(&self.shared).added_tracks.clone()
    }

    pub fn channel_labels(&self) -> Vec<String> {
        lock(&self.shared).channel_labels.clone()
    }

    pub fn offer_options(&self) -> Option<OfferOptions> {
        lock(&self.shared).offer_options
    }

    pub fn remote_description(&self) -> Option<SessionDescription> {
        lock(&self.shared).remote_description.clone()
    }

    fn fails_at(&self, step: MockFailure) -> bool {
        self.failure == Some(step)
    }
}

#[async_trait]
impl PeerConnector for MockPeerConnector {
    async fn connect(&self, ice_servers: &[IceServer]) -> Result<Box<dyn PeerConnection>, PeerError> {
        if self.fails_at(MockFailure::Connect) {
            return Err(PeerError::Connect("injected failure".to_string()));
        }

        {
            let mut rec = lock(&self.shared);
            let connections = rec.connections + 1;
            // A new connection starts from a clean slate.
            *rec = Recorded {
                connections,
                ice_servers: ice_servers.to_vec(),
                ..Recorded::default()
            };
        }

        Ok(Box::new(MockPeerConnection {
            script: self.clone(),
            offered: false,
            remote_tracks: self.remote_tracks.clone(),
        }))
    }
}

struct MockPeerConnection {
    script: MockPeerConnector,
    offered: bool,
    remote_tracks: Vec<RemoteTrack>,
}

#[async_trait]
impl PeerConnection for MockPeerConnection {
    fn add_track(&mut self, track: &LocalTrack) -> Result<(), PeerError> {
        lock(&self.script.shared).added_tracks.push(track.clone());
        Ok(())
    }

    fn create_data_channel(&mut self, label: &str) -> Result<ChannelHandle, PeerError> {
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut rec = lock(&self.script.shared);
            rec.channel_labels.push(label.to_string());
            rec.events = Some(tx);
        }
        Ok(ChannelHandle {
            channel: Box::new(MockDataChannel {
                label: label.to_string(),
                shared: Arc::clone(&self.script.shared),
                fail_send: self.script.fails_at(MockFailure::Send),
            }),
            events: rx,
        })
    }

    async fn create_offer(&mut self, options: &OfferOptions) -> Result<(), PeerError> {
        if self.script.fails_at(MockFailure::Offer) {
            return Err(PeerError::Offer("injected failure".to_string()));
        }
        lock(&self.script.shared).offer_options = Some(*options);
        self.offered = true;
        Ok(())
    }

    async fn wait_for_gathering(&mut self) -> Result<SessionDescription, PeerError> {
        if self.script.fails_at(MockFailure::Gathering) {
            return Err(PeerError::IceGathering("injected failure".to_string()));
        }
        if !self.offered {
            return Err(PeerError::IceGathering("no offer created".to_string()));
        }
        Ok(SessionDescription::offer(self.script.offer_sdp.clone()))
    }

    async fn set_remote_description(
        &mut self,
        answer: SessionDescription,
    ) -> Result<(), PeerError> {
        if self.script.fails_at(MockFailure::RemoteDescription) {
            return Err(PeerError::RemoteDescription("injected failure".to_string()));
        }
        lock(&self.script.shared).remote_description = Some(answer);
        if self.script.open_on_answer {
            self.script.open_channel();
        }
        Ok(())
    }

    fn take_remote_tracks(&mut self) -> Vec<RemoteTrack> {
        std::mem::take(&mut self.remote_tracks)
    }

    async fn close(&mut self) {
        let mut rec = lock(&self.script.shared);
        if !rec.closed {
            debug!("mock peer connection closed");
        }
        rec.closed = true;
        rec.events = None;
    }
}

struct MockDataChannel {
    label: String,
    shared: Shared,
    fail_send: bool,
}

#[async_trait]
impl DataChannel for MockDataChannel {
    fn label(&self) -> &str {
        &self.label
    }

    async fn send(&self, text: String) -> Result<(), PeerError> {
        if self.fail_send {
            return Err(PeerError::Channel("injected failure".to_string()));
        }
        let mut rec = lock(&self.shared);
        if rec.closed {
            return Err(PeerError::Closed);
        }
        rec.sent.push(text);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_opens_when_answer_is_applied() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut conn = peer.connect(&[]).await.unwrap();
        let mut handle = conn.create_data_channel("messages").unwrap();

        // Act
        conn.set_remote_description(SessionDescription::answer("a"))
            .await
            .unwrap();

        // Assert
        assert_eq!(handle.events.try_recv(), Ok(ChannelEvent::Open));
    }

    #[tokio::test]
    async fn test_gathering_before_offer_fails() {
        let peer = MockPeerConnector::new();
        let mut conn = peer.connect(&[]).await.unwrap();
        assert!(conn.wait_for_gathering().await.is_err());
    }

    #[tokio::test]
    async fn test_send_after_close_returns_closed() {
        let peer = MockPeerConnector::new();
        let mut conn = peer.connect(&[]).await.unwrap();
        let handle = conn.create_data_channel("messages").unwrap();

        conn.close().await;

        assert_eq!(
            handle.channel.send("x".to_string()).await,
            Err(PeerError::Closed)
        );
        assert!(peer.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_inbound_frames_arrive_in_order() {
        let peer = MockPeerConnector::new().open_on_answer(false);
        let mut conn = peer.connect(&[]).await.unwrap();
        let mut handle = conn.create_data_channel("messages").unwrap();

        peer.push_inbound("one");
        peer.push_inbound("two");

        assert_eq!(
            handle.events.try_recv(),
            Ok(ChannelEvent::Message("one".to_string()))
        );
        assert_eq!(
            handle.events.try_recv(),
            Ok(ChannelEvent::Message("two".to_string()))
        );
    }

    #[tokio::test]
    async fn test_remote_tracks_are_taken_once() {
        let peer = MockPeerConnector::new();
        let mut conn = peer.connect(&[]).await.unwrap();
        assert_eq!(conn.take_remote_tracks().len(), 1);
        assert!(conn.take_remote_tracks().is_empty());
    }

    #[tokio::test]
    async fn test_new_connection_resets_recorded_state() {
        let peer = MockPeerConnector::new();
        let mut first = peer.connect(&[]).await.unwrap();
        first.close().await;

        let _second = peer.connect(&[]).await.unwrap();

        assert!(!peer.is_closed());
        assert_eq!(peer.connection_count(), 2);
    }
}
