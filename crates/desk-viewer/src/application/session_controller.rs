//! SessionController: the top-level orchestrator for one viewer.
//!
//! The controller owns everything that lives for the duration of a session:
//!
//! - the single [`SessionState`] value (no module-level singletons),
//! - the live connection and data channel,
//! - the [`CoordinateMapper`] and the [`RemoteCursorPosition`] it projects,
//! - the [`InputForwarder`] and its touch state.
//!
//! The excluded UI layer drives it with four kinds of calls:
//!
//! ```text
//! start / terminate / stop      ── lifecycle
//! handle_input(LocalInput)      ── user input → data channel
//! handle_channel_event(event)   ── data channel → cursor / resolution
//! resize_surface(w, h)          ── layout changes
//! ```
//!
//! All methods take `&mut self`; the controller is meant to be driven from a
//! single task, so no locking is involved.

use desk_core::{decode_event, encode_event, CoordinateMapper, InputEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::forward_input::InputForwarder;
use super::negotiate_session::{
    ChannelEvent, DataChannel, EstablishedSession, NegotiationError, PeerConnection, PeerError,
    SessionNegotiator,
};
use crate::domain::{
    LocalInput, LocalMedia, RemoteCursorPosition, RemoteTrack, ScreenSelector, SessionState,
    ViewerConfig,
};

/// Error type for controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// `start` was called while a session already exists.
    #[error("a session is already {0}")]
    SessionActive(SessionState),

    /// The operation needs an established session.
    #[error("no established session")]
    NotEstablished,

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    /// Sending on the data channel failed.
    #[error("data channel send failed: {0}")]
    Channel(#[from] PeerError),
}

struct ActiveSession {
    id: Uuid,
    connection: Box<dyn PeerConnection>,
    channel: Box<dyn DataChannel>,
    events: Option<mpsc::UnboundedReceiver<ChannelEvent>>,
    channel_open: bool,
}

impl From<EstablishedSession> for ActiveSession {
    fn from(s: EstablishedSession) -> Self {
        Self {
            id: s.id,
            connection: s.connection,
            channel: s.channel,
            events: Some(s.events),
            channel_open: false,
        }
    }
}

/// Owns the viewer's single session.
pub struct SessionController {
    negotiator: SessionNegotiator,
    state: SessionState,
    session: Option<ActiveSession>,
    mapper: CoordinateMapper,
    cursor: RemoteCursorPosition,
    forwarder: InputForwarder,
    remote_tracks: Vec<RemoteTrack>,
    watchers: Vec<mpsc::UnboundedSender<SessionState>>,
}

impl SessionController {
    /// Creates an idle controller.
    pub fn new(negotiator: SessionNegotiator, config: &ViewerConfig) -> Self {
        Self {
            negotiator,
            state: SessionState::Idle,
            session: None,
            mapper: CoordinateMapper::default(),
            cursor: RemoteCursorPosition::default(),
            forwarder: InputForwarder::new(config.capability),
            remote_tracks: Vec::new(),
            watchers: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Returns `true` once the data channel has reported `Open`.
    pub fn is_channel_open(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.channel_open)
    }

    /// Last known cursor position on the controlled machine.
    pub fn remote_cursor(&self) -> RemoteCursorPosition {
        self.cursor
    }

    /// The remote cursor projected onto the local surface, for drawing a
    /// pointer overlay.
    ///
    /// Returns `None` until both the remote and local sizes are known.
    pub fn remote_cursor_local(&self) -> Option<(i32, i32)> {
        self.mapper.remote_to_local(self.cursor.x, self.cursor.y)
    }

    /// Returns a receiver that gets every subsequent state transition.
    pub fn watch_states(&mut self) -> mpsc::UnboundedReceiver<SessionState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.push(tx);
        rx
    }

    /// Drains the inbound media tracks delivered so far.
    pub fn take_remote_tracks(&mut self) -> Vec<RemoteTrack> {
        if let Some(session) = self.session.as_mut() {
            self.remote_tracks
                .extend(session.connection.take_remote_tracks());
        }
        std::mem::take(&mut self.remote_tracks)
    }

    /// Hands the data channel's event stream to the caller.
    ///
    /// Use this to drive the controller from a `select!` loop, passing each
    /// event back through [`handle_channel_event`].  Until it is taken,
    /// [`process_pending_events`] reads the stream directly.
    ///
    /// [`handle_channel_event`]: SessionController::handle_channel_event
    /// [`process_pending_events`]: SessionController::process_pending_events
    pub fn take_channel_events(&mut self) -> Option<mpsc::UnboundedReceiver<ChannelEvent>> {
        self.session.as_mut().and_then(|s| s.events.take())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Negotiates a new session for `screen`.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::SessionActive`] if a session already exists; the
    ///   existing session is left untouched.
    /// - [`ControllerError::Negotiation`] if negotiation fails; the state is
    ///   back to `Idle` and a new `start` may be attempted.
    pub async fn start(
        &mut self,
        media: LocalMedia,
        screen: ScreenSelector,
    ) -> Result<(), ControllerError> {
        if self.state.is_active() {
            warn!(state = %self.state, "start rejected: session already active");
            return Err(ControllerError::SessionActive(self.state));
        }

        self.set_state(SessionState::Negotiating);
        match self.negotiator.negotiate(media, screen).await {
            Ok(established) => {
                let mut session = ActiveSession::from(established);
                self.remote_tracks = session.connection.take_remote_tracks();
                self.session = Some(session);
                self.set_state(SessionState::Established);
                Ok(())
            }
            Err(e) => {
                self.set_state(SessionState::Idle);
                Err(e.into())
            }
        }
    }

    /// Ends the session at the user's request: sends `terminate` to the
    /// controlled side, then closes the connection.
    ///
    /// A failed `terminate` send is logged; the connection is closed anyway.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotEstablished`] if there is no
    /// established session.
    pub async fn terminate(&mut self) -> Result<(), ControllerError> {
        if self.state != SessionState::Established {
            return Err(ControllerError::NotEstablished);
        }
        let Some(session) = self.session.take() else {
            return Err(ControllerError::NotEstablished);
        };

        self.set_state(SessionState::Terminating);
        if session.channel_open {
            if let Err(e) = session
                .channel
                .send(encode_event(&InputEvent::Terminate))
                .await
            {
                warn!(session = %session.id, "failed to send terminate: {e}");
            }
        } else {
            debug!(session = %session.id, "channel never opened; skipping terminate message");
        }
        self.teardown(session).await;
        Ok(())
    }

    /// Closes the connection without notifying the controlled side, as when
    /// the viewer is shutting down.  Does nothing when idle.
    pub async fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.set_state(SessionState::Terminating);
        self.teardown(session).await;
    }

    async fn teardown(&mut self, mut session: ActiveSession) {
        session.connection.close().await;
        info!(session = %session.id, "session closed");

        // Forget everything learned from this peer; the next session starts
        // with a fresh screensize query.
        let (local_w, local_h) = (
            self.mapper.resolution().local_width,
            self.mapper.resolution().local_height,
        );
        self.mapper = CoordinateMapper::default();
        self.mapper.set_local_size(local_w, local_h);
        self.cursor = RemoteCursorPosition::default();
        self.forwarder.reset();
        self.remote_tracks.clear();

        self.set_state(SessionState::Idle);
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    /// Records the rendered size of the local surface.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        let res = self.mapper.resolution();
        if res.local_width != width || res.local_height != height {
            debug!(width, height, "local surface resized");
            self.mapper.set_local_size(width, height);
        }
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    /// Forwards one local input event to the controlled side.
    ///
    /// Input arriving before the data channel opens is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotEstablished`] with no session and
    /// [`ControllerError::Channel`] if the send fails.
    pub async fn handle_input(&mut self, input: LocalInput) -> Result<(), ControllerError> {
        let Some(session) = self.session.as_ref() else {
            return Err(ControllerError::NotEstablished);
        };
        if !session.channel_open {
            debug!("input dropped: data channel not open yet");
            return Ok(());
        }

        match self.forwarder.translate(input, &self.mapper) {
            Some(event) => self.send(&event).await,
            None => Ok(()),
        }
    }

    async fn send(&mut self, event: &InputEvent) -> Result<(), ControllerError> {
        let session = self.session.as_ref().ok_or(ControllerError::NotEstablished)?;
        session.channel.send(encode_event(event)).await?;
        Ok(())
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    /// Reacts to one data-channel event.
    ///
    /// - `Open`: input forwarding starts and a `screensize` query is sent.
    /// - `Message`: decoded and applied; undecodable frames are logged and
    ///   dropped without touching any state.
    /// - `Closed`: the session is torn down as by [`stop`].
    ///
    /// [`stop`]: SessionController::stop
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Channel`] if the `screensize` query cannot
    /// be sent.
    pub async fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ControllerError> {
        match event {
            ChannelEvent::Open => {
                let Some(session) = self.session.as_mut() else {
                    debug!("channel open with no session; ignoring");
                    return Ok(());
                };
                if session.channel_open {
                    return Ok(());
                }
                session.channel_open = true;
                info!(session = %session.id, "data channel open");
                self.send(&InputEvent::ScreenSizeQuery).await
            }
            ChannelEvent::Message(text) => {
                self.apply_inbound(&text);
                Ok(())
            }
            ChannelEvent::Closed => {
                if self.session.is_some() {
                    info!("data channel closed by peer");
                    self.stop().await;
                }
                Ok(())
            }
        }
    }

    /// Handles every event already queued on the channel, in order.
    ///
    /// Returns the number of events handled.  Does nothing once the stream
    /// has been taken with [`take_channel_events`].
    ///
    /// [`take_channel_events`]: SessionController::take_channel_events
    ///
    /// # Errors
    ///
    /// Stops at the first event whose handling fails.  Events queued behind
    /// it stay on the channel and are handled by the next call.
    pub async fn process_pending_events(&mut self) -> Result<usize, ControllerError> {
        let mut handled = 0;
        loop {
            // Re-borrow per event: a `Closed` event tears the session down.
            let next = self
                .session
                .as_mut()
                .and_then(|s| s.events.as_mut())
                .and_then(|events| events.try_recv().ok());
            let Some(event) = next else {
                break;
            };
            handled += 1;
            self.handle_channel_event(event).await?;
        }
        Ok(handled)
    }

    fn apply_inbound(&mut self, text: &str) {
        let event = match decode_event(text) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                warn!("dropping inbound message: {e}");
                return;
            }
        };

        match event {
            InputEvent::ScreenSizeReport(report) => {
                if report.width == 0 || report.height == 0 {
                    warn!(
                        width = report.width,
                        height = report.height,
                        "ignoring screensize report with an empty dimension"
                    );
                    return;
                }
                info!(
                    width = report.width,
                    height = report.height,
                    "remote screen size received"
                );
                self.mapper.set_remote_size(report.width, report.height);
                self.cursor = RemoteCursorPosition {
                    x: report.mouse_x,
                    y: report.mouse_y,
                };
            }
            // From the controlled side this carries the absolute cursor
            // position after applying a touch nudge.
            InputEvent::TouchMove { x, y } => {
                self.cursor = RemoteCursorPosition { x, y };
            }
            other => {
                debug!(command = other.command().as_str(), "ignoring inbound command");
            }
        }
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state == next {
            return;
        }
        info!(from = %self.state, to = %next, "session state changed");
        self.state = next;
        self.watchers.retain(|tx| tx.send(next).is_ok());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use desk_core::{MouseButton, SurfaceOrigin};

    use crate::application::negotiate_session::{SignalingClient, SignalingError};
    use crate::infrastructure::peer::mock::{MockFailure, MockPeerConnector};

    // ── Test doubles ──────────────────────────────────────────────────────────

    struct FixedSignaling {
        result: Result<String, SignalingError>,
    }

    #[async_trait]
    impl SignalingClient for FixedSignaling {
        async fn exchange(
            &self,
            _offer_sdp: String,
            _screen: ScreenSelector,
        ) -> Result<String, SignalingError> {
            self.result.clone()
        }
    }

    fn controller_with(
        peer: &MockPeerConnector,
        signaling: Result<String, SignalingError>,
        config: &ViewerConfig,
    ) -> SessionController {
        let negotiator = SessionNegotiator::new(
            Arc::new(peer.clone()),
            Arc::new(FixedSignaling { result: signaling }),
            config,
        );
        SessionController::new(negotiator, config)
    }

    fn controller(peer: &MockPeerConnector) -> SessionController {
        controller_with(peer, Ok("valid-sdp".to_string()), &ViewerConfig::default())
    }

    async fn established(peer: &MockPeerConnector) -> SessionController {
        let mut ctl = controller(peer);
        ctl.start(LocalMedia::none(), ScreenSelector(0))
            .await
            .expect("start must succeed");
        ctl.process_pending_events().await.expect("open must succeed");
        ctl
    }

    const REPORT: &str =
        r#"{"command":"screensize","data":{"width":1920,"height":1080,"mouseX":480,"mouseY":270}}"#;

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_start_establishes_session() {
        let peer = MockPeerConnector::new();
        let mut ctl = controller(&peer);

        ctl.start(LocalMedia::none(), ScreenSelector(0)).await.unwrap();

        assert_eq!(ctl.state(), SessionState::Established);
    }

    #[tokio::test]
    async fn test_start_while_established_is_rejected_without_touching_session() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        let sent_before = peer.sent_messages();

        // Act
        let result = ctl.start(LocalMedia::none(), ScreenSelector(1)).await;

        // Assert
        assert!(matches!(
            result,
            Err(ControllerError::SessionActive(SessionState::Established))
        ));
        assert_eq!(ctl.state(), SessionState::Established);
        assert_eq!(peer.connection_count(), 1);
        assert!(!peer.is_closed());
        assert_eq!(peer.sent_messages(), sent_before);
    }

    #[tokio::test]
    async fn test_failed_start_returns_to_idle_and_allows_retry() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = controller_with(
            &peer,
            Err(SignalingError::Status { status: 500 }),
            &ViewerConfig::default(),
        );
        let mut states = ctl.watch_states();

        // Act
        let result = ctl.start(LocalMedia::none(), ScreenSelector(0)).await;

        // Assert
        assert!(matches!(result, Err(ControllerError::Negotiation(_))));
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(states.try_recv(), Ok(SessionState::Negotiating));
        assert_eq!(states.try_recv(), Ok(SessionState::Idle));
        assert!(states.try_recv().is_err());
        assert!(peer.is_closed());
    }

    #[tokio::test]
    async fn test_channel_open_sends_screen_size_query() {
        let peer = MockPeerConnector::new();
        let ctl = established(&peer).await;

        assert!(ctl.is_channel_open());
        assert_eq!(
            peer.sent_messages(),
            vec![encode_event(&InputEvent::ScreenSizeQuery)]
        );
    }

    #[tokio::test]
    async fn test_terminate_sends_terminate_then_closes() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        let mut states = ctl.watch_states();

        // Act
        ctl.terminate().await.unwrap();

        // Assert
        let sent = peer.sent_messages();
        assert_eq!(sent.last(), Some(&encode_event(&InputEvent::Terminate)));
        assert!(peer.is_closed());
        assert_eq!(states.try_recv(), Ok(SessionState::Terminating));
        assert_eq!(states.try_recv(), Ok(SessionState::Idle));
    }

    #[tokio::test]
    async fn test_terminate_when_idle_is_not_established() {
        let peer = MockPeerConnector::new();
        let mut ctl = controller(&peer);
        assert!(matches!(
            ctl.terminate().await,
            Err(ControllerError::NotEstablished)
        ));
    }

    #[tokio::test]
    async fn test_stop_closes_without_sending_terminate() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        ctl.stop().await;

        assert!(peer.is_closed());
        assert_eq!(ctl.state(), SessionState::Idle);
        assert!(!peer
            .sent_messages()
            .contains(&encode_event(&InputEvent::Terminate)));
    }

    #[tokio::test]
    async fn test_terminate_still_closes_when_send_fails() {
        let peer = MockPeerConnector::new().failing_at(MockFailure::Send);
        let mut ctl = controller(&peer);
        ctl.start(LocalMedia::none(), ScreenSelector(0)).await.unwrap();
        // The screensize query on open fails with this peer
        assert!(ctl.process_pending_events().await.is_err());

        ctl.terminate().await.unwrap();

        assert!(peer.is_closed());
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_failed_open_leaves_later_events_queued() {
        // Arrange: the screensize query sent on open fails, a report is queued behind it
        let peer = MockPeerConnector::new().failing_at(MockFailure::Send);
        let mut ctl = controller(&peer);
        ctl.resize_surface(960, 540);
        ctl.start(LocalMedia::none(), ScreenSelector(0)).await.unwrap();
        peer.push_inbound(REPORT);

        // Act
        let first = ctl.process_pending_events().await;
        let second = ctl.process_pending_events().await;

        // Assert: the report survived the failed open and was applied next time
        assert!(matches!(first, Err(ControllerError::Channel(_))));
        assert_eq!(second.unwrap(), 1);
        assert_eq!(ctl.mapper().resolution().remote_width, 1920);
        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition { x: 480, y: 270 });
    }

    #[tokio::test]
    async fn test_peer_closing_channel_ends_session() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        peer.close_channel();
        ctl.process_pending_events().await.unwrap();

        assert_eq!(ctl.state(), SessionState::Idle);
        assert!(peer.is_closed());
    }

    #[tokio::test]
    async fn test_remote_tracks_are_surfaced_once() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        assert_eq!(ctl.take_remote_tracks().len(), 1);
        assert!(ctl.take_remote_tracks().is_empty());
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_screen_size_report_updates_resolution_and_cursor() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        ctl.resize_surface(960, 540);

        // Act
        peer.push_inbound(REPORT);
        ctl.process_pending_events().await.unwrap();

        // Assert
        assert_eq!(ctl.mapper().resolution().remote_width, 1920);
        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition { x: 480, y: 270 });
        assert_eq!(ctl.remote_cursor_local(), Some((240, 135)));
    }

    #[tokio::test]
    async fn test_inbound_touch_move_sets_absolute_cursor() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        peer.push_inbound(r#"{"command":"mousetouchmove","data":{"x":"700","y":"20"}}"#);
        ctl.process_pending_events().await.unwrap();

        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition { x: 700, y: 20 });
    }

    #[tokio::test]
    async fn test_undecodable_message_changes_nothing_and_stream_continues() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        peer.push_inbound(REPORT);
        ctl.process_pending_events().await.unwrap();
        let before = ctl.remote_cursor();

        // Act
        peer.push_inbound(r#"{"command":"mousetouchmove","data":{"x":"left"}}"#);
        peer.push_inbound("not json at all");
        let handled = ctl.process_pending_events().await.unwrap();

        // Assert
        assert_eq!(handled, 2);
        assert_eq!(ctl.remote_cursor(), before);
        assert_eq!(ctl.state(), SessionState::Established);

        peer.push_inbound(r#"{"command":"mousetouchmove","data":{"x":1,"y":2}}"#);
        ctl.process_pending_events().await.unwrap();
        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition { x: 1, y: 2 });
    }

    #[tokio::test]
    async fn test_zero_width_report_is_ignored() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        peer.push_inbound(
            r#"{"command":"screensize","data":{"width":0,"height":1080,"mouseX":5,"mouseY":5}}"#,
        );
        ctl.process_pending_events().await.unwrap();

        assert_eq!(ctl.mapper().resolution().remote_width, 0);
        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition::default());
    }

    #[tokio::test]
    async fn test_remote_cursor_local_is_none_before_resize() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        peer.push_inbound(REPORT);
        ctl.process_pending_events().await.unwrap();

        assert_eq!(ctl.remote_cursor_local(), None);
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pointer_move_after_report_is_sent_in_remote_pixels() {
        // Arrange
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        ctl.resize_surface(960, 540);
        peer.push_inbound(REPORT);
        ctl.process_pending_events().await.unwrap();

        // Act
        ctl.handle_input(LocalInput::PointerMove {
            client_x: 240.0,
            client_y: 135.0,
            origin: SurfaceOrigin::default(),
        })
        .await
        .unwrap();

        // Assert
        assert_eq!(
            peer.sent_messages().last(),
            Some(&encode_event(&InputEvent::MouseMove { x: 480, y: 270 }))
        );
    }

    #[tokio::test]
    async fn test_input_before_channel_open_is_dropped() {
        // Arrange: the channel does not open on its own
        let peer = MockPeerConnector::new().open_on_answer(false);
        let mut ctl = controller(&peer);
        ctl.start(LocalMedia::none(), ScreenSelector(0)).await.unwrap();

        // Act
        ctl.handle_input(LocalInput::KeyDown { key_code: 65 })
            .await
            .unwrap();

        // Assert
        assert!(peer.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_input_without_session_is_not_established() {
        let peer = MockPeerConnector::new();
        let mut ctl = controller(&peer);
        let result = ctl.handle_input(LocalInput::LeftClickButton).await;
        assert!(matches!(result, Err(ControllerError::NotEstablished)));
    }

    #[tokio::test]
    async fn test_click_is_forwarded() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;

        ctl.handle_input(LocalInput::PointerDown { button_code: 2 })
            .await
            .unwrap();

        assert_eq!(
            peer.sent_messages().last(),
            Some(&encode_event(&InputEvent::Click {
                button: MouseButton::Center
            }))
        );
    }

    #[tokio::test]
    async fn test_session_end_keeps_local_size_but_forgets_remote() {
        let peer = MockPeerConnector::new();
        let mut ctl = established(&peer).await;
        ctl.resize_surface(960, 540);
        peer.push_inbound(REPORT);
        ctl.process_pending_events().await.unwrap();

        ctl.terminate().await.unwrap();

        let res = ctl.mapper().resolution();
        assert_eq!((res.local_width, res.local_height), (960, 540));
        assert_eq!((res.remote_width, res.remote_height), (0, 0));
        assert_eq!(ctl.remote_cursor(), RemoteCursorPosition::default());
    }

    #[tokio::test]
    async fn test_taken_event_stream_can_drive_controller() {
        let peer = MockPeerConnector::new();
        let mut ctl = controller(&peer);
        ctl.start(LocalMedia::none(), ScreenSelector(0)).await.unwrap();
        let mut events = ctl.take_channel_events().expect("stream available once");

        let open = events.recv().await.expect("open event");
        ctl.handle_channel_event(open).await.unwrap();

        assert!(ctl.is_channel_open());
        assert!(ctl.take_channel_events().is_none());
        assert_eq!(ctl.process_pending_events().await.unwrap(), 0);
    }
}
