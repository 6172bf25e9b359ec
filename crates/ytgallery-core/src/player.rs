//! Player lifecycle around an embedded iframe player.
//!
//! A [`Player`] starts `Uninitialized`. Once the embedded backend exists it
//! is attached, and the backend's native `onReady` / `onStateChange`
//! notifications are fed through [`dispatch_ready`] and
//! [`dispatch_state_change`]. Listeners run with the player unborrowed, so
//! they may issue commands. Commands are rejected until the player is ready.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::{PlayerConfig, Quality};
use crate::error::{Error, Result};
use crate::events::{EventCallback, EventRegistry, PlayerEvent, PlayerState};

/// Low-level commands of the embedded player.
///
/// Mirrors the subset of the iframe API the gallery drives.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddedPlayer {
    /// Start or resume playback.
    fn play_video(&mut self);
    /// Pause playback.
    fn pause_video(&mut self);
    /// Stop playback.
    fn stop_video(&mut self);
    /// Request a playback quality.
    fn set_playback_quality(&mut self, quality: &str);
    /// Cue a video without starting it.
    fn cue_video_by_id(&mut self, video_id: &str);
    /// Load a video and start playing it.
    fn load_video_by_id(&mut self, video_id: &str);
}

#[allow(clippy::expect_used)]
static TOUCH_RESTRICTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iPad|iPhone|iPod").expect("user agent pattern is valid"));

/// Playback policy of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Playback may start programmatically.
    #[default]
    Desktop,
    /// Touch-first devices that block unattended playback.
    TouchRestricted,
}

impl Platform {
    /// Classify a user agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if TOUCH_RESTRICTED_RE.is_match(user_agent) {
            Self::TouchRestricted
        } else {
            Self::Desktop
        }
    }
}

/// Something the gallery can ask to play a video.
pub trait PlaybackTarget {
    /// Play (or cue, where autoplay is blocked) the given video.
    fn play_video(&mut self, video_id: &str) -> Result<()>;
}

/// One embedded player and its event state.
pub struct Player<B> {
    config: PlayerConfig,
    platform: Platform,
    state: PlayerState,
    events: EventRegistry,
    backend: Option<B>,
}

impl<B: EmbeddedPlayer> Player<B> {
    /// Create a player that is not yet attached to a backend.
    #[must_use]
    pub fn new(config: PlayerConfig, platform: Platform) -> Self {
        debug!("New player on {:?} with {:?}", platform, config);
        Self {
            config,
            platform,
            state: PlayerState::default(),
            events: EventRegistry::new(),
            backend: None,
        }
    }

    /// The merged configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The platform policy in effect.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether the embedded player signalled readiness.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Attach the embedded player once it has been created.
    pub fn attach(&mut self, backend: B) {
        self.backend = Some(backend);
    }

    /// Register the listener for an event, replacing any earlier one.
    pub fn on<F>(&mut self, event: PlayerEvent, callback: F)
    where
        F: Fn() + 'static,
    {
        self.events.on(event, callback);
    }

    /// The listener for an event, for callers that must drop borrows first.
    #[must_use]
    pub fn listener(&self, event: PlayerEvent) -> Option<EventCallback> {
        self.events.listener(event)
    }

    /// Apply the native ready notification without firing.
    ///
    /// Returns `Some(Ready)` the first time only.
    pub fn handle_ready(&mut self) -> Option<PlayerEvent> {
        let event = self.state.on_native_ready();
        if event.is_some() {
            info!("Player ready");
        }
        event
    }

    /// Apply a native state code without firing.
    pub fn handle_state_change(&mut self, code: i32) -> Option<PlayerEvent> {
        let event = self.state.on_native_state(code);
        debug!("Native state {} -> {:?}", code, event);
        event
    }

    fn ready_backend(&mut self, command: &'static str) -> Result<&mut B> {
        if !self.state.is_ready() {
            warn!("Rejected {} before player readiness", command);
            return Err(Error::PlayerNotReady { command });
        }
        self.backend.as_mut().ok_or_else(|| {
            warn!("Rejected {}: no embedded player attached", command);
            Error::PlayerNotReady { command }
        })
    }

    /// Start or resume playback.
    pub fn play(&mut self) -> Result<()> {
        self.ready_backend("play")?.play_video();
        Ok(())
    }

    /// Pause playback.
    pub fn pause(&mut self) -> Result<()> {
        self.ready_backend("pause")?.pause_video();
        Ok(())
    }

    /// Stop playback.
    pub fn stop(&mut self) -> Result<()> {
        self.ready_backend("stop")?.stop_video();
        Ok(())
    }

    /// Request a playback quality.
    pub fn set_quality(&mut self, quality: &Quality) -> Result<()> {
        self.ready_backend("set quality")?
            .set_playback_quality(quality.as_str());
        Ok(())
    }

    /// Cue a video without starting it.
    pub fn load_video(&mut self, video_id: &str) -> Result<()> {
        self.ready_backend("load video")?.cue_video_by_id(video_id);
        Ok(())
    }

    /// Play a video. Touch-restricted platforms only cue it.
    pub fn play_video(&mut self, video_id: &str) -> Result<()> {
        match self.platform {
            Platform::TouchRestricted => self.load_video(video_id),
            Platform::Desktop => {
                self.ready_backend("play video")?.load_video_by_id(video_id);
                Ok(())
            }
        }
    }
}

/// A player shared between its owner and the backend's notifications.
pub type SharedPlayer<B> = Rc<RefCell<Player<B>>>;

fn notify<B: EmbeddedPlayer>(player: &SharedPlayer<B>, event: Option<PlayerEvent>) {
    let listener = event.and_then(|event| player.borrow().listener(event));
    if let Some(listener) = listener {
        listener();
    }
}

/// Feed the native ready notification and fire `ready` when it is new.
pub fn dispatch_ready<B: EmbeddedPlayer>(player: &SharedPlayer<B>) {
    let event = player.borrow_mut().handle_ready();
    notify(player, event);
}

/// Feed a native state code and fire the matching event.
pub fn dispatch_state_change<B: EmbeddedPlayer>(player: &SharedPlayer<B>, code: i32) {
    let event = player.borrow_mut().handle_state_change(code);
    notify(player, event);
}

impl<B> fmt::Debug for Player<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("state", &self.state)
            .field("events", &self.events)
            .field("attached", &self.backend.is_some())
            .finish()
    }
}

impl<B: EmbeddedPlayer> PlaybackTarget for Player<B> {
    fn play_video(&mut self, video_id: &str) -> Result<()> {
        Self::play_video(self, video_id)
    }
}

impl<B: EmbeddedPlayer> PlaybackTarget for SharedPlayer<B> {
    fn play_video(&mut self, video_id: &str) -> Result<()> {
        self.borrow_mut().play_video(video_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use mockall::predicate::eq;

    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0";

    fn ready_player(backend: MockEmbeddedPlayer, platform: Platform) -> Player<MockEmbeddedPlayer> {
        let mut player = Player::new(PlayerConfig::default(), platform);
        player.attach(backend);
        player.handle_ready();
        player
    }

    fn shared(player: Player<MockEmbeddedPlayer>) -> SharedPlayer<MockEmbeddedPlayer> {
        Rc::new(RefCell::new(player))
    }

    fn record_all(player: &SharedPlayer<MockEmbeddedPlayer>) -> Rc<RefCell<Vec<PlayerEvent>>> {
        let fired = Rc::new(RefCell::new(Vec::new()));
        for event in PlayerEvent::ALL {
            let fired = Rc::clone(&fired);
            player
                .borrow_mut()
                .on(event, move || fired.borrow_mut().push(event));
        }
        fired
    }

    #[test]
    fn test_platform_detection() {
        assert_eq!(Platform::from_user_agent(IPHONE_UA), Platform::TouchRestricted);
        assert_eq!(
            Platform::from_user_agent("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)"),
            Platform::TouchRestricted
        );
        assert_eq!(Platform::from_user_agent(DESKTOP_UA), Platform::Desktop);
        assert_eq!(Platform::from_user_agent(""), Platform::Desktop);
    }

    #[test]
    fn test_commands_rejected_before_ready() {
        let mut backend = MockEmbeddedPlayer::new();
        backend.expect_play_video().times(0);
        backend.expect_load_video_by_id().times(0);

        let mut player = Player::new(PlayerConfig::default(), Platform::Desktop);
        player.attach(backend);

        assert!(matches!(
            player.play(),
            Err(Error::PlayerNotReady { command: "play" })
        ));
        assert!(matches!(
            player.play_video("abc123"),
            Err(Error::PlayerNotReady { command: "play video" })
        ));
    }

    #[test]
    fn test_commands_rejected_without_backend() {
        let mut player: Player<MockEmbeddedPlayer> =
            Player::new(PlayerConfig::default(), Platform::Desktop);
        assert_eq!(player.handle_ready(), Some(PlayerEvent::Ready));

        assert!(player.is_ready());
        assert!(matches!(
            player.pause(),
            Err(Error::PlayerNotReady { command: "pause" })
        ));
    }

    #[test]
    fn test_ready_fires_once() {
        let mut player = Player::new(PlayerConfig::default(), Platform::Desktop);
        player.attach(MockEmbeddedPlayer::new());
        let player = shared(player);
        let fired = record_all(&player);

        dispatch_ready(&player);
        dispatch_ready(&player);

        assert_eq!(*fired.borrow(), vec![PlayerEvent::Ready]);
        assert_eq!(player.borrow().state(), PlayerState::Ready);
    }

    #[test]
    fn test_each_native_state_fires_exactly_one_event() {
        let cases = [
            (0, PlayerEvent::End),
            (1, PlayerEvent::Play),
            (2, PlayerEvent::Pause),
            (3, PlayerEvent::Buffering),
            (5, PlayerEvent::Cued),
        ];

        for (code, expected) in cases {
            let player = shared(ready_player(MockEmbeddedPlayer::new(), Platform::Desktop));
            let fired = record_all(&player);

            dispatch_state_change(&player, code);
            assert_eq!(*fired.borrow(), vec![expected], "code {code}");
        }
    }

    #[test]
    fn test_unmapped_native_states_fire_nothing() {
        let player = shared(ready_player(MockEmbeddedPlayer::new(), Platform::Desktop));
        let fired = record_all(&player);

        dispatch_state_change(&player, -1);
        dispatch_state_change(&player, 4);
        dispatch_state_change(&player, 99);

        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_second_listener_replaces_first() {
        let player = shared(ready_player(MockEmbeddedPlayer::new(), Platform::Desktop));
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&calls);
        player
            .borrow_mut()
            .on(PlayerEvent::Pause, move || first.borrow_mut().push(1));
        let second = Rc::clone(&calls);
        player
            .borrow_mut()
            .on(PlayerEvent::Pause, move || second.borrow_mut().push(2));

        dispatch_state_change(&player, 2);
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[test]
    fn test_ready_listener_can_issue_commands() {
        let mut backend = MockEmbeddedPlayer::new();
        backend
            .expect_load_video_by_id()
            .with(eq("abc123"))
            .times(1)
            .return_const(());
        backend.expect_play_video().times(1).return_const(());

        let mut player = Player::new(PlayerConfig::default(), Platform::Desktop);
        player.attach(backend);
        let player = shared(player);

        let handle = Rc::downgrade(&player);
        player.borrow_mut().on(PlayerEvent::Ready, move || {
            let player = handle.upgrade().unwrap();
            player.borrow_mut().play_video("abc123").unwrap();
        });
        let handle = Rc::downgrade(&player);
        player.borrow_mut().on(PlayerEvent::Cued, move || {
            handle.upgrade().unwrap().borrow_mut().play().unwrap();
        });

        dispatch_ready(&player);
        dispatch_state_change(&player, 5);
        assert!(player.borrow().is_ready());
    }

    #[test]
    fn test_transport_commands() {
        let mut backend = MockEmbeddedPlayer::new();
        backend.expect_play_video().times(1).return_const(());
        backend.expect_pause_video().times(1).return_const(());
        backend.expect_stop_video().times(1).return_const(());
        backend
            .expect_set_playback_quality()
            .with(eq("hd720"))
            .times(1)
            .return_const(());

        let mut player = ready_player(backend, Platform::Desktop);
        player.play().unwrap();
        player.pause().unwrap();
        player.stop().unwrap();
        player.set_quality(&Quality::Hd720).unwrap();
    }

    #[test]
    fn test_load_video_cues() {
        let mut backend = MockEmbeddedPlayer::new();
        backend
            .expect_cue_video_by_id()
            .with(eq("abc123"))
            .times(1)
            .return_const(());
        backend.expect_load_video_by_id().times(0);

        let mut player = ready_player(backend, Platform::Desktop);
        player.load_video("abc123").unwrap();
    }

    #[test]
    fn test_play_video_loads_on_desktop() {
        let mut backend = MockEmbeddedPlayer::new();
        backend
            .expect_load_video_by_id()
            .with(eq("abc123"))
            .times(1)
            .return_const(());
        backend.expect_cue_video_by_id().times(0);

        let mut player = ready_player(backend, Platform::from_user_agent(DESKTOP_UA));
        player.play_video("abc123").unwrap();
    }

    #[test]
    fn test_play_video_only_cues_on_touch_restricted() {
        let mut backend = MockEmbeddedPlayer::new();
        backend
            .expect_cue_video_by_id()
            .with(eq("abc123"))
            .times(1)
            .return_const(());
        backend.expect_load_video_by_id().times(0);

        let mut player = ready_player(backend, Platform::from_user_agent(IPHONE_UA));
        player.play_video("abc123").unwrap();
    }

    #[test]
    fn test_shared_player_is_a_playback_target() {
        let mut backend = MockEmbeddedPlayer::new();
        backend
            .expect_load_video_by_id()
            .with(eq("xyz"))
            .times(1)
            .return_const(());

        let mut player = shared(ready_player(backend, Platform::Desktop));
        PlaybackTarget::play_video(&mut player, "xyz").unwrap();
    }
}
