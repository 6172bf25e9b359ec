//! Player event vocabulary and state machine.
//!
//! The iframe player reports numeric state codes; the gallery only cares
//! about six named events. [`EventRegistry`] holds at most one listener per
//! event: registering again replaces the previous listener.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::Error;

/// Internal player events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// The embedded player finished initializing.
    Ready,
    /// Playback started.
    Play,
    /// Playback reached the end.
    End,
    /// Playback paused.
    Pause,
    /// The player is buffering.
    Buffering,
    /// A video was cued.
    Cued,
}

impl PlayerEvent {
    /// All events, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Ready,
        Self::Play,
        Self::End,
        Self::Pause,
        Self::Buffering,
        Self::Cued,
    ];

    /// The event's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Play => "play",
            Self::End => "end",
            Self::Pause => "pause",
            Self::Buffering => "buffering",
            Self::Cued => "cued",
        }
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::Configuration(format!("Unknown player event: {s}")))
    }
}

/// State codes reported by the iframe player's `onStateChange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativePlayerState {
    /// `-1`
    Unstarted,
    /// `0`
    Ended,
    /// `1`
    Playing,
    /// `2`
    Paused,
    /// `3`
    Buffering,
    /// `5`
    Cued,
}

impl NativePlayerState {
    /// Decode a native state code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    /// The internal event this state fires, if any.
    #[must_use]
    pub const fn event(self) -> Option<PlayerEvent> {
        match self {
            Self::Unstarted => None,
            Self::Ended => Some(PlayerEvent::End),
            Self::Playing => Some(PlayerEvent::Play),
            Self::Paused => Some(PlayerEvent::Pause),
            Self::Buffering => Some(PlayerEvent::Buffering),
            Self::Cued => Some(PlayerEvent::Cued),
        }
    }

    const fn player_state(self) -> Option<PlayerState> {
        match self {
            Self::Unstarted => None,
            Self::Ended => Some(PlayerState::Ended),
            Self::Playing => Some(PlayerState::Playing),
            Self::Paused => Some(PlayerState::Paused),
            Self::Buffering => Some(PlayerState::Buffering),
            Self::Cued => Some(PlayerState::Cued),
        }
    }
}

/// Lifecycle state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Waiting for the embedded player to signal readiness.
    #[default]
    Uninitialized,
    /// Ready, nothing played yet.
    Ready,
    /// Playing.
    Playing,
    /// Paused.
    Paused,
    /// Buffering.
    Buffering,
    /// Video cued, not started.
    Cued,
    /// Playback ended.
    Ended,
}

impl PlayerState {
    /// Whether commands are accepted in this state.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Apply the native ready signal.
    ///
    /// Returns the event to fire, which is `Some` only on the first call.
    pub const fn on_native_ready(&mut self) -> Option<PlayerEvent> {
        if self.is_ready() {
            return None;
        }
        *self = Self::Ready;
        Some(PlayerEvent::Ready)
    }

    /// Apply a native state code. Codes before readiness are ignored.
    pub const fn on_native_state(&mut self, code: i32) -> Option<PlayerEvent> {
        if !self.is_ready() {
            return None;
        }
        let Some(native) = NativePlayerState::from_code(code) else {
            return None;
        };
        if let Some(next) = native.player_state() {
            *self = next;
        }
        native.event()
    }
}

/// Listener callback.
pub type EventCallback = Rc<dyn Fn()>;

/// One listener slot per event.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<PlayerEvent, EventCallback>,
}

impl EventRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, replacing any earlier one for the same event.
    pub fn on<F>(&mut self, event: PlayerEvent, callback: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.insert(event, Rc::new(callback));
    }

    /// The listener for an event, if one is registered.
    ///
    /// Returned as a clone so callers can release borrows before invoking it.
    #[must_use]
    pub fn listener(&self, event: PlayerEvent) -> Option<EventCallback> {
        self.listeners.get(&event).cloned()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("events", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}
