//! Readiness queue for the iframe player API.
//!
//! The API script is loaded at most once per page and announces itself
//! through a single global hook. Players that need the API before it has
//! arrived queue a continuation here; the queue is drained once, in
//! registration order, when the hook fires.
//!
//! The queue never runs continuations itself. Callers get them back and run
//! them after releasing any borrow on the queue, so a continuation may
//! register further players.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// URL of the iframe API bootstrap script.
pub const IFRAME_API_URL: &str = "https://www.youtube.com/iframe_api";

/// Name of the global readiness hook the API script calls.
pub const API_READY_HOOK: &str = "onYouTubeIframeAPIReady";

/// Deferred player-creation work.
pub type Continuation = Box<dyn FnOnce()>;

/// Load state of the iframe API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiLoadState {
    /// Nothing requested yet.
    #[default]
    NotLoaded,
    /// Script requested, hook not called yet.
    Loading,
    /// API available.
    Ready,
    /// Script failed to load.
    Failed(String),
}

/// Outcome of [`ApiReadyQueue::register`].
pub enum Registration {
    /// The API is ready; run the continuation now.
    RunNow(Continuation),
    /// The continuation was queued.
    Queued {
        /// Whether the caller must start the script load.
        trigger_load: bool,
    },
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunNow(_) => f.write_str("RunNow"),
            Self::Queued { trigger_load } => f
                .debug_struct("Queued")
                .field("trigger_load", trigger_load)
                .finish(),
        }
    }
}

/// Pending continuations waiting on the iframe API.
#[derive(Default)]
pub struct ApiReadyQueue {
    state: ApiLoadState,
    pending: Vec<Continuation>,
}

impl ApiReadyQueue {
    /// Create an empty queue in the `NotLoaded` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &ApiLoadState {
        &self.state
    }

    /// Number of queued continuations.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Register work that needs the API.
    pub fn register(&mut self, continuation: Continuation) -> Result<Registration> {
        match &self.state {
            ApiLoadState::Ready => Ok(Registration::RunNow(continuation)),
            ApiLoadState::Failed(reason) => Err(Error::ApiLoadFailed(reason.clone())),
            ApiLoadState::NotLoaded => {
                self.state = ApiLoadState::Loading;
                self.pending.push(continuation);
                info!("Requesting player API from {}", IFRAME_API_URL);
                Ok(Registration::Queued { trigger_load: true })
            }
            ApiLoadState::Loading => {
                self.pending.push(continuation);
                debug!("Queued player creation ({} pending)", self.pending.len());
                Ok(Registration::Queued {
                    trigger_load: false,
                })
            }
        }
    }

    /// Record that the API was already present on the page.
    pub fn mark_present(&mut self) {
        if self.state != ApiLoadState::Ready {
            debug!("Player API already present");
            self.state = ApiLoadState::Ready;
        }
    }

    /// The readiness hook fired: move to `Ready` and hand back queued work
    /// in registration order. Later calls return nothing.
    #[must_use]
    pub fn take_ready(&mut self) -> Vec<Continuation> {
        if matches!(self.state, ApiLoadState::Failed(_)) {
            warn!("Player API signalled readiness after a load failure");
        }
        self.state = ApiLoadState::Ready;
        let drained = std::mem::take(&mut self.pending);
        info!("Player API ready, creating {} player(s)", drained.len());
        drained
    }

    /// The script failed to load. Drops queued work and returns how much was dropped.
    pub fn fail(&mut self, reason: impl Into<String>) -> usize {
        let reason = reason.into();
        let dropped = self.pending.len();
        warn!(
            "Player API failed to load ({}), dropping {} pending player(s)",
            reason, dropped
        );
        self.pending.clear();
        self.state = ApiLoadState::Failed(reason);
        dropped
    }
}

/// Answer the global ready hook.
///
/// A hook that was installed before ours runs first. Queued continuations
/// then run in registration order with the queue unborrowed. Returns how
/// many continuations ran.
pub fn run_ready_hook(queue: &RefCell<ApiReadyQueue>, previous: Option<&dyn Fn()>) -> usize {
    if let Some(previous) = previous {
        debug!("Calling previously installed {}", API_READY_HOOK);
        previous();
    }

    let ready = queue.borrow_mut().take_ready();
    let count = ready.len();
    for continuation in ready {
        continuation();
    }
    count
}

impl fmt::Debug for ApiReadyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiReadyQueue")
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .finish()
    }
}
