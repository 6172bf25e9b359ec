//! `ytgallery` Core Library
//!
//! This crate provides the browser-independent parts of the video gallery:
//! - Player configuration, merging, and translation to the iframe API
//! - Video id extraction from `YouTube` URLs
//! - The player event state machine and command surface
//! - The process-wide readiness queue for the iframe API script
//! - The video catalog model and leaf templates
//! - Gallery routing of leaf selections and link clicks
//!
//! # Error Handling
//!
//! Fallible operations return [`Result`], whose error type is [`Error`].
//!
//! ```rust,ignore
//! use ytgallery_core::{Error, Result};
//!
//! fn do_something() -> Result<()> {
//!     // Your code here
//!     Ok(())
//! }
//! ```

pub mod api_loader;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod player;
pub mod template;
pub mod video_id;

pub use api_loader::{
    API_READY_HOOK, ApiLoadState, ApiReadyQueue, Continuation, IFRAME_API_URL, Registration,
    run_ready_hook,
};
pub use catalog::{VideoCatalog, VideoItem};
pub use config::{
    Dimension, GalleryConfig, PlayerConfig, PlayerConfigOverrides, Quality, Theme,
    YtPlayerConfig, YtPlayerVars, create_config_for_yt_player,
};
pub use error::{Error, Result};
pub use events::{EventCallback, EventRegistry, NativePlayerState, PlayerEvent, PlayerState};
pub use gallery::{
    ClickAction, DescriptionPanel, Gallery, LeafTarget, LinkClick, SelectionOutcome,
};
pub use player::{
    EmbeddedPlayer, Platform, PlaybackTarget, Player, SharedPlayer, dispatch_ready,
    dispatch_state_change,
};
pub use template::{
    DESCRIPTION_ATTR, EXTERNAL_CLASS, ElementSpec, LeafRenderer, NodeSpec, Tag,
    VideoLeafRenderer,
};
pub use video_id::{is_video_url, video_id_from_url};
