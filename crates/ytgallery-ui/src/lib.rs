//! `ytgallery` UI - the browser side of the video gallery.
//!
//! This crate binds the `YouTube` iframe API, mounts players, and renders the
//! navigation tree with Leptos.

pub mod bootstrap;
pub mod components;
pub mod dom;
pub mod player;
pub mod yt_api;

pub use bootstrap::bootstrap;
pub use components::{VideoGallery, mount_gallery};
pub use player::{Container, mount_player};
pub use yt_api::SharedPlayer;
