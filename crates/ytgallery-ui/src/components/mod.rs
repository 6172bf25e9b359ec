//! UI components for the video gallery.

pub mod nav_tree;
pub mod video_gallery;

pub use nav_tree::{LeafHandlers, NavTree};
pub use video_gallery::{VideoGallery, mount_gallery};
