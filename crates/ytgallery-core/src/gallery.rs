//! Gallery orchestration: leaf selection and link clicks.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{VideoCatalog, VideoItem};
use crate::config::GalleryConfig;
use crate::error::Result;
use crate::player::PlaybackTarget;
use crate::template::{ElementSpec, EXTERNAL_CLASS, LeafRenderer, VideoLeafRenderer};
use crate::video_id::video_id_from_url;

/// Where the selected video's description is shown.
#[cfg_attr(test, mockall::automock)]
pub trait DescriptionPanel {
    /// Replace the panel content.
    fn set_description(&mut self, text: &str);
}

/// An absent panel ignores descriptions.
impl<P: DescriptionPanel> DescriptionPanel for Option<P> {
    fn set_description(&mut self, text: &str) {
        if let Some(panel) = self {
            panel.set_description(text);
        }
    }
}

/// What the tree reports about a selected leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafTarget {
    /// The leaf's link target.
    pub href: Option<String>,
    /// The leaf's attached description.
    pub description: Option<String>,
}

impl LeafTarget {
    /// Read the target off a rendered leaf title element.
    #[must_use]
    pub fn from_element(element: &ElementSpec) -> Self {
        Self {
            href: element.attr("href").map(str::to_string),
            description: element
                .attr(crate::template::DESCRIPTION_ATTR)
                .map(str::to_string),
        }
    }
}

/// Result of routing a leaf selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The video was sent to the player.
    Played {
        /// Extracted video id.
        video_id: String,
    },
    /// Not a playable video; the click's default navigation applies.
    Ignored,
}

/// A click on a link inside the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkClick {
    /// Whether the link carries the external marker.
    pub is_external: bool,
}

impl LinkClick {
    /// Classify a click from the link's class list.
    #[must_use]
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            is_external: classes.into_iter().any(|c| c == EXTERNAL_CLASS),
        }
    }
}

/// How a link click must be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the link in a new browsing context and let navigation proceed.
    OpenInNewContext,
    /// Let navigation proceed in place.
    FollowLink,
    /// Suppress navigation; selection routing takes over.
    SuppressNavigation,
}

/// Binds tree selection to a player and a description panel.
pub struct Gallery<T, P> {
    catalog: VideoCatalog,
    player: T,
    panel: P,
    renderer: Arc<dyn LeafRenderer>,
    open_external_in_new_context: bool,
}

impl<T: PlaybackTarget, P: DescriptionPanel> Gallery<T, P> {
    /// Create a gallery with the default leaf template.
    pub fn new(catalog: VideoCatalog, player: T, panel: P, config: &GalleryConfig) -> Self {
        Self {
            catalog,
            player,
            panel,
            renderer: Arc::new(VideoLeafRenderer),
            open_external_in_new_context: config.open_external_in_new_context,
        }
    }

    /// Replace the leaf template.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn LeafRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// The catalog backing the tree.
    #[must_use]
    pub const fn catalog(&self) -> &VideoCatalog {
        &self.catalog
    }

    /// The leaf template, for handing to the tree.
    #[must_use]
    pub fn renderer(&self) -> Arc<dyn LeafRenderer> {
        Arc::clone(&self.renderer)
    }

    /// Render one leaf.
    #[must_use]
    pub fn render_leaf(&self, item: &VideoItem) -> ElementSpec {
        self.renderer.render_leaf(item)
    }

    /// Route a "leaf selected" event.
    pub fn select_leaf(&mut self, target: &LeafTarget) -> Result<SelectionOutcome> {
        let Some(video_id) = target.href.as_deref().and_then(video_id_from_url) else {
            debug!("Leaf {:?} is not a video, leaving it to navigation", target.href);
            return Ok(SelectionOutcome::Ignored);
        };

        debug!("Playing {} from gallery selection", video_id);
        self.player.play_video(&video_id)?;
        self.panel
            .set_description(target.description.as_deref().unwrap_or_default());

        Ok(SelectionOutcome::Played { video_id })
    }

    /// Decide what a link click does.
    #[must_use]
    pub fn intercept_click(&self, click: LinkClick) -> ClickAction {
        match (click.is_external, self.open_external_in_new_context) {
            (true, true) => ClickAction::OpenInNewContext,
            (true, false) => ClickAction::FollowLink,
            (false, _) => ClickAction::SuppressNavigation,
        }
    }
}

impl<T, P> fmt::Debug for Gallery<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("leaves", &self.catalog.leaf_count())
            .field(
                "open_external_in_new_context",
                &self.open_external_in_new_context,
            )
            .finish_non_exhaustive()
    }
}
