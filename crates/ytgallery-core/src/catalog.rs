//! Hierarchical video catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::video_id::video_id_from_url;

/// A node of the navigation tree: a branch when it has children, a leaf otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    /// Display title.
    pub title: String,
    /// Link target. Leaves without a URL render as plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Text shown in the description panel when the video is played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display-only duration, e.g. `"4:13"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Nested items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VideoItem>,
}

impl VideoItem {
    /// Create an item with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Add a child item.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The video id behind this item's URL.
    #[must_use]
    pub fn video_id(&self) -> Option<String> {
        self.url.as_deref().and_then(video_id_from_url)
    }

    /// Whether the item links somewhere that is not a playable video.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.url.is_some() && self.video_id().is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogJson {
    Many(Vec<VideoItem>),
    One(VideoItem),
}

/// Ordered root items of the navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoCatalog {
    items: Vec<VideoItem>,
}

impl VideoCatalog {
    /// Wrap root items.
    #[must_use]
    pub const fn new(items: Vec<VideoItem>) -> Self {
        Self { items }
    }

    /// Parse a catalog from JSON: an array of roots, or a single root object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items = match serde_json::from_str::<CatalogJson>(json)? {
            CatalogJson::Many(items) => items,
            CatalogJson::One(item) => vec![item],
        };
        let catalog = Self::new(items);
        debug!(
            "Loaded catalog: {} root(s), {} leaves",
            catalog.items.len(),
            catalog.leaf_count()
        );
        Ok(catalog)
    }

    /// Root items.
    #[must_use]
    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Leaves in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&VideoItem> {
        fn walk<'a>(items: &'a [VideoItem], out: &mut Vec<&'a VideoItem>) {
            for item in items {
                if item.is_leaf() {
                    out.push(item);
                } else {
                    walk(&item.children, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// The first leaf whose URL resolves to the given video id.
    #[must_use]
    pub fn find_by_video_id(&self, video_id: &str) -> Option<&VideoItem> {
        self.leaves()
            .into_iter()
            .find(|item| item.video_id().as_deref() == Some(video_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const NESTED: &str = r#"[
        {
            "title": "Talks",
            "children": [
                {"title": "Keynote", "url": "https://youtu.be/abc123", "description": "Opening", "duration": "42:00"},
                {"title": "Slides", "url": "https://example.com/slides"}
            ]
        },
        {"title": "Trailer", "url": "https://www.youtube.com/watch?v=viiDaLpPfN4"},
        {"title": "Empty"}
    ]"#;

    #[test]
    fn test_parse_nested_catalog() {
        let catalog = VideoCatalog::from_json_str(NESTED).unwrap();

        assert_eq!(catalog.items().len(), 3);
        assert!(!catalog.items()[0].is_leaf());
        let titles: Vec<_> = catalog.leaves().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Keynote", "Slides", "Trailer", "Empty"]);
        assert_eq!(catalog.leaf_count(), 4);
    }

    #[test]
    fn test_single_root_object() {
        let one = VideoCatalog::from_json_str(
            r#"{"title": "A", "url": "https://youtu.be/abc123", "description": "D1"}"#,
        )
        .unwrap();
        let many = VideoCatalog::from_json_str(
            r#"[{"title": "A", "url": "https://youtu.be/abc123", "description": "D1"}]"#,
        )
        .unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn test_item_without_url_or_children_is_tolerated() {
        let catalog = VideoCatalog::from_json_str(r#"[{"title": "Nothing"}]"#).unwrap();
        let item = &catalog.items()[0];
        assert!(item.is_leaf());
        assert_eq!(item.video_id(), None);
        assert!(!item.is_external());
    }

    #[test]
    fn test_external_classification() {
        assert!(VideoItem::new("B").with_url("https://example.com/x").is_external());
        assert!(!VideoItem::new("A").with_url("https://youtu.be/abc123").is_external());
    }

    #[test]
    fn test_find_by_video_id() {
        let catalog = VideoCatalog::from_json_str(NESTED).unwrap();
        let found = catalog.find_by_video_id("abc123").unwrap();
        assert_eq!(found.title, "Keynote");
        assert!(catalog.find_by_video_id("missing").is_none());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        assert!(VideoCatalog::from_json_str(r#"[{"url": "https://youtu.be/x"}]"#).is_err());
    }
}
