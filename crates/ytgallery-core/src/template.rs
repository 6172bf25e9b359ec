//! Leaf templates for the navigation tree.
//!
//! A [`LeafRenderer`] turns a [`VideoItem`] into a small element tree
//! ([`NodeSpec`]) that the UI layer turns into DOM. The renderer is passed
//! to the tree explicitly.

use std::collections::BTreeMap;

use crate::catalog::VideoItem;

/// Class marking a link whose URL is not a playable video.
pub const EXTERNAL_CLASS: &str = "is_external";

/// Attribute carrying a leaf's description.
pub const DESCRIPTION_ATTR: &str = "data-description";

const LEAF_CLASSES: [&str; 5] = ["tree-item", "tree-leaf", "js-item", "js-leaf", "video-item"];

const LEAF_TITLE_CLASSES: [&str; 5] = [
    "tree-item-title",
    "tree-leaf-title",
    "js-item-title",
    "js-leaf-title",
    "video-item-title",
];

/// Element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `<li>`
    Li,
    /// `<a>`
    A,
    /// `<div>`
    Div,
    /// `<span>`
    Span,
}

impl Tag {
    /// Lowercase tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Li => "li",
            Self::A => "a",
            Self::Div => "div",
            Self::Span => "span",
        }
    }
}

/// An element in a rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    /// Tag.
    pub tag: Tag,
    /// Class list, in order.
    pub classes: Vec<String>,
    /// Attributes other than `class`.
    pub attrs: BTreeMap<String, String>,
    /// Child nodes.
    pub children: Vec<NodeSpec>,
}

impl ElementSpec {
    /// An element with no classes, attributes, or children.
    #[must_use]
    pub const fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add classes.
    #[must_use]
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<NodeSpec>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(NodeSpec::Text(text.into()))
    }

    /// Whether the element has the class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// Attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Depth-first search for the first descendant element with the class.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| match child {
            NodeSpec::Element(el) if el.has_class(class) => Some(el),
            NodeSpec::Element(el) => el.find_by_class(class),
            NodeSpec::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .map(|child| match child {
                NodeSpec::Element(el) => el.text(),
                NodeSpec::Text(text) => text.clone(),
            })
            .collect()
    }
}

/// A node in a rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    /// Element.
    Element(ElementSpec),
    /// Text.
    Text(String),
}

impl From<ElementSpec> for NodeSpec {
    fn from(element: ElementSpec) -> Self {
        Self::Element(element)
    }
}

/// Strategy for rendering a tree leaf.
pub trait LeafRenderer: Send + Sync {
    /// Render one leaf item.
    fn render_leaf(&self, item: &VideoItem) -> ElementSpec;
}

/// The default video leaf template.
///
/// ```text
/// li.tree-item.tree-leaf.js-item.js-leaf.video-item
///   (a[href] | div).tree-item-title....video-item-title[.is_external][data-description]
///     span.marker
///     span.text        title
///     span.duration    duration, when present
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoLeafRenderer;

impl LeafRenderer for VideoLeafRenderer {
    fn render_leaf(&self, item: &VideoItem) -> ElementSpec {
        let title_tag = if item.url.is_some() { Tag::A } else { Tag::Div };
        let mut title = ElementSpec::new(title_tag).with_classes(LEAF_TITLE_CLASSES);

        if item.is_external() {
            title = title.with_classes([EXTERNAL_CLASS]);
        }
        if let Some(url) = &item.url {
            title = title.with_attr("href", url.as_str());
        }
        if let Some(description) = &item.description {
            title = title.with_attr(DESCRIPTION_ATTR, description.as_str());
        }

        title = title
            .with_child(ElementSpec::new(Tag::Span).with_classes(["marker"]))
            .with_child(
                ElementSpec::new(Tag::Span)
                    .with_classes(["text"])
                    .with_text(item.title.as_str()),
            );

        if let Some(duration) = &item.duration {
            title = title.with_child(
                ElementSpec::new(Tag::Span)
                    .with_classes(["duration"])
                    .with_text(duration.as_str()),
            );
        }

        ElementSpec::new(Tag::Li)
            .with_classes(LEAF_CLASSES)
            .with_child(title)
    }
}
