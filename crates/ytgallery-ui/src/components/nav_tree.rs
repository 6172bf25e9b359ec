//! Collapsible navigation tree over a video catalog.
//!
//! Branches start collapsed and toggle on click. Leaves are rendered through
//! the injected [`LeafRenderer`]; the element carrying an `href` or a
//! description is the leaf's activation target.

use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use ytgallery_core::{
    ClickAction, DESCRIPTION_ATTR, ElementSpec, LeafRenderer, LeafTarget, LinkClick, NodeSpec,
    Tag, VideoItem,
};

/// Callbacks shared by every leaf in the tree.
#[derive(Clone, Copy)]
pub struct LeafHandlers {
    /// A leaf was activated.
    pub on_select_leaf: Callback<LeafTarget>,
    /// A link inside the tree was clicked; the answer decides navigation.
    pub on_link_click: Callback<LinkClick, ClickAction>,
}

/// Whether clicking this element selects the leaf it belongs to.
pub fn is_activation_target(element: &ElementSpec) -> bool {
    element.attr("href").is_some() || element.attr(DESCRIPTION_ATTR).is_some()
}

fn activate(element: &ElementSpec, handlers: LeafHandlers, ev: &leptos::ev::MouseEvent) {
    if element.tag == Tag::A {
        let click = LinkClick::from_classes(element.classes.iter().map(String::as_str));
        match handlers.on_link_click.run(click) {
            ClickAction::SuppressNavigation => ev.prevent_default(),
            ClickAction::OpenInNewContext => {
                if let Some(link) = ev
                    .current_target()
                    .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                    && let Err(e) = link.set_attribute("target", "_blank")
                {
                    leptos::logging::warn!("Could not retarget link: {:?}", e);
                }
            }
            ClickAction::FollowLink => {}
        }
    }
    handlers.on_select_leaf.run(LeafTarget::from_element(element));
}

fn render_node(node: &NodeSpec, handlers: LeafHandlers) -> AnyView {
    match node {
        NodeSpec::Text(text) => text.clone().into_any(),
        NodeSpec::Element(element) => render_element(element, handlers),
    }
}

fn render_element(element: &ElementSpec, handlers: LeafHandlers) -> AnyView {
    let class = element.class_attr();
    let href = element.attr("href").map(str::to_string);
    let description = element.attr(DESCRIPTION_ATTR).map(str::to_string);
    let children = element
        .children
        .iter()
        .map(|child| render_node(child, handlers))
        .collect_view();

    let target = is_activation_target(element).then(|| element.clone());
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if let Some(target) = &target {
            ev.stop_propagation();
            activate(target, handlers, &ev);
        }
    };

    match element.tag {
        Tag::Li => view! { <li class=class>{children}</li> }.into_any(),
        Tag::A => view! {
            <a class=class href=href data-description=description on:click=on_click>
                {children}
            </a>
        }
        .into_any(),
        Tag::Div => view! {
            <div class=class data-description=description on:click=on_click>
                {children}
            </div>
        }
        .into_any(),
        Tag::Span => view! { <span class=class>{children}</span> }.into_any(),
    }
}

fn render_item(
    item: &VideoItem,
    renderer: &Arc<dyn LeafRenderer>,
    handlers: LeafHandlers,
) -> AnyView {
    if item.is_leaf() {
        render_element(&renderer.render_leaf(item), handlers)
    } else {
        view! {
            <TreeBranch item=item.clone() renderer=Arc::clone(renderer) handlers=handlers />
        }
        .into_any()
    }
}

/// A collapsible branch with its children.
#[component]
fn TreeBranch(
    /// The branch item.
    item: VideoItem,
    /// Leaf template.
    renderer: Arc<dyn LeafRenderer>,
    /// Leaf callbacks.
    handlers: LeafHandlers,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let children = item
        .children
        .iter()
        .map(|child| render_item(child, &renderer, handlers))
        .collect_view();

    view! {
        <li class="tree-item tree-branch js-item" class:is-open=open>
            <div
                class="tree-item-title tree-branch-title js-item-title"
                on:click=move |_| set_open.update(|open| *open = !*open)
            >
                <span class="marker"></span>
                <span class="text">{item.title}</span>
            </div>
            <ul class="tree-children" style:display=move || if open.get() { "block" } else { "none" }>
                {children}
            </ul>
        </li>
    }
}

/// Navigation tree for a list of catalog items.
#[component]
pub fn NavTree(
    /// Top-level catalog items.
    items: Vec<VideoItem>,
    /// Leaf template.
    renderer: Arc<dyn LeafRenderer>,
    /// Called when a leaf is activated.
    on_select_leaf: Callback<LeafTarget>,
    /// Called when a link in the tree is clicked.
    on_link_click: Callback<LinkClick, ClickAction>,
) -> impl IntoView {
    let handlers = LeafHandlers {
        on_select_leaf,
        on_link_click,
    };

    view! {
        <ul class="tree video-tree">
            {items
                .iter()
                .map(|item| render_item(item, &renderer, handlers))
                .collect_view()}
        </ul>
    }
}
