//! The gallery widget: navigation tree wired to a player.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use ytgallery_core::{
    Error, Gallery, GalleryConfig, LeafTarget, LinkClick, PlayerEvent, Result, SelectionOutcome,
    VideoCatalog,
};

use crate::components::NavTree;
use crate::dom::{self, ElementDescriptionPanel};
use crate::player::mount_player;
use crate::yt_api::SharedPlayer;

/// The gallery as mounted in the page.
pub type PageGallery = Gallery<SharedPlayer, Option<ElementDescriptionPanel>>;

/// Gallery tree bound to a mounted gallery.
#[component]
pub fn VideoGallery(
    /// The gallery backing the tree.
    gallery: StoredValue<PageGallery, LocalStorage>,
) -> impl IntoView {
    let (items, renderer) =
        gallery.with_value(|g| (g.catalog().items().to_vec(), g.renderer()));

    let on_select_leaf = Callback::new(move |target: LeafTarget| {
        gallery.update_value(|g| match g.select_leaf(&target) {
            Ok(SelectionOutcome::Played { video_id }) => {
                leptos::logging::log!("Playing {}", video_id);
            }
            Ok(SelectionOutcome::Ignored) => {}
            Err(e) => leptos::logging::error!("Could not play selection: {}", e),
        });
    });

    let on_link_click =
        Callback::new(move |click: LinkClick| gallery.with_value(|g| g.intercept_click(click)));

    view! {
        <div class="video-gallery">
            <NavTree
                items=items
                renderer=renderer
                on_select_leaf=on_select_leaf
                on_link_click=on_link_click
            />
        </div>
    }
}

/// Mount the player and the gallery tree described by `config`.
pub fn mount_gallery(config: &GalleryConfig, catalog: VideoCatalog) -> Result<()> {
    let document = dom::document()?;
    let root = dom::element_by_id(&document, &config.gallery_element_id)?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| Error::ContainerNotFound(config.gallery_element_id.clone()))?;

    let player = mount_player(config.player_element_id.as_str(), config.player.clone())?;
    player.borrow_mut().on(PlayerEvent::Ready, || {
        leptos::logging::log!("Player ready");
    });

    let panel = match &config.description_element_id {
        Some(id) => match dom::element_by_id(&document, id) {
            Ok(element) => Some(ElementDescriptionPanel::new(element)),
            Err(e) => {
                leptos::logging::warn!("No description panel: {}", e);
                None
            }
        },
        None => None,
    };

    leptos::logging::log!("Mounting gallery with {} videos", catalog.leaf_count());
    let gallery = Gallery::new(catalog, player, panel, config);

    leptos::mount::mount_to(root, move || {
        let gallery = StoredValue::new_local(gallery);
        view! { <VideoGallery gallery=gallery /> }
    })
    .forget();

    Ok(())
}
