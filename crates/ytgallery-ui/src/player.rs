//! Mounting a player into the page.

use std::cell::RefCell;
use std::rc::Rc;

use ytgallery_core::{Platform, Player, PlayerConfig, PlayerConfigOverrides, Result};

use crate::dom::{self, js_error};
use crate::yt_api::{self, SharedPlayer};

/// Where a player is mounted.
#[derive(Debug, Clone)]
pub enum Container {
    /// An element the caller already holds.
    Element(web_sys::Element),
    /// The id of an element in the page.
    Id(String),
}

impl Container {
    fn resolve(self) -> Result<web_sys::Element> {
        match self {
            Self::Element(element) => Ok(element),
            Self::Id(id) => dom::element_by_id(&dom::document()?, &id),
        }
    }
}

impl From<&str> for Container {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<web_sys::Element> for Container {
    fn from(element: web_sys::Element) -> Self {
        Self::Element(element)
    }
}

/// Create a player inside `container`.
///
/// The returned player accepts listeners straight away. Commands fail with
/// `Error::PlayerNotReady` until the iframe reports ready.
pub fn mount_player(
    container: impl Into<Container>,
    overrides: PlayerConfigOverrides,
) -> Result<SharedPlayer> {
    let container = container.into().resolve()?;
    let config = PlayerConfig::from_overrides(overrides)?;

    let document = dom::document()?;
    let mount = document.create_element("div").map_err(js_error)?;
    container.append_child(&mount).map_err(js_error)?;

    let platform = Platform::from_user_agent(&dom::user_agent());
    let player: SharedPlayer = Rc::new(RefCell::new(Player::new(config, platform)));

    let pending = Rc::clone(&player);
    yt_api::when_api_ready(Box::new(move || {
        if let Err(e) = yt_api::create_iframe_player(&pending, &mount) {
            leptos::logging::error!("Failed to create player: {}", e);
        }
    }))?;

    Ok(player)
}
