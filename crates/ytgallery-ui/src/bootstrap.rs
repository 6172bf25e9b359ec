//! Page bootstrap: read the config, fetch the catalog, mount the gallery.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use ytgallery_core::{Error, GalleryConfig, Result, VideoCatalog};

use crate::components::mount_gallery;
use crate::dom::{self, js_error};

/// Id of the optional `<script type="application/json">` holding the page config.
pub const CONFIG_ELEMENT_ID: &str = "ytgallery-config";

/// Read the page's gallery config, falling back to the defaults.
pub fn read_page_config() -> Result<GalleryConfig> {
    let document = dom::document()?;
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(json) if !json.trim().is_empty() => GalleryConfig::from_json_str(&json),
        _ => Ok(GalleryConfig::default()),
    }
}

/// Fetch and parse the video catalog.
pub async fn fetch_catalog(url: &str) -> Result<VideoCatalog> {
    let window = dom::window()?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?
        .dyn_into::<web_sys::Response>()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(Error::Browser(format!(
            "Fetching {url} failed with status {}",
            response.status()
        )));
    }

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| Error::Browser(format!("Response from {url} is not text")))?;

    VideoCatalog::from_json_str(&text)
}

/// Set up the gallery on the current page.
pub async fn bootstrap() -> Result<()> {
    let config = read_page_config()?;
    let catalog = fetch_catalog(&config.data_url).await?;
    mount_gallery(&config, catalog)
}
