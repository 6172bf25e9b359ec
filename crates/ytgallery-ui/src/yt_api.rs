//! Bindings to the `YouTube` iframe player API.
//!
//! The API script is requested at most once per page. Player creation is
//! deferred through the process-wide [`ApiReadyQueue`], drained by the
//! global `onYouTubeIframeAPIReady` hook. A hook installed by another
//! script before ours is kept and called first.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use ytgallery_core::{
    API_READY_HOOK, ApiReadyQueue, Continuation, EmbeddedPlayer, Error, IFRAME_API_URL,
    Registration, Result, create_config_for_yt_player, dispatch_ready, dispatch_state_change,
    run_ready_hook,
};

use crate::dom::{self, js_error};

#[wasm_bindgen]
extern "C" {
    /// A `YT.Player` instance.
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    pub type YtPlayer;

    #[wasm_bindgen(constructor, catch, js_namespace = YT, js_class = "Player")]
    fn new(elem: &web_sys::Element, config: &JsValue) -> std::result::Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, js_class = "Player", js_name = addEventListener)]
    fn add_event_listener(this: &YtPlayer, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_class = "Player", js_name = playVideo)]
    fn play_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = stopVideo)]
    fn stop_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = setPlaybackQuality)]
    fn set_playback_quality(this: &YtPlayer, quality: &str);

    #[wasm_bindgen(method, js_class = "Player", js_name = cueVideoById)]
    fn cue_video_by_id(this: &YtPlayer, video_id: &str);

    #[wasm_bindgen(method, js_class = "Player", js_name = loadVideoById)]
    fn load_video_by_id(this: &YtPlayer, video_id: &str);
}

thread_local! {
    static API_QUEUE: RefCell<ApiReadyQueue> = RefCell::new(ApiReadyQueue::new());
}

/// A player backed by a live `YT.Player`.
pub struct IframePlayer {
    native: YtPlayer,
}

impl EmbeddedPlayer for IframePlayer {
    fn play_video(&mut self) {
        self.native.play_video();
    }

    fn pause_video(&mut self) {
        self.native.pause_video();
    }

    fn stop_video(&mut self) {
        self.native.stop_video();
    }

    fn set_playback_quality(&mut self, quality: &str) {
        self.native.set_playback_quality(quality);
    }

    fn cue_video_by_id(&mut self, video_id: &str) {
        self.native.cue_video_by_id(video_id);
    }

    fn load_video_by_id(&mut self, video_id: &str) {
        self.native.load_video_by_id(video_id);
    }
}

/// A player shared between the gallery and the iframe callbacks.
pub type SharedPlayer = ytgallery_core::SharedPlayer<IframePlayer>;

/// Whether `YT.Player` is already defined on the page.
pub fn is_api_present() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("YT"))
        .ok()
        .filter(|yt| !yt.is_undefined() && !yt.is_null())
        .and_then(|yt| js_sys::Reflect::get(&yt, &JsValue::from_str("Player")).ok())
        .is_some_and(|player| player.is_function())
}

/// Run `continuation` once the iframe API is available.
///
/// Runs it immediately when the API is already loaded; otherwise queues it
/// and, for the first registrant, starts loading the script.
pub fn when_api_ready(continuation: Continuation) -> Result<()> {
    if is_api_present() {
        API_QUEUE.with_borrow_mut(ApiReadyQueue::mark_present);
    }

    let registration = API_QUEUE.with_borrow_mut(|queue| queue.register(continuation))?;
    match registration {
        Registration::RunNow(run) => run(),
        Registration::Queued { trigger_load: true } => {
            if let Err(e) = install_ready_hook().and_then(|()| load_api_script()) {
                API_QUEUE.with_borrow_mut(|queue| queue.fail(e.to_string()));
                return Err(Error::ApiLoadFailed(e.to_string()));
            }
        }
        Registration::Queued {
            trigger_load: false,
        } => {}
    }
    Ok(())
}

fn install_ready_hook() -> Result<()> {
    let window = dom::window()?;
    let hook_name = JsValue::from_str(API_READY_HOOK);
    let previous = js_sys::Reflect::get(&window, &hook_name)
        .ok()
        .and_then(|hook| hook.dyn_into::<js_sys::Function>().ok());

    let hook = Closure::<dyn Fn()>::new(move || {
        let call_previous = previous.as_ref().map(|previous| {
            move || {
                if let Err(e) = previous.call0(&JsValue::NULL) {
                    leptos::logging::error!("Previous {} hook failed: {:?}", API_READY_HOOK, e);
                }
            }
        });
        let created = API_QUEUE.with(|queue| {
            run_ready_hook(queue, call_previous.as_ref().map(|f| f as &dyn Fn()))
        });
        leptos::logging::log!("Player API ready, created {} player(s)", created);
    });

    js_sys::Reflect::set(&window, &hook_name, hook.as_ref().unchecked_ref()).map_err(js_error)?;
    hook.forget();
    Ok(())
}

fn load_api_script() -> Result<()> {
    let document = dom::document()?;
    let script = document.create_element("script").map_err(js_error)?;
    script
        .set_attribute("src", IFRAME_API_URL)
        .map_err(js_error)?;
    script.set_attribute("async", "").map_err(js_error)?;

    let on_error = Closure::<dyn Fn()>::new(|| {
        let dropped = API_QUEUE.with_borrow_mut(|queue| queue.fail("script failed to load"));
        leptos::logging::error!(
            "Player API script failed to load; {} player(s) not created",
            dropped
        );
    });
    script
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_error.forget();

    let parent: web_sys::Node = match document.head() {
        Some(head) => head.into(),
        None => document
            .body()
            .ok_or_else(|| Error::Browser("document has no head or body".to_string()))?
            .into(),
    };
    parent.append_child(&script).map_err(js_error)?;
    leptos::logging::log!("Loading player API from {}", IFRAME_API_URL);
    Ok(())
}

/// Create the `YT.Player` inside `mount` and wire its notifications into `player`.
pub fn create_iframe_player(player: &SharedPlayer, mount: &web_sys::Element) -> Result<()> {
    let yt_config = create_config_for_yt_player(player.borrow().config());
    let config =
        serde_wasm_bindgen::to_value(&yt_config).map_err(|e| Error::Browser(e.to_string()))?;
    let native = YtPlayer::new(mount, &config).map_err(js_error)?;

    let on_ready = {
        let player = Rc::clone(player);
        Closure::<dyn Fn(JsValue)>::new(move |_event: JsValue| dispatch_ready(&player))
    };
    native.add_event_listener("onReady", on_ready.as_ref().unchecked_ref());
    on_ready.forget();

    let on_state_change = {
        let player = Rc::clone(player);
        Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| {
            let Some(code) = js_sys::Reflect::get(&event, &JsValue::from_str("data"))
                .ok()
                .and_then(|data| data.as_f64())
            else {
                return;
            };
            dispatch_state_change(&player, code as i32);
        })
    };
    native.add_event_listener("onStateChange", on_state_change.as_ref().unchecked_ref());
    on_state_change.forget();

    player.borrow_mut().attach(IframePlayer { native });
    Ok(())
}
