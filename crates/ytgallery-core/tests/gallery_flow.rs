//! End-to-end gallery flows against a recording player backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use ytgallery_core::{
    ApiLoadState, ApiReadyQueue, ClickAction, DescriptionPanel, EmbeddedPlayer, Error,
    Gallery, GalleryConfig, LeafRenderer, LeafTarget, LinkClick, Platform, Player, PlayerConfig,
    PlayerEvent, Registration, SelectionOutcome, VideoCatalog, VideoLeafRenderer, dispatch_ready,
    dispatch_state_change,
};

type Calls = Rc<RefCell<Vec<String>>>;

struct RecordingBackend {
    calls: Calls,
}

impl EmbeddedPlayer for RecordingBackend {
    fn play_video(&mut self) {
        self.calls.borrow_mut().push("play".to_string());
    }
    fn pause_video(&mut self) {
        self.calls.borrow_mut().push("pause".to_string());
    }
    fn stop_video(&mut self) {
        self.calls.borrow_mut().push("stop".to_string());
    }
    fn set_playback_quality(&mut self, quality: &str) {
        self.calls.borrow_mut().push(format!("quality:{quality}"));
    }
    fn cue_video_by_id(&mut self, video_id: &str) {
        self.calls.borrow_mut().push(format!("cue:{video_id}"));
    }
    fn load_video_by_id(&mut self, video_id: &str) {
        self.calls.borrow_mut().push(format!("load:{video_id}"));
    }
}

#[derive(Clone, Default)]
struct RecordingPanel {
    content: Rc<RefCell<Option<String>>>,
}

impl DescriptionPanel for RecordingPanel {
    fn set_description(&mut self, text: &str) {
        *self.content.borrow_mut() = Some(text.to_string());
    }
}

type SharedPlayer = ytgallery_core::SharedPlayer<RecordingBackend>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ytgallery_core=debug")
        .with_test_writer()
        .try_init();
}

fn new_player() -> SharedPlayer {
    let config = PlayerConfig::from_overrides(GalleryConfig::default().player).unwrap();
    Rc::new(RefCell::new(Player::new(config, Platform::Desktop)))
}

/// Queue creation of `player` and return whether a script load was requested.
fn register(queue: &mut ApiReadyQueue, player: &SharedPlayer, calls: &Calls) -> bool {
    let player = Rc::clone(player);
    let calls = Rc::clone(calls);
    let create = Box::new(move || {
        player.borrow_mut().attach(RecordingBackend { calls });
        dispatch_ready(&player);
    });

    match queue.register(create).unwrap() {
        Registration::Queued { trigger_load } => trigger_load,
        Registration::RunNow(run) => {
            run();
            false
        }
    }
}

#[test]
fn test_selecting_playable_leaf_plays_and_describes() {
    init_tracing();
    let catalog = VideoCatalog::from_json_str(
        r#"{"title": "A", "url": "https://youtu.be/abc123", "description": "D1"}"#,
    )
    .unwrap();

    let calls: Calls = Rc::default();
    let mut queue = ApiReadyQueue::new();
    let player = new_player();
    assert!(register(&mut queue, &player, &calls));
    for create in queue.take_ready() {
        create();
    }

    let panel = RecordingPanel::default();
    let mut gallery = Gallery::new(
        catalog,
        Rc::clone(&player),
        panel.clone(),
        &GalleryConfig::default(),
    );

    let leaf = gallery.render_leaf(&gallery.catalog().leaves()[0].clone());
    let title = leaf.find_by_class("video-item-title").unwrap();
    assert_eq!(
        gallery.intercept_click(LinkClick::from_classes(title.classes.iter().map(String::as_str))),
        ClickAction::SuppressNavigation
    );

    let outcome = gallery.select_leaf(&LeafTarget::from_element(title)).unwrap();
    assert_eq!(
        outcome,
        SelectionOutcome::Played {
            video_id: "abc123".to_string()
        }
    );
    assert_eq!(*calls.borrow(), vec!["load:abc123".to_string()]);
    assert_eq!(panel.content.borrow().as_deref(), Some("D1"));
}

#[test]
fn test_external_leaf_navigates_in_new_context() {
    init_tracing();
    let catalog =
        VideoCatalog::from_json_str(r#"[{"title": "B", "url": "https://example.com/x"}]"#)
            .unwrap();
    let calls: Calls = Rc::default();
    let player = new_player();
    player.borrow_mut().attach(RecordingBackend {
        calls: Rc::clone(&calls),
    });
    dispatch_ready(&player);

    let panel = RecordingPanel::default();
    let mut gallery = Gallery::new(catalog, player, panel.clone(), &GalleryConfig::default());

    let item = gallery.catalog().items()[0].clone();
    let leaf = VideoLeafRenderer.render_leaf(&item);
    let title = leaf.find_by_class("video-item-title").unwrap();

    let action =
        gallery.intercept_click(LinkClick::from_classes(title.classes.iter().map(String::as_str)));
    assert_eq!(action, ClickAction::OpenInNewContext);
    assert_eq!(
        gallery.select_leaf(&LeafTarget::from_element(title)).unwrap(),
        SelectionOutcome::Ignored
    );
    assert!(calls.borrow().is_empty());
    assert!(panel.content.borrow().is_none());
}

#[test]
fn test_second_player_does_not_drop_first_creation() {
    init_tracing();
    let calls: Calls = Rc::default();
    let mut queue = ApiReadyQueue::new();
    let first = new_player();
    let second = new_player();

    assert!(register(&mut queue, &first, &calls));
    assert!(!register(&mut queue, &second, &calls));
    assert!(!first.borrow().is_ready());

    let order = Rc::new(RefCell::new(Vec::new()));
    for (name, player) in [("first", &first), ("second", &second)] {
        let order = Rc::clone(&order);
        player
            .borrow_mut()
            .on(PlayerEvent::Ready, move || order.borrow_mut().push(name));
    }

    for create in queue.take_ready() {
        create();
    }

    assert!(first.borrow().is_ready());
    assert!(second.borrow().is_ready());
    assert_eq!(*order.borrow(), vec!["first", "second"]);

    let third = new_player();
    assert!(!register(&mut queue, &third, &calls));
    assert!(third.borrow().is_ready());
}

#[test]
fn test_ready_listener_starts_initial_video() {
    init_tracing();
    let calls: Calls = Rc::default();
    let mut queue = ApiReadyQueue::new();
    let player = new_player();

    let handle = Rc::downgrade(&player);
    player.borrow_mut().on(PlayerEvent::Ready, move || {
        let player = handle.upgrade().unwrap();
        let video_id = player.borrow().config().video_id.clone().unwrap();
        player.borrow_mut().load_video(&video_id).unwrap();
    });
    let handle = Rc::downgrade(&player);
    player.borrow_mut().on(PlayerEvent::Cued, move || {
        handle.upgrade().unwrap().borrow_mut().play().unwrap();
    });

    assert!(register(&mut queue, &player, &calls));
    for create in queue.take_ready() {
        create();
    }
    dispatch_state_change(&player, 5);

    assert_eq!(
        *calls.borrow(),
        vec!["cue:viiDaLpPfN4".to_string(), "play".to_string()]
    );
}

#[test]
fn test_failed_load_is_reported() {
    init_tracing();
    let calls: Calls = Rc::default();
    let mut queue = ApiReadyQueue::new();
    let player = new_player();
    register(&mut queue, &player, &calls);

    assert_eq!(queue.fail("script error"), 1);
    assert!(matches!(queue.state(), ApiLoadState::Failed(_)));

    let late = Box::new(|| {});
    assert!(matches!(queue.register(late), Err(Error::ApiLoadFailed(_))));
    assert!(!player.borrow().is_ready());
    assert!(matches!(
        player.borrow_mut().play(),
        Err(Error::PlayerNotReady { command: "play" })
    ));
}
