use browser_state::reducer::reduce;
use browser_state::{
    Action, BrowserState, CaptureActionsMiddleware, ContentAction, FindResultState, Middleware,
    MiddlewareContext, Next, Store, TabId, TabListAction, TabSessionState,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

fn tab(id: &str) -> TabSessionState {
    TabSessionState::new(format!("https://{id}.org")).with_id(id)
}

fn add(id: &str, select: bool) -> TabListAction {
    TabListAction::AddTab {
        tab: tab(id),
        select,
    }
}

fn remove(id: &str) -> TabListAction {
    TabListAction::RemoveTab {
        tab_id: TabId::from(id),
        select_parent_if_exists: false,
    }
}

/// Swallows every action whose name is in the list
struct Swallow(Vec<&'static str>);

impl Middleware for Swallow {
    fn handle(&mut self, _ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        let name = action.name();
        if !self.0.iter().any(|swallowed| *swallowed == name) {
            next.run(action);
        }
    }
}

/// Panics on `Unknown::Boom` without calling next
struct PanicOnBoom;

impl Middleware for PanicOnBoom {
    fn handle(&mut self, _ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        if matches!(&action, Action::Unknown(name) if name == "Boom") {
            panic!("boom");
        }
        next.run(action);
    }
}

/// Answers `Unknown::Ping` with a follow-up `Unknown::Pong`
struct PingPong;

impl Middleware for PingPong {
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        if matches!(&action, Action::Unknown(name) if name == "Ping") {
            ctx.dispatcher().send(Action::Unknown("Pong".to_string()));
        }
        next.run(action);
    }
}

#[tokio::test]
async fn test_add_select_remove_scenario() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();

    store.dispatch(add("a", false)).join().await.unwrap();
    assert_eq!(store.state().selected_tab_id, Some(TabId::from("a")));

    store.dispatch(add("b", true)).join().await.unwrap();
    assert_eq!(store.state().selected_tab_id, Some(TabId::from("b")));

    store.dispatch(remove("b")).join().await.unwrap();
    let state = store.state();
    assert_eq!(state.tab_order, vec![TabId::from("a")]);
    assert_eq!(state.selected_tab_id, Some(TabId::from("a")));
}

#[tokio::test]
async fn test_loading_clears_find_results_scenario() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    let tab_id = TabId::from("a");

    store.dispatch(add("a", true));
    store.dispatch(ContentAction::AddFindResult {
        tab_id: tab_id.clone(),
        find_result: FindResultState::new(1, 3, true),
    });
    store.wait_until_idle().await;
    assert_eq!(store.state().tabs[&tab_id].content.find_results.len(), 1);

    store
        .dispatch(ContentAction::UpdateLoadingState {
            tab_id: tab_id.clone(),
            loading: true,
        })
        .join()
        .await
        .unwrap();

    let state = store.state();
    assert!(state.tabs[&tab_id].content.loading);
    assert!(state.tabs[&tab_id].content.find_results.is_empty());
}

#[tokio::test]
async fn test_removing_first_tab_keeps_selected_second() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    let mozilla = TabSessionState::new("https://mozilla.org");
    let firefox = TabSessionState::new("https://firefox.com");
    let (mozilla_id, firefox_id) = (mozilla.id.clone(), firefox.id.clone());

    store.dispatch(TabListAction::AddTab {
        tab: mozilla,
        select: false,
    });
    store.dispatch(TabListAction::AddTab {
        tab: firefox,
        select: true,
    });
    store
        .dispatch(TabListAction::RemoveTab {
            tab_id: mozilla_id,
            select_parent_if_exists: false,
        })
        .join()
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.tabs.len(), 1);
    assert_eq!(state.tabs[&firefox_id].content.url, "https://firefox.com");
    assert_eq!(state.selected_tab_id, Some(firefox_id));
}

#[tokio::test]
async fn test_loading_stop_keeps_find_results() {
    let store = Store::new(BrowserState::with_tabs(vec![tab("a")], None), Vec::new()).unwrap();
    let tab_id = TabId::from("a");
    let loading = |loading| ContentAction::UpdateLoadingState {
        tab_id: TabId::from("a"),
        loading,
    };

    store.dispatch(loading(true));
    store.dispatch(ContentAction::AddFindResult {
        tab_id: tab_id.clone(),
        find_result: FindResultState::new(0, 1, false),
    });
    store.dispatch(loading(false)).join().await.unwrap();
    assert_eq!(
        store.state().tabs[&tab_id].content.find_results,
        vec![FindResultState::new(0, 1, false)]
    );

    store.dispatch(loading(true)).join().await.unwrap();
    assert!(store.state().tabs[&tab_id].content.find_results.is_empty());
}

#[tokio::test]
async fn test_swallowed_action_changes_nothing() {
    let store = Store::new(
        BrowserState::with_tabs(vec![tab("a")], None),
        vec![Box::new(Swallow(vec!["TabList::SelectTab"]))],
    )
    .unwrap();
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let _subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let before = store.state();

    store
        .dispatch(TabListAction::SelectTab {
            tab_id: TabId::from("a"),
        })
        .join()
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&before, &store.state()));
    assert_eq!(store.state().selected_tab_id, None);
    // Only the delivery on registration
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_action_resolves_without_change() {
    let store = Store::new(BrowserState::with_tabs(vec![tab("a")], None), Vec::new()).unwrap();
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let _subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let before = store.state();

    let result = store
        .dispatch(Action::Unknown("SomethingNew".to_string()))
        .join()
        .await;

    assert!(result.is_ok());
    assert!(Arc::ptr_eq(&before, &store.state()));
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_replaying_actions_reproduces_state() {
    let capture = CaptureActionsMiddleware::new();
    let captured = capture.captured();
    let store = Store::new(BrowserState::default(), vec![Box::new(capture)]).unwrap();

    store.dispatch(add("a", false));
    store.dispatch(add("b", true));
    store.dispatch(TabListAction::AddTab {
        tab: TabSessionState::private("https://private.org").with_id("p"),
        select: false,
    });
    store.dispatch(ContentAction::UpdateTitle {
        tab_id: TabId::from("a"),
        title: "A".to_string(),
    });
    store.dispatch(ContentAction::UpdateUrl {
        tab_id: TabId::from("b"),
        url: "https://b.org/next".to_string(),
    });
    store.dispatch(remove("b"));
    store.dispatch(Action::Unknown("Ignored".to_string()));
    store.wait_until_idle().await;

    let replayed = captured
        .all()
        .iter()
        .fold(Arc::new(BrowserState::default()), |state, action| {
            reduce(state, action)
        });

    let mut live = (*store.state()).clone();
    live.version = 0;
    assert_eq!(live, *replayed);
    assert_eq!(captured.count("Unknown::Ignored"), 1);
}

#[tokio::test]
async fn test_selection_never_dangles() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    let violations = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&violations);
    let _subscription = store.subscribe(move |state| {
        if let Some(selected) = &state.selected_tab_id {
            if !state.tabs.contains_key(selected) {
                seen.lock().unwrap().push(state.version);
            }
        }
    });

    for i in 0..20 {
        store.dispatch(add(&format!("tab-{i}"), i % 3 == 0));
        if i % 4 == 3 {
            store.dispatch(remove(&format!("tab-{}", i - 1)));
            store.dispatch(TabListAction::SelectTab {
                tab_id: TabId::from(format!("tab-{}", i - 2)),
            });
        }
    }
    store.dispatch(TabListAction::RemoveTabs {
        tab_ids: (0..10).map(|i| TabId::from(format!("tab-{i}"))).collect(),
    });
    store.wait_until_idle().await;
    assert!(store.state().selected_tab_id.is_some());

    store.dispatch(TabListAction::RemoveAllTabs).join().await.unwrap();

    assert_eq!(store.state().selected_tab_id, None);
    assert!(violations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_selector_subscriber_not_woken_by_other_tabs() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    store.dispatch(add("a", true)).join().await.unwrap();

    let selections = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&selections);
    let _subscription = store.subscribe_to(
        |state| state.selected_tab_id.clone(),
        move |selected: &Option<TabId>| seen.lock().unwrap().push(selected.clone()),
    );

    store.dispatch(add("b", false));
    store.dispatch(ContentAction::UpdateTitle {
        tab_id: TabId::from("b"),
        title: "B".to_string(),
    });
    store.dispatch(ContentAction::UpdateProgress {
        tab_id: TabId::from("a"),
        progress: 40,
    });
    store
        .dispatch(TabListAction::SelectTab {
            tab_id: TabId::from("b"),
        })
        .join()
        .await
        .unwrap();

    assert_eq!(
        *selections.lock().unwrap(),
        vec![Some(TabId::from("a")), Some(TabId::from("b"))]
    );
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(store.subscriber_count(), 1);

    subscription.unsubscribe();
    store.dispatch(add("a", true)).join().await.unwrap();

    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_dispatch_keeps_per_thread_order() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 50;

    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    store.dispatch(add(&format!("t{t}-{i}"), false));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    store
        .dispatch(Action::Unknown("Barrier".to_string()))
        .wait()
        .unwrap();

    let state = store.state();
    assert_eq!(state.tabs.len(), THREADS * PER_THREAD);
    assert_eq!(state.version, (THREADS * PER_THREAD) as u64);
    for t in 0..THREADS {
        let positions: Vec<usize> = (0..PER_THREAD)
            .map(|i| {
                let id = TabId::from(format!("t{t}-{i}"));
                state.tab_order.iter().position(|tab| *tab == id).unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[tokio::test]
async fn test_panicking_middleware_passes_action_on() {
    let capture = CaptureActionsMiddleware::new();
    let captured = capture.captured();
    let store = Store::new(
        BrowserState::default(),
        vec![Box::new(PanicOnBoom), Box::new(capture)],
    )
    .unwrap();

    store
        .dispatch(Action::Unknown("Boom".to_string()))
        .join()
        .await
        .unwrap();
    store.dispatch(add("a", true)).join().await.unwrap();

    assert_eq!(captured.names(), vec!["Unknown::Boom", "TabList::AddTab"]);
    assert_eq!(store.state().tabs.len(), 1);
}

#[tokio::test]
async fn test_panicking_subscriber_does_not_stop_others() {
    let store = Store::new(BrowserState::default(), Vec::new()).unwrap();
    let _faulty = store.subscribe(|state| {
        if state.version > 0 {
            panic!("subscriber failed");
        }
    });
    let versions = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&versions);
    let _healthy = store.subscribe(move |state| seen.lock().unwrap().push(state.version));

    store.dispatch(add("a", true));
    store.dispatch(add("b", true)).join().await.unwrap();

    assert_eq!(*versions.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_nested_dispatch_runs_after_current_action() {
    let capture = CaptureActionsMiddleware::new();
    let captured = capture.captured();
    let store = Store::new(
        BrowserState::default(),
        vec![Box::new(PingPong), Box::new(capture)],
    )
    .unwrap();

    store.dispatch(Action::Unknown("Ping".to_string()));
    store.wait_until_idle().await;

    assert_eq!(captured.names(), vec!["Unknown::Ping", "Unknown::Pong"]);
}
