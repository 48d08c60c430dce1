mod common;

use std::sync::Arc;

use common::{counter, switch, turn_on, user, Recorder, User};
use serde_json::json;
use statestream::reducer::{Branch, CombinedReducer};
use statestream::{combine_reducers, Action, CombinedState, Key, KeyList, ReducerMap, Store, Symbol};

fn app() -> Store<CombinedState> {
    let reducer: CombinedReducer = combine_reducers(
        ReducerMap::new()
            .branch("count", counter)
            .branch("switch", switch)
            .branch("user", user),
    )
    .unwrap();
    Store::new(reducer)
}

fn set_user(name: &str) -> Action {
    Action::new("SET_USER").with_payload(json!({ "name": name }))
}

fn user_name(branch: &Option<Branch>) -> Option<String> {
    branch
        .clone()
        .and_then(|b| b.downcast::<User>().ok())
        .map(|u| u.name.clone())
}

#[test]
fn key_selection_ignores_changes_elsewhere() {
    let store = app();
    let seen = Recorder::new();
    let _subscription = store
        .select(Key::from("user"))
        .subscribe(seen.listener(user_name));

    store.dispatch(Action::new("INC")).unwrap();
    store.dispatch(turn_on()).unwrap();
    assert_eq!(seen.values(), vec![Some("anonymous".to_string())]);

    store.dispatch(set_user("ada")).unwrap();
    assert_eq!(
        seen.values(),
        vec![Some("anonymous".to_string()), Some("ada".to_string())]
    );
}

#[test]
fn missing_key_selects_nothing() {
    let store = app();
    let selection = store.select(Key::from("nope"));
    assert!(matches!(selection.get(), Some(None)));
}

#[test]
fn symbol_key_selects_nothing_on_named_branches() {
    let store = app();
    let selection = store.select(Key::from(Symbol::new("count")));
    assert!(matches!(selection.get(), Some(None)));
}

#[test]
fn key_list_selects_listed_branches_in_order() {
    let store = app();
    let selection = store.select(KeyList::from(["user", "missing", "count"]));

    let partial = selection.get().unwrap();
    assert_eq!(partial.keys().collect::<Vec<_>>(), vec!["user", "count"]);
    assert_eq!(partial.get::<i64>("count").as_deref(), Some(&0));
}

#[test]
fn key_list_selection_emits_only_when_a_listed_branch_changes() {
    let store = app();
    let seen = Recorder::new();
    let _subscription = store
        .select(KeyList::from(["count", "switch"]))
        .subscribe(seen.listener(|partial: &CombinedState| {
            (
                partial.get::<i64>("count").map(|c| *c),
                partial.get::<bool>("switch").map(|s| *s),
            )
        }));

    store.dispatch(set_user("ada")).unwrap();
    store.dispatch(Action::new("INC")).unwrap();
    store.dispatch(turn_on()).unwrap();

    assert_eq!(
        seen.values(),
        vec![
            (Some(0), Some(false)),
            (Some(1), Some(false)),
            (Some(1), Some(true)),
        ]
    );
}

#[test]
fn function_selection_suppresses_equal_values() {
    let store = app();
    let seen = Recorder::new();
    let is_positive = store.select(|state: &CombinedState| {
        state.get::<i64>("count").is_some_and(|count| *count > 0)
    });
    let _subscription = is_positive.subscribe(seen.listener(|positive: &bool| *positive));

    for _ in 0..3 {
        store.dispatch(Action::new("INC")).unwrap();
    }

    assert_eq!(seen.values(), vec![false, true]);
}

#[test]
fn each_subscriber_gets_the_current_value() {
    let store = app();
    store.dispatch(Action::new("INC")).unwrap();

    let count = store.select(|state: &CombinedState| state.get::<i64>("count").map_or(0, |c| *c));
    let first = Recorder::new();
    let second = Recorder::new();
    let _first = count.subscribe(first.listener(|c: &i64| *c));
    store.dispatch(Action::new("INC")).unwrap();
    let _second = count.subscribe(second.listener(|c: &i64| *c));

    assert_eq!(first.values(), vec![1, 2]);
    assert_eq!(second.values(), vec![2]);
}

#[test]
fn selection_is_lazy_until_subscribed() {
    let store = app();
    let calls = Recorder::new();
    let recorder = calls.clone();
    let selection = store.select(move |state: &CombinedState| {
        recorder.record(());
        state.len()
    });
    assert_eq!(calls.len(), 0);

    store.dispatch(Action::new("INC")).unwrap();
    assert_eq!(calls.len(), 0);

    assert_eq!(selection.get(), Some(3));
    assert_eq!(calls.len(), 1);
}

#[test]
fn mapped_selection_derives_from_the_parent() {
    let store = app();
    let seen = Recorder::new();
    let count = store.select(|state: &CombinedState| state.get::<i64>("count").map_or(0, |c| *c));
    let parity = count.map(|c: &i64| c % 2 == 0);
    let _subscription = parity.subscribe(seen.listener(|even: &bool| *even));

    store.dispatch(Action::new("INC")).unwrap();
    store.dispatch(Action::new("INC")).unwrap();
    store.dispatch(turn_on()).unwrap();

    assert_eq!(seen.values(), vec![true, false, true]);
}

#[test]
fn state_stream_replays_and_follows_the_store() {
    let store = app();
    let seen = Recorder::new();
    let _subscription = store
        .state_stream()
        .subscribe(seen.listener(|state: &Arc<CombinedState>| Arc::clone(state)));

    store.dispatch(Action::new("NOTHING")).unwrap();
    store.dispatch(Action::new("INC")).unwrap();

    let states = seen.values();
    assert_eq!(states.len(), 2);
    assert!(Arc::ptr_eq(&states[1], &store.get_state()));
}

#[test]
fn unsubscribed_selection_stops_receiving() {
    let store = app();
    let seen = Recorder::new();
    let subscription = store
        .select(Key::from("count"))
        .subscribe(seen.listener(|branch: &Option<Branch>| branch.is_some()));

    subscription.unsubscribe();
    store.dispatch(Action::new("INC")).unwrap();

    assert_eq!(seen.len(), 1);
}

#[test]
fn index_key_selects_the_branch_named_by_its_number() {
    let reducer = combine_reducers(
        ReducerMap::new()
            .branch("0", counter)
            .branch("1", switch),
    )
    .unwrap();
    let store = Store::new(reducer);
    let seen = Recorder::new();
    let _subscription = store
        .select(Key::from(0_usize))
        .subscribe(seen.listener(|branch: &Option<Branch>| {
            branch
                .clone()
                .and_then(|b| b.downcast::<i64>().ok())
                .map(|count| *count)
        }));

    store.dispatch(turn_on()).unwrap();
    store.dispatch(Action::new("INC")).unwrap();

    assert_eq!(seen.values(), vec![Some(0), Some(1)]);
    assert!(matches!(store.select(Key::from(2_usize)).get(), Some(None)));
}
