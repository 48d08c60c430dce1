mod common;

use std::sync::Arc;

use common::{counter, switch, turn_off, turn_on, SWITCH_ON};
use statestream::bind::ActionCreator;
use statestream::{bind_action_creator, bind_action_creators, Action, Message, Store};

#[test]
fn bound_creator_dispatches_its_action() {
    let store = Store::new(switch);
    let switch_on = bind_action_creator(|(): ()| turn_on(), store.dispatcher());

    let returned = switch_on(()).unwrap();

    assert!(returned.as_action().is_some_and(|a| a.is(SWITCH_ON)));
    assert!(*store.get_state());
}

#[test]
fn bound_creator_forwards_its_arguments() {
    let store = Store::new(counter);
    let add = bind_action_creator(
        |times: usize| Action::new("INC").with_payload(times),
        store.dispatcher(),
    );

    let returned = add(3).unwrap();

    let payload = returned.as_action().and_then(|a| a.payload_as::<usize>().ok());
    assert_eq!(payload, Some(3));
    assert_eq!(*store.get_state(), 1);
}

#[test]
fn creators_are_bound_by_name_and_absent_ones_skipped() {
    let store = Store::new(switch);
    let on: ActionCreator<(), bool> = Arc::new(|()| Message::<bool>::from(turn_on()));
    let off: ActionCreator<(), bool> = Arc::new(|()| Message::<bool>::from(turn_off()));

    let bound = bind_action_creators(
        vec![("on", Some(on)), ("toggle", None), ("off", Some(off))],
        store.dispatcher(),
    );

    assert_eq!(bound.keys().collect::<Vec<_>>(), vec!["off", "on"]);

    bound["on"](()).unwrap();
    assert!(*store.get_state());
    bound["off"](()).unwrap();
    assert!(!*store.get_state());
}

#[test]
fn bound_creator_reports_dispatch_errors() {
    let store = Store::new(counter);
    let broken = bind_action_creator(|(): ()| Action::new(""), store.dispatcher());

    assert!(broken(()).is_err());
    assert_eq!(*store.get_state(), 0);
}
