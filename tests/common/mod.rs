//! Shared test fixtures: reducers, spies and tracing setup.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use parking_lot::Mutex;
use statestream::{Action, CombinedState, Identical};
use tracing_subscriber::EnvFilter;

pub const SWITCH_ON: &str = "SWITCH_ON";
pub const SWITCH_OFF: &str = "SWITCH_OFF";

pub fn turn_on() -> Action {
    Action::new(SWITCH_ON)
}

pub fn turn_off() -> Action {
    Action::new(SWITCH_OFF)
}

/// `false` by default; returns the previous `Arc` when the switch does not move.
pub fn switch(state: Option<Arc<bool>>, action: &Action) -> Arc<bool> {
    let state = state.unwrap_or_else(|| Arc::new(false));
    let target = if action.is(SWITCH_ON) {
        true
    } else if action.is(SWITCH_OFF) {
        false
    } else {
        return state;
    };

    if *state == target {
        state
    } else {
        Arc::new(target)
    }
}

/// Counts `INC` actions. Anything else is a no-op.
pub fn counter(state: Option<Arc<i64>>, action: &Action) -> Arc<i64> {
    let state = state.unwrap_or_default();
    if action.is("INC") {
        Arc::new(*state + 1)
    } else {
        state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

/// Replaces the user on `SET_USER` with a `{ "name": .. }` payload.
pub fn user(state: Option<Arc<User>>, action: &Action) -> Arc<User> {
    let state = state.unwrap_or_else(|| {
        Arc::new(User {
            name: "anonymous".to_string(),
        })
    });
    if !action.is("SET_USER") {
        return state;
    }
    match action.payload().and_then(|p| p.get("name")).and_then(|n| n.as_str()) {
        Some(name) if name != state.name => Arc::new(User {
            name: name.to_string(),
        }),
        _ => state,
    }
}

/// Records every value it is handed, in order.
#[derive(Clone)]
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, value: T) {
        self.seen.lock().push(value);
    }

    /// A listener closure feeding this recorder.
    pub fn listener<U>(
        &self,
        map: impl Fn(&U) -> T + Send + Sync + 'static,
    ) -> impl Fn(&U) + Send + Sync + 'static
    where
        U: ?Sized + 'static,
    {
        let seen = Arc::clone(&self.seen);
        move |value: &U| seen.lock().push(map(value))
    }

    pub fn values(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

/// Installs a test-friendly tracing subscriber. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statestream=debug")),
        )
        .with_test_writer()
        .try_init();
}
