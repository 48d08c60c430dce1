//! Reducers: pure state transition functions.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **Reducer**: `(previous state, action) -> next state`, no side effects
//! - **ReducerMap**: named branch reducers, merged by [`combine_reducers`]
//! - **CombinedState**: the composite state a combined reducer produces

mod combine;
mod state;

use std::sync::Arc;

use crate::action::Action;

pub use combine::{combine_reducers, BranchReducer, CombinedReducer, ReducerMap};
pub use state::{Branch, CombinedState};

/// Transforms state based on actions.
///
/// `state` is `None` when there is no previous state; the reducer supplies
/// its own default. Returning the same `Arc` means "nothing changed" and
/// suppresses notification, so reducers should only allocate a new state
/// when something actually differs.
pub trait Reducer<S>: Send + Sync + 'static {
    fn reduce(&self, state: Option<Arc<S>>, action: &Action) -> Arc<S>;
}

impl<S, F> Reducer<S> for F
where
    F: Fn(Option<Arc<S>>, &Action) -> Arc<S> + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<Arc<S>>, action: &Action) -> Arc<S> {
        self(state, action)
    }
}

/// A reducer shared between the store and whoever installed it.
pub type SharedReducer<S> = Arc<dyn Reducer<S>>;
