use std::any::Any;
use std::sync::Arc;

use crate::action::Action;
use crate::error::StoreError;
use crate::identity::Identical;

use super::state::{Branch, CombinedState};
use super::Reducer;

type ErasedReducer = dyn Fn(Option<Branch>, &Action) -> Branch + Send + Sync;

/// A reducer for one branch of a [`CombinedState`], with its concrete state
/// type erased.
#[derive(Clone)]
pub struct BranchReducer {
    reduce: Arc<ErasedReducer>,
}

impl BranchReducer {
    pub fn new<T, R>(reducer: R) -> Self
    where
        T: Any + Send + Sync,
        R: Reducer<T>,
    {
        let reduce = move |previous: Option<Branch>, action: &Action| -> Branch {
            let previous = previous.and_then(|branch| match branch.downcast::<T>() {
                Ok(typed) => Some(typed),
                Err(_) => {
                    tracing::warn!(
                        expected = std::any::type_name::<T>(),
                        "Branch holds a value of another type, reducing from default"
                    );
                    None
                }
            });
            reducer.reduce(previous, action)
        };

        Self {
            reduce: Arc::new(reduce),
        }
    }

    fn reduce(&self, previous: Option<Branch>, action: &Action) -> Branch {
        (self.reduce)(previous, action)
    }
}

impl std::fmt::Debug for BranchReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchReducer").finish_non_exhaustive()
    }
}

/// Named branch reducers, in declaration order.
///
/// An entry may be declared without a reducer (e.g. a feature that is
/// switched off); such entries are dropped by [`combine_reducers`].
#[derive(Clone, Default)]
pub struct ReducerMap {
    entries: Vec<(String, Option<BranchReducer>)>,
}

impl ReducerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch<T, R>(self, key: impl Into<String>, reducer: R) -> Self
    where
        T: Any + Send + Sync,
        R: Reducer<T>,
    {
        self.entry(key, Some(BranchReducer::new(reducer)))
    }

    /// Declares an entry that may have no reducer. A later entry with the
    /// same key replaces an earlier one.
    pub fn entry(mut self, key: impl Into<String>, reducer: Option<BranchReducer>) -> Self {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, reducer));
        self
    }

    /// Number of declared entries, usable or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The reducer produced by [`combine_reducers`].
#[derive(Clone, Debug)]
pub struct CombinedReducer {
    branches: Arc<[(String, BranchReducer)]>,
}

impl CombinedReducer {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|(key, _)| key.as_str())
    }
}

impl Reducer<CombinedState> for CombinedReducer {
    fn reduce(&self, state: Option<Arc<CombinedState>>, action: &Action) -> Arc<CombinedState> {
        let state = state.unwrap_or_default();
        let mut next = CombinedState::with_capacity(self.branches.len());
        let mut has_changed = false;

        for (key, reducer) in self.branches.iter() {
            let previous = state.branch(key).cloned();
            let branch = reducer.reduce(previous.clone(), action);

            has_changed = has_changed || !previous.is_some_and(|p| p.identical(&branch));
            next.insert(key.as_str(), branch);
        }

        if has_changed {
            Arc::new(next)
        } else {
            state
        }
    }
}

/// Turns a map of branch reducers into a single reducer over a
/// [`CombinedState`] shaped like the map.
///
/// When no branch changes, the combined reducer hands back the previous
/// state `Arc` itself, so the store sees "no change".
///
/// # Errors
/// Returns `EmptyReducerMap` if the map has no usable reducer.
pub fn combine_reducers(map: ReducerMap) -> Result<CombinedReducer, StoreError> {
    let branches: Vec<(String, BranchReducer)> = map
        .entries
        .into_iter()
        .filter_map(|(key, reducer)| reducer.map(|reducer| (key, reducer)))
        .collect();

    if branches.is_empty() {
        return Err(StoreError::EmptyReducerMap);
    }

    Ok(CombinedReducer {
        branches: branches.into(),
    })
}
