use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::identity::Identical;

/// A type-erased, shared branch of a [`CombinedState`].
pub type Branch = Arc<dyn Any + Send + Sync>;

/// Composite state produced by a combined reducer.
///
/// Branches are kept in insertion order. Each branch is an `Arc`, so
/// unchanged branches keep their identity across transitions.
#[derive(Clone, Default)]
pub struct CombinedState {
    branches: Vec<(String, Branch)>,
}

impl CombinedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            branches: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style insert, handy for initial states.
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, Arc::new(value));
        self
    }

    /// Inserts a branch, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, branch: Branch) -> Option<Branch> {
        let key = key.into();
        match self.branches.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, branch)),
            None => {
                self.branches.push((key, branch));
                None
            }
        }
    }

    pub fn branch(&self, key: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, branch)| branch)
    }

    /// Typed access to a branch. `None` if absent or of another type.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.branch(key)
            .cloned()
            .and_then(|branch| branch.downcast::<T>().ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.branch(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Branch)> {
        self.branches.iter().map(|(key, branch)| (key.as_str(), branch))
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl Identical for CombinedState {
    /// Same keys in the same order, each branch the same `Arc`.
    fn identical(&self, other: &Self) -> bool {
        self.branches.len() == other.branches.len()
            && self
                .branches
                .iter()
                .zip(&other.branches)
                .all(|((ka, a), (kb, b))| ka == kb && a.identical(b))
    }
}

impl fmt::Debug for CombinedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
