//! Derived-state selection.
//!
//! A selector projects the full state onto a derived value. Three shapes are
//! supported:
//!
//! - [`Key`]: one branch, `state[key]`
//! - [`KeyList`]: a partial composite holding only the listed branches
//! - a closure `Fn(&S) -> T`
//!
//! The resulting [`Selection`] only emits when the derived value stops being
//! [`Identical`] to the last one a subscriber saw.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::action::Symbol;
use crate::identity::Identical;
use crate::reducer::{Branch, CombinedState};

use super::core::Core;
use super::subject::Subscription;

/// Names a branch of a keyed state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Index(usize),
    Symbol(Symbol),
}

impl Key {
    /// The branch name this key addresses. Indices address the branch named
    /// by their decimal form; symbols never name a composite branch.
    pub fn as_name(&self) -> Option<Cow<'_, str>> {
        match self {
            Key::Name(name) => Some(Cow::Borrowed(name)),
            Key::Index(index) => Some(Cow::Owned(index.to_string())),
            Key::Symbol(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Key::Symbol(symbol)
    }
}

/// An ordered list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyList(Vec<Key>);

impl KeyList {
    pub fn keys(&self) -> &[Key] {
        &self.0
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for KeyList {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Into<Key>> From<Vec<K>> for KeyList {
    fn from(keys: Vec<K>) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Into<Key>> FromIterator<K> for KeyList {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        KeyList(iter.into_iter().map(Into::into).collect())
    }
}

/// States whose branches can be addressed by [`Key`].
pub trait Keyed {
    fn branch_at(&self, key: &Key) -> Option<Branch>;
}

impl Keyed for CombinedState {
    fn branch_at(&self, key: &Key) -> Option<Branch> {
        key.as_name().and_then(|name| self.branch(&name).cloned())
    }
}

/// Projects the full state onto a derived value.
pub trait Selector<S>: Send + Sync + 'static {
    type Output: Identical + Clone + Send + Sync + 'static;

    fn project(&self, state: &S) -> Self::Output;
}

impl<S: Keyed> Selector<S> for Key {
    type Output = Option<Branch>;

    fn project(&self, state: &S) -> Self::Output {
        state.branch_at(self)
    }
}

impl<S: Keyed> Selector<S> for KeyList {
    type Output = CombinedState;

    /// Keys missing from the state, and symbol keys, are left out.
    fn project(&self, state: &S) -> Self::Output {
        let mut partial = CombinedState::with_capacity(self.0.len());
        for key in &self.0 {
            if let (Some(name), Some(branch)) = (key.as_name(), state.branch_at(key)) {
                partial.insert(name.into_owned(), branch);
            }
        }
        partial
    }
}

impl<S, T, F> Selector<S> for F
where
    F: Fn(&S) -> T + Send + Sync + 'static,
    T: Identical + Clone + Send + Sync + 'static,
{
    type Output = T;

    fn project(&self, state: &S) -> T {
        self(state)
    }
}

type Projection<S, T> = Arc<dyn Fn(&Arc<S>) -> T + Send + Sync>;

/// A lazily evaluated stream of values derived from a store's state.
///
/// Nothing is computed until someone subscribes. Every subscriber receives
/// the current derived value immediately, then each new distinct value.
pub struct Selection<S, T> {
    core: Arc<Core<S>>,
    project: Projection<S, T>,
}

impl<S, T> Selection<S, T>
where
    S: Send + Sync + 'static,
    T: Identical + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(core: Arc<Core<S>>, project: Projection<S, T>) -> Self {
        Self { core, project }
    }

    /// The derived value for the current state.
    pub fn get(&self) -> Option<T> {
        self.core.state().map(|state| (self.project)(&state))
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let project = Arc::clone(&self.project);
        let last: Mutex<Option<T>> = Mutex::new(None);

        self.core.observe(Arc::new(move |state: &Arc<S>| {
            let derived = project(state);
            {
                let mut last = last.lock();
                if last.as_ref().is_some_and(|seen| seen.identical(&derived)) {
                    return;
                }
                *last = Some(derived.clone());
            }
            listener(&derived);
        }))
    }

    /// Derives a further value from this selection.
    pub fn map<U, F>(&self, f: F) -> Selection<S, U>
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
        U: Identical + Clone + Send + Sync + 'static,
    {
        let project = Arc::clone(&self.project);
        Selection::new(
            Arc::clone(&self.core),
            Arc::new(move |state: &Arc<S>| f(&project(state))),
        )
    }
}

impl<S, T> Clone for Selection<S, T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            project: Arc::clone(&self.project),
        }
    }
}
