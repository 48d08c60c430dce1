//! The store: owner of the state tree.
//!
//! A store applies actions to the state through the current reducer, one at
//! a time, and notifies subscribers whenever the committed state changes.
//!
//! # Architecture
//!
//! ```text
//! dispatch ──→ middleware chain ──→ reducer step ──→ Subject ──→ listeners
//!                                                         └──→ selections
//! ```
//!
//! - `core.rs` - reducer step, serialization of transitions
//! - `subject.rs` - observer list with replay of the last value
//! - `select.rs` - derived streams with change suppression

mod core;
mod select;
mod subject;

use std::sync::Arc;

use crate::action::Action;
use crate::error::StoreError;
use crate::message::Message;
use crate::middleware::Enhancer;
use crate::reducer::{Reducer, SharedReducer};

use self::core::Core;

pub use select::{Key, KeyList, Keyed, Selection, Selector};
pub use subject::Subscription;

/// A dispatch function: the raw reducer step, or a middleware-wrapped one.
pub type Dispatcher<S> = Arc<dyn Fn(Message<S>) -> Result<Message<S>, StoreError> + Send + Sync>;

/// Builds a [`Dispatcher`] from a closure.
pub fn dispatcher<S, F>(dispatch: F) -> Dispatcher<S>
where
    F: Fn(Message<S>) -> Result<Message<S>, StoreError> + Send + Sync + 'static,
{
    Arc::new(dispatch)
}

/// Creates a store from a reducer and an optional initial state. Enhancers
/// wrap one of these to produce an augmented store.
///
/// The store it returns has not applied the init action yet; read its state
/// with [`Store::try_get_state`] until [`StoreBuilder::build`] dispatches it.
pub type StoreFactory<S> = Box<dyn FnOnce(SharedReducer<S>, Option<Arc<S>>) -> Store<S> + Send>;

/// Holds the application's state tree.
///
/// Handles are cheap to clone and share the same state.
pub struct Store<S> {
    core: Arc<Core<S>>,
    dispatcher: Dispatcher<S>,
}

impl<S> Store<S>
where
    S: Send + Sync + 'static,
{
    /// Creates a plain store and initializes it from the reducer's defaults.
    pub fn new<R: Reducer<S>>(reducer: R) -> Self {
        let store = Self::plain(Arc::new(reducer), None);
        store.core.apply(&Action::init());
        store
    }

    /// Starts a store with construction options, such as an initial state or an enhancer.
    pub fn builder<R: Reducer<S>>(reducer: R) -> StoreBuilder<S> {
        StoreBuilder {
            reducer: Arc::new(reducer),
            initial_state: None,
            enhancer: None,
        }
    }

    /// A store whose dispatcher is the raw reducer step. The init action has
    /// not been applied yet.
    pub(crate) fn plain(reducer: SharedReducer<S>, initial_state: Option<Arc<S>>) -> Self {
        let core = Arc::new(Core::new(reducer, initial_state));
        let raw = Arc::clone(&core);
        Self {
            core,
            dispatcher: dispatcher(move |message| raw.dispatch(message)),
        }
    }

    /// The latest committed state.
    ///
    /// # Panics
    /// Stores from [`new`](Store::new) and [`StoreBuilder::build`] are always
    /// initialized, so this never fails for them. Only an enhancer holds a
    /// store before its init action ran; it should use
    /// [`try_get_state`](Store::try_get_state) there.
    pub fn get_state(&self) -> Arc<S> {
        self.core
            .state()
            .expect("store state read before the init action was applied")
    }

    /// Like [`get_state`](Store::get_state), but `None` before
    /// initialization.
    pub fn try_get_state(&self) -> Option<Arc<S>> {
        self.core.state()
    }

    /// Sends a message down the dispatch pipeline.
    ///
    /// Returns the same message on success. Listeners are notified before
    /// this returns if the state changed.
    ///
    /// # Errors
    /// Returns `MalformedAction` if a message that is not a plain action
    /// reaches the reducer step. State is left untouched.
    pub fn dispatch(&self, message: impl Into<Message<S>>) -> Result<Message<S>, StoreError> {
        (self.dispatcher)(message.into())
    }

    /// The dispatcher this store uses, for binding action creators or
    /// handing to other components.
    pub fn dispatcher(&self) -> Dispatcher<S> {
        Arc::clone(&self.dispatcher)
    }

    /// The same store with `dispatcher` in front of it. Used by enhancers.
    pub fn with_dispatcher(self, dispatcher: Dispatcher<S>) -> Self {
        Self {
            core: self.core,
            dispatcher,
        }
    }

    /// Registers a listener for committed states.
    ///
    /// The listener receives the current state immediately, then every
    /// new state. No-op transitions are not reported.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        self.core.observe(Arc::new(listener))
    }

    /// Swaps the reducer and re-initializes through it, so the new reducer's
    /// defaults fill whatever the current state lacks.
    pub fn replace_reducer<R: Reducer<S>>(&self, reducer: R) {
        self.core.replace_reducer(Arc::new(reducer));
    }

    /// A stream of values derived from the state.
    pub fn select<Sel: Selector<S>>(&self, selector: Sel) -> Selection<S, Sel::Output> {
        Selection::new(
            Arc::clone(&self.core),
            Arc::new(move |state: &Arc<S>| selector.project(state)),
        )
    }

    /// The full state as a stream.
    pub fn state_stream(&self) -> Selection<S, Arc<S>> {
        Selection::new(
            Arc::clone(&self.core),
            Arc::new(|state: &Arc<S>| Arc::clone(state)),
        )
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Labeled construction options for a [`Store`].
pub struct StoreBuilder<S> {
    reducer: SharedReducer<S>,
    initial_state: Option<Arc<S>>,
    enhancer: Option<Enhancer<S>>,
}

impl<S> StoreBuilder<S>
where
    S: Send + Sync + 'static,
{
    /// Starts from `state` instead of the reducer's defaults, e.g. to
    /// hydrate a previously saved session.
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(Arc::new(state));
        self
    }

    /// Wraps store creation, e.g. with [`apply_middleware`](crate::middleware::apply_middleware).
    pub fn enhancer(mut self, enhancer: Enhancer<S>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Creates the store and dispatches the init action through the full
    /// pipeline, so middleware observes it.
    ///
    /// # Errors
    /// Propagates an error raised by middleware while handling the init
    /// action.
    pub fn build(self) -> Result<Store<S>, StoreError> {
        let factory: StoreFactory<S> = Box::new(Store::plain);
        let factory = match self.enhancer {
            Some(enhancer) => enhancer(factory),
            None => factory,
        };

        let store = factory(self.reducer, self.initial_state);
        store.dispatch(Action::init())?;
        Ok(store)
    }
}
