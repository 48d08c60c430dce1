//! Values travelling through the dispatch pipeline.
//!
//! Middleware sees every [`Message`]; only plain actions survive the final
//! reducer step. Thunks and custom values must be resolved by middleware
//! before they get there.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::action::Action;
use crate::error::StoreError;
use crate::middleware::MiddlewareApi;

/// Anything that can be handed to `dispatch`.
pub enum Message<S> {
    /// A plain action, applied by the reducer step.
    Action(Action),
    /// A deferred producer of dispatches, run by the thunk middleware.
    Thunk(Thunk<S>),
    /// An opaque value for third-party middleware.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl<S> Message<S> {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Message::Custom(Arc::new(value))
    }

    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Message::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Whether the reducer step would accept this message.
    pub fn is_plain_action(&self) -> bool {
        self.as_action()
            .is_some_and(|action| action.action_type().is_valid())
    }
}

/// Tests whether a message is a plain action with a non-empty type.
pub fn is_plain_action<S>(message: &Message<S>) -> bool {
    message.is_plain_action()
}

impl<S> Clone for Message<S> {
    fn clone(&self) -> Self {
        match self {
            Message::Action(action) => Message::Action(action.clone()),
            Message::Thunk(thunk) => Message::Thunk(thunk.clone()),
            Message::Custom(value) => Message::Custom(Arc::clone(value)),
        }
    }
}

impl<S> fmt::Debug for Message<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Message::Thunk(_) => f.write_str("Thunk(..)"),
            Message::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<S> From<Action> for Message<S> {
    fn from(action: Action) -> Self {
        Message::Action(action)
    }
}

impl<S> From<Thunk<S>> for Message<S> {
    fn from(thunk: Thunk<S>) -> Self {
        Message::Thunk(thunk)
    }
}

type ThunkFn<S> = dyn Fn(&MiddlewareApi<S>) -> Result<(), StoreError> + Send + Sync;

/// A deferred action producer.
///
/// It receives the middleware capability object, so it can read state and
/// dispatch (now or later, from another thread) through the full chain.
pub struct Thunk<S>(Arc<ThunkFn<S>>);

impl<S> Thunk<S> {
    pub fn new<F>(thunk: F) -> Self
    where
        F: Fn(&MiddlewareApi<S>) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        Self(Arc::new(thunk))
    }

    pub fn run(&self, api: &MiddlewareApi<S>) -> Result<(), StoreError> {
        (self.0)(api)
    }
}

impl<S> Clone for Thunk<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
