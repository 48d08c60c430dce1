//! Middleware: dispatch interceptors between callers and the reducer step.
//!
//! # Architecture
//!
//! ```text
//! store.dispatch(msg)
//!        │
//!        ▼
//!   ┌─────────┐   ┌─────────┐         ┌───────────┐
//!   │ first   │──→│ second  │──→ … ──→│ raw step  │
//!   └─────────┘   └─────────┘         └───────────┘
//!        ▲             ▲
//!        └── api.dispatch re-enters here
//! ```
//!
//! A middleware receives a [`MiddlewareApi`] and the `next` dispatcher, and
//! returns its own dispatcher. The first-listed middleware is outermost.

mod logger;
mod thunk;

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::compose::{compose, Unary};
use crate::error::StoreError;
use crate::message::Message;
use crate::reducer::SharedReducer;
use crate::store::{dispatcher, Dispatcher, Store, StoreFactory};

pub use logger::{logger, LoggerMiddleware};
pub use thunk::{thunk, ThunkMiddleware};

/// Wraps store creation to add a capability, such as a middleware chain.
pub type Enhancer<S> = Box<dyn FnOnce(StoreFactory<S>) -> StoreFactory<S> + Send>;

/// A dispatch interceptor.
///
/// `wrap` is called exactly once per store, when the chain is built. The
/// returned dispatcher is called for every message; it may forward to
/// `next`, swallow the message, or dispatch new ones through `api`.
pub trait Middleware<S>: Send + Sync + 'static {
    fn wrap(&self, api: MiddlewareApi<S>, next: Dispatcher<S>) -> Dispatcher<S>;
}

impl<S, F> Middleware<S> for F
where
    F: Fn(MiddlewareApi<S>, Dispatcher<S>) -> Dispatcher<S> + Send + Sync + 'static,
{
    fn wrap(&self, api: MiddlewareApi<S>, next: Dispatcher<S>) -> Dispatcher<S> {
        self(api, next)
    }
}

/// Shares a middleware closure, pinning down its argument types.
pub fn middleware<S, F>(wrap: F) -> Arc<dyn Middleware<S>>
where
    S: 'static,
    F: Fn(MiddlewareApi<S>, Dispatcher<S>) -> Dispatcher<S> + Send + Sync + 'static,
{
    Arc::new(wrap)
}

type WeakDispatcher<S> = Weak<dyn Fn(Message<S>) -> Result<Message<S>, StoreError> + Send + Sync>;

/// The capabilities handed to middleware: read the state and dispatch
/// through the whole chain.
///
/// The api handed to `wrap` refers to the chain weakly, since the chain
/// owns it. Clones made once the chain is installed (e.g. one moved into a
/// thunk or a spawned task) hold the chain strongly, so they keep
/// dispatching through every middleware even after all store handles are
/// gone.
pub struct MiddlewareApi<S> {
    store: Store<S>,
    slot: Arc<RwLock<Option<WeakDispatcher<S>>>>,
    pinned: Option<Dispatcher<S>>,
}

impl<S> MiddlewareApi<S> {
    fn chain(&self) -> Option<Dispatcher<S>> {
        self.pinned
            .clone()
            .or_else(|| self.slot.read().as_ref().and_then(Weak::upgrade))
    }
}

impl<S> MiddlewareApi<S>
where
    S: Send + Sync + 'static,
{
    fn new(store: Store<S>) -> Self {
        Self {
            store,
            slot: Arc::new(RwLock::new(None)),
            pinned: None,
        }
    }

    fn install(&self, chain: &Dispatcher<S>) {
        *self.slot.write() = Some(Arc::downgrade(chain));
    }

    /// The committed state, or `None` while the store is still initializing.
    pub fn get_state(&self) -> Option<Arc<S>> {
        self.store.try_get_state()
    }

    /// Dispatches through the full chain, starting at the outermost
    /// middleware. Until the chain is installed (i.e. from inside `wrap`)
    /// this falls back to the raw step.
    pub fn dispatch(&self, message: impl Into<Message<S>>) -> Result<Message<S>, StoreError> {
        match self.chain() {
            Some(chain) => chain(message.into()),
            None => self.store.dispatch(message),
        }
    }

    /// [`dispatch`](MiddlewareApi::dispatch) as a standalone dispatcher.
    pub fn dispatcher(&self) -> Dispatcher<S> {
        let api = self.clone();
        dispatcher(move |message| api.dispatch(message))
    }
}

impl<S> Clone for MiddlewareApi<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            slot: Arc::clone(&self.slot),
            pinned: self.chain(),
        }
    }
}

/// Creates an enhancer that routes every dispatch through `middlewares`.
///
/// `apply_middleware(vec![a, b])` runs `a` before `b` on the way in and
/// after it on the way out. With no middleware the store behaves like a
/// plain one.
pub fn apply_middleware<S>(middlewares: Vec<Arc<dyn Middleware<S>>>) -> Enhancer<S>
where
    S: Send + Sync + 'static,
{
    Box::new(move |create_store: StoreFactory<S>| -> StoreFactory<S> {
        Box::new(
            move |reducer: SharedReducer<S>, initial_state: Option<Arc<S>>| -> Store<S> {
                let store = create_store(reducer, initial_state);
                let api = MiddlewareApi::new(store.clone());

                let chain: Vec<Unary<Dispatcher<S>>> = middlewares
                    .into_iter()
                    .map(|middleware| {
                        let api = api.clone();
                        let wrap: Unary<Dispatcher<S>> =
                            Arc::new(move |next: Dispatcher<S>| middleware.wrap(api.clone(), next));
                        wrap
                    })
                    .collect();
                tracing::debug!(count = chain.len(), "Applying middleware");

                let augmented = compose(chain)(store.dispatcher());
                api.install(&augmented);
                store.with_dispatcher(augmented)
            },
        )
    })
}
