//! Binding action creators to a dispatcher.
//!
//! A bound creator builds its message and dispatches it in one call, so
//! components can trigger state changes without holding the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::message::Message;
use crate::store::Dispatcher;

/// Builds a message from some arguments.
pub type ActionCreator<A, S> = Arc<dyn Fn(A) -> Message<S> + Send + Sync>;

/// An action creator whose result is dispatched immediately.
pub type BoundActionCreator<A, S> =
    Arc<dyn Fn(A) -> Result<Message<S>, StoreError> + Send + Sync>;

/// Binds one action creator. Pass a tuple as `A` for several arguments.
pub fn bind_action_creator<A, S, M, F>(
    creator: F,
    dispatcher: Dispatcher<S>,
) -> impl Fn(A) -> Result<Message<S>, StoreError> + Send + Sync
where
    F: Fn(A) -> M + Send + Sync,
    M: Into<Message<S>>,
{
    move |args| dispatcher(creator(args).into())
}

/// Binds every present creator in `creators`, keyed by name. Entries without
/// a creator are skipped.
pub fn bind_action_creators<A, S, K, I>(
    creators: I,
    dispatcher: Dispatcher<S>,
) -> BTreeMap<String, BoundActionCreator<A, S>>
where
    A: 'static,
    S: 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Option<ActionCreator<A, S>>)>,
{
    creators
        .into_iter()
        .filter_map(|(key, creator)| {
            let creator = creator?;
            let dispatcher = Arc::clone(&dispatcher);
            let bound: BoundActionCreator<A, S> =
                Arc::new(move |args: A| dispatcher(creator(args)));
            Some((key.into(), bound))
        })
        .collect()
}
