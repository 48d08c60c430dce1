use std::sync::Arc;

use crate::message::Message;
use crate::store::{dispatcher, Dispatcher};

use super::{Middleware, MiddlewareApi};

/// Runs [`Thunk`](crate::message::Thunk) messages instead of forwarding
/// them. Everything else passes through.
///
/// A thunk gets the middleware api, so it can read the state and dispatch
/// through the whole chain, now or later from another thread. The thunk
/// message itself is returned to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThunkMiddleware;

impl<S> Middleware<S> for ThunkMiddleware
where
    S: Send + Sync + 'static,
{
    fn wrap(&self, api: MiddlewareApi<S>, next: Dispatcher<S>) -> Dispatcher<S> {
        dispatcher(move |message| match message {
            Message::Thunk(thunk) => {
                tracing::trace!("Running thunk");
                thunk.run(&api)?;
                Ok(Message::Thunk(thunk))
            }
            other => next(other),
        })
    }
}

pub fn thunk<S>() -> Arc<dyn Middleware<S>>
where
    S: Send + Sync + 'static,
{
    Arc::new(ThunkMiddleware)
}
