//! The raw engine behind every store handle.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};

use crate::action::Action;
use crate::error::StoreError;
use crate::message::Message;
use crate::reducer::SharedReducer;

use super::subject::{Observer, Subject, Subscription};

pub(crate) struct Core<S> {
    reducer: RwLock<SharedReducer<S>>,
    state: Subject<Arc<S>>,
    /// Serializes transitions. Re-entrant so listeners and middleware can
    /// dispatch from inside a notification on the same thread.
    turn: ReentrantMutex<()>,
}

impl<S> Core<S>
where
    S: Send + Sync + 'static,
{
    pub(crate) fn new(reducer: SharedReducer<S>, initial_state: Option<Arc<S>>) -> Self {
        Self {
            reducer: RwLock::new(reducer),
            state: Subject::new(initial_state),
            turn: ReentrantMutex::new(()),
        }
    }

    /// `None` only until the init action has been applied.
    pub(crate) fn state(&self) -> Option<Arc<S>> {
        self.state.value()
    }

    /// The reducer step. Anything but a plain action is rejected here, and
    /// only here.
    pub(crate) fn dispatch(&self, message: Message<S>) -> Result<Message<S>, StoreError> {
        match &message {
            Message::Action(action) if action.action_type().is_valid() => {
                self.apply(action);
                Ok(message)
            }
            other => {
                tracing::debug!(rejected = ?other, "Rejected malformed action");
                Err(StoreError::MalformedAction {
                    found: format!("{:?}", other),
                })
            }
        }
    }

    /// Runs the current reducer and commits the result if it is a new state.
    pub(crate) fn apply(&self, action: &Action) {
        let _turn = self.turn.lock();
        let reducer = Arc::clone(&*self.reducer.read());

        let next = reducer.reduce(self.state.value(), action);
        if self.state.next(next) {
            tracing::trace!(action_type = %action.action_type(), "State committed");
        } else {
            tracing::trace!(action_type = %action.action_type(), "State unchanged");
        }
    }

    pub(crate) fn replace_reducer(&self, reducer: SharedReducer<S>) {
        let _turn = self.turn.lock();
        *self.reducer.write() = reducer;
        tracing::debug!("Reducer replaced");
        self.apply(&Action::init());
    }

    /// Registers an observer of committed states, replaying the current one.
    pub(crate) fn observe(&self, observer: Observer<Arc<S>>) -> Subscription {
        let _turn = self.turn.lock();
        self.state.subscribe(observer)
    }
}
