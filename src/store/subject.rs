//! Observer list with a replayed last value.
//!
//! A [`Subject`] holds the last committed value and the registered
//! observers. New observers receive the current value immediately; later
//! values are delivered only when they are not identical to the last one.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::identity::Identical;

pub(crate) type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub(crate) struct Subject<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

struct Inner<T> {
    value: Option<T>,
    revision: u64,
    observers: Vec<(u64, Observer<T>)>,
    next_id: u64,
}

impl<T> Subject<T>
where
    T: Identical + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(initial: Option<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                revision: 0,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub(crate) fn value(&self) -> Option<T> {
        self.inner.lock().value.clone()
    }

    /// Commits `value` and notifies observers in subscription order.
    ///
    /// Returns `false` without notifying when `value` is identical to the
    /// current one. If an observer commits a newer value while this pass is
    /// running, the rest of this pass is skipped: everyone has already been
    /// handed the newer value.
    pub(crate) fn next(&self, value: T) -> bool {
        let (observers, revision) = {
            let mut inner = self.inner.lock();
            if inner
                .value
                .as_ref()
                .is_some_and(|current| current.identical(&value))
            {
                return false;
            }
            inner.value = Some(value.clone());
            inner.revision += 1;
            let observers: Vec<Observer<T>> = inner
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            (observers, inner.revision)
        };

        for observer in observers {
            if self.inner.lock().revision != revision {
                tracing::trace!(revision, "Notification superseded by a newer revision");
                break;
            }
            observer(&value);
        }
        true
    }

    /// Registers `observer` and replays the current value to it, if any.
    pub(crate) fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let (id, current) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, Arc::clone(&observer)));
            (id, inner.value.clone())
        };

        if let Some(current) = current {
            observer(&current);
        }

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.lock().observers.retain(|(other, _)| *other != id);
            }
        })
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping it keeps the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it. Removal only
/// affects future notifications.
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Removes exactly this listener.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
