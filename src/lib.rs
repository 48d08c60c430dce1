//! A predictable state container.
//!
//! State lives in a [`Store`] and changes only when an [`Action`] is
//! dispatched through it. A [`Reducer`] computes the next state; subscribers
//! and selections are notified synchronously when the state actually
//! changes.
//!
//! ```
//! use std::sync::Arc;
//! use statestream::{Action, Store};
//!
//! fn counter(state: Option<Arc<i32>>, action: &Action) -> Arc<i32> {
//!     let state = state.unwrap_or_default();
//!     if action.is("INC") {
//!         Arc::new(*state + 1)
//!     } else {
//!         state
//!     }
//! }
//!
//! let store = Store::new(counter);
//! store.dispatch(Action::new("INC")).unwrap();
//! assert_eq!(*store.get_state(), 1);
//! ```

pub mod action;
pub mod bind;
pub mod compose;
pub mod config;
pub mod error;
pub mod identity;
pub mod message;
pub mod middleware;
pub mod reducer;
pub mod store;

pub use action::{Action, ActionType, Symbol, INIT_ACTION_TYPE};
pub use bind::{bind_action_creator, bind_action_creators};
pub use compose::compose;
pub use config::{ConfigError, LogLevel, LoggerConfig};
pub use error::StoreError;
pub use identity::Identical;
pub use message::{is_plain_action, Message, Thunk};
pub use middleware::{apply_middleware, middleware, Enhancer, Middleware, MiddlewareApi};
pub use reducer::{combine_reducers, CombinedState, Reducer, ReducerMap};
pub use store::{dispatcher, Dispatcher, Key, KeyList, Selection, Store, StoreBuilder, Subscription};
