//! Actions: the only way to describe a state change.
//!
//! An action carries a type (a string name or a unique [`Symbol`]) and an
//! optional JSON payload. Names are preferred because they serialize; symbols
//! are useful when two modules must never collide on a type.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

/// Type of the action dispatched when a store is created or its reducer is
/// replaced. Do not use it to reset the store.
pub const INIT_ACTION_TYPE: &str = "@@statestream/INIT";

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A unique action-type token.
///
/// Two symbols are equal only when one is a clone of the other; the
/// description is informational.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// The `type` of an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    Name(Cow<'static, str>),
    Symbol(Symbol),
}

impl ActionType {
    /// Whether the reducer step accepts this type. Empty names are rejected.
    pub fn is_valid(&self) -> bool {
        match self {
            ActionType::Name(name) => !name.is_empty(),
            ActionType::Symbol(_) => true,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Name(name) => f.write_str(name),
            ActionType::Symbol(symbol) => write!(f, "{:?}", symbol),
        }
    }
}

impl From<&'static str> for ActionType {
    fn from(name: &'static str) -> Self {
        ActionType::Name(Cow::Borrowed(name))
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        ActionType::Name(Cow::Owned(name))
    }
}

impl From<Symbol> for ActionType {
    fn from(symbol: Symbol) -> Self {
        ActionType::Symbol(symbol)
    }
}

impl From<&Symbol> for ActionType {
    fn from(symbol: &Symbol) -> Self {
        ActionType::Symbol(symbol.clone())
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        matches!(self, ActionType::Name(name) if name == other)
    }
}

impl PartialEq<Symbol> for ActionType {
    fn eq(&self, other: &Symbol) -> bool {
        matches!(self, ActionType::Symbol(symbol) if symbol == other)
    }
}

/// An intention to change the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    action_type: ActionType,
    payload: Option<Value>,
}

impl Action {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
        }
    }

    /// The action the store applies on creation and on reducer replacement.
    pub fn init() -> Self {
        Self::new(INIT_ACTION_TYPE)
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Compares the action type against a name or a symbol.
    ///
    /// ```
    /// use statestream::{Action, Symbol};
    ///
    /// let reset = Symbol::new("reset");
    /// assert!(Action::new("INC").is("INC"));
    /// assert!(Action::new(&reset).is(&reset));
    /// assert!(!Action::new(Symbol::new("reset")).is(&reset));
    /// ```
    pub fn is<T: ?Sized>(&self, action_type: &T) -> bool
    where
        ActionType: PartialEq<T>,
    {
        self.action_type == *action_type
    }

    pub fn is_init(&self) -> bool {
        self.is(INIT_ACTION_TYPE)
    }

    /// Decodes the payload into `T`.
    ///
    /// # Errors
    /// Returns `MissingPayload` if the action has none, or `Payload` if it does
    /// not decode.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let payload = self
            .payload
            .as_ref()
            .ok_or_else(|| StoreError::MissingPayload {
                action_type: self.action_type.to_string(),
            })?;

        T::deserialize(payload).map_err(|source| StoreError::Payload {
            action_type: self.action_type.to_string(),
            source,
        })
    }
}
