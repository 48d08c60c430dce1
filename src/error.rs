use thiserror::Error;

/// Errors that can occur while building or driving a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `combine_reducers` was given no usable branch reducer.
    #[error("Reducer map must have at least one branch reducer")]
    EmptyReducerMap,

    /// A message reached the reducer step without being a plain action.
    ///
    /// State is untouched and nobody is notified; the store stays usable.
    #[error("Expected an action with a non-empty type, got {found}")]
    MalformedAction { found: String },

    /// A reducer asked for a payload the action does not carry.
    #[error("Action '{action_type}' carries no payload")]
    MissingPayload { action_type: String },

    /// The payload exists but does not decode into the requested type.
    #[error("Failed to decode payload of action '{action_type}': {source}")]
    Payload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },
}
