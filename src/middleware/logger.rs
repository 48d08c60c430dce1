use std::fmt;
use std::sync::Arc;

use crate::config::{LogLevel, LoggerConfig};
use crate::message::Message;
use crate::store::{dispatcher, Dispatcher};

use super::{Middleware, MiddlewareApi};

/// Emits a `tracing` event at a level chosen at runtime.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Trace => tracing::trace!($($arg)+),
            LogLevel::Debug => tracing::debug!($($arg)+),
            LogLevel::Info => tracing::info!($($arg)+),
            LogLevel::Warn => tracing::warn!($($arg)+),
            LogLevel::Error => tracing::error!($($arg)+),
        }
    };
}

/// Logs every message on its way in and its outcome on the way out.
#[derive(Debug, Clone, Default)]
pub struct LoggerMiddleware {
    config: LoggerConfig,
}

impl LoggerMiddleware {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }
}

impl<S> Middleware<S> for LoggerMiddleware
where
    S: fmt::Debug + Send + Sync + 'static,
{
    fn wrap(&self, api: MiddlewareApi<S>, next: Dispatcher<S>) -> Dispatcher<S> {
        if !self.config.enabled {
            return next;
        }

        let config = self.config.clone();
        dispatcher(move |message| {
            let level = config.level;
            let summary = describe(&message, config.include_payload);

            event_at!(level, action = %summary, "Dispatching");
            if config.include_state {
                event_at!(level, state = ?api.get_state(), "State before dispatch");
            }

            let result = next(message);

            match &result {
                Ok(_) => event_at!(level, action = %summary, "Dispatched"),
                Err(err) => event_at!(level, action = %summary, error = %err, "Dispatch failed"),
            }
            if config.include_state {
                event_at!(level, state = ?api.get_state(), "State after dispatch");
            }

            result
        })
    }
}

/// Creates a logger middleware.
pub fn logger<S>(config: LoggerConfig) -> Arc<dyn Middleware<S>>
where
    S: fmt::Debug + Send + Sync + 'static,
{
    Arc::new(LoggerMiddleware::new(config))
}

fn describe<S>(message: &Message<S>, include_payload: bool) -> String {
    match message {
        Message::Action(action) => match action.payload() {
            Some(payload) if include_payload => {
                format!("{} {}", action.action_type(), payload)
            }
            _ => action.action_type().to_string(),
        },
        Message::Thunk(_) => "<thunk>".to_string(),
        Message::Custom(_) => "<custom>".to_string(),
    }
}
