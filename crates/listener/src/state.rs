//! Shared router state.

use std::sync::Arc;

use board::CardMembership;

use crate::Dispatcher;

/// State handed to every request.
///
/// Either holds a dispatcher over a configured adapter, or records that the
/// receiver started without credentials. In the second case every webhook
/// delivery is answered with `500` before its payload is looked at.
#[derive(Debug, Clone)]
pub struct AppState {
    dispatcher: Option<Dispatcher>,
}

impl AppState {
    /// State for a receiver with a working membership adapter.
    pub fn configured(membership: Arc<dyn CardMembership>) -> Self {
        Self { dispatcher: Some(Dispatcher::new(membership)) }
    }

    /// State for a receiver whose credentials are missing.
    pub fn unconfigured() -> Self {
        Self { dispatcher: None }
    }

    /// The dispatcher, if the receiver is configured.
    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        self.dispatcher.as_ref()
    }

    /// Returns `true` if membership changes can be dispatched.
    pub fn is_configured(&self) -> bool {
        self.dispatcher.is_some()
    }
}
