//! Trello webhook receiver.
//!
//! Binds an HTTP server that accepts Trello webhook deliveries, validates
//! them, and hands the resulting membership change to a [`Dispatcher`].
//!
//! ## Response contract
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Valid delivery (handled or not) | `200` | empty |
//! | Payload failed validation | `400` | `{"error":"Not a valid request."}` |
//! | Credentials not configured | `500` | `{"error":"Oops."}` |
//!
//! A failed membership call is logged and never changes the response: Trello
//! only needs the acknowledgement, and answering anything other than `200`
//! would make it retry and eventually disable the webhook.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Routing, HTTP framing, and task spawning live here.
//! The [`board`] crate supplies validation and handler decisions; the
//! adapter arrives as an injected [`board::CardMembership`].

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use dispatch::Dispatcher;
pub use error::WebhookRejection;
pub use server::{create_router, start_server};
pub use state::AppState;
