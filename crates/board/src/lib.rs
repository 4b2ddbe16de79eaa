//! Domain core of the Trello callback receiver.
//!
//! This crate knows what a card-movement webhook looks like, which deliveries
//! are valid, and what membership change each recognised action calls for.
//! It defines the [`CardMembership`] port; infrastructure crates implement it.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`CardId`, `MemberId`, `ListId`, ...) |
//! | [`payload`] | Wire form of a webhook delivery and its validation |
//! | [`action`] | Validated `Action`, `Model`, and `ActionKind` |
//! | [`handlers`] | Per-action handlers producing a `MembershipChange` |
//! | [`membership`] | The `CardMembership` port and `MembershipChange` |
//! | [`errors`] | Payload, adapter, and configuration error types |

pub mod action;
pub mod errors;
pub mod handlers;
pub mod identifiers;
pub mod membership;
pub mod payload;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use action::{Action, ActionKind, Card, Model, COPY_CARD_KEY, CREATE_CARD_KEY, MOVE_CARD_KEY};
pub use errors::{ConfigurationError, MembershipError, PayloadError};
pub use handlers::membership_change;
pub use identifiers::{ActionId, CardId, ListId, MemberId, ModelId};
pub use membership::{CardMembership, MembershipChange};
pub use payload::WebhookPayload;
