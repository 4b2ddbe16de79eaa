//! Newtype identifiers for Trello objects.
//!
//! Trello identifies every object with an opaque 24-character hex string.
//! Wrapping each kind in its own type keeps a [`CardId`] from being passed
//! where a [`MemberId`] is expected, which matters because both membership
//! calls take one of each.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a card, the unit of work on a board.
    CardId
}

string_id! {
    /// Identifies a Trello member (a user account).
    ///
    /// In a webhook this is the member who triggered the action
    /// (`action.idMemberCreator`).
    MemberId
}

string_id! {
    /// Identifies a list (a column) within a board.
    ListId
}

string_id! {
    /// Identifies the object a webhook subscription is attached to.
    ///
    /// For this receiver the subscription is made on a list, so a model id is
    /// compared against a card's [`ListId`] to decide membership.
    ModelId
}

impl ModelId {
    /// Returns `true` if this model is the list with the given id.
    pub fn is_list(&self, list: &ListId) -> bool {
        self.0 == list.0
    }
}

string_id! {
    /// Identifies a single action record. Used for log correlation only.
    ActionId
}
