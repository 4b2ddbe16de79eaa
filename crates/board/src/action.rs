//! Validated webhook values.
//!
//! An [`Action`] and its [`Model`] are only constructed by
//! [`crate::WebhookPayload::validate`], so every required field is known to be
//! present and non-empty wherever these types appear.

use crate::{ActionId, CardId, ListId, MemberId, ModelId};

/// Translation key Trello uses for a card moved between lists.
pub const MOVE_CARD_KEY: &str = "action_move_card_from_list_to_list";

/// Translation key Trello uses for a copied card.
pub const COPY_CARD_KEY: &str = "action_copy_card";

/// Translation key Trello uses for a newly created card.
pub const CREATE_CARD_KEY: &str = "action_create_card";

/// The kind of event an action describes, derived from its display key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// A card moved from one list to another.
    CardMoved,
    /// A card was copied.
    CardCopied,
    /// A card was created.
    CardCreated,
    /// Any other action; carries the raw translation key.
    Other(String),
}

impl ActionKind {
    /// Classifies a `display.translationKey` value.
    pub fn from_translation_key(key: &str) -> Self {
        match key {
            MOVE_CARD_KEY => Self::CardMoved,
            COPY_CARD_KEY => Self::CardCopied,
            CREATE_CARD_KEY => Self::CardCreated,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns `true` for the three kinds this receiver acts on.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// The card an action refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Card identifier.
    pub id: CardId,
    /// List the card is in after the action. Absent on some action types.
    pub list_id: Option<ListId>,
    /// Card title, for logging.
    pub name: Option<String>,
}

/// A single event record describing a change to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Identifier of the action record, when Trello supplied one.
    pub id: Option<ActionId>,
    /// The `display.translationKey` the action was rendered with.
    pub display_key: String,
    /// The member who triggered the action.
    pub triggering_member_id: MemberId,
    /// The card the action refers to.
    pub card: Card,
}

impl Action {
    /// Classifies this action by its display key.
    pub fn kind(&self) -> ActionKind {
        ActionKind::from_translation_key(&self.display_key)
    }
}

/// The object the webhook subscription is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Model identifier.
    pub id: ModelId,
    /// Display name, for logging.
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_translation_keys_are_recognized() {
        assert_eq!(ActionKind::from_translation_key(MOVE_CARD_KEY), ActionKind::CardMoved);
        assert_eq!(ActionKind::from_translation_key(COPY_CARD_KEY), ActionKind::CardCopied);
        assert_eq!(ActionKind::from_translation_key(CREATE_CARD_KEY), ActionKind::CardCreated);
    }

    #[test]
    fn unknown_translation_key_is_kept_verbatim() {
        let kind = ActionKind::from_translation_key("action_comment_on_card");
        assert_eq!(kind, ActionKind::Other("action_comment_on_card".to_string()));
        assert!(!kind.is_recognized());
    }

    #[test]
    fn translation_keys_are_case_sensitive() {
        assert!(!ActionKind::from_translation_key("ACTION_CREATE_CARD").is_recognized());
    }
}
