//! Action handlers.
//!
//! Each handler turns a validated action into the membership change it
//! calls for. Handlers are pure: issuing the change is the caller's job, so
//! the decision can be tested without an adapter.

use tracing::{debug, info, instrument};

use crate::{Action, ActionKind, MembershipChange, Model};

/// Routes `action` to its handler.
///
/// Returns `None` for actions this receiver does not act on.
#[instrument(
    name = "membership_change",
    skip_all,
    fields(translation_key = %action.display_key, card_id = %action.card.id)
)]
pub fn membership_change(model: &Model, action: &Action) -> Option<MembershipChange> {
    match action.kind() {
        ActionKind::CardMoved => Some(card_moved(model, action)),
        ActionKind::CardCopied => Some(card_copied(model, action)),
        ActionKind::CardCreated => Some(card_created(model, action)),
        ActionKind::Other(key) => {
            info!(
                translation_key = %key,
                card_id = %action.card.id,
                card_name = action.card.name.as_deref().unwrap_or_default(),
                "Ignoring unhandled action"
            );
            None
        },
    }
}

/// A card moved between lists.
///
/// The triggering member is assigned when the card lands in the subscribed
/// list and unassigned when it lands anywhere else.
pub fn card_moved(model: &Model, action: &Action) -> MembershipChange {
    let card = action.card.id.clone();
    let member = action.triggering_member_id.clone();

    let into_subscribed_list =
        action.card.list_id.as_ref().is_some_and(|list| model.id.is_list(list));

    if into_subscribed_list {
        debug!(list_id = %model.id, "Card moved into subscribed list");
        MembershipChange::Add { card, member }
    } else {
        debug!(list_id = %model.id, "Card moved out of subscribed list");
        MembershipChange::Remove { card, member }
    }
}

/// A card was copied: assign the member who copied it.
pub fn card_copied(_model: &Model, action: &Action) -> MembershipChange {
    debug!("Handling copied card");
    MembershipChange::Add {
        card: action.card.id.clone(),
        member: action.triggering_member_id.clone(),
    }
}

/// A card was created: assign the member who created it.
pub fn card_created(_model: &Model, action: &Action) -> MembershipChange {
    debug!("Handling created card");
    MembershipChange::Add {
        card: action.card.id.clone(),
        member: action.triggering_member_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, CardId, ListId, MemberId, ModelId};

    fn model(id: &str) -> Model {
        Model { id: ModelId::new(id).unwrap(), name: None }
    }

    fn action(key: &str, list: Option<&str>) -> Action {
        Action {
            id: None,
            display_key: key.to_string(),
            triggering_member_id: MemberId::new("member-1").unwrap(),
            card: Card {
                id: CardId::new("card-1").unwrap(),
                list_id: list.and_then(ListId::new),
                name: Some("Fix login".to_string()),
            },
        }
    }

    fn add() -> MembershipChange {
        MembershipChange::Add {
            card: CardId::new("card-1").unwrap(),
            member: MemberId::new("member-1").unwrap(),
        }
    }

    fn remove() -> MembershipChange {
        MembershipChange::Remove {
            card: CardId::new("card-1").unwrap(),
            member: MemberId::new("member-1").unwrap(),
        }
    }

    #[test]
    fn move_into_subscribed_list_adds_member() {
        let change = membership_change(
            &model("list-1"),
            &action("action_move_card_from_list_to_list", Some("list-1")),
        );
        assert_eq!(change, Some(add()));
    }

    #[test]
    fn move_into_other_list_removes_member() {
        let change = membership_change(
            &model("list-1"),
            &action("action_move_card_from_list_to_list", Some("list-2")),
        );
        assert_eq!(change, Some(remove()));
    }

    #[test]
    fn move_without_destination_list_removes_member() {
        let change =
            membership_change(&model("list-1"), &action("action_move_card_from_list_to_list", None));
        assert_eq!(change, Some(remove()));
    }

    #[test]
    fn copy_adds_member_regardless_of_list() {
        let change = membership_change(&model("list-1"), &action("action_copy_card", Some("list-9")));
        assert_eq!(change, Some(add()));
    }

    #[test]
    fn create_adds_member_regardless_of_list() {
        let change = membership_change(&model("list-1"), &action("action_create_card", None));
        assert_eq!(change, Some(add()));
    }

    #[test]
    fn unhandled_action_produces_no_change() {
        let change =
            membership_change(&model("list-1"), &action("action_comment_on_card", Some("list-1")));
        assert_eq!(change, None);
    }

    #[test]
    fn change_describes_itself() {
        assert_eq!(add().to_string(), "add member 'member-1' to card 'card-1'");
        assert_eq!(remove().to_string(), "remove member 'member-1' from card 'card-1'");
    }
}
