//! Wire form of a Trello webhook delivery.
//!
//! Every field is optional at the serde level so that a structurally valid
//! JSON body with missing pieces reaches [`WebhookPayload::validate`] and is
//! rejected with the name of the first missing field, instead of surfacing
//! as an opaque deserialisation error. Fields this receiver does not use are
//! ignored.

use serde::Deserialize;

use crate::{
    Action, ActionId, Card, CardId, ListId, MemberId, Model, ModelId, PayloadError,
};

/// The inbound request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// Event description.
    #[serde(default)]
    pub action: Option<RawAction>,
    /// Subscription target.
    #[serde(default)]
    pub model: Option<RawModel>,
}

/// `body.action` as sent by Trello.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub id_member_creator: Option<String>,
    /// Trello's action type (e.g. `"updateCard"`); not used for routing.
    #[serde(default, rename = "type")]
    pub action_type: Option<String>,
    #[serde(default)]
    pub display: Option<RawDisplay>,
    #[serde(default)]
    pub data: Option<RawActionData>,
}

/// `body.action.display`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDisplay {
    #[serde(default)]
    pub translation_key: Option<String>,
}

/// `body.action.data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActionData {
    #[serde(default)]
    pub card: Option<RawCard>,
}

/// `body.action.data.card`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub id_list: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `body.model`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WebhookPayload {
    /// Parses a raw request body.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Malformed`] if the body is empty or not JSON of the
    /// expected shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        if body.is_empty() {
            return Err(PayloadError::Malformed { message: "empty body".to_string() });
        }
        serde_json::from_slice(body)
            .map_err(|e| PayloadError::Malformed { message: e.to_string() })
    }

    /// Checks every field the handlers depend on and returns the validated
    /// model and action.
    ///
    /// Required, in this order: `action`, `action.display.translationKey`,
    /// `action.idMemberCreator`, `action.data.card` (with a non-empty `id`),
    /// `model.id`. Empty strings count as missing.
    ///
    /// # Errors
    ///
    /// [`PayloadError::MissingField`] naming the first field that failed.
    pub fn validate(self) -> Result<(Model, Action), PayloadError> {
        let action = self.action.ok_or(PayloadError::MissingField { field: "action" })?;

        let display_key = action
            .display
            .and_then(|d| d.translation_key)
            .filter(|k| !k.is_empty())
            .ok_or(PayloadError::MissingField { field: "action.display.translationKey" })?;

        let triggering_member_id = action
            .id_member_creator
            .and_then(MemberId::new)
            .ok_or(PayloadError::MissingField { field: "action.idMemberCreator" })?;

        let raw_card = action
            .data
            .and_then(|d| d.card)
            .ok_or(PayloadError::MissingField { field: "action.data.card" })?;

        let card_id = raw_card
            .id
            .and_then(CardId::new)
            .ok_or(PayloadError::MissingField { field: "action.data.card.id" })?;

        let model = self.model.unwrap_or_default();
        let model_id =
            model.id.and_then(ModelId::new).ok_or(PayloadError::MissingField { field: "model.id" })?;

        let action = Action {
            id: action.id.and_then(ActionId::new),
            display_key,
            triggering_member_id,
            card: Card {
                id: card_id,
                list_id: raw_card.id_list.and_then(ListId::new),
                name: raw_card.name,
            },
        };

        Ok((Model { id: model_id, name: model.name }, action))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::ActionKind;

    fn valid_body() -> Value {
        json!({
            "action": {
                "id": "5bd3b0c1e4b0a1a2b3c4d5e6",
                "idMemberCreator": "member-1",
                "type": "updateCard",
                "display": { "translationKey": "action_move_card_from_list_to_list" },
                "data": {
                    "card": { "id": "card-1", "idList": "list-1", "name": "Write release notes" }
                }
            },
            "model": { "id": "list-1", "name": "Doing" }
        })
    }

    fn parse(body: &Value) -> Result<(Model, Action), PayloadError> {
        WebhookPayload::from_slice(body.to_string().as_bytes())?.validate()
    }

    fn missing_field(body: &Value) -> &'static str {
        match parse(body) {
            Err(PayloadError::MissingField { field }) => field,
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_produces_model_and_action() {
        let (model, action) = parse(&valid_body()).unwrap();

        assert_eq!(model.id.as_str(), "list-1");
        assert_eq!(model.name.as_deref(), Some("Doing"));
        assert_eq!(action.kind(), ActionKind::CardMoved);
        assert_eq!(action.triggering_member_id.as_str(), "member-1");
        assert_eq!(action.card.id.as_str(), "card-1");
        assert_eq!(action.card.list_id.as_ref().map(ListId::as_str), Some("list-1"));
        assert_eq!(action.id.as_ref().map(ActionId::as_str), Some("5bd3b0c1e4b0a1a2b3c4d5e6"));
    }

    #[test]
    fn empty_body_is_malformed() {
        assert!(matches!(WebhookPayload::from_slice(b""), Err(PayloadError::Malformed { .. })));
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            WebhookPayload::from_slice(b"action=move"),
            Err(PayloadError::Malformed { .. })
        ));
    }

    #[test]
    fn wrongly_typed_field_is_malformed() {
        let mut body = valid_body();
        body["action"]["idMemberCreator"] = json!(42);
        assert!(matches!(
            WebhookPayload::from_slice(body.to_string().as_bytes()),
            Err(PayloadError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_action_is_rejected() {
        let body = json!({ "model": { "id": "list-1" } });
        assert_eq!(missing_field(&body), "action");
    }

    #[test]
    fn missing_display_is_rejected() {
        let mut body = valid_body();
        body["action"].as_object_mut().unwrap().remove("display");
        assert_eq!(missing_field(&body), "action.display.translationKey");
    }

    #[test]
    fn empty_translation_key_is_rejected() {
        let mut body = valid_body();
        body["action"]["display"]["translationKey"] = json!("");
        assert_eq!(missing_field(&body), "action.display.translationKey");
    }

    #[test]
    fn missing_member_creator_is_rejected() {
        let mut body = valid_body();
        body["action"].as_object_mut().unwrap().remove("idMemberCreator");
        assert_eq!(missing_field(&body), "action.idMemberCreator");
    }

    #[test]
    fn missing_card_is_rejected() {
        let mut body = valid_body();
        body["action"]["data"].as_object_mut().unwrap().remove("card");
        assert_eq!(missing_field(&body), "action.data.card");
    }

    #[test]
    fn card_without_id_is_rejected() {
        let mut body = valid_body();
        body["action"]["data"]["card"] = json!({ "idList": "list-1" });
        assert_eq!(missing_field(&body), "action.data.card.id");
    }

    #[test]
    fn missing_model_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("model");
        assert_eq!(missing_field(&body), "model.id");
    }

    #[test]
    fn null_model_id_is_rejected() {
        let mut body = valid_body();
        body["model"]["id"] = Value::Null;
        assert_eq!(missing_field(&body), "model.id");
    }

    #[test]
    fn card_without_list_is_accepted() {
        let mut body = valid_body();
        body["action"]["display"]["translationKey"] = json!("action_create_card");
        body["action"]["data"]["card"] = json!({ "id": "card-9" });

        let (_, action) = parse(&body).unwrap();
        assert_eq!(action.card.list_id, None);
        assert_eq!(action.kind(), ActionKind::CardCreated);
    }
}
