//! Typed views over the JSON envelopes a skill server receives.
//!
//! The platform posts two envelope shapes to the same endpoint family: the
//! regular skill payload (an utterance routed to an action) and the much
//! smaller parameter-validation payload. [`Payload`] and
//! [`ValidationPayload`] model them separately; [`SkillPayload`] dispatches
//! between the two from the envelope structure alone.

mod action;
mod intent;
mod user;

pub use action::{Action, Param};
pub use intent::{Bot, Intent, IntentExtra, Knowledge};
pub use user::{Block, User, UserProperties, UserRequest};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::base::FromPayload;
use crate::context::Context;
use crate::error::{Error, Result};

/// The full inbound skill payload.
///
/// Construct with [`FromPayload::from_json`] or
/// [`FromPayload::from_value`]; the four envelope sections (`intent`,
/// `userRequest`, `bot`, `action`) are mandatory and their absence is a
/// [`Error::RequiredField`] rather than a silent default.
///
/// # Example
///
/// ```rust,ignore
/// use kakao_chatbot::{FromPayload, Payload};
///
/// let payload = Payload::from_json(&request_body)?;
/// tracing::info!(user = payload.user_id(), "handling {}", payload.utterance());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Which block or knowledge entry the utterance matched.
    pub intent: Intent,
    /// Who said what, where and when.
    pub user_request: UserRequest,
    /// The receiving bot.
    pub bot: Bot,
    /// The skill action that fired, with its extracted parameters.
    pub action: Action,
    /// Contexts live at the time of the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<Context>,
}

impl Payload {
    /// The requesting user's key.
    pub fn user_id(&self) -> &str {
        &self.user_request.user.id
    }

    /// The raw utterance text.
    pub fn utterance(&self) -> &str {
        &self.user_request.utterance
    }

    /// The action's parameter map.
    pub fn params(&self) -> &Map<String, Value> {
        &self.action.params
    }

    /// The action's detailed parameter records.
    pub fn detail_params(&self) -> &BTreeMap<String, Param> {
        &self.action.detail_params
    }

    /// Serializes the payload back into its wire shape.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::parse("$", e.to_string()))
    }

    /// Serializes the payload back into a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::parse("$", e.to_string()))
    }
}

/// Removes and deserializes one mandatory envelope section.
fn section<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &'static str) -> Result<T> {
    let raw = map.remove(key).ok_or_else(|| Error::required_field(key))?;
    serde_json::from_value(raw).map_err(|e| Error::parse(key, e.to_string()))
}

impl FromPayload for Payload {
    fn from_value(value: Value) -> Result<Self> {
        tracing::debug!("parsing skill payload");
        let Value::Object(mut map) = value else {
            return Err(Error::parse("$", "expected a JSON object"));
        };
        let intent = section(&mut map, "intent")?;
        let user_request = section(&mut map, "userRequest")?;
        let bot = section(&mut map, "bot")?;
        let action = section(&mut map, "action")?;
        let contexts = match map.remove("contexts") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(Context::from_value)
                .collect::<Result<_>>()?,
            Some(_) => return Err(Error::parse("contexts", "expected an array")),
        };
        Ok(Self {
            intent,
            user_request,
            bot,
            action,
            contexts,
        })
    }
}

/// The inbound parameter-validation payload.
///
/// Sent when a block parameter is configured with skill-server validation;
/// every field is lenient because the platform omits most of them depending
/// on where in slot filling the request originates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPayload {
    /// The receiving bot.
    #[serde(default)]
    pub bot: Bot,
    /// Whether the request was raised during slot filling.
    #[serde(default)]
    pub is_in_slot_filling: bool,
    /// Language of the utterance.
    #[serde(default)]
    pub lang: String,
    /// Parameters gathered so far.
    #[serde(default)]
    pub params: Map<String, Value>,
    /// User's time zone.
    #[serde(default)]
    pub timezone: String,
    /// The requesting user.
    #[serde(default)]
    pub user: User,
    /// The utterance under validation.
    #[serde(default)]
    pub utterance: String,
    /// The candidate value, as `{"origin": ..., "resolved": ...}`.
    #[serde(default)]
    pub value: Value,
}

impl FromPayload for ValidationPayload {
    fn from_value(value: Value) -> Result<Self> {
        tracing::debug!("parsing validation payload");
        serde_json::from_value(value).map_err(|e| Error::parse("$", e.to_string()))
    }
}

/// Either of the two envelope shapes the platform posts to a skill server.
///
/// Dispatch is structural and fails closed: an envelope carrying markers of
/// both shapes, or of neither, is a [`Error::Parse`] instead of a guess.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillPayload {
    /// A regular skill request.
    Skill(Payload),
    /// A parameter-validation request.
    Validation(ValidationPayload),
}

impl FromPayload for SkillPayload {
    fn from_value(value: Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(Error::parse("$", "expected a JSON object"));
        };
        let looks_like_skill = map.contains_key("action") && map.contains_key("userRequest");
        let looks_like_validation =
            map.contains_key("isInSlotFilling") || map.contains_key("value");
        match (looks_like_skill, looks_like_validation) {
            (true, false) => Ok(Self::Skill(Payload::from_value(value)?)),
            (false, true) => Ok(Self::Validation(ValidationPayload::from_value(value)?)),
            (true, true) => Err(Error::parse(
                "$",
                "ambiguous envelope: carries both skill and validation markers",
            )),
            (false, false) => Err(Error::parse(
                "$",
                "unrecognized envelope: neither a skill nor a validation payload",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skill_envelope() -> Value {
        json!({
            "intent": {"id": "intent_id", "name": "order"},
            "userRequest": {
                "timezone": "Asia/Seoul",
                "block": {"id": "block_id", "name": "order block"},
                "utterance": "커피 주문할게요",
                "lang": "ko",
                "user": {"id": "user_id", "type": "botUserKey", "properties": {}}
            },
            "bot": {"id": "bot_id", "name": "cafe bot"},
            "action": {
                "id": "action_id",
                "name": "order",
                "params": {"menu": "coffee"},
                "detailParams": {
                    "menu": {"origin": "커피", "value": "coffee", "groupName": ""}
                },
                "clientExtra": {}
            },
            "contexts": [
                {"name": "order", "lifespan": 5, "params": {"menu": {"value": "coffee"}}}
            ]
        })
    }

    #[test]
    fn test_payload_from_value() {
        let payload = Payload::from_value(skill_envelope()).unwrap();
        assert_eq!(payload.user_id(), "user_id");
        assert_eq!(payload.utterance(), "커피 주문할게요");
        assert_eq!(payload.params()["menu"], json!("coffee"));
        assert_eq!(payload.contexts.len(), 1);
        assert_eq!(payload.contexts[0].param("menu"), Some(&json!("coffee")));
    }

    #[test]
    fn test_payload_requires_every_section() {
        for missing in ["intent", "userRequest", "bot", "action"] {
            let mut envelope = skill_envelope();
            envelope.as_object_mut().unwrap().remove(missing);
            let err = Payload::from_value(envelope).unwrap_err();
            assert!(
                matches!(err, Error::RequiredField { ref field } if field == missing),
                "expected RequiredField for `{missing}`, got {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_object_is_rejected() {
        assert!(Payload::from_value(json!({})).is_err());
        assert!(SkillPayload::from_value(json!({})).is_err());
    }

    #[test]
    fn test_malformed_section_carries_its_path() {
        let mut envelope = skill_envelope();
        envelope["action"] = json!("not an object");
        let err = Payload::from_value(envelope).unwrap_err();
        assert!(matches!(err, Error::Parse { ref path, .. } if path == "action"));
    }

    #[test]
    fn test_payload_roundtrip() {
        let payload = Payload::from_value(skill_envelope()).unwrap();
        let value = payload.to_value().unwrap();
        let reparsed = Payload::from_value(value).unwrap();
        assert_eq!(reparsed, payload);
    }

    #[test]
    fn test_dispatch_picks_skill_payload() {
        let dispatched = SkillPayload::from_value(skill_envelope()).unwrap();
        assert!(matches!(dispatched, SkillPayload::Skill(_)));
    }

    #[test]
    fn test_dispatch_picks_validation_payload() {
        let dispatched = SkillPayload::from_value(json!({
            "isInSlotFilling": false,
            "utterance": "tomorrow",
            "value": {"origin": "tomorrow", "resolved": "2026-08-26"}
        }))
        .unwrap();
        let SkillPayload::Validation(payload) = dispatched else {
            panic!("expected a validation payload");
        };
        assert_eq!(payload.utterance, "tomorrow");
        assert_eq!(payload.value["resolved"], json!("2026-08-26"));
    }

    #[test]
    fn test_dispatch_rejects_ambiguous_envelope() {
        let mut envelope = skill_envelope();
        envelope
            .as_object_mut()
            .unwrap()
            .insert("isInSlotFilling".into(), json!(true));
        let err = SkillPayload::from_value(envelope).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_json_reports_invalid_syntax() {
        let err = Payload::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse { ref path, .. } if path == "$"));
    }
}
