//! User and user-request sections of the inbound payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional identity attributes the platform attaches to a user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProperties {
    /// Kakao-channel user key, when the channel is linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plusfriend_user_key: Option<String>,
    /// App user id, only present when an app key is configured for the bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_user_id: Option<String>,
    /// Whether the user has added the bot's Kakao channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_friend: Option<bool>,
    /// Any further properties (event-API `properties` land here).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user who sent the utterance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    /// User key, at most 70 characters.
    #[serde(default)]
    pub id: String,
    /// Key type; the platform currently sends `botUserKey`.
    #[serde(default, rename = "type")]
    pub id_type: String,
    /// Additional identity attributes.
    #[serde(default)]
    pub properties: UserProperties,
}

/// The block that handled the utterance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Block identifier.
    #[serde(default)]
    pub id: String,
    /// Block name.
    #[serde(default)]
    pub name: String,
}

/// The `userRequest` section: who said what, where and when.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// User's time zone, e.g. `Asia/Seoul`.
    #[serde(default)]
    pub timezone: String,
    /// The block that reacted to the utterance.
    #[serde(default)]
    pub block: Block,
    /// The raw utterance text.
    #[serde(default)]
    pub utterance: String,
    /// Language of the utterance, e.g. `ko`.
    #[serde(default)]
    pub lang: String,
    /// The requesting user.
    #[serde(default)]
    pub user: User,
    /// Event-API params forwarded to the skill server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    /// Target URL for AI-callback responses, when the feature is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_request_deserialize() {
        let request: UserRequest = serde_json::from_value(json!({
            "timezone": "Asia/Seoul",
            "block": {"id": "block_id", "name": "block_name"},
            "utterance": "주문할게요",
            "lang": "ko",
            "user": {
                "id": "user_id",
                "type": "botUserKey",
                "properties": {"isFriend": true, "custom": "extra"}
            },
            "callbackUrl": "https://example.com/callback"
        }))
        .unwrap();
        assert_eq!(request.user.id, "user_id");
        assert_eq!(request.user.id_type, "botUserKey");
        assert_eq!(request.user.properties.is_friend, Some(true));
        assert_eq!(request.user.properties.extra["custom"], json!("extra"));
        assert_eq!(
            request.callback_url.as_deref(),
            Some("https://example.com/callback")
        );
    }

    #[test]
    fn test_user_request_roundtrip_keeps_wire_names(){
        let input = json!({
            "timezone": "Asia/Seoul",
            "block": {"id": "b", "name": "n"},
            "utterance": "hi",
            "lang": "ko",
            "user": {"id": "u", "type": "botUserKey", "properties": {}}
        });
        let request: UserRequest = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), input);
    }
}
