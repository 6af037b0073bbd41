//! The event API: pushing block events to users outside a skill turn.
//!
//! This module builds the request — URL, headers and JSON body — and
//! parses the platform's replies. It deliberately ships no HTTP client;
//! callers hand the prepared request to whatever client they already use.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::base::{FromPayload, SkillTemplate, compact_object};
use crate::error::{Error, Result};
use crate::validation::{check_one_of, require_non_empty};

/// Maximum number of target users per event request.
pub const EVENT_MAX_USERS: usize = 100;

/// User key types the event API accepts.
const EVENT_ID_TYPES: [&str; 4] = ["userId", "botUserKey", "plusfriendUserKey", "appUserId"];

/// One target user of an event push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUser {
    /// Key type, one of `userId`, `botUserKey`, `plusfriendUserKey` or
    /// `appUserId`.
    #[serde(rename = "type")]
    pub id_type: String,
    /// The user key itself.
    pub id: String,
    /// Extra properties delivered to the skill payload's user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl EventUser {
    /// Creates a target user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id_type` is not one of the
    /// accepted key types or `id` is empty.
    pub fn new(id_type: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        let user = Self {
            id_type: id_type.into(),
            id: id.into(),
            properties: None,
        };
        user.validate()?;
        Ok(user)
    }

    /// Attaches extra properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }
}

impl SkillTemplate for EventUser {
    fn validate(&self) -> Result<()> {
        check_one_of("user.type", &self.id_type.as_str(), &EVENT_ID_TYPES)?;
        require_non_empty("user.id", &self.id)
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A prepared event-push request.
///
/// # Example
///
/// ```rust,ignore
/// use kakao_chatbot::EventApi;
///
/// let mut event = EventApi::new("bot_id", rest_api_key, "coupon_arrived");
/// event.add_user("botUserKey", "user_key")?;
/// let request = client
///     .post(event.url())
///     .headers_from(event.headers())
///     .json(&event.body()?);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EventApi {
    /// Target bot id.
    pub bot_id: String,
    /// Kakao REST API key, sent without the `KakaoAK ` prefix.
    pub api_key: String,
    /// Name of the event, as configured in the open builder.
    pub event: String,
    /// Data delivered to the triggered block's `userRequest.params`.
    pub data: Option<Map<String, Value>>,
    /// Request-level params.
    pub params: Option<Map<String, Value>>,
    /// Request-level options.
    pub option: Option<Map<String, Value>>,
    users: Vec<EventUser>,
    dev_channel: bool,
}

impl EventApi {
    /// Creates an event request with no target users yet.
    pub fn new(
        bot_id: impl Into<String>,
        api_key: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            bot_id: bot_id.into(),
            api_key: api_key.into(),
            event: event.into(),
            data: None,
            params: None,
            option: None,
            users: Vec::new(),
            dev_channel: false,
        }
    }

    /// Sets the event data.
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the request params.
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the request options.
    pub fn with_option(mut self, option: Map<String, Value>) -> Self {
        self.option = Some(option);
        self
    }

    /// Targets the development channel instead of the live one.
    pub fn dev_channel(mut self) -> Self {
        self.dev_channel = true;
        self
    }

    /// Adds a target user by key type and key, rejecting unknown key types
    /// and the 101st user. A rejected add leaves the user list unchanged.
    pub fn add_user(&mut self, id_type: &str, id: impl Into<String>) -> Result<&mut Self> {
        self.add_event_user(EventUser::new(id_type, id)?)
    }

    /// Adds an already-built target user.
    pub fn add_event_user(&mut self, user: EventUser) -> Result<&mut Self> {
        user.validate()?;
        if self.users.len() >= EVENT_MAX_USERS {
            return Err(Error::composition(format!(
                "an event request targets at most {EVENT_MAX_USERS} users"
            )));
        }
        self.users.push(user);
        Ok(self)
    }

    /// The target users added so far.
    pub fn users(&self) -> &[EventUser] {
        &self.users
    }

    /// The endpoint URL for this request.
    pub fn url(&self) -> String {
        let host = if self.dev_channel {
            "dev-bot-api.kakao.com"
        } else {
            "bot-api.kakao.com"
        };
        format!("https://{host}/v2/bots/{}/talk", self.bot_id)
    }

    /// The request headers: authorization and content type.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", format!("KakaoAK {}", self.api_key)),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    /// Builds the request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Composition`] when no target user has been added,
    /// [`Error::Validation`] when a field fails its checks.
    pub fn body(&self) -> Result<Value> {
        self.validate()?;
        tracing::debug!(
            event = %self.event,
            users = self.users.len(),
            "building event request body"
        );
        let users = self
            .users
            .iter()
            .map(EventUser::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(compact_object([
            (
                "event",
                compact_object([
                    ("name", json!(self.event)),
                    (
                        "data",
                        self.data
                            .as_ref()
                            .map_or(Value::Null, |d| Value::Object(d.clone())),
                    ),
                ]),
            ),
            ("user", Value::Array(users)),
            (
                "params",
                self.params
                    .as_ref()
                    .map_or(Value::Null, |p| Value::Object(p.clone())),
            ),
            (
                "option",
                self.option
                    .as_ref()
                    .map_or(Value::Null, |o| Value::Object(o.clone())),
            ),
        ]))
    }
}

impl SkillTemplate for EventApi {
    fn validate(&self) -> Result<()> {
        require_non_empty("botId", &self.bot_id)?;
        require_non_empty("apiKey", &self.api_key)?;
        require_non_empty("event.name", &self.event)?;
        if self.users.is_empty() {
            return Err(Error::composition(
                "an event request needs at least one target user",
            ));
        }
        if self.users.len() > EVENT_MAX_USERS {
            return Err(Error::composition(format!(
                "an event request targets at most {EVENT_MAX_USERS} users"
            )));
        }
        for user in &self.users {
            user.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.body()
    }
}

/// The platform's acknowledgement of an event push.
///
/// Unlike the skill envelopes, the event endpoints answer in snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventApiResponse {
    /// Id for polling the push's progress.
    #[serde(default)]
    pub task_id: String,
    /// Acceptance status.
    #[serde(default)]
    pub status: String,
    /// Human-readable detail.
    #[serde(default)]
    pub message: String,
    /// Server timestamp, milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl FromPayload for EventApiResponse {
    fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::parse("$", e.to_string()))
    }
}

/// A prepared status poll for an earlier event push.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEventApi {
    /// The task id returned by the push.
    pub task_id: String,
    /// Kakao REST API key.
    pub api_key: String,
}

impl CheckEventApi {
    /// Creates a status poll.
    pub fn new(task_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            api_key: api_key.into(),
        }
    }

    /// The endpoint URL for this poll.
    pub fn url(&self) -> String {
        format!("https://bot-api.kakao.com/v2/tasks/{}", self.task_id)
    }

    /// The request headers.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![("Authorization", format!("KakaoAK {}", self.api_key))]
    }
}

/// Failure details of an event task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventFail {
    /// How many pushes failed.
    #[serde(default)]
    pub count: u64,
    /// The failed pushes as the platform reports them.
    #[serde(default)]
    pub list: Vec<Value>,
}

/// The status of an earlier event push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEventApiResponse {
    /// The polled task id.
    #[serde(default)]
    pub task_id: String,
    /// Overall task status, `ALL SUCCESS` or `N FAIL`.
    #[serde(default)]
    pub status: String,
    /// How many pushes the task attempted.
    #[serde(default)]
    pub all_request_count: u64,
    /// How many pushes succeeded.
    #[serde(default)]
    pub success_count: u64,
    /// Failure details, absent when every push succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<EventFail>,
}

impl CheckEventApiResponse {
    /// How many pushes failed.
    pub fn fail_count(&self) -> u64 {
        self.fail.as_ref().map_or(0, |fail| fail.count)
    }

    /// The failed pushes, empty when every push succeeded.
    pub fn fail_list(&self) -> &[Value] {
        match &self.fail {
            Some(fail) => &fail.list,
            None => &[],
        }
    }
}

impl FromPayload for CheckEventApiResponse {
    fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::parse("$", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_user_rejects_unknown_id_type() {
        let err = EventUser::new("email", "someone@example.com").unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "user.type"));
    }

    #[test]
    fn test_add_user_is_transactional() {
        let mut event = EventApi::new("bot_id", "key", "coupon_arrived");
        assert!(event.add_user("email", "nope").is_err());
        assert!(event.users().is_empty());
        event.add_user("botUserKey", "user_key").unwrap();
        assert_eq!(event.users().len(), 1);
    }

    #[test]
    fn test_user_limit() {
        let mut event = EventApi::new("bot_id", "key", "coupon_arrived");
        for i in 0..EVENT_MAX_USERS {
            event.add_user("botUserKey", format!("user_{i}")).unwrap();
        }
        assert!(event.add_user("botUserKey", "one_too_many").is_err());
        assert_eq!(event.users().len(), EVENT_MAX_USERS);
    }

    #[test]
    fn test_body_requires_a_user() {
        let event = EventApi::new("bot_id", "key", "coupon_arrived");
        assert!(matches!(event.body(), Err(Error::Composition(_))));
    }

    #[test]
    fn test_url_and_headers() {
        let event = EventApi::new("bot_id", "rest_key", "coupon_arrived");
        assert_eq!(event.url(), "https://bot-api.kakao.com/v2/bots/bot_id/talk");
        assert_eq!(
            event.clone().dev_channel().url(),
            "https://dev-bot-api.kakao.com/v2/bots/bot_id/talk"
        );
        let headers = event.headers();
        assert_eq!(headers[0], ("Authorization", "KakaoAK rest_key".to_string()));
        // building headers twice must not stack the prefix
        assert_eq!(event.headers(), headers);
    }

    #[test]
    fn test_body_shape() {
        let mut event = EventApi::new("bot_id", "key", "coupon_arrived").with_data({
            let mut data = Map::new();
            data.insert("couponId".into(), json!("c-1"));
            data
        });
        event.add_user("botUserKey", "user_key").unwrap();
        assert_eq!(
            event.body().unwrap(),
            json!({
                "event": {
                    "name": "coupon_arrived",
                    "data": {"couponId": "c-1"}
                },
                "user": [{"type": "botUserKey", "id": "user_key"}]
            })
        );
    }

    #[test]
    fn test_body_carries_user_properties() {
        let mut event = EventApi::new("bot_id", "key", "coupon_arrived");
        let user = EventUser::new("botUserKey", "user_key")
            .unwrap()
            .with_properties({
                let mut properties = Map::new();
                properties.insert("nickname".into(), json!("단골손님"));
                properties
            });
        event.add_event_user(user).unwrap();
        assert_eq!(
            event.body().unwrap()["user"],
            json!([{
                "type": "botUserKey",
                "id": "user_key",
                "properties": {"nickname": "단골손님"}
            }])
        );
    }

    #[test]
    fn test_event_api_response_parse() {
        let response = EventApiResponse::from_value(json!({
            "task_id": "task-1",
            "status": "SUCCESS",
            "message": "accepted",
            "timestamp": 1756100000000_i64
        }))
        .unwrap();
        assert_eq!(response.task_id, "task-1");
        assert_eq!(response.timestamp, 1756100000000);
    }

    #[test]
    fn test_check_event_api() {
        let check = CheckEventApi::new("task-1", "rest_key");
        assert_eq!(check.url(), "https://bot-api.kakao.com/v2/tasks/task-1");
        let headers = check.headers();
        assert_eq!(headers[0], ("Authorization", "KakaoAK rest_key".to_string()));
    }

    #[test]
    fn test_check_event_api_response_reads_fail_section() {
        let response = CheckEventApiResponse::from_value(json!({
            "task_id": "task-1",
            "status": "1 FAIL",
            "all_request_count": 3,
            "success_count": 2,
            "fail": {
                "count": 1,
                "list": [{"id": "user_3", "type": "botUserKey"}]
            }
        }))
        .unwrap();
        assert_eq!(response.fail_count(), 1);
        assert_eq!(
            response.fail_list(),
            &[json!({"id": "user_3", "type": "botUserKey"})]
        );
    }

    #[test]
    fn test_check_event_api_response_without_failures() {
        let response = CheckEventApiResponse::from_value(json!({
            "task_id": "task-1",
            "status": "ALL SUCCESS",
            "all_request_count": 3,
            "success_count": 3
        }))
        .unwrap();
        assert_eq!(response.fail_count(), 0);
        assert!(response.fail_list().is_empty());
    }
}
