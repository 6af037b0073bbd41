//! Outbound skill responses: component assembly and envelope rendering.

pub mod component;
pub mod interaction;

pub use component::Component;
pub use interaction::Interaction;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::base::{SkillTemplate, compact_object};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::response::component::QuickReply;

/// Schema version stamped onto every response envelope.
pub const RESPONSE_VERSION: &str = "2.0";

/// Maximum number of outputs in one response.
pub const MAX_OUTPUTS: usize = 3;
/// Maximum number of quick replies in one response.
pub const MAX_QUICK_REPLIES: usize = 10;
/// Maximum number of cards in a carousel.
pub const CAROUSEL_MAX_ITEMS: usize = 10;
/// Maximum number of rows in a list card, chat-room surface.
pub const LIST_CARD_MAX_ITEMS: usize = 5;
/// Maximum number of buttons on a list card.
pub const LIST_CARD_MAX_BUTTONS: usize = 2;

/// A complete skill response under assembly.
///
/// Components, quick replies and contexts are appended through the `add_*`
/// methods, which enforce the platform's count limits transactionally: a
/// rejected add leaves the response exactly as it was. Rendering does not
/// consume the response, so a handler can render, log and retry freely.
///
/// # Example
///
/// ```rust,ignore
/// use kakao_chatbot::{KakaoResponse, SimpleText, QuickReply};
///
/// let mut response = KakaoResponse::new();
/// response
///     .add_component(SimpleText::new("주문이 접수되었습니다"))?
///     .add_quick_reply(QuickReply::message("주문 확인", "주문 확인"))?;
/// let body = response.to_json()?;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KakaoResponse {
    components: Vec<Component>,
    quick_replies: Vec<QuickReply>,
    contexts: Vec<Context>,
    data: Map<String, Value>,
}

impl KakaoResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an output component, rejecting one past the limit.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Result<&mut Self> {
        if self.components.len() >= MAX_OUTPUTS {
            return Err(Error::composition(format!(
                "a response holds at most {MAX_OUTPUTS} outputs"
            )));
        }
        self.components.push(component.into());
        Ok(self)
    }

    /// Appends a quick reply, rejecting one past the limit.
    pub fn add_quick_reply(&mut self, quick_reply: QuickReply) -> Result<&mut Self> {
        if self.quick_replies.len() >= MAX_QUICK_REPLIES {
            return Err(Error::composition(format!(
                "a response holds at most {MAX_QUICK_REPLIES} quick replies"
            )));
        }
        self.quick_replies.push(quick_reply);
        Ok(self)
    }

    /// Appends a context to persist (or expire) after this turn.
    pub fn add_context(&mut self, context: Context) -> &mut Self {
        self.contexts.push(context);
        self
    }

    /// Replaces the free-form `data` section.
    pub fn set_data(&mut self, data: Map<String, Value>) -> &mut Self {
        self.data = data;
        self
    }

    /// Mutable access to the free-form `data` section.
    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    /// The output components appended so far, in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The quick replies appended so far.
    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    /// Serializes the response into its envelope JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_value()?).map_err(|e| Error::composition(e.to_string()))
    }

    /// Serializes the response into its envelope value.
    ///
    /// The envelope always carries `version` and `template.outputs`; the
    /// `quickReplies`, `context` and `data` sections only appear when
    /// non-empty.
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        tracing::debug!(
            outputs = self.components.len(),
            quick_replies = self.quick_replies.len(),
            "rendering skill response"
        );
        let outputs = self
            .components
            .iter()
            .map(Component::render_output)
            .collect::<Result<Vec<_>>>()?;
        let quick_replies = self
            .quick_replies
            .iter()
            .map(QuickReply::render)
            .collect::<Result<Vec<_>>>()?;
        let contexts = self
            .contexts
            .iter()
            .map(Context::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(compact_object([
            ("version", json!(RESPONSE_VERSION)),
            (
                "template",
                compact_object([
                    ("outputs", Value::Array(outputs)),
                    (
                        "quickReplies",
                        if quick_replies.is_empty() {
                            Value::Null
                        } else {
                            Value::Array(quick_replies)
                        },
                    ),
                ]),
            ),
            (
                "context",
                if contexts.is_empty() {
                    Value::Null
                } else {
                    json!({"values": contexts})
                },
            ),
            (
                "data",
                if self.data.is_empty() {
                    Value::Null
                } else {
                    Value::Object(self.data.clone())
                },
            ),
        ]))
    }
}

impl SkillTemplate for KakaoResponse {
    fn validate(&self) -> Result<()> {
        if self.components.is_empty() {
            return Err(Error::composition("a response needs at least one output"));
        }
        if self.components.len() > MAX_OUTPUTS {
            return Err(Error::composition(format!(
                "a response holds at most {MAX_OUTPUTS} outputs"
            )));
        }
        if self.quick_replies.len() > MAX_QUICK_REPLIES {
            return Err(Error::composition(format!(
                "a response holds at most {MAX_QUICK_REPLIES} quick replies"
            )));
        }
        for component in &self.components {
            component.validate()?;
        }
        for quick_reply in &self.quick_replies {
            quick_reply.validate()?;
        }
        for context in &self.contexts {
            context.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.to_value()
    }
}

/// Outcome of a parameter-validation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    /// Accept the value.
    Success,
    /// Reject the value and reprompt.
    Fail,
    /// Reject the value and abort slot filling.
    Error,
    /// Accept the value without validating it.
    Ignore,
}

/// The response to a parameter-validation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResponse {
    /// Verdict on the candidate value.
    pub status: ValidationStatus,
    /// Replacement value to store instead of the user's input.
    pub value: Option<String>,
    /// Data forwarded to the skill payload's validated parameter.
    pub data: Option<Map<String, Value>>,
    /// Message shown to the user on `Fail`.
    pub message: Option<String>,
}

impl ValidationResponse {
    /// Creates a response with a verdict and nothing else.
    pub fn new(status: ValidationStatus) -> Self {
        Self {
            status,
            value: None,
            data: None,
            message: None,
        }
    }

    /// Sets the replacement value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the forwarded data.
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the user-facing message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Serializes the response into a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.render()?).map_err(|e| Error::composition(e.to_string()))
    }
}

impl SkillTemplate for ValidationResponse {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        let status =
            serde_json::to_value(self.status).map_err(|e| Error::composition(e.to_string()))?;
        Ok(compact_object([
            ("status", status),
            ("value", self.value.as_ref().map_or(Value::Null, |v| json!(v))),
            (
                "data",
                self.data
                    .as_ref()
                    .map_or(Value::Null, |d| Value::Object(d.clone())),
            ),
            (
                "message",
                self.message.as_ref().map_or(Value::Null, |m| json!(m)),
            ),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::component::{SimpleText, TextCard};

    use serde_json::json;

    #[test]
    fn test_response_requires_an_output() {
        assert!(KakaoResponse::new().to_value().is_err());
    }

    #[test]
    fn test_response_output_limit_is_transactional() {
        let mut response = KakaoResponse::new();
        for i in 0..3 {
            response.add_component(SimpleText::new(format!("n{i}"))).unwrap();
        }
        assert!(response.add_component(SimpleText::new("n3")).is_err());
        assert_eq!(response.components().len(), 3);
    }

    #[test]
    fn test_quick_reply_limit() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("ok")).unwrap();
        for i in 0..10 {
            response
                .add_quick_reply(QuickReply::message(format!("q{i}"), "text"))
                .unwrap();
        }
        assert!(
            response
                .add_quick_reply(QuickReply::message("q10", "text"))
                .is_err()
        );
        assert_eq!(response.quick_replies().len(), 10);
    }

    #[test]
    fn test_minimal_envelope() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("안녕하세요")).unwrap();
        assert_eq!(
            response.to_value().unwrap(),
            json!({
                "version": "2.0",
                "template": {
                    "outputs": [{"simpleText": {"text": "안녕하세요"}}]
                }
            })
        );
    }

    #[test]
    fn test_full_envelope() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("주문 완료")).unwrap();
        response
            .add_quick_reply(QuickReply::message("다시 주문", "주문"))
            .unwrap();
        response.add_context(
            Context::new("order", 3)
                .unwrap()
                .with_param("menu", "coffee"),
        );
        response.data_mut().insert("orderId".into(), json!("01234"));
        assert_eq!(
            response.to_value().unwrap(),
            json!({
                "version": "2.0",
                "template": {
                    "outputs": [{"simpleText": {"text": "주문 완료"}}],
                    "quickReplies": [{
                        "label": "다시 주문",
                        "action": "message",
                        "messageText": "주문"
                    }]
                },
                "context": {
                    "values": [{
                        "name": "order",
                        "lifeSpan": 3,
                        "params": {"menu": "coffee"}
                    }]
                },
                "data": {"orderId": "01234"}
            })
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("ok")).unwrap();
        let first = response.to_value().unwrap();
        let second = response.to_value().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outputs_keep_insertion_order() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("first")).unwrap();
        response.add_component(TextCard::new("second")).unwrap();
        let value = response.to_value().unwrap();
        let outputs = value["template"]["outputs"].as_array().unwrap();
        assert!(outputs[0].get("simpleText").is_some());
        assert!(outputs[1].get("textCard").is_some());
    }

    #[test]
    fn test_invalid_component_fails_the_render() {
        let mut response = KakaoResponse::new();
        response.add_component(SimpleText::new("")).unwrap();
        assert!(response.to_value().is_err());
    }

    #[test]
    fn test_validation_response_render() {
        let response = ValidationResponse::new(ValidationStatus::Fail)
            .with_message("날짜 형식이 올바르지 않습니다");
        assert_eq!(
            response.render().unwrap(),
            json!({"status": "FAIL", "message": "날짜 형식이 올바르지 않습니다"})
        );
    }

    #[test]
    fn test_validation_response_success_with_value() {
        let response = ValidationResponse::new(ValidationStatus::Success).with_value("2026-08-26");
        assert_eq!(
            response.render().unwrap(),
            json!({"status": "SUCCESS", "value": "2026-08-26"})
        );
    }
}
