//! Conversation-state contexts exchanged on every skill turn.
//!
//! A context travels in both directions with the same wire shape: the
//! platform sends the currently-live contexts inside the payload, and the
//! skill response lists the contexts it wants to persist (or expire, by
//! setting `lifespan` to 0). One type serves both directions — parsed
//! instances come from [`FromPayload`], outbound instances are built with
//! [`Context::new`] and rendered through [`SkillTemplate`].
//!
//! One wire quirk is preserved deliberately: the platform sends the field
//! as `lifespan` but expects it back as `lifeSpan`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::base::{FromPayload, SkillTemplate, compact_object};
use crate::error::{Error, Result};
use crate::validation::{check_range, require_non_empty};

/// One entry of a context's `params` map.
///
/// Inbound, the platform wraps every param as
/// `{"value": ..., "resolvedValue": ...}`; outbound, only the bare value is
/// sent back. [`ContextParam::render`] therefore collapses to `value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextParam {
    /// The param's value.
    #[serde(default)]
    pub value: Value,
    /// The value after platform-side entity resolution, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_value: Option<Value>,
}

impl ContextParam {
    /// Creates a param holding a bare value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            resolved_value: None,
        }
    }
}

impl SkillTemplate for ContextParam {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Returns only the value; the outbound schema has no param wrapper.
    fn render(&self) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// A named, lifespan-bounded piece of conversational state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Context name, as configured in the open builder.
    pub name: String,
    /// Remaining number of turns this context stays alive; 0 expires it.
    pub lifespan: i32,
    /// Remaining wall-clock lifetime in seconds, if the platform tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    /// Free-form params attached to the context.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl Context {
    /// Creates an outbound context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` is empty or `lifespan` is
    /// negative.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kakao_chatbot::Context;
    ///
    /// let ctx = Context::new("order", 3).unwrap();
    /// assert!(Context::new("order", -1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, lifespan: i32) -> Result<Self> {
        let context = Self {
            name: name.into(),
            lifespan,
            ttl: None,
            params: Map::new(),
        };
        context.validate()?;
        Ok(context)
    }

    /// Sets the time-to-live in seconds.
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Attaches a param to the context.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Looks up a param, unwrapping the inbound `{"value": ...}` envelope
    /// when present.
    pub fn param(&self, key: &str) -> Option<&Value> {
        let raw = self.params.get(key)?;
        match raw {
            Value::Object(map) => map.get("value").or(Some(raw)),
            _ => Some(raw),
        }
    }
}

impl FromPayload for Context {
    fn from_value(value: Value) -> Result<Self> {
        let context: Context = serde_json::from_value(value)
            .map_err(|e| Error::parse("contexts", e.to_string()))?;
        context.validate()?;
        Ok(context)
    }
}

impl SkillTemplate for Context {
    fn validate(&self) -> Result<()> {
        require_non_empty("context.name", &self.name)?;
        check_range("context.lifespan", i64::from(self.lifespan), 0..=i64::MAX)?;
        if let Some(ttl) = self.ttl {
            check_range("context.ttl", ttl, 0..=i64::MAX)?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        let params: Map<String, Value> = self
            .params
            .iter()
            .map(|(key, raw)| {
                let rendered = match raw {
                    Value::Object(map) => map.get("value").cloned().unwrap_or_else(|| raw.clone()),
                    _ => raw.clone(),
                };
                (key.clone(), rendered)
            })
            .collect();
        Ok(compact_object([
            ("name", json!(self.name)),
            ("lifeSpan", json!(self.lifespan)),
            ("ttl", self.ttl.map_or(Value::Null, |t| json!(t))),
            (
                "params",
                if params.is_empty() {
                    Value::Null
                } else {
                    Value::Object(params)
                },
            ),
        ]))
    }
}
