//! Shared capability traits for inbound and outbound model types.
//!
//! The library splits the protocol into two directions:
//!
//! - **Inbound**: types built from skill-server JSON implement
//!   [`FromPayload`].
//! - **Outbound**: types that serialize into the skill response implement
//!   [`SkillTemplate`] — validation first, then an exact wire-shape
//!   [`serde_json::Value`].
//!
//! A type used in both directions (see [`crate::Context`]) implements both.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Outbound contract: a renderable piece of a skill response.
///
/// `render` must call `validate` before producing output, so a successfully
/// rendered value is always protocol-conformant. Rendered objects contain
/// exactly the schema's required keys plus any optional keys that were
/// explicitly set — unset optional fields are omitted, never emitted as
/// `null`.
pub trait SkillTemplate {
    /// Checks the object against the platform's response rules.
    fn validate(&self) -> Result<()>;

    /// Validates, then converts the object into its wire-format JSON value.
    fn render(&self) -> Result<Value>;
}

/// Inbound contract: a type constructed from skill-server JSON.
pub trait FromPayload: Sized {
    /// Builds the type from an already-parsed JSON value.
    fn from_value(value: Value) -> Result<Self>;

    /// Parses a raw JSON string and builds the type from it.
    fn from_json(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::parse("$", e.to_string()))?;
        Self::from_value(value)
    }
}

/// Builds a JSON object from `(key, value)` pairs, skipping `Null` values.
///
/// Hand-assembled render output uses this to keep unset optional keys off
/// the wire, matching the serde `skip_serializing_if` behaviour of the
/// derived types.
pub(crate) fn compact_object<I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let mut map = Map::new();
    for (key, value) in entries {
        if !value.is_null() {
            map.insert(key.to_string(), value);
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_object_drops_nulls() {
        let value = compact_object([
            ("kept", json!("value")),
            ("dropped", Value::Null),
            ("zero", json!(0)),
        ]);
        assert_eq!(value, json!({"kept": "value", "zero": 0}));
    }
}
