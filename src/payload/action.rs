//! Action section of the inbound payload and typed parameter access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One entry of `detailParams`: a parameter with its extraction origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// The text as extracted from the utterance.
    #[serde(default)]
    pub origin: String,
    /// The representative value; a string for simple entities, an object
    /// for structured ones (dates, durations, ...).
    #[serde(default)]
    pub value: Value,
    /// Entity group the parameter belongs to.
    #[serde(default)]
    pub group_name: String,
}

/// The `action` section: which skill action fired and with what parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Action identifier.
    #[serde(default)]
    pub id: String,
    /// Action name.
    #[serde(default)]
    pub name: String,
    /// Parameters extracted from the utterance, keyed by parameter name.
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Detailed parameter records, keyed by parameter name.
    #[serde(default)]
    pub detail_params: BTreeMap<String, Param>,
    /// Free-form data the client attached when invoking the block.
    ///
    /// Opaque by design: the platform passes it through untouched and this
    /// library applies no validation to it.
    #[serde(default)]
    pub client_extra: Map<String, Value>,
}

impl Action {
    /// Looks up a named parameter and deserializes it into the expected
    /// type.
    ///
    /// # Errors
    ///
    /// [`Error::RequiredField`] if the parameter is absent,
    /// [`Error::Validation`] if its value does not match `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let quantity: u32 = payload.action.param("quantity")?;
    /// let menu: String = payload.action.param("menu")?;
    /// ```
    pub fn param<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let raw = self
            .params
            .get(name)
            .ok_or_else(|| Error::required_field(format!("action.params.{name}")))?;
        serde_json::from_value(raw.clone()).map_err(|e| {
            Error::validation(
                format!("action.params.{name}"),
                format!("unexpected value `{raw}`: {e}"),
            )
        })
    }

    /// Returns the detailed record of a named parameter, if present.
    pub fn detail_param(&self, name: &str) -> Option<&Param> {
        self.detail_params.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action() -> Action {
        serde_json::from_value(json!({
            "id": "action_id",
            "name": "order",
            "params": {"menu": "coffee", "quantity": 2},
            "detailParams": {
                "menu": {"origin": "커피", "value": "coffee", "groupName": "drink"}
            },
            "clientExtra": {"table": 7}
        }))
        .unwrap()
    }

    #[test]
    fn test_typed_param_access() {
        let action = action();
        let menu: String = action.param("menu").unwrap();
        assert_eq!(menu, "coffee");
        let quantity: u32 = action.param("quantity").unwrap();
        assert_eq!(quantity, 2);
    }

    #[test]
    fn test_param_missing_is_required_field_error() {
        let err = action().param::<String>("absent").unwrap_err();
        assert!(
            matches!(err, Error::RequiredField { field } if field == "action.params.absent")
        );
    }

    #[test]
    fn test_param_type_mismatch_is_validation_error() {
        let err = action().param::<u32>("menu").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_detail_param() {
        let action = action();
        let detail = action.detail_param("menu").unwrap();
        assert_eq!(detail.origin, "커피");
        assert_eq!(detail.group_name, "drink");
        assert!(action.detail_param("absent").is_none());
    }

    #[test]
    fn test_detail_params_keep_wire_names() {
        let action = action();
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value["detailParams"]["menu"],
            json!({"origin": "커피", "value": "coffee", "groupName": "drink"})
        );
        let reparsed: Action = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, action);
    }
}
