//! The actions a button, quick reply or list item can trigger.

use serde::{Deserialize, Serialize};

use crate::base::SkillTemplate;
use crate::error::Result;
use crate::validation::{check_phone_number, check_url, require_non_empty};
use serde_json::Value;

/// What happens when the user taps an interactive element.
///
/// Serializes as the flat wire shape the platform expects: an `action`
/// discriminator plus the variant's own field, e.g.
/// `{"action": "webLink", "webLinkUrl": "https://..."}`. Each variant
/// carries exactly the fields its action requires, so a web link without a
/// URL is unrepresentable rather than a runtime error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Interaction {
    /// Opens a URL.
    WebLink {
        /// Destination, must be an absolute http(s) URL.
        web_link_url: String,
    },
    /// Posts a message into the chat room as if the user had typed it.
    Message {
        /// The text to post; falls back to the element's label when empty
        /// on some surfaces, but this library requires it explicitly.
        message_text: String,
    },
    /// Dials a phone number.
    Phone {
        /// The number to dial.
        phone_number: String,
    },
    /// Jumps to another block.
    Block {
        /// The target block's id.
        block_id: String,
        /// Message posted into the room while jumping.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_text: Option<String>,
    },
    /// Opens the share sheet for the containing card.
    Share,
    /// Connects the user to a human operator (consultation channels only).
    Operator,
}

impl Interaction {
    /// The wire name of the action, as sent in the `action` key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WebLink { .. } => "webLink",
            Self::Message { .. } => "message",
            Self::Phone { .. } => "phone",
            Self::Block { .. } => "block",
            Self::Share => "share",
            Self::Operator => "operator",
        }
    }
}

impl SkillTemplate for Interaction {
    fn validate(&self) -> Result<()> {
        match self {
            Self::WebLink { web_link_url } => check_url("webLinkUrl", web_link_url),
            Self::Message { message_text } => require_non_empty("messageText", message_text),
            Self::Phone { phone_number } => check_phone_number("phoneNumber", phone_number),
            Self::Block { block_id, .. } => require_non_empty("blockId", block_id),
            Self::Share | Self::Operator => Ok(()),
        }
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| crate::error::Error::composition(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_link_renders_flat() {
        let interaction = Interaction::WebLink {
            web_link_url: "https://example.com".into(),
        };
        assert_eq!(
            interaction.render().unwrap(),
            json!({"action": "webLink", "webLinkUrl": "https://example.com"})
        );
    }

    #[test]
    fn test_web_link_rejects_bad_url() {
        let interaction = Interaction::WebLink {
            web_link_url: "ftp://example.com".into(),
        };
        assert!(interaction.validate().is_err());
    }

    #[test]
    fn test_phone_rejects_non_number() {
        let interaction = Interaction::Phone {
            phone_number: "call me".into(),
        };
        assert!(interaction.validate().is_err());
    }

    #[test]
    fn test_block_omits_unset_message() {
        let interaction = Interaction::Block {
            block_id: "block_id".into(),
            message_text: None,
        };
        assert_eq!(
            interaction.render().unwrap(),
            json!({"action": "block", "blockId": "block_id"})
        );
    }

    #[test]
    fn test_unit_actions_render_discriminator_only() {
        assert_eq!(
            Interaction::Share.render().unwrap(),
            json!({"action": "share"})
        );
        assert_eq!(Interaction::Operator.name(), "operator");
    }
}
