//! Bot and intent sections of the inbound payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The bot that received the utterance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bot {
    /// Bot identifier.
    #[serde(default)]
    pub id: String,
    /// Bot display name.
    #[serde(default)]
    pub name: String,
}

/// A knowledge-base entry matched against the utterance.
///
/// Only present when the bot has the knowledge-plus feature enabled and the
/// utterance matched one of its entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knowledge {
    /// Answer text of the matched entry.
    #[serde(default)]
    pub answer: String,
    /// Question text of the matched entry.
    #[serde(default)]
    pub question: String,
    /// Categories the entry belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
    /// "Read more" link shown with the answer.
    #[serde(default)]
    pub landing_url: String,
    /// Thumbnail image shown with the answer.
    #[serde(default)]
    pub image_url: String,
}

/// Extra intent information.
///
/// The platform sends `matched_knowledges` in snake_case, unlike the rest
/// of the envelope, so this struct deliberately has no `rename_all`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentExtra {
    /// Match diagnostics; shape undocumented by the platform.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub reason: Map<String, Value>,
    /// Knowledge entries that matched the utterance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_knowledges: Vec<Knowledge>,
}

/// The block or knowledge entry the utterance matched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Intent {
    /// Intent identifier.
    #[serde(default)]
    pub id: String,
    /// Intent name.
    #[serde(default)]
    pub name: String,
    /// Knowledge-match details.
    #[serde(default)]
    pub extra: IntentExtra,
}
