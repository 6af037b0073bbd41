//! Building blocks shared by several card components.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::base::SkillTemplate;
use crate::error::{Error, Result};
use crate::response::interaction::Interaction;
use crate::validation::{check_url, require_non_empty};

/// Per-platform destination URLs, used by thumbnails and list items.
///
/// At least one of the three targets must be set; the platform falls back
/// from the specific target to `web`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    /// Fallback URL for every platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    /// URL opened on desktop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<String>,
    /// URL opened on mobile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Link {
    /// Creates a link with only the `web` fallback set.
    pub fn web(url: impl Into<String>) -> Self {
        Self {
            web: Some(url.into()),
            ..Self::default()
        }
    }
}

impl SkillTemplate for Link {
    fn validate(&self) -> Result<()> {
        if self.web.is_none() && self.pc.is_none() && self.mobile.is_none() {
            return Err(Error::validation(
                "link",
                "at least one of web, pc or mobile must be set",
            ));
        }
        for (field, url) in [
            ("link.web", &self.web),
            ("link.pc", &self.pc),
            ("link.mobile", &self.mobile),
        ] {
            if let Some(url) = url {
                check_url(field, url)?;
            }
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// An image attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Image URL.
    pub image_url: String,
    /// Where tapping the image leads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    /// Keep the image's own aspect ratio instead of cropping to 2:1.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed_ratio: bool,
}

impl Thumbnail {
    /// Creates a thumbnail for an image URL.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            link: None,
            fixed_ratio: false,
        }
    }

    /// Sets the tap-through link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Keeps the image's own aspect ratio.
    pub fn with_fixed_ratio(mut self) -> Self {
        self.fixed_ratio = true;
        self
    }
}

impl SkillTemplate for Thumbnail {
    fn validate(&self) -> Result<()> {
        check_url("thumbnail.imageUrl", &self.image_url)?;
        if let Some(link) = &self.link {
            link.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A speaker profile shown on commerce cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    pub nickname: String,
    /// Profile image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Profile {
    /// Creates a profile with a display name.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            image_url: None,
        }
    }

    /// Sets the profile image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl SkillTemplate for Profile {
    fn validate(&self) -> Result<()> {
        require_non_empty("profile.nickname", &self.nickname)?;
        if let Some(url) = &self.image_url {
            check_url("profile.imageUrl", url)?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A button attached to a card. Accepts any [`Interaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Button caption.
    pub label: String,
    /// What tapping the button does.
    #[serde(flatten)]
    pub interaction: Interaction,
    /// Free-form data passed back in `clientExtra` when the action fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl Button {
    /// Creates a button with an arbitrary interaction.
    pub fn new(label: impl Into<String>, interaction: Interaction) -> Self {
        Self {
            label: label.into(),
            interaction,
            extra: None,
        }
    }

    /// A button that opens a URL.
    pub fn web_link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(
            label,
            Interaction::WebLink {
                web_link_url: url.into(),
            },
        )
    }

    /// A button that posts a message into the room.
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            label,
            Interaction::Message {
                message_text: text.into(),
            },
        )
    }

    /// A button that dials a phone number.
    pub fn phone(label: impl Into<String>, number: impl Into<String>) -> Self {
        Self::new(
            label,
            Interaction::Phone {
                phone_number: number.into(),
            },
        )
    }

    /// A button that jumps to another block.
    pub fn block(label: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self::new(
            label,
            Interaction::Block {
                block_id: block_id.into(),
                message_text: None,
            },
        )
    }

    /// A button that opens the share sheet.
    pub fn share(label: impl Into<String>) -> Self {
        Self::new(label, Interaction::Share)
    }

    /// Attaches client extra data.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }
}

impl SkillTemplate for Button {
    fn validate(&self) -> Result<()> {
        require_non_empty("button.label", &self.label)?;
        self.interaction.validate()
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A suggestion chip shown under the response.
///
/// Unlike a [`Button`], the platform only accepts `message` and `block`
/// actions here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    /// Chip caption.
    pub label: String,
    /// What tapping the chip does.
    #[serde(flatten)]
    pub interaction: Interaction,
    /// Free-form data passed back in `clientExtra` when the action fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl QuickReply {
    /// A chip that posts a message into the room.
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interaction: Interaction::Message {
                message_text: text.into(),
            },
            extra: None,
        }
    }

    /// A chip that jumps to another block.
    pub fn block(label: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interaction: Interaction::Block {
                block_id: block_id.into(),
                message_text: None,
            },
            extra: None,
        }
    }

    /// Attaches client extra data.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }
}

impl SkillTemplate for QuickReply {
    fn validate(&self) -> Result<()> {
        require_non_empty("quickReply.label", &self.label)?;
        match &self.interaction {
            Interaction::Message { .. } | Interaction::Block { .. } => {}
            other => {
                return Err(Error::validation(
                    "quickReply.action",
                    format!("`{}` is not allowed on quick replies", other.name()),
                ));
            }
        }
        self.interaction.validate()
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// One row of a list card, also used as its header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Row title.
    pub title: String,
    /// Row description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Row image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Where tapping the row leads, for link rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    /// Action fired when tapping the row; only `message` and `block` are
    /// accepted here.
    #[serde(flatten)]
    pub interaction: Option<Interaction>,
    /// Free-form data passed back in `clientExtra` when the action fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl ListItem {
    /// Creates a plain row with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            image_url: None,
            link: None,
            interaction: None,
            extra: None,
        }
    }

    /// Sets the row description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the row image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the tap-through link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Sets the tap action.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = Some(interaction);
        self
    }

    /// Attaches client extra data.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }
}

impl SkillTemplate for ListItem {
    fn validate(&self) -> Result<()> {
        require_non_empty("listItem.title", &self.title)?;
        if let Some(url) = &self.image_url {
            check_url("listItem.imageUrl", url)?;
        }
        if let Some(link) = &self.link {
            link.validate()?;
        }
        if let Some(interaction) = &self.interaction {
            match interaction {
                Interaction::Message { .. } | Interaction::Block { .. } => {}
                other => {
                    return Err(Error::validation(
                        "listItem.action",
                        format!("`{}` is not allowed on list items", other.name()),
                    ));
                }
            }
            interaction.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}
