//! The item card: a receipt-style list of label/value rows.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::base::{SkillTemplate, compact_object};
use crate::error::{Error, Result};
use crate::response::component::common::Button;
use crate::validation::{check_one_of, check_range, check_url, require_non_empty};

/// Maximum number of buttons on an item card.
const ITEM_CARD_MAX_BUTTONS: usize = 3;

/// The image shown at the top of an item card.
///
/// Unlike the generic thumbnail this one carries explicit pixel
/// dimensions, which the platform requires to reserve layout space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemThumbnail {
    /// Image URL.
    pub image_url: String,
    /// Image width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Image height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ItemThumbnail {
    /// Creates a thumbnail for an image URL.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            width: None,
            height: None,
        }
    }

    /// Sets the pixel dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl SkillTemplate for ItemThumbnail {
    fn validate(&self) -> Result<()> {
        check_url("itemCard.thumbnail.imageUrl", &self.image_url)
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A title block rendered alongside an image on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTitle {
    /// Title text.
    pub title: String,
    /// Text under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image shown to the right of the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ImageTitle {
    /// Creates an image title with a title text.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            image_url: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl SkillTemplate for ImageTitle {
    fn validate(&self) -> Result<()> {
        require_non_empty("itemCard.imageTitle.title", &self.title)?;
        if let Some(url) = &self.image_url {
            check_url("itemCard.imageTitle.imageUrl", url)?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// One label/value row of the item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Row label.
    pub title: String,
    /// Row value.
    pub description: String,
}

impl Item {
    /// Creates a row.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl SkillTemplate for Item {
    fn validate(&self) -> Result<()> {
        require_non_empty("itemCard.item.title", &self.title)?;
        require_non_empty("itemCard.item.description", &self.description)
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// The emphasized summary row under the item list, e.g. the total price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListSummary {
    /// Summary label.
    pub title: String,
    /// Summary value.
    pub description: String,
}

impl ItemListSummary {
    /// Creates a summary row.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl SkillTemplate for ItemListSummary {
    fn validate(&self) -> Result<()> {
        require_non_empty("itemCard.itemListSummary.title", &self.title)?;
        require_non_empty("itemCard.itemListSummary.description", &self.description)
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// The profile header of an item card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProfile {
    /// Profile title.
    pub title: String,
    /// Profile image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Image width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Image height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ItemProfile {
    /// Creates a profile with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: None,
            width: None,
            height: None,
        }
    }

    /// Sets the profile image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the image pixel dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl SkillTemplate for ItemProfile {
    fn validate(&self) -> Result<()> {
        require_non_empty("itemCard.profile.title", &self.title)?;
        if let Some(url) = &self.image_url {
            check_url("itemCard.profile.imageUrl", url)?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| Error::composition(e.to_string()))
    }
}

/// A card listing label/value rows with optional header decorations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemCard {
    /// The rows; at least one is required.
    pub item_list: Vec<Item>,
    /// Image above the card.
    pub thumbnail: Option<ItemThumbnail>,
    /// Plain-text header; mutually exclusive with `profile`.
    pub head: Option<String>,
    /// Profile header; mutually exclusive with `head`.
    pub profile: Option<ItemProfile>,
    /// Title block with an image on the right.
    pub image_title: Option<ImageTitle>,
    /// Row value alignment, `left` or `right`.
    pub item_list_alignment: Option<String>,
    /// Emphasized summary row under the list.
    pub item_list_summary: Option<ItemListSummary>,
    /// Card title.
    pub title: Option<String>,
    /// Card description; requires `title`.
    pub description: Option<String>,
    /// Button stacking, `vertical` or `horizontal`.
    pub button_layout: Option<String>,
    /// Buttons, at most three.
    pub buttons: Vec<Button>,
}

impl ItemCard {
    /// Creates an item card from its rows.
    pub fn new(item_list: Vec<Item>) -> Self {
        Self {
            item_list,
            ..Self::default()
        }
    }

    /// Appends a row.
    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.item_list.push(item);
        self
    }

    /// Appends a button, rejecting the fourth.
    pub fn add_button(&mut self, button: Button) -> Result<&mut Self> {
        if self.buttons.len() >= ITEM_CARD_MAX_BUTTONS {
            return Err(Error::composition(format!(
                "an item card holds at most {ITEM_CARD_MAX_BUTTONS} buttons"
            )));
        }
        self.buttons.push(button);
        Ok(self)
    }

    /// Sets the thumbnail.
    pub fn with_thumbnail(mut self, thumbnail: ItemThumbnail) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    /// Sets the plain-text header.
    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    /// Sets the profile header.
    pub fn with_profile(mut self, profile: ItemProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Sets the image title block.
    pub fn with_image_title(mut self, image_title: ImageTitle) -> Self {
        self.image_title = Some(image_title);
        self
    }

    /// Sets the row value alignment.
    pub fn with_item_list_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.item_list_alignment = Some(alignment.into());
        self
    }

    /// Sets the summary row.
    pub fn with_item_list_summary(mut self, summary: ItemListSummary) -> Self {
        self.item_list_summary = Some(summary);
        self
    }

    /// Sets the card title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the card description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the button stacking direction.
    pub fn with_button_layout(mut self, layout: impl Into<String>) -> Self {
        self.button_layout = Some(layout.into());
        self
    }
}

impl SkillTemplate for ItemCard {
    fn validate(&self) -> Result<()> {
        if self.item_list.is_empty() {
            return Err(Error::required_field("itemCard.itemList"));
        }
        for item in &self.item_list {
            item.validate()?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            thumbnail.validate()?;
        }
        if self.head.is_some() && self.profile.is_some() {
            return Err(Error::composition(
                "itemCard.head and itemCard.profile are mutually exclusive",
            ));
        }
        if let Some(head) = &self.head {
            require_non_empty("itemCard.head", head)?;
        }
        if let Some(profile) = &self.profile {
            profile.validate()?;
        }
        if let Some(image_title) = &self.image_title {
            image_title.validate()?;
        }
        if let Some(alignment) = &self.item_list_alignment {
            check_one_of(
                "itemCard.itemListAlignment",
                &alignment.as_str(),
                &["left", "right"],
            )?;
        }
        if let Some(summary) = &self.item_list_summary {
            summary.validate()?;
        }
        if self.description.is_some() && self.title.is_none() {
            return Err(Error::composition(
                "itemCard.description requires itemCard.title",
            ));
        }
        if let Some(layout) = &self.button_layout {
            check_one_of(
                "itemCard.buttonLayout",
                &layout.as_str(),
                &["vertical", "horizontal"],
            )?;
        }
        check_range(
            "itemCard.buttons",
            self.buttons.len() as i64,
            0..=ITEM_CARD_MAX_BUTTONS as i64,
        )?;
        for button in &self.buttons {
            button.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        let items = self
            .item_list
            .iter()
            .map(Item::render)
            .collect::<Result<Vec<_>>>()?;
        let buttons = self
            .buttons
            .iter()
            .map(Button::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(compact_object([
            (
                "thumbnail",
                self.thumbnail
                    .as_ref()
                    .map_or(Ok(Value::Null), ItemThumbnail::render)?,
            ),
            (
                "head",
                self.head
                    .as_ref()
                    .map_or(Value::Null, |head| json!({"title": head})),
            ),
            (
                "profile",
                self.profile
                    .as_ref()
                    .map_or(Ok(Value::Null), ItemProfile::render)?,
            ),
            (
                "imageTitle",
                self.image_title
                    .as_ref()
                    .map_or(Ok(Value::Null), ImageTitle::render)?,
            ),
            ("itemList", Value::Array(items)),
            (
                "itemListAlignment",
                self.item_list_alignment
                    .as_ref()
                    .map_or(Value::Null, |a| json!(a)),
            ),
            (
                "itemListSummary",
                self.item_list_summary
                    .as_ref()
                    .map_or(Ok(Value::Null), ItemListSummary::render)?,
            ),
            ("title", self.title.as_ref().map_or(Value::Null, |t| json!(t))),
            (
                "description",
                self.description.as_ref().map_or(Value::Null, |d| json!(d)),
            ),
            (
                "buttonLayout",
                self.button_layout.as_ref().map_or(Value::Null, |l| json!(l)),
            ),
            (
                "buttons",
                if buttons.is_empty() {
                    Value::Null
                } else {
                    Value::Array(buttons)
                },
            ),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_item_card_requires_items() {
        let err = ItemCard::new(Vec::new()).validate().unwrap_err();
        assert!(matches!(err, Error::RequiredField { field } if field == "itemCard.itemList"));
    }

    #[test]
    fn test_item_card_render_minimal() {
        let card = ItemCard::new(vec![Item::new("주문번호", "01234")]);
        assert_eq!(
            card.render().unwrap(),
            json!({"itemList": [{"title": "주문번호", "description": "01234"}]})
        );
    }

    #[test]
    fn test_item_card_head_renders_as_object() {
        let card = ItemCard::new(vec![Item::new("a", "b")]).with_head("주문 내역");
        assert_eq!(
            card.render().unwrap(),
            json!({
                "head": {"title": "주문 내역"},
                "itemList": [{"title": "a", "description": "b"}]
            })
        );
    }

    #[test]
    fn test_item_card_head_and_profile_conflict() {
        let card = ItemCard::new(vec![Item::new("a", "b")])
            .with_head("head")
            .with_profile(ItemProfile::new("profile"));
        assert!(matches!(card.validate(), Err(Error::Composition(_))));
    }

    #[test]
    fn test_item_card_description_requires_title() {
        let card = ItemCard::new(vec![Item::new("a", "b")]).with_description("desc");
        assert!(card.validate().is_err());
        let card = ItemCard::new(vec![Item::new("a", "b")])
            .with_title("title")
            .with_description("desc");
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_item_card_rejects_bad_alignment() {
        let card = ItemCard::new(vec![Item::new("a", "b")]).with_item_list_alignment("center");
        assert!(matches!(card.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_item_card_button_limit() {
        let mut card = ItemCard::new(vec![Item::new("a", "b")]);
        for i in 0..3 {
            card.add_button(Button::message(format!("b{i}"), "text")).unwrap();
        }
        assert!(card.add_button(Button::message("b3", "text")).is_err());
        assert_eq!(card.buttons.len(), 3);
    }

    #[test]
    fn test_item_card_full_render() {
        let mut card = ItemCard::new(vec![Item::new("상품", "아메리카노")])
            .with_thumbnail(ItemThumbnail::new("https://example.com/a.jpg").with_size(800, 400))
            .with_title("영수증")
            .with_description("결제 완료")
            .with_item_list_summary(ItemListSummary::new("합계", "4,500원"))
            .with_button_layout("vertical");
        card.add_button(Button::web_link("상세 보기", "https://example.com/order"))
            .unwrap();
        assert_eq!(
            card.render().unwrap(),
            json!({
                "thumbnail": {
                    "imageUrl": "https://example.com/a.jpg",
                    "width": 800,
                    "height": 400
                },
                "itemList": [{"title": "상품", "description": "아메리카노"}],
                "itemListSummary": {"title": "합계", "description": "4,500원"},
                "title": "영수증",
                "description": "결제 완료",
                "buttonLayout": "vertical",
                "buttons": [{
                    "label": "상세 보기",
                    "action": "webLink",
                    "webLinkUrl": "https://example.com/order"
                }]
            })
        );
    }
}
