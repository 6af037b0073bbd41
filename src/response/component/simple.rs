//! The simple components: text, image and the carousel container.

use serde_json::{Value, json};

use crate::base::SkillTemplate;
use crate::error::{Error, Result};
use crate::response::CAROUSEL_MAX_ITEMS;
use crate::response::component::card::Card;
use crate::validation::{check_length, check_url, require_non_empty};

/// Text above this length is truncated in the room and only shown in full
/// after a tap.
const SIMPLE_TEXT_DISPLAY_LIMIT: usize = 1000;

/// A plain text bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleText {
    /// The text to show.
    pub text: String,
}

impl SimpleText {
    /// Creates a text bubble.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SkillTemplate for SimpleText {
    fn validate(&self) -> Result<()> {
        require_non_empty("simpleText.text", &self.text)?;
        if self.text.chars().count() > SIMPLE_TEXT_DISPLAY_LIMIT {
            tracing::debug!(
                len = self.text.chars().count(),
                "simpleText exceeds the display limit and will be truncated in the room"
            );
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({"text": self.text}))
    }
}

/// An image bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleImage {
    /// Image URL.
    pub image_url: String,
    /// Text read out or shown when the image cannot be displayed.
    pub alt_text: String,
}

impl SimpleImage {
    /// Creates an image bubble.
    pub fn new(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            alt_text: alt_text.into(),
        }
    }
}

impl SkillTemplate for SimpleImage {
    fn validate(&self) -> Result<()> {
        check_url("simpleImage.imageUrl", &self.image_url)?;
        require_non_empty("simpleImage.altText", &self.alt_text)?;
        check_length("simpleImage.altText", &self.alt_text, 1000)
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({"imageUrl": self.image_url, "altText": self.alt_text}))
    }
}

/// A horizontally swipeable strip of cards of one type.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    /// The cards; all must be the same card type.
    pub items: Vec<Card>,
    max_items: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Carousel {
    /// Creates an empty carousel.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            max_items: CAROUSEL_MAX_ITEMS,
        }
    }

    /// Overrides the card limit.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Appends a card, rejecting a card of a different type than the ones
    /// already held and a card past the limit.
    pub fn add_item(&mut self, card: impl Into<Card>) -> Result<&mut Self> {
        let card = card.into();
        if self.items.len() >= self.max_items {
            return Err(Error::composition(format!(
                "a carousel holds at most {} cards",
                self.max_items
            )));
        }
        if let Some(first) = self.items.first()
            && first.name() != card.name()
        {
            return Err(Error::composition(format!(
                "a carousel cannot mix {} with {}",
                first.name(),
                card.name()
            )));
        }
        self.items.push(card);
        Ok(self)
    }

    /// The wire name of the carried card type; `None` while empty.
    pub fn item_type(&self) -> Option<&'static str> {
        self.items.first().map(Card::name)
    }
}

impl SkillTemplate for Carousel {
    fn validate(&self) -> Result<()> {
        let Some(first) = self.items.first() else {
            return Err(Error::composition("a carousel needs at least one card"));
        };
        if self.items.len() > self.max_items {
            return Err(Error::composition(format!(
                "a carousel holds at most {} cards",
                self.max_items
            )));
        }
        if self.items.iter().any(|card| card.name() != first.name()) {
            return Err(Error::composition("a carousel cannot mix card types"));
        }
        for card in &self.items {
            card.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        let items = self
            .items
            .iter()
            .map(Card::render)
            .collect::<Result<Vec<_>>>()?;
        // validate() guarantees at least one item
        let name = self.item_type().unwrap_or("basicCard");
        Ok(json!({"type": name, "items": items}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::component::card::{BasicCard, TextCard};
    use crate::response::component::common::Thumbnail;

    use serde_json::json;

    #[test]
    fn test_simple_text_render() {
        let text = SimpleText::new("안녕하세요");
        assert_eq!(text.render().unwrap(), json!({"text": "안녕하세요"}));
    }

    #[test]
    fn test_simple_text_rejects_empty() {
        assert!(SimpleText::new("").validate().is_err());
    }

    #[test]
    fn test_simple_image_render() {
        let image = SimpleImage::new("https://example.com/a.jpg", "카페 전경");
        assert_eq!(
            image.render().unwrap(),
            json!({"imageUrl": "https://example.com/a.jpg", "altText": "카페 전경"})
        );
    }

    #[test]
    fn test_simple_image_requires_valid_url() {
        assert!(SimpleImage::new("nope", "alt").validate().is_err());
    }

    #[test]
    fn test_carousel_rejects_mixed_types() {
        let mut carousel = Carousel::new();
        carousel.add_item(TextCard::new("a")).unwrap();
        let err = carousel
            .add_item(BasicCard::new(Thumbnail::new("https://example.com/a.jpg")))
            .unwrap_err();
        assert!(matches!(err, Error::Composition(_)));
        assert_eq!(carousel.items.len(), 1);
    }

    #[test]
    fn test_carousel_rejects_empty() {
        assert!(Carousel::new().validate().is_err());
    }

    #[test]
    fn test_carousel_item_limit() {
        let mut carousel = Carousel::new();
        for i in 0..10 {
            carousel.add_item(TextCard::new(format!("card {i}"))).unwrap();
        }
        assert!(carousel.add_item(TextCard::new("card 10")).is_err());
    }

    #[test]
    fn test_carousel_render_tags_card_type() {
        let mut carousel = Carousel::new();
        carousel.add_item(TextCard::new("첫째")).unwrap();
        carousel.add_item(TextCard::new("둘째")).unwrap();
        assert_eq!(
            carousel.render().unwrap(),
            json!({
                "type": "textCard",
                "items": [{"title": "첫째"}, {"title": "둘째"}]
            })
        );
    }
}
