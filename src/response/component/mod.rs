//! The renderable output components of a skill response.
//!
//! Every component implements [`SkillTemplate`]; [`Component`] is the
//! closed union of everything that may appear in `template.outputs`.

pub mod card;
pub mod common;
pub mod itemcard;
pub mod simple;

pub use card::{BasicCard, Card, CommerceCard, ListCard, TextCard};
pub use common::{Button, Link, ListItem, Profile, QuickReply, Thumbnail};
pub use itemcard::{Item, ItemCard, ItemListSummary, ItemProfile, ItemThumbnail, ImageTitle};
pub use simple::{Carousel, SimpleImage, SimpleText};

use serde_json::{Value, json};

use crate::base::SkillTemplate;
use crate::error::Result;

/// Any component a skill response can place into `template.outputs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// A [`SimpleText`] bubble.
    SimpleText(SimpleText),
    /// A [`SimpleImage`] bubble.
    SimpleImage(SimpleImage),
    /// A [`TextCard`].
    TextCard(TextCard),
    /// A [`BasicCard`].
    BasicCard(BasicCard),
    /// A [`CommerceCard`].
    CommerceCard(CommerceCard),
    /// A [`ListCard`].
    ListCard(ListCard),
    /// An [`ItemCard`].
    ItemCard(ItemCard),
    /// A [`Carousel`] of cards.
    Carousel(Carousel),
}

impl Component {
    /// The wire name of the component, used as its key inside an output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SimpleText(_) => "simpleText",
            Self::SimpleImage(_) => "simpleImage",
            Self::TextCard(_) => "textCard",
            Self::BasicCard(_) => "basicCard",
            Self::CommerceCard(_) => "commerceCard",
            Self::ListCard(_) => "listCard",
            Self::ItemCard(_) => "itemCard",
            Self::Carousel(_) => "carousel",
        }
    }

    /// Renders the component wrapped in its output key, the shape used
    /// inside `template.outputs`.
    pub fn render_output(&self) -> Result<Value> {
        Ok(json!({self.name(): self.render()?}))
    }
}

impl SkillTemplate for Component {
    fn validate(&self) -> Result<()> {
        match self {
            Self::SimpleText(c) => c.validate(),
            Self::SimpleImage(c) => c.validate(),
            Self::TextCard(c) => c.validate(),
            Self::BasicCard(c) => c.validate(),
            Self::CommerceCard(c) => c.validate(),
            Self::ListCard(c) => c.validate(),
            Self::ItemCard(c) => c.validate(),
            Self::Carousel(c) => c.validate(),
        }
    }

    fn render(&self) -> Result<Value> {
        match self {
            Self::SimpleText(c) => c.render(),
            Self::SimpleImage(c) => c.render(),
            Self::TextCard(c) => c.render(),
            Self::BasicCard(c) => c.render(),
            Self::CommerceCard(c) => c.render(),
            Self::ListCard(c) => c.render(),
            Self::ItemCard(c) => c.render(),
            Self::Carousel(c) => c.render(),
        }
    }
}

impl From<SimpleText> for Component {
    fn from(component: SimpleText) -> Self {
        Self::SimpleText(component)
    }
}

impl From<SimpleImage> for Component {
    fn from(component: SimpleImage) -> Self {
        Self::SimpleImage(component)
    }
}

impl From<TextCard> for Component {
    fn from(component: TextCard) -> Self {
        Self::TextCard(component)
    }
}

impl From<BasicCard> for Component {
    fn from(component: BasicCard) -> Self {
        Self::BasicCard(component)
    }
}

impl From<CommerceCard> for Component {
    fn from(component: CommerceCard) -> Self {
        Self::CommerceCard(component)
    }
}

impl From<ListCard> for Component {
    fn from(component: ListCard) -> Self {
        Self::ListCard(component)
    }
}

impl From<ItemCard> for Component {
    fn from(component: ItemCard) -> Self {
        Self::ItemCard(component)
    }
}

impl From<Carousel> for Component {
    fn from(component: Carousel) -> Self {
        Self::Carousel(component)
    }
}

impl From<Card> for Component {
    fn from(card: Card) -> Self {
        match card {
            Card::Text(c) => Self::TextCard(c),
            Card::Basic(c) => Self::BasicCard(c),
            Card::Commerce(c) => Self::CommerceCard(c),
            Card::List(c) => Self::ListCard(c),
            Card::Item(c) => Self::ItemCard(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_output_wraps_component_in_its_name() {
        let component = Component::from(SimpleText::new("안녕하세요"));
        assert_eq!(
            component.render_output().unwrap(),
            json!({"simpleText": {"text": "안녕하세요"}})
        );
    }

    #[test]
    fn test_render_output_propagates_validation_failure() {
        let component = Component::from(SimpleText::new(""));
        assert!(component.render_output().is_err());
    }

    #[test]
    fn test_component_names() {
        assert_eq!(Component::from(SimpleText::new("t")).name(), "simpleText");
        assert_eq!(Component::from(Carousel::new()).name(), "carousel");
        assert_eq!(Component::from(TextCard::new("t")).name(), "textCard");
    }
}
