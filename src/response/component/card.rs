//! Card components: text, basic, commerce and list cards.

use serde_json::{Value, json};

use crate::base::{SkillTemplate, compact_object};
use crate::error::{Error, Result};
use crate::response::component::common::{Button, ListItem, Profile, Thumbnail};
use crate::response::component::itemcard::ItemCard;
use crate::response::{LIST_CARD_MAX_BUTTONS, LIST_CARD_MAX_ITEMS};
use crate::validation::check_one_of;

/// Renders a button list, or `Null` when there are none.
fn render_buttons(buttons: &[Button]) -> Result<Value> {
    if buttons.is_empty() {
        return Ok(Value::Null);
    }
    let rendered = buttons
        .iter()
        .map(Button::render)
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(rendered))
}

// ============================================================
// Text card
// ============================================================

/// A card of plain text with buttons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextCard {
    /// Card title.
    pub title: Option<String>,
    /// Card body text.
    pub description: Option<String>,
    /// Buttons under the text.
    pub buttons: Vec<Button>,
}

impl TextCard {
    /// Creates a text card with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the body text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a button.
    pub fn add_button(&mut self, button: Button) -> &mut Self {
        self.buttons.push(button);
        self
    }
}

impl SkillTemplate for TextCard {
    fn validate(&self) -> Result<()> {
        if self.title.is_none() && self.description.is_none() {
            return Err(Error::required_field("textCard.title or textCard.description"));
        }
        for button in &self.buttons {
            button.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        Ok(compact_object([
            ("title", self.title.as_ref().map_or(Value::Null, |t| json!(t))),
            (
                "description",
                self.description.as_ref().map_or(Value::Null, |d| json!(d)),
            ),
            ("buttons", render_buttons(&self.buttons)?),
        ]))
    }
}

// ============================================================
// Basic card
// ============================================================

/// The general-purpose card: a thumbnail with text and buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicCard {
    /// The card's image.
    pub thumbnail: Thumbnail,
    /// Card title.
    pub title: Option<String>,
    /// Card body text.
    pub description: Option<String>,
    /// Buttons under the text.
    pub buttons: Vec<Button>,
    /// Whether the user may forward the card to another room.
    pub forwardable: bool,
}

impl BasicCard {
    /// Creates a basic card around a thumbnail.
    pub fn new(thumbnail: Thumbnail) -> Self {
        Self {
            thumbnail,
            title: None,
            description: None,
            buttons: Vec::new(),
            forwardable: false,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lets the user forward the card.
    pub fn with_forwardable(mut self) -> Self {
        self.forwardable = true;
        self
    }

    /// Appends a button.
    pub fn add_button(&mut self, button: Button) -> &mut Self {
        self.buttons.push(button);
        self
    }
}

impl SkillTemplate for BasicCard {
    fn validate(&self) -> Result<()> {
        self.thumbnail.validate()?;
        for button in &self.buttons {
            button.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        Ok(compact_object([
            ("thumbnail", self.thumbnail.render()?),
            ("title", self.title.as_ref().map_or(Value::Null, |t| json!(t))),
            (
                "description",
                self.description.as_ref().map_or(Value::Null, |d| json!(d)),
            ),
            ("buttons", render_buttons(&self.buttons)?),
            (
                "forwardable",
                if self.forwardable { json!(true) } else { Value::Null },
            ),
        ]))
    }
}

// ============================================================
// Commerce card
// ============================================================

/// A product card with price and discount information.
#[derive(Debug, Clone, PartialEq)]
pub struct CommerceCard {
    /// Product price.
    pub price: i64,
    /// Product images, at least one.
    pub thumbnails: Vec<Thumbnail>,
    /// Product title.
    pub title: Option<String>,
    /// Product description.
    pub description: Option<String>,
    /// Price currency; the platform only accepts `won`.
    pub currency: Option<String>,
    /// Absolute discount amount.
    pub discount: Option<i64>,
    /// Discount rate in percent; requires `discounted_price`.
    pub discount_rate: Option<i64>,
    /// Price after discount.
    pub discounted_price: Option<i64>,
    /// Seller profile.
    pub profile: Option<Profile>,
    /// Buttons under the card.
    pub buttons: Vec<Button>,
}

impl CommerceCard {
    /// Creates a commerce card from a price and its product images.
    pub fn new(price: i64, thumbnails: Vec<Thumbnail>) -> Self {
        Self {
            price,
            thumbnails,
            title: None,
            description: None,
            currency: None,
            discount: None,
            discount_rate: None,
            discounted_price: None,
            profile: None,
            buttons: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets an absolute discount amount.
    pub fn with_discount(mut self, discount: i64) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets a discount rate and the resulting price.
    pub fn with_discount_rate(mut self, rate: i64, discounted_price: i64) -> Self {
        self.discount_rate = Some(rate);
        self.discounted_price = Some(discounted_price);
        self
    }

    /// Sets the seller profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Appends a button.
    pub fn add_button(&mut self, button: Button) -> &mut Self {
        self.buttons.push(button);
        self
    }
}

impl SkillTemplate for CommerceCard {
    fn validate(&self) -> Result<()> {
        if self.thumbnails.is_empty() {
            return Err(Error::required_field("commerceCard.thumbnails"));
        }
        for thumbnail in &self.thumbnails {
            thumbnail.validate()?;
        }
        if let Some(currency) = &self.currency {
            check_one_of("commerceCard.currency", &currency.as_str(), &["won"])?;
        }
        if self.discount_rate.is_some() && self.discounted_price.is_none() {
            return Err(Error::composition(
                "commerceCard.discountRate requires commerceCard.discountedPrice",
            ));
        }
        if let Some(profile) = &self.profile {
            profile.validate()?;
        }
        for button in &self.buttons {
            button.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        let thumbnails = self
            .thumbnails
            .iter()
            .map(Thumbnail::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(compact_object([
            ("price", json!(self.price)),
            ("thumbnails", Value::Array(thumbnails)),
            ("title", self.title.as_ref().map_or(Value::Null, |t| json!(t))),
            (
                "description",
                self.description.as_ref().map_or(Value::Null, |d| json!(d)),
            ),
            (
                "currency",
                self.currency.as_ref().map_or(Value::Null, |c| json!(c)),
            ),
            ("discount", self.discount.map_or(Value::Null, |d| json!(d))),
            (
                "discountRate",
                self.discount_rate.map_or(Value::Null, |r| json!(r)),
            ),
            (
                "discountedPrice",
                self.discounted_price.map_or(Value::Null, |p| json!(p)),
            ),
            (
                "profile",
                self.profile.as_ref().map_or(Ok(Value::Null), Profile::render)?,
            ),
            ("buttons", render_buttons(&self.buttons)?),
        ]))
    }
}

// ============================================================
// List card
// ============================================================

/// A header plus up to five tappable rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCard {
    /// The header row.
    pub header: ListItem,
    /// The body rows.
    pub items: Vec<ListItem>,
    /// Buttons under the rows, at most two.
    pub buttons: Vec<Button>,
    max_items: usize,
}

impl ListCard {
    /// Creates a list card with a header and no rows yet.
    pub fn new(header: ListItem) -> Self {
        Self {
            header,
            items: Vec::new(),
            buttons: Vec::new(),
            max_items: LIST_CARD_MAX_ITEMS,
        }
    }

    /// Overrides the row limit, for surfaces that allow more than the
    /// chat-room default.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Appends a row, rejecting one past the limit.
    pub fn add_item(&mut self, item: ListItem) -> Result<&mut Self> {
        if self.items.len() >= self.max_items {
            return Err(Error::composition(format!(
                "a list card holds at most {} items",
                self.max_items
            )));
        }
        self.items.push(item);
        Ok(self)
    }

    /// Appends a button, rejecting one past the limit.
    pub fn add_button(&mut self, button: Button) -> Result<&mut Self> {
        if self.buttons.len() >= LIST_CARD_MAX_BUTTONS {
            return Err(Error::composition(format!(
                "a list card holds at most {LIST_CARD_MAX_BUTTONS} buttons"
            )));
        }
        self.buttons.push(button);
        Ok(self)
    }
}

impl SkillTemplate for ListCard {
    fn validate(&self) -> Result<()> {
        self.header.validate()?;
        if self.items.is_empty() {
            return Err(Error::required_field("listCard.items"));
        }
        if self.items.len() > self.max_items {
            return Err(Error::composition(format!(
                "a list card holds at most {} items",
                self.max_items
            )));
        }
        if self.buttons.len() > LIST_CARD_MAX_BUTTONS {
            return Err(Error::composition(format!(
                "a list card holds at most {LIST_CARD_MAX_BUTTONS} buttons"
            )));
        }
        for item in &self.items {
            item.validate()?;
        }
        for button in &self.buttons {
            button.validate()?;
        }
        Ok(())
    }

    fn render(&self) -> Result<Value> {
        self.validate()?;
        let items = self
            .items
            .iter()
            .map(ListItem::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(compact_object([
            ("header", self.header.render()?),
            ("items", Value::Array(items)),
            ("buttons", render_buttons(&self.buttons)?),
        ]))
    }
}

// ============================================================
// Card union
// ============================================================

/// Any card component, as carried by a carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    /// A [`TextCard`].
    Text(TextCard),
    /// A [`BasicCard`].
    Basic(BasicCard),
    /// A [`CommerceCard`].
    Commerce(CommerceCard),
    /// A [`ListCard`].
    List(ListCard),
    /// An [`ItemCard`].
    Item(ItemCard),
}

impl Card {
    /// The wire name of the card type, as used in output and carousel
    /// `type` keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "textCard",
            Self::Basic(_) => "basicCard",
            Self::Commerce(_) => "commerceCard",
            Self::List(_) => "listCard",
            Self::Item(_) => "itemCard",
        }
    }
}

impl SkillTemplate for Card {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Text(card) => card.validate(),
            Self::Basic(card) => card.validate(),
            Self::Commerce(card) => card.validate(),
            Self::List(card) => card.validate(),
            Self::Item(card) => card.validate(),
        }
    }

    fn render(&self) -> Result<Value> {
        match self {
            Self::Text(card) => card.render(),
            Self::Basic(card) => card.render(),
            Self::Commerce(card) => card.render(),
            Self::List(card) => card.render(),
            Self::Item(card) => card.render(),
        }
    }
}

impl From<TextCard> for Card {
    fn from(card: TextCard) -> Self {
        Self::Text(card)
    }
}

impl From<BasicCard> for Card {
    fn from(card: BasicCard) -> Self {
        Self::Basic(card)
    }
}

impl From<CommerceCard> for Card {
    fn from(card: CommerceCard) -> Self {
        Self::Commerce(card)
    }
}

impl From<ListCard> for Card {
    fn from(card: ListCard) -> Self {
        Self::List(card)
    }
}

impl From<ItemCard> for Card {
    fn from(card: ItemCard) -> Self {
        Self::Item(card)
    }
}
