//! Typed models for the Kakao chatbot skill-server protocol.
//!
//! A skill server receives JSON payloads from the Kakao i Open Builder and
//! answers with JSON response envelopes. This crate is the marshal layer
//! between those wire formats and typed Rust values; it ships no HTTP
//! server or client and plugs into any web framework.
//!
//! # Inbound
//!
//! [`Payload`] is the regular skill request, [`ValidationPayload`] the
//! parameter-validation request, and [`SkillPayload`] dispatches between
//! the two by envelope shape. All three are built through [`FromPayload`].
//!
//! # Outbound
//!
//! Output components ([`SimpleText`], [`BasicCard`], [`Carousel`], ...)
//! implement [`SkillTemplate`]: `validate` checks the platform's rules,
//! `render` produces the exact wire JSON. [`KakaoResponse`] assembles
//! components, [`QuickReply`]s, [`Context`]s and free-form data into the
//! versioned response envelope.
//!
//! # Example
//!
//! ```rust,ignore
//! use kakao_chatbot::{FromPayload, KakaoResponse, Payload, SimpleText};
//!
//! fn handle(body: &str) -> kakao_chatbot::Result<String> {
//!     let payload = Payload::from_json(body)?;
//!     let mut response = KakaoResponse::new();
//!     response.add_component(SimpleText::new(format!(
//!         "{}님, 주문이 접수되었습니다",
//!         payload.user_id()
//!     )))?;
//!     response.to_json()
//! }
//! ```

pub mod base;
pub mod context;
pub mod error;
pub mod event;
pub mod payload;
pub mod response;
pub mod validation;

// Error handling
pub use error::{Error, Result};

// Capability traits
pub use base::{FromPayload, SkillTemplate};

// Inbound payloads
pub use context::{Context, ContextParam};
pub use payload::{
    Action, Block, Bot, Intent, IntentExtra, Knowledge, Param, Payload, SkillPayload, User,
    UserProperties, UserRequest, ValidationPayload,
};

// Outbound responses
pub use response::component::{
    BasicCard, Button, Card, Carousel, CommerceCard, Component, ImageTitle, Item, ItemCard,
    ItemListSummary, ItemProfile, ItemThumbnail, Link, ListCard, ListItem, Profile, QuickReply,
    SimpleImage, SimpleText, TextCard, Thumbnail,
};
pub use response::interaction::Interaction;
pub use response::{
    CAROUSEL_MAX_ITEMS, KakaoResponse, LIST_CARD_MAX_BUTTONS, LIST_CARD_MAX_ITEMS, MAX_OUTPUTS,
    MAX_QUICK_REPLIES, RESPONSE_VERSION, ValidationResponse, ValidationStatus,
};

// Event API
pub use event::{
    CheckEventApi, CheckEventApiResponse, EVENT_MAX_USERS, EventApi, EventApiResponse, EventFail,
    EventUser,
};
