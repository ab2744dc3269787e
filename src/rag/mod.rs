//! Prompt building for the store assistant: relevance filtering, catalog
//! context rendering and conversation assembly. Everything here is pure.

pub mod context;
pub mod conversation;
pub mod product;

pub use context::format_products;
pub use conversation::{assemble, HISTORY_WINDOW, SYSTEM_PROMPT};
pub use product::{filter_relevant, ProductRecord, ScoredProduct, RELEVANCE_THRESHOLD};
