// Chat domain: LLM conversations with retrieval-augmented context.

pub mod actions;
pub mod models;
pub mod store;

pub use models::ChatEntry;
pub use store::{ChatLog, PostgresChatLog};
