mod chat;
mod history;

pub use chat::{chat, ChatOutcome};
pub use history::{history, ChatTurn};
