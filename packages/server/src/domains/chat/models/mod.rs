mod chat_entry;

pub use chat_entry::ChatEntry;
