// Chatterbox - API Core
//
// Backend for the chatbot platform: OTP-based login, password reset by
// email, an LLM chat endpoint with retrieval-augmented context, and admin
// CRUD for markdown content and events.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
