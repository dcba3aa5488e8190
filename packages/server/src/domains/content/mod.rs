// Admin-managed content and events. CRUD only; no invariants beyond id
// uniqueness.

pub mod models;

pub use models::{ContentItem, Event};
