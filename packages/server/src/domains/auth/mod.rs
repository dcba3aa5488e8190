// Authentication domain: registration, OTP login, password reset.

pub mod actions;
pub mod emails;
pub mod models;
pub mod store;

pub use models::User;
pub use store::{PostgresUserStore, UserStore};
