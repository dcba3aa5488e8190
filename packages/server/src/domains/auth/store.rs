//! User store seam.
//!
//! Auth actions go through this trait so tests can substitute an in-memory
//! store; the Postgres implementation delegates to the model queries.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create(&self, name: &str, email: &str, password_hash: &str, role: &str)
        -> Result<User>;

    /// Store a new OTP, overwriting any prior code.
    async fn set_otp(&self, email: &str, code: &str) -> Result<()>;

    /// Atomically consume a matching OTP and install the session token.
    /// `None` on unknown email or code mismatch.
    async fn claim_otp(
        &self,
        email: &str,
        code: &str,
        session_token: &str,
    ) -> Result<Option<User>>;

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        requested_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Atomically consume a reset token and install the new password hash.
    /// `None` when no user holds the token.
    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<User>>;
}

/// PostgreSQL-backed user store.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(email, &self.pool).await
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User> {
        User::create(name, email, password_hash, role, &self.pool).await
    }

    async fn set_otp(&self, email: &str, code: &str) -> Result<()> {
        User::set_otp(email, code, &self.pool).await
    }

    async fn claim_otp(
        &self,
        email: &str,
        code: &str,
        session_token: &str,
    ) -> Result<Option<User>> {
        User::claim_otp(email, code, session_token, &self.pool).await
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        requested_at: DateTime<Utc>,
    ) -> Result<()> {
        User::set_reset_token(email, token, requested_at, &self.pool).await
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<User>> {
        User::consume_reset_token(token, new_password_hash, &self.pool).await
    }
}
