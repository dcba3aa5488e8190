use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User - credentials plus OTP/session/reset state, keyed by email
///
/// At most one OTP, session token and reset token are live at a time; each
/// field is nullable and cleared when consumed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub otp_code: Option<String>,
    pub session_token: Option<String>,
    pub reset_token: Option<String>,
    pub reset_requested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find user by email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Create a user with no OTP/session/reset state
    pub async fn create(
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Store a new OTP, overwriting any prior code
    pub async fn set_otp(email: &str, code: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE users SET otp_code = $2 WHERE email = $1")
            .bind(email)
            .bind(code)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Consume an OTP and issue a session token in one conditional update.
    ///
    /// Returns the user when the stored code matched; `None` means unknown
    /// email or mismatch. The single statement makes the OTP single-use even
    /// under concurrent verification attempts.
    pub async fn claim_otp(
        email: &str,
        code: &str,
        session_token: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET otp_code = NULL,
                session_token = $3
            WHERE email = $1 AND otp_code = $2
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(session_token)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Store a reset token with its issuance time
    pub async fn set_reset_token(
        email: &str,
        token: &str,
        requested_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token = $2,
                reset_requested_at = $3
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(token)
        .bind(requested_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Consume a reset token and install the new password hash in one
    /// conditional update, so the token cannot be replayed.
    ///
    /// Returns `None` when no user currently holds the token.
    pub async fn consume_reset_token(
        token: &str,
        new_password_hash: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password_hash = $2,
                reset_token = NULL,
                reset_requested_at = NULL
            WHERE reset_token = $1
            RETURNING *
            "#,
        )
        .bind(token)
        .bind(new_password_hash)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }
}
