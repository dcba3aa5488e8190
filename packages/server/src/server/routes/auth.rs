//! Auth endpoints: registration, OTP login, password reset.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions::{
    forgot_password, login, register, resend_otp, reset_password, verify_otp,
    ForgotPasswordOutcome, LoginOutcome, RegisterOutcome, ResendOtpOutcome, ResetPasswordOutcome,
    VerifyOtpOutcome,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;

fn default_role() -> String {
    "user".to_string()
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub name: String,
    pub email: String,
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let outcome = register(
        &request.name,
        &request.email,
        &request.password,
        &request.role,
        &state.deps,
    )
    .await?;

    match outcome {
        RegisterOutcome::Created(user) => Ok(Json(RegisterResponse {
            message: "Registration successful".to_string(),
            name: user.name,
            email: user.email,
        })),
        RegisterOutcome::EmailTaken => Err(ApiError::EmailTaken),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub email: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match login(&request.email, &request.password, &state.deps).await? {
        LoginOutcome::OtpIssued => Ok(Json(LoginResponse {
            message: "OTP sent to your email".to_string(),
            email: request.email,
        })),
        LoginOutcome::InvalidCredentials => Err(ApiError::InvalidCredentials),
    }
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub session_token: String,
    pub role: String,
}

pub async fn verify_otp_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    match verify_otp(&request.email, &request.otp, &state.deps).await? {
        VerifyOtpOutcome::Verified {
            session_token,
            role,
        } => Ok(Json(VerifyOtpResponse {
            message: "MFA Successful".to_string(),
            session_token,
            role,
        })),
        VerifyOtpOutcome::Rejected => Err(ApiError::InvalidOtp),
    }
}

#[derive(Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn resend_otp_handler(
    State(state): State<AppState>,
    Json(request): Json<ResendOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    match resend_otp(&request.email, &state.deps).await? {
        ResendOtpOutcome::OtpIssued => Ok(Json(MessageResponse {
            message: "A new OTP has been sent to your email".to_string(),
        })),
        ResendOtpOutcome::UnknownEmail => Err(ApiError::UserNotFound),
    }
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    match forgot_password(&request.email, &state.deps).await? {
        ForgotPasswordOutcome::LinkIssued => Ok(Json(MessageResponse {
            message: "Password reset link sent to email".to_string(),
        })),
        ForgotPasswordOutcome::UnknownEmail => Err(ApiError::UserNotFound),
    }
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    match reset_password(&request.token, &request.new_password, &state.deps).await? {
        ResetPasswordOutcome::PasswordChanged => Ok(Json(MessageResponse {
            message: "Password reset successful".to_string(),
        })),
        ResetPasswordOutcome::InvalidToken => Err(ApiError::InvalidResetToken),
    }
}
