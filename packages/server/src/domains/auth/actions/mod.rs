mod forgot_password;
mod login;
mod register;
mod resend_otp;
mod reset_password;
mod verify_otp;

pub use forgot_password::{forgot_password, ForgotPasswordOutcome};
pub use login::{login, LoginOutcome};
pub use register::{register, RegisterOutcome};
pub use resend_otp::{resend_otp, ResendOtpOutcome};
pub use reset_password::{reset_password, ResetPasswordOutcome};
pub use verify_otp::{verify_otp, VerifyOtpOutcome};
