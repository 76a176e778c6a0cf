// Error taxonomy for the voting API, built on thiserror.
use axum::extract::rejection::JsonRejection;
use thiserror::Error;

pub mod email;
pub mod response;
pub mod store;

// Re-export commonly used types
pub use email::EmailError;
pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    Body(#[from] JsonRejection),

    #[error("invalid OTP")]
    InvalidOtp,

    #[error("user not found")]
    UserNotFound,

    // Verification matched the OTP but no user carries that phone number.
    #[error("no user registered with phone {0}")]
    PhoneNotRegistered(String),

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("phone number not verified")]
    NotVerified,

    #[error("voting has ended")]
    VotingEnded,

    #[error("user {0} has already voted")]
    AlreadyVoted(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
