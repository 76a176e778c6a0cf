use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Invalid address {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
