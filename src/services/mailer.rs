use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use crate::config::SmtpConfig;
use crate::errors::EmailError;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutgoingMail {
    /// The registration email carrying the OTP in plain text.
    pub fn otp(from: &str, to: &str, otp: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Your OTP for Digital Voting".to_string(),
            text: format!("Your OTP for Digital Voting App is: {}", otp),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), EmailError>;
}

/// Sends mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Self { transport })
    }
}

fn build_message(mail: OutgoingMail) -> Result<Message, EmailError> {
    let from: Mailbox = mail.from.parse().map_err(|_| EmailError::Address(mail.from.clone()))?;
    let to: Mailbox = mail.to.parse().map_err(|_| EmailError::Address(mail.to.clone()))?;
    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(mail.text)?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), EmailError> {
        let to = mail.to.clone();
        let message = build_message(mail)?;
        self.transport.send(message).await?;
        tracing::info!("OTP email sent to {}", to);
        Ok(())
    }
}
