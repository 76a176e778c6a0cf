mod redis_service;
mod store;
pub mod mailer;

pub use redis_service::RedisService;
pub use store::VoteStore;
pub use mailer::{Mailer, OutgoingMail, SmtpMailer};
