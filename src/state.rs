use std::sync::Arc;
use mockable::Clock;
use crate::deadline::VotingDeadline;
use crate::otp::OtpStore;
use crate::services::{Mailer, VoteStore};

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VoteStore>,
    pub mailer: Arc<dyn Mailer>,
    pub otp: Arc<OtpStore>,
    pub deadline: VotingDeadline,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub mail_from: String,
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Builds the state, fixing the deadline `voting_secs` after the clock's now.
    pub fn new(
        store: Arc<dyn VoteStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock + Send + Sync>,
        voting_secs: i64,
        mail_from: impl Into<String>,
        bcrypt_cost: u32,
    ) -> Self {
        let deadline = VotingDeadline::starting_at(clock.utc(), chrono::Duration::seconds(voting_secs));
        Self {
            store,
            mailer,
            otp: Arc::new(OtpStore::new()),
            deadline,
            clock,
            mail_from: mail_from.into(),
            bcrypt_cost,
        }
    }
}
