use std::collections::HashMap;
use std::sync::Mutex;
use rand::Rng;

/// Pending one-time passwords keyed by phone number.
///
/// Entries live for the lifetime of the process: a new registration for the
/// same phone overwrites the code, and a successful verification leaves it
/// in place. The map is local to this process, so several instances behind
/// a load balancer will not see each other's codes.
#[derive(Default)]
pub struct OtpStore {
    codes: Mutex<HashMap<String, String>>,
}

/// Uniformly random 6-digit code, never with a leading zero.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh code for `phone`, replacing any pending one.
    pub fn issue(&self, phone: &str) -> String {
        let otp = generate_otp();
        self.codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(phone.to_string(), otp.clone());
        otp
    }

    /// Exact comparison against the pending code. Unknown phones never match.
    pub fn matches(&self, phone: &str, otp: &str) -> bool {
        self.codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(phone)
            .is_some_and(|expected| expected == otp)
    }
}
