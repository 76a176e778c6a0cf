use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// Sentinel document; its existence means the user has voted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VotedMarker {
    pub voted: bool,
}

impl Default for VotedMarker {
    fn default() -> Self {
        Self { voted: true }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: Uuid,
    pub uid: String,
    pub candidate_id: String,
    pub timestamp: DateTime<Utc>,
}

impl Vote {
    pub fn new(uid: impl Into<String>, candidate_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            uid: uid.into(),
            candidate_id: candidate_id.into(),
            timestamp,
        }
    }
}
