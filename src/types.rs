use crate::availability::WeekAvailability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest known availability of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub player: String,
    pub availability: WeekAvailability,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(player: impl Into<String>, availability: WeekAvailability) -> Self {
        Self {
            player: player.into(),
            availability,
            created_at: Utc::now(),
        }
    }
}
