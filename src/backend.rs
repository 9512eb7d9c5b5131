use crate::{
    availability::{DayIndex, SlotIndex, WeekAvailability},
    codec::FormatError,
    types::Record,
};
use chrono::Utc;
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("player {0} is not registered")]
    UnknownPlayer(String),
    #[error("player {0} has no stored availability")]
    EmptyHistory(String),
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed availability record for player {player}")]
    Format {
        player: String,
        #[source]
        source: FormatError,
    },
}

/// Storage of every player's availability snapshots.
///
/// `save` appends a new snapshot, `load` returns the newest one.
pub trait AvailabilityBackend: Clone + Send + Sync + 'static {
    fn load(&self, player: &str) -> Result<Record, StoreError>;
    fn history(&self, player: &str) -> Result<Vec<WeekAvailability>, StoreError>;
    fn save(&self, record: &Record) -> Result<(), StoreError>;

    fn init_player(&self, player: &str) -> Result<Record, StoreError> {
        let record = Record::new(player, WeekAvailability::new_free());
        self.save(&record)?;
        Ok(record)
    }

    fn toggle(&self, player: &str, day: DayIndex, slot: SlotIndex) -> Result<Record, StoreError> {
        let mut record = self.load(player)?;
        record.availability.toggle_slot(day, slot);
        record.created_at = Utc::now();
        self.save(&record)?;
        Ok(record)
    }
}
