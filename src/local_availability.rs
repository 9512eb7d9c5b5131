use crate::{
    availability::{DayIndex, SlotIndex, WeekAvailability},
    backend::{AvailabilityBackend, StoreError},
    types::Record,
};
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::error;

/// Non-persistent backend; all snapshots are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct LocalAvailability {
    records: Arc<Mutex<HashMap<String, Vec<Record>>>>,
}

fn latest(records: &HashMap<String, Vec<Record>>, player: &str) -> Result<Record, StoreError> {
    let Some(history) = records.get(player) else {
        let err = StoreError::UnknownPlayer(player.into());
        error!(%err);
        return Err(err);
    };
    history
        .last()
        .cloned()
        .ok_or_else(|| StoreError::EmptyHistory(player.into()))
}

impl AvailabilityBackend for LocalAvailability {
    fn load(&self, player: &str) -> Result<Record, StoreError> {
        latest(&self.records.lock().unwrap(), player)
    }

    fn history(&self, player: &str) -> Result<Vec<WeekAvailability>, StoreError> {
        match self.records.lock().unwrap().get(player) {
            Some(history) => Ok(history.iter().map(|record| record.availability).collect()),
            None => Err(StoreError::UnknownPlayer(player.into())),
        }
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .entry(record.player.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn toggle(&self, player: &str, day: DayIndex, slot: SlotIndex) -> Result<Record, StoreError> {
        let mut records = self.records.lock().unwrap();
        let mut record = latest(&records, player)?;
        record.availability.toggle_slot(day, slot);
        record.created_at = Utc::now();
        records
            .entry(player.into())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}
