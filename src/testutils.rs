use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::{
    availability::{DayIndex, SlotIndex, WeekAvailability},
    backend::{AvailabilityBackend, StoreError},
    types::Record,
};

pub struct MockAvailabilityBackendInner {
    pub success: AtomicBool,
    pub calls_to_load: AtomicU64,
    pub calls_to_history: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub calls_to_toggle: AtomicU64,
    pub records: Mutex<HashMap<String, WeekAvailability>>,
}

#[derive(Clone)]
pub struct MockAvailabilityBackend(pub Arc<MockAvailabilityBackendInner>);

impl MockAvailabilityBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_load: AtomicU64::default(),
            calls_to_history: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            calls_to_toggle: AtomicU64::default(),
            records: Mutex::default(),
        }
    }
}

impl MockAvailabilityBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockAvailabilityBackendInner::new()))
    }

    pub fn with_records(records: &[(&str, WeekAvailability)]) -> Self {
        let backend = Self::new();
        *backend.0.records.lock().unwrap() = records
            .iter()
            .map(|(player, availability)| (player.to_string(), *availability))
            .collect();
        backend
    }

    fn result(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StoreError::Io {
                path: "mock".into(),
                source: io::Error::new(io::ErrorKind::Other, "Supposed to fail"),
            }),
        }
    }
}

impl AvailabilityBackend for MockAvailabilityBackend {
    fn load(&self, player: &str) -> Result<Record, StoreError> {
        self.0.calls_to_load.fetch_add(1, Ordering::SeqCst);
        match self.0.records.lock().unwrap().get(player) {
            Some(availability) => Ok(Record::new(player, *availability)),
            None => Err(StoreError::UnknownPlayer(player.into())),
        }
    }

    fn history(&self, player: &str) -> Result<Vec<WeekAvailability>, StoreError> {
        self.0.calls_to_history.fetch_add(1, Ordering::SeqCst);
        self.load(player).map(|record| vec![record.availability])
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0
            .records
            .lock()
            .unwrap()
            .insert(record.player.clone(), record.availability);
        Ok(())
    }

    fn toggle(&self, player: &str, day: DayIndex, slot: SlotIndex) -> Result<Record, StoreError> {
        self.0.calls_to_toggle.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut records = self.0.records.lock().unwrap();
        let availability = records
            .get_mut(player)
            .ok_or_else(|| StoreError::UnknownPlayer(player.into()))?;
        availability.toggle_slot(day, slot);
        Ok(Record::new(player, *availability))
    }
}
