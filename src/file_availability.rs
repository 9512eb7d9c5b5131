use crate::{
    availability::{DayIndex, SlotIndex, WeekAvailability},
    backend::{AvailabilityBackend, StoreError},
    codec::{decode, encode},
    types::Record,
};
use chrono::{DateTime, Utc};
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{error, info};

const FILE_EXTENSION: &str = "survive";

/// Append-only history files, one `<player>.survive` per player with one
/// encoded week per line. The last line is the current availability.
#[derive(Debug, Clone)]
pub struct FileAvailability {
    data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileAvailability {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.clone(),
            source,
        })?;
        info!(data_dir = %data_dir.display(), "Using file storage");
        Ok(Self {
            data_dir,
            write_lock: Arc::default(),
        })
    }

    fn path(&self, player: &str) -> PathBuf {
        self.data_dir.join(format!("{player}.{FILE_EXTENSION}"))
    }

    fn read_lines(&self, player: &str) -> Result<(PathBuf, String), StoreError> {
        let path = self.path(player);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok((path, contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::UnknownPlayer(player.into()))
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn read_latest(&self, player: &str) -> Result<Record, StoreError> {
        let (path, contents) = self.read_lines(player)?;
        let line = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .ok_or_else(|| StoreError::EmptyHistory(player.into()))?;
        let availability = decode(line).map_err(|source| StoreError::Format {
            player: player.into(),
            source,
        })?;

        Ok(Record {
            player: player.into(),
            availability,
            created_at: modified_at(&path)?,
        })
    }

    fn append(&self, record: &Record) -> Result<(), StoreError> {
        let path = self.path(&record.player);
        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{}", encode(&record.availability)));

        if let Err(source) = result {
            error!(?source, player = %record.player, "Failed to write availability");
            return Err(StoreError::Io { path, source });
        }
        Ok(())
    }
}

fn modified_at(path: &Path) -> Result<DateTime<Utc>, StoreError> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|source| StoreError::Io {
            path: path.into(),
            source,
        })
}

impl AvailabilityBackend for FileAvailability {
    fn load(&self, player: &str) -> Result<Record, StoreError> {
        self.read_latest(player)
    }

    fn history(&self, player: &str) -> Result<Vec<WeekAvailability>, StoreError> {
        let (_, contents) = self.read_lines(player)?;
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                decode(line).map_err(|source| StoreError::Format {
                    player: player.into(),
                    source,
                })
            })
            .collect()
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        self.append(record)
    }

    fn toggle(&self, player: &str, day: DayIndex, slot: SlotIndex) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut record = self.read_latest(player)?;
        record.availability.toggle_slot(day, slot);
        self.append(&record)?;
        record.created_at = modified_at(&self.path(player))?;
        Ok(record)
    }
}
