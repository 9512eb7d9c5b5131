use crate::backend::{AvailabilityBackend, StoreError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Roster file read on the very first start.
pub const NEW_ROSTER_FILE: &str = "conf";
/// Name the roster file is moved to once every player is registered.
pub const PROCESSED_ROSTER_FILE: &str = "conf.processed";

lazy_static! {
    /// Player names end up in file names.
    pub static ref PLAYER_NAME: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("neither {} nor {} exists", .new.display(), .processed.display())]
    Missing { new: PathBuf, processed: PathBuf },
    #[error("failed to access roster file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid player name '{0}'")]
    InvalidName(String),
    #[error("failed to register player {player}")]
    Register {
        player: String,
        #[source]
        source: StoreError,
    },
}

/// Players taking part in the current round, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new(players: Vec<String>) -> Result<Self, RosterError> {
        if let Some(invalid) = players.iter().find(|player| !PLAYER_NAME.is_match(player)) {
            return Err(RosterError::InvalidName(invalid.clone()));
        }
        Ok(Self(players))
    }

    /// One player per line, blank lines are skipped.
    pub fn parse(contents: &str) -> Result<Self, RosterError> {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn players(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|known| known == player)
    }
}

fn read_roster_file(path: &Path) -> Result<Option<String>, RosterError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RosterError::Io {
            path: path.into(),
            source,
        }),
    }
}

/// Sets up the roster from `config_dir`.
///
/// A fresh `conf` registers every listed player with a free week and is then
/// renamed to `conf.processed`. Without `conf`, the roster of an earlier run is
/// restored from `conf.processed`; players the backend has never seen are
/// registered again.
pub fn bootstrap<T: AvailabilityBackend>(config_dir: &Path, backend: &T) -> Result<Roster, RosterError> {
    let new_path = config_dir.join(NEW_ROSTER_FILE);
    let processed_path = config_dir.join(PROCESSED_ROSTER_FILE);

    if let Some(contents) = read_roster_file(&new_path)? {
        let roster = Roster::parse(&contents)?;
        for player in roster.players() {
            register(backend, player)?;
        }
        fs::rename(&new_path, &processed_path).map_err(|source| RosterError::Io {
            path: new_path.clone(),
            source,
        })?;
        info!(players = roster.players().len(), "Started new round");
        return Ok(roster);
    }

    let Some(contents) = read_roster_file(&processed_path)? else {
        return Err(RosterError::Missing {
            new: new_path,
            processed: processed_path,
        });
    };
    let roster = Roster::parse(&contents)?;
    for player in roster.players() {
        if let Err(StoreError::UnknownPlayer(_)) = backend.load(player) {
            warn!(player = %player, "No stored availability, registering again");
            register(backend, player)?;
        }
    }
    info!(players = roster.players().len(), "Restored existing round");
    Ok(roster)
}

fn register<T: AvailabilityBackend>(backend: &T, player: &str) -> Result<(), RosterError> {
    backend
        .init_player(player)
        .map_err(|source| RosterError::Register {
            player: player.into(),
            source,
        })?;
    info!(player, "Registered player");
    Ok(())
}
