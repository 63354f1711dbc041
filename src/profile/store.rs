//! Persistence port for player profiles.
//!
//! The engine never touches storage directly. `Rewards` reads a profile
//! once when opened and writes it back at two checkpoints: match
//! settlement and shard redemption.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::rewards::PlayerProfile;

/// A profile could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile io: {0}")]
    Io(#[from] io::Error),

    #[error("profile json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage for a single player profile.
pub trait ProfileStore {
    /// The stored profile, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<PlayerProfile>, StoreError>;

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError>;
}

/// In-memory store. Counts saves so tests can check checkpoints.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    profile: Option<PlayerProfile>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a profile already stored.
    #[must_use]
    pub fn with_profile(profile: PlayerProfile) -> Self {
        Self {
            profile: Some(profile),
            saves: 0,
        }
    }

    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }

    #[must_use]
    pub fn stored(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<PlayerProfile>, StoreError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        self.profile = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Profile stored as a JSON file.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// crash mid-save leaves the previous profile intact.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(profile)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}
