//! Best-run records in a checksummed binary file.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - bincode-serialized `Records` (variable length)
//! - SHA256 checksum over everything above (32 bytes)

use crate::constants::RECORDS_VERSION_MAGIC;
use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub best_meters: u64,
    /// Unix timestamp of the best run.
    pub best_at: Option<i64>,
    pub games_played: u64,
    pub total_meters: u64,
}

impl Records {
    /// Fold a finished run in. Returns true when it set a new best.
    pub fn record_run(&mut self, meters: u64) -> bool {
        self.games_played += 1;
        self.total_meters += meters;
        if meters > self.best_meters {
            self.best_meters = meters;
            self.best_at = Some(Utc::now().timestamp());
            true
        } else {
            false
        }
    }

    pub fn average_meters(&self) -> u64 {
        if self.games_played == 0 {
            0
        } else {
            self.total_meters / self.games_played
        }
    }
}

/// Reads and writes the records file.
pub struct RecordsManager {
    path: PathBuf,
}

impl RecordsManager {
    /// Records live in the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "flappy").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self::with_path(config_dir.join("records.dat")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, records: &Records) -> io::Result<()> {
        let data =
            bincode::serialize(records).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(RECORDS_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.path)?;
        file.write_all(&RECORDS_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        Ok(())
    }

    /// Fails on a missing file, wrong magic, bad checksum or undecodable data.
    pub fn load(&self) -> io::Result<Records> {
        let mut file = fs::File::open(&self.path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != RECORDS_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid records version: expected 0x{:016X}, got 0x{:016X}",
                    RECORDS_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load, starting fresh when the file is missing or damaged.
    pub fn load_or_default(&self) -> Records {
        if !self.exists() {
            return Records::default();
        }
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("discarding records at {}: {}", self.path.display(), e);
                Records::default()
            }
        }
    }

    pub fn reset(&self) -> io::Result<()> {
        if self.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
