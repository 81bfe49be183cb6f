//! JSON persistence helpers for ~/.flappy/ files.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Save a value as pretty-printed JSON to ~/.flappy/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
