//! Database location resolution

use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Database file name
const DB_FILE: &str = "vault.db";

/// Resolve the default vault database path under the platform data
/// directory, creating the directory if needed.
pub fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "Arcvault", "arcvault")
        .ok_or_else(|| Error::Storage("Could not resolve platform data directory".to_string()))?;

    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| Error::Storage(format!("Could not create data directory: {e}")))?;

    Ok(data_dir.join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_db_file() {
        let path = default_db_path().unwrap();
        assert_eq!(path.file_name().unwrap(), DB_FILE);
    }
}
