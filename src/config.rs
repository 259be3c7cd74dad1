use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "HOMEBOARD_DATA_DIR";
const DB_FILE_NAME: &str = "homeboard.sqlite3";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolves the data directory from `HOMEBOARD_DATA_DIR`, falling back
    /// to a dot directory under the user's home.
    pub fn from_env() -> AppResult<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => default_data_dir()?,
        };
        Ok(Self::at(data_dir))
    }

    pub fn at(data_dir: PathBuf) -> Self {
        let db_path = data_dir.join(DB_FILE_NAME);
        let log_dir = data_dir.join("logs");
        Self {
            data_dir,
            db_path,
            log_dir,
        }
    }
}

fn default_data_dir() -> AppResult<PathBuf> {
    #[cfg(unix)]
    {
        if let Ok(home) = std::env::var("HOME") {
            return Ok(PathBuf::from(home).join(".homeboard"));
        }
    }

    #[cfg(windows)]
    {
        if let Ok(home) = std::env::var("USERPROFILE") {
            return Ok(PathBuf::from(home).join(".homeboard"));
        }
    }

    Err(AppError::Internal(
        "Unable to determine a data directory".to_string(),
    ))
}
