//! Runtime configuration for the CLI.
//!
//! Sources, highest precedence first: command-line flags, `TASKLIST_*`
//! environment variables (both wired through clap), platform data directory
//! defaults from `dirs`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "tasklist";
const DB_FILE_NAME: &str = "tasklist.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    NoDataDir,
    Io(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "cannot determine a data directory; pass --db and --log-dir explicitly"
            ),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoDataDir => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl CliConfig {
    /// Fills unset values from the platform data directory.
    pub fn resolve(
        db: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with_data_dir(db, log_dir, log_level, dirs::data_dir())
    }

    fn resolve_with_data_dir(
        db: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let app_dir = data_dir.map(|dir| dir.join(APP_DIR_NAME));
        let db_path = match db.or_else(|| app_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME))) {
            Some(path) => path,
            None => return Err(ConfigError::NoDataDir),
        };
        let log_dir = match log_dir.or_else(|| app_dir.as_ref().map(|dir| dir.join(LOG_DIR_NAME)))
        {
            Some(dir) => absolutize(&dir)?,
            None => return Err(ConfigError::NoDataDir),
        };
        let log_level = log_level
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| tasklist_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Creates the database's parent directory when missing.
    pub fn ensure_db_parent(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

// The logger only accepts absolute directories.
fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
