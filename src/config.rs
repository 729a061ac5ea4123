use std::error::Error;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::paths::{self, PathError};

const DEFAULT_METADATA_PATH: &str = "~/.notewolfy";
const FALLBACK_EDITOR: &str = "vi";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub metadata_path: Option<String>,
    #[serde(default)]
    pub editor: Option<String>,
}

/// Effective settings after CLI/env, config file and defaults are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub metadata_path: PathBuf,
    pub editor: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Toml { path: PathBuf, source: toml::de::Error },
    Path(PathError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not read config {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => {
                write!(f, "invalid config TOML in {}: {}", path.display(), source)
            }
            ConfigError::Path(err) => write!(f, "invalid metadata path: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Path(err) => Some(err),
        }
    }
}

impl From<PathError> for ConfigError {
    fn from(value: PathError) -> Self {
        ConfigError::Path(value)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notewolfy").join("config.toml"))
}

impl FileConfig {
    /// Reads `path`. A missing file yields defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

impl Settings {
    /// Precedence: explicit value, then config file, then defaults. The
    /// editor falls back to `$EDITOR` before `vi`.
    pub fn resolve(
        metadata: Option<&str>,
        editor: Option<&str>,
        file: &FileConfig,
        env_editor: Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw_metadata = metadata
            .or(file.metadata_path.as_deref())
            .unwrap_or(DEFAULT_METADATA_PATH);
        let metadata_path = paths::expand(raw_metadata)?;

        let editor = editor
            .map(str::to_string)
            .or_else(|| file.editor.clone())
            .or(env_editor)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());

        Ok(Self {
            metadata_path,
            editor,
        })
    }
}
