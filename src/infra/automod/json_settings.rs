use crate::core::automod::AutoModSettings;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reads AutoMod settings from a JSON file.
pub struct JsonAutoModSettings {
    path: PathBuf,
}

impl JsonAutoModSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the file. A missing file yields the defaults.
    pub fn load(&self) -> Result<AutoModSettings, SettingsFileError> {
        if !self.path.exists() {
            return Ok(AutoModSettings::default());
        }

        let file = std::fs::File::open(&self.path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Load the file, falling back to defaults (with a warning) when it can't be read.
    pub fn load_or_default(&self) -> AutoModSettings {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                "Failed to read AutoMod settings, using defaults: {}",
                e
            );
            AutoModSettings::default()
        })
    }
}
