//! Where the preparer reads from and writes to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "ARDOT_PREP_CONFIG";

/// Reference-image preparation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Directory holding the original reference images
    pub source_dir: PathBuf,
    /// Directory the resized copies are written to
    pub output_dir: PathBuf,
    /// Where the JSON manifest is written
    pub manifest_path: PathBuf,
    /// Output width in pixels; height follows the aspect ratio
    pub target_width: u32,
    /// URL prefix recorded in the manifest, relative to the served root
    pub url_prefix: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("references-source"),
            output_dir: PathBuf::from("public/references"),
            manifest_path: PathBuf::from("public/references.json"),
            target_width: 600,
            url_prefix: "./references".to_string(),
        }
    }
}

impl PrepConfig {
    /// Read a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(PrepError::io(path))?;
        let config: Self = serde_json::from_str(&text).map_err(|source| PrepError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the file named by `ARDOT_PREP_CONFIG` when set
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::from_file(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 {
            return Err(PrepError::ZeroWidth);
        }
        Ok(())
    }
}
