//! Application configuration
//!
//! Read from `config.json` in the data directory. A missing file gives the
//! defaults; a file that fails to parse is reported and also gives the
//! defaults.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the configuration inside the data directory
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Width in pixels a full page is scaled to before cropping an excerpt
    pub excerpt_width: f64,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_filter: String,
    /// PDFium shared library; the system library is used when unset
    pub pdfium_library: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excerpt_width: 400.0,
            log_filter: "info".to_string(),
            pdfium_library: None,
        }
    }
}

impl AppConfig {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path_in(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Failed to parse config file, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(data_dir), content)?;
        Ok(())
    }
}
