//! Configuration file
//!
//! Optional TOML file, `--config <path>` or `<data-dir>/inncheck.toml`.
//! Every key has a default so an empty or missing file is valid.

use anyhow::Context;
use inncheck_capture::CaptureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up inside the data directory
pub const CONFIG_FILE: &str = "inncheck.toml";

/// InnCheck settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InnCheckConfig {
    /// Property name, upper-cased on report headers and kept as written in messages
    pub property_name: String,
    /// Seconds before the face photo is taken automatically
    pub countdown_secs: u32,
    /// Side of stored guest photos, in pixels
    pub output_size: u32,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Side of the square resolution requested from cameras
    pub camera_ideal_resolution: u32,
    /// Reset every task to pending on check-out
    pub reset_tasks_on_checkout: bool,
    /// Where reports are written; current directory when unset
    pub report_dir: Option<PathBuf>,
}

impl Default for InnCheckConfig {
    fn default() -> Self {
        let capture = CaptureConfig::default();
        Self {
            property_name: "Sitio Recanto da Limeira".to_string(),
            countdown_secs: capture.countdown_secs,
            output_size: capture.output_size,
            jpeg_quality: 80,
            camera_ideal_resolution: capture.ideal_resolution,
            reset_tasks_on_checkout: true,
            report_dir: None,
        }
    }
}

impl InnCheckConfig {
    /// Read `explicit`, else `<data_dir>/inncheck.toml` when present, else defaults
    ///
    /// # Errors
    /// Unreadable or malformed file; a missing `explicit` path is an error.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = data_dir.join(CONFIG_FILE);
                if !path.exists() {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Set property name
    #[inline]
    #[must_use]
    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = name.into();
        self
    }

    /// Set countdown length
    #[inline]
    #[must_use]
    pub fn with_countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    /// Set report directory
    #[inline]
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(dir.into());
        self
    }

    /// Sequencer subset
    #[must_use]
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::new()
            .with_countdown_secs(self.countdown_secs)
            .with_output_size(self.output_size)
            .with_ideal_resolution(self.camera_ideal_resolution)
    }

    /// Directory reports are written to
    #[must_use]
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
