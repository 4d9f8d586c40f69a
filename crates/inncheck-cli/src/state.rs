//! Application state container
//!
//! Owned by `main` for the lifetime of one command. Loaded from the data
//! directory before dispatch and saved back after every mutating command.
//!
//! ## Files
//! - `rooms.json` - array of units
//! - `templates.json` - array of checklist templates
//! - `user.json` - logged-in operator, absent when logged out

use anyhow::Context;
use inncheck_core::{ChecklistTemplate, CoreError, Operator, Unit};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

const UNITS_FILE: &str = "rooms.json";
const TEMPLATES_FILE: &str = "templates.json";
const OPERATOR_FILE: &str = "user.json";

/// Everything InnCheck persists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub units: Vec<Unit>,
    pub templates: Vec<ChecklistTemplate>,
    pub operator: Option<Operator>,
}

impl AppState {
    /// Read state from `dir`; missing files yield empty collections
    ///
    /// # Errors
    /// Unreadable or malformed files.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let state = Self {
            units: read_json(&dir.join(UNITS_FILE))?.unwrap_or_default(),
            templates: read_json(&dir.join(TEMPLATES_FILE))?.unwrap_or_default(),
            operator: read_json(&dir.join(OPERATOR_FILE))?,
        };
        tracing::debug!(
            dir = %dir.display(),
            units = state.units.len(),
            templates = state.templates.len(),
            "Loaded state"
        );
        Ok(state)
    }

    /// Write state to `dir`, creating it if needed
    ///
    /// # Errors
    /// Directory or files cannot be written.
    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating data dir {}", dir.display()))?;
        write_json(&dir.join(UNITS_FILE), &self.units)?;
        write_json(&dir.join(TEMPLATES_FILE), &self.templates)?;

        let operator = dir.join(OPERATOR_FILE);
        match &self.operator {
            Some(op) => write_json(&operator, op)?,
            None if operator.exists() => std::fs::remove_file(&operator)
                .with_context(|| format!("removing {}", operator.display()))?,
            None => {}
        }
        tracing::debug!(dir = %dir.display(), "Saved state");
        Ok(())
    }

    /// Unit by id or number
    ///
    /// # Errors
    /// `CoreError::UnitNotFound`
    pub fn unit(&self, key: &str) -> Result<&Unit, CoreError> {
        self.units
            .iter()
            .find(|u| u.matches(key))
            .ok_or_else(|| CoreError::UnitNotFound(key.to_string()))
    }

    /// Mutable unit by id or number
    ///
    /// # Errors
    /// `CoreError::UnitNotFound`
    pub fn unit_mut(&mut self, key: &str) -> Result<&mut Unit, CoreError> {
        self.units
            .iter_mut()
            .find(|u| u.matches(key))
            .ok_or_else(|| CoreError::UnitNotFound(key.to_string()))
    }

    /// Remove a unit by id or number
    ///
    /// # Errors
    /// `CoreError::UnitNotFound`
    pub fn remove_unit(&mut self, key: &str) -> Result<Unit, CoreError> {
        let index = self
            .units
            .iter()
            .position(|u| u.matches(key))
            .ok_or_else(|| CoreError::UnitNotFound(key.to_string()))?;
        Ok(self.units.remove(index))
    }

    /// Template by id or name
    ///
    /// # Errors
    /// `CoreError::TemplateNotFound`
    pub fn template(&self, key: &str) -> Result<&ChecklistTemplate, CoreError> {
        self.templates
            .iter()
            .find(|t| t.matches(key))
            .ok_or_else(|| CoreError::TemplateNotFound(key.to_string()))
    }

    /// Mutable template by id or name
    ///
    /// # Errors
    /// `CoreError::TemplateNotFound`
    pub fn template_mut(&mut self, key: &str) -> Result<&mut ChecklistTemplate, CoreError> {
        self.templates
            .iter_mut()
            .find(|t| t.matches(key))
            .ok_or_else(|| CoreError::TemplateNotFound(key.to_string()))
    }

    /// Remove a template by id or name
    ///
    /// # Errors
    /// `CoreError::TemplateNotFound`
    pub fn remove_template(&mut self, key: &str) -> Result<ChecklistTemplate, CoreError> {
        let index = self
            .templates
            .iter()
            .position(|t| t.matches(key))
            .ok_or_else(|| CoreError::TemplateNotFound(key.to_string()))?;
        Ok(self.templates.remove(index))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
}
