//! Checklist templates
//!
//! A template is a reusable named list of inspection items. Creating a unit
//! from a template copies every item into a fresh pending task.

use crate::checklist::{Category, Task};
use crate::error::CoreError;
use crate::unit::non_empty;
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Unique template identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Generate new template ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(format!("tpl-{}", Ulid::new()))
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// What to inspect
    pub title: String,
    /// Category the item lands in
    pub category: Category,
}

/// A reusable list of inspection items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    /// Template ID
    pub id: TemplateId,
    /// Display name
    pub name: String,
    /// Items in insertion order
    pub items: Vec<ChecklistItem>,
}

impl ChecklistTemplate {
    /// Create an empty template
    ///
    /// # Errors
    /// `CoreError::EmptyField` if the name is blank.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        Ok(Self {
            id: TemplateId::new(),
            name: non_empty(name, "template name")?,
            items: Vec::new(),
        })
    }

    /// Whether `key` names this template (by id or case-insensitive name)
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id.0 == key || self.name.to_lowercase() == key.trim().to_lowercase()
    }

    /// Append an item
    ///
    /// # Errors
    /// `CoreError::EmptyField` if the title is blank.
    pub fn add_item(&mut self, title: &str, category: Category) -> Result<usize, CoreError> {
        self.items.push(ChecklistItem {
            title: non_empty(title, "item title")?,
            category,
        });
        Ok(self.items.len() - 1)
    }

    /// Rename the item at `index`
    ///
    /// # Errors
    /// `CoreError::EmptyField` or `CoreError::TemplateItemOutOfRange`
    pub fn edit_item(&mut self, index: usize, title: &str) -> Result<(), CoreError> {
        let title = non_empty(title, "item title")?;
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CoreError::TemplateItemOutOfRange { index, len })?;
        item.title = title;
        Ok(())
    }

    /// Remove the item at `index`
    ///
    /// # Errors
    /// `CoreError::TemplateItemOutOfRange`
    pub fn remove_item(&mut self, index: usize) -> Result<ChecklistItem, CoreError> {
        if index >= self.items.len() {
            return Err(CoreError::TemplateItemOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Fresh pending tasks, one per item
    #[must_use]
    pub fn instantiate(&self) -> Vec<Task> {
        self.items
            .iter()
            .map(|item| Task::new(item.title.clone(), item.category))
            .collect()
    }
}
