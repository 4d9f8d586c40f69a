//! Units
//!
//! A unit is a rentable room or property with its own checklist and at
//! most one current guest. Provides:
//! - Creation from a checklist template
//! - Task mutations used by inspections (toggle, edit, add, delete)
//! - Check-in and check-out transitions

use crate::checklist::{Category, Task, TaskId, TaskStatus};
use crate::error::CoreError;
use crate::guest::GuestRecord;
use crate::report;
use crate::template::ChecklistTemplate;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Unique unit identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    /// Generate new unit ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(format!("room-{}", Ulid::new()))
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Occupancy status of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    /// Ready for check-in
    #[default]
    Available,
    /// A guest is checked in
    Occupied,
    /// Being cleaned
    Cleaning,
    /// Blocked for maintenance
    Maintenance,
    /// Check-out started but not finished
    CheckOutPending,
}

impl UnitStatus {
    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Disponível",
            Self::Occupied => "Ocupado",
            Self::Cleaning => "Limpando",
            Self::Maintenance => "Manutenção",
            Self::CheckOutPending => "Pendente",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rentable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unit ID
    pub id: UnitId,
    /// Display number or name
    pub number: String,
    /// Unit type (used to pick suggestions)
    #[serde(rename = "type")]
    pub unit_type: String,
    /// Occupancy status
    pub status: UnitStatus,
    /// Inspection checklist
    pub tasks: Vec<Task>,
    /// Last cleaning, milliseconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<i64>,
    /// Guest currently checked in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_guest: Option<GuestRecord>,
}

impl Unit {
    /// Create an available unit, seeding its checklist from a template
    ///
    /// # Errors
    /// `CoreError::EmptyField` if number or type is blank.
    pub fn new(
        number: &str,
        unit_type: &str,
        template: Option<&ChecklistTemplate>,
    ) -> Result<Self, CoreError> {
        let number = non_empty(number, "unit number")?;
        let unit_type = non_empty(unit_type, "unit type")?;
        let tasks = template.map(ChecklistTemplate::instantiate).unwrap_or_default();

        Ok(Self {
            id: UnitId::new(),
            number,
            unit_type,
            status: UnitStatus::Available,
            tasks,
            last_cleaned: None,
            current_guest: None,
        })
    }

    /// Whether `key` names this unit (by id or case-insensitive number)
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id.0 == key || self.number.to_lowercase() == key.trim().to_lowercase()
    }

    /// Look up a task
    ///
    /// # Errors
    /// `CoreError::TaskNotFound`
    pub fn task(&self, id: &TaskId) -> Result<&Task, CoreError> {
        self.tasks
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task, CoreError> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    /// Advance a task's status one step in the toggle cycle
    ///
    /// # Errors
    /// `CoreError::TaskNotFound`
    pub fn toggle_task(&mut self, id: &TaskId) -> Result<TaskStatus, CoreError> {
        Ok(self.task_mut(id)?.toggle())
    }

    /// Rename a task
    ///
    /// # Errors
    /// `CoreError::EmptyField` or `CoreError::TaskNotFound`
    pub fn edit_task(&mut self, id: &TaskId, title: &str) -> Result<(), CoreError> {
        let title = non_empty(title, "task title")?;
        self.task_mut(id)?.title = title;
        Ok(())
    }

    /// Remove a task
    ///
    /// # Errors
    /// `CoreError::TaskNotFound`
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task, CoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(idx))
    }

    /// Append a pending task
    ///
    /// # Errors
    /// `CoreError::EmptyField` if the title is blank.
    pub fn add_task(&mut self, title: &str, category: Category) -> Result<TaskId, CoreError> {
        let task = Task::new(non_empty(title, "task title")?, category);
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove every task in a category, returning how many were removed
    pub fn delete_category(&mut self, category: Category) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.category != category);
        before - self.tasks.len()
    }

    /// Categories present in the checklist, sorted
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        report::group_by_category(&self.tasks).into_keys().collect()
    }

    /// Percentage of tasks marked OK
    #[must_use]
    pub fn progress(&self) -> u8 {
        report::progress(&self.tasks)
    }

    /// Attach a guest and mark the unit occupied
    ///
    /// # Errors
    /// `CoreError::UnitNotAvailable` unless the unit is available.
    pub fn check_in(&mut self, guest: GuestRecord) -> Result<(), CoreError> {
        if self.status != UnitStatus::Available {
            return Err(CoreError::UnitNotAvailable {
                number: self.number.clone(),
                status: self.status,
            });
        }
        tracing::info!(unit = %self.number, guest = guest.name(), "Guest checked in");
        self.current_guest = Some(guest);
        self.status = UnitStatus::Occupied;
        Ok(())
    }

    /// Detach the current guest and make the unit available again
    ///
    /// Returns the guest record stamped with the check-out time. With
    /// `reset_tasks` every task goes back to `Pending` for the next stay.
    ///
    /// # Errors
    /// `CoreError::NoGuest` if nobody is checked in.
    pub fn check_out<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        reset_tasks: bool,
    ) -> Result<GuestRecord, CoreError>
    where
        Tz::Offset: fmt::Display,
    {
        let guest = self
            .current_guest
            .take()
            .ok_or_else(|| CoreError::NoGuest(self.number.clone()))?;
        let stamped = guest.checked_out(now);

        if reset_tasks {
            for task in &mut self.tasks {
                task.status = TaskStatus::Pending;
            }
        }
        self.status = UnitStatus::Available;

        tracing::info!(unit = %self.number, guest = stamped.name(), reset_tasks, "Guest checked out");
        Ok(stamped)
    }
}

pub(crate) fn non_empty(value: &str, field: &'static str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpf::Cpf;
    use crate::guest::{assemble, CapturedImage};
    use chrono::Utc;

    fn template() -> ChecklistTemplate {
        let mut tpl = ChecklistTemplate::new("Integral").unwrap();
        tpl.add_item("TV 50\" LG + controle", Category::CasaSede).unwrap();
        tpl.add_item("1 Airfryer", Category::AreaGourmet).unwrap();
        tpl
    }

    fn guest() -> GuestRecord {
        assemble(
            "Maria",
            Cpf::parse("52998224725").unwrap(),
            CapturedImage::jpeg(vec![0]),
            CapturedImage::jpeg(vec![1]),
            &Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_unit_from_template_is_all_pending() {
        let unit = Unit::new("Chalé 1", "Padrão", Some(&template())).unwrap();
        assert_eq!(unit.status, UnitStatus::Available);
        assert_eq!(unit.tasks.len(), 2);
        assert!(unit.tasks.iter().all(|t| t.status == TaskStatus::Pending));
        assert_eq!(unit.progress(), 0);
        assert!(Unit::new(" ", "Padrão", None).is_err());
    }

    #[test]
    fn task_mutations() {
        let mut unit = Unit::new("Chalé 1", "Padrão", Some(&template())).unwrap();
        let id = unit.tasks[0].id.clone();

        assert_eq!(unit.toggle_task(&id).unwrap(), TaskStatus::Ok);
        assert_eq!(unit.progress(), 50);

        unit.edit_task(&id, "TV 55\"").unwrap();
        assert_eq!(unit.task(&id).unwrap().title, "TV 55\"");
        assert!(unit.edit_task(&id, "").is_err());

        let added = unit.add_task("Boia da piscina", Category::Piscina).unwrap();
        assert_eq!(unit.task(&added).unwrap().status, TaskStatus::Pending);
        assert_eq!(
            unit.categories(),
            vec![Category::CasaSede, Category::Piscina, Category::AreaGourmet]
        );

        assert_eq!(unit.delete_category(Category::Piscina), 1);
        unit.delete_task(&id).unwrap();
        assert!(matches!(unit.task(&id), Err(CoreError::TaskNotFound(_))));
        assert_eq!(unit.tasks.len(), 1);
    }

    #[test]
    fn check_in_requires_available_unit() {
        let mut unit = Unit::new("Chalé 1", "Padrão", None).unwrap();
        unit.check_in(guest()).unwrap();
        assert_eq!(unit.status, UnitStatus::Occupied);

        let err = unit.check_in(guest()).unwrap_err();
        assert!(matches!(err, CoreError::UnitNotAvailable { .. }));
    }

    #[test]
    fn check_out_resets_tasks_when_asked() {
        let mut unit = Unit::new("Chalé 1", "Padrão", Some(&template())).unwrap();
        let id = unit.tasks[0].id.clone();
        unit.toggle_task(&id).unwrap();
        unit.check_in(guest()).unwrap();

        let out = unit.check_out(&Utc::now(), true).unwrap();
        assert!(out.check_out_date().is_some());
        assert_eq!(unit.status, UnitStatus::Available);
        assert!(unit.current_guest.is_none());
        assert_eq!(unit.progress(), 0);

        assert!(matches!(
            unit.check_out(&Utc::now(), true),
            Err(CoreError::NoGuest(_))
        ));
    }

    #[test]
    fn check_out_can_keep_inspection_history() {
        let mut unit = Unit::new("Chalé 1", "Padrão", Some(&template())).unwrap();
        let id = unit.tasks[1].id.clone();
        unit.toggle_task(&id).unwrap();
        unit.check_in(guest()).unwrap();
        unit.check_out(&Utc::now(), false).unwrap();
        assert_eq!(unit.task(&id).unwrap().status, TaskStatus::Ok);
    }

    #[test]
    fn wire_shape_matches_persisted_rooms() {
        let unit = Unit {
            id: UnitId("recanto-limeira-01".into()),
            number: "Sítio Recanto da Limeira".into(),
            unit_type: "Propriedade Integral".into(),
            status: UnitStatus::CheckOutPending,
            tasks: vec![],
            last_cleaned: None,
            current_guest: None,
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["type"], "Propriedade Integral");
        assert_eq!(json["status"], "CHECK_OUT_PENDING");
        assert!(json.get("currentGuest").is_none());
    }
}
