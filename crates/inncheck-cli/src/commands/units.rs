use super::Context;
use crate::cli::{TaskCommands, UnitCommands};
use crate::output::{print_one, print_out};
use crate::state::AppState;
use anyhow::bail;
use inncheck_core::{suggest, CoreError, Task, TaskId, Unit, UnitStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnitSummary {
    id: String,
    number: String,
    #[serde(rename = "type")]
    unit_type: String,
    status: UnitStatus,
    progress: u8,
    guest: Option<String>,
}

impl From<&Unit> for UnitSummary {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id.to_string(),
            number: unit.number.clone(),
            unit_type: unit.unit_type.clone(),
            status: unit.status,
            progress: unit.progress(),
            guest: unit.current_guest.as_ref().map(|g| g.name().to_string()),
        }
    }
}

fn summary_row(s: &UnitSummary) -> String {
    let guest = s.guest.as_deref().map(|g| format!("\t{g}")).unwrap_or_default();
    format!(
        "{}\t{}\t{}\t{}%{guest}",
        s.number,
        s.unit_type,
        s.status.label(),
        s.progress
    )
}

fn task_row(position: usize, task: &Task) -> String {
    format!(
        "{position:>3}  {:<9} {:<12} {}",
        task.status.to_string(),
        task.category.label(),
        task.title
    )
}

fn render_unit(unit: &Unit) -> String {
    let mut lines = vec![summary_row(&UnitSummary::from(unit))];
    if let Some(guest) = &unit.current_guest {
        lines.push(format!(
            "guest: {} (CPF {}) since {}",
            guest.name(),
            guest.identifier().formatted(),
            guest.check_in_time()
        ));
    }
    lines.extend(
        unit.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| task_row(i + 1, task)),
    );
    lines.join("\n")
}

/// Task by 1-based position or by id
fn resolve_task(unit: &Unit, key: &str) -> Result<TaskId, CoreError> {
    if let Ok(position) = key.parse::<usize>() {
        if let Some(task) = position.checked_sub(1).and_then(|i| unit.tasks.get(i)) {
            return Ok(task.id.clone());
        }
    }
    unit.task(&TaskId::from(key)).map(|t| t.id.clone())
}

pub fn handle_units(ctx: &Context, state: &mut AppState, command: UnitCommands) -> anyhow::Result<()> {
    match command {
        UnitCommands::List => {
            let rows: Vec<UnitSummary> = state.units.iter().map(UnitSummary::from).collect();
            print_out(ctx.json, &rows, summary_row)
        }
        UnitCommands::Add {
            number,
            unit_type,
            template,
        } => {
            if state.unit(&number).is_ok() {
                bail!("unit {} already exists", number.trim());
            }
            let unit = {
                let template = template.as_deref().map(|k| state.template(k)).transpose()?;
                Unit::new(&number, &unit_type, template)?
            };
            tracing::info!(unit = %unit.number, tasks = unit.tasks.len(), "Unit created");
            state.units.push(unit.clone());
            print_one(ctx.json, unit, |u| format!("created unit {} ({} tasks)", u.number, u.tasks.len()))
        }
        UnitCommands::Remove { unit } => {
            let removed = state.remove_unit(&unit)?;
            tracing::info!(unit = %removed.number, "Unit removed");
            print_one(ctx.json, removed, |u| format!("removed unit {}", u.number))
        }
        UnitCommands::Show { unit } => {
            let unit = state.unit(&unit)?;
            print_one(ctx.json, unit, |u| render_unit(u))
        }
    }
}

pub fn handle_tasks(ctx: &Context, state: &mut AppState, command: TaskCommands) -> anyhow::Result<()> {
    match command {
        TaskCommands::Toggle { unit, task } => {
            let unit = state.unit_mut(&unit)?;
            let id = resolve_task(unit, &task)?;
            unit.toggle_task(&id)?;
            let task = unit.task(&id)?.clone();
            print_one(ctx.json, task, |t| format!("{} -> {}", t.title, t.status))
        }
        TaskCommands::Edit { unit, task, title } => {
            let unit = state.unit_mut(&unit)?;
            let id = resolve_task(unit, &task)?;
            unit.edit_task(&id, &title)?;
            let task = unit.task(&id)?.clone();
            print_one(ctx.json, task, |t| format!("renamed to {}", t.title))
        }
        TaskCommands::Delete { unit, task } => {
            let unit = state.unit_mut(&unit)?;
            let id = resolve_task(unit, &task)?;
            let removed = unit.delete_task(&id)?;
            print_one(ctx.json, removed, |t| format!("deleted {}", t.title))
        }
        TaskCommands::Add {
            unit,
            title,
            category,
        } => {
            let unit = state.unit_mut(&unit)?;
            let id = unit.add_task(&title, category)?;
            let task = unit.task(&id)?.clone();
            print_one(ctx.json, task, |t| format!("added {} to {}", t.title, t.category.label()))
        }
        TaskCommands::DeleteCategory { unit, category } => {
            let unit = state.unit_mut(&unit)?;
            let removed = unit.delete_category(category);
            tracing::info!(unit = %unit.number, %category, removed, "Category deleted");
            print_one(ctx.json, removed, |n| {
                format!("deleted {n} tasks from {}", category.label())
            })
        }
        TaskCommands::Suggest { unit } => {
            let unit = state.unit_mut(&unit)?;
            let added = suggest::suggest(&unit.unit_type);
            unit.tasks.extend(added.iter().cloned());
            print_out(ctx.json, &added, |t| format!("added {}", t.title))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inncheck_core::Category;

    #[test]
    fn tasks_resolve_by_position_or_id() {
        let mut unit = Unit::new("1", "Padrão", None).unwrap();
        let first = unit.add_task("a", Category::Piscina).unwrap();
        let second = unit.add_task("b", Category::Piscina).unwrap();

        assert_eq!(resolve_task(&unit, "1").unwrap(), first);
        assert_eq!(resolve_task(&unit, "2").unwrap(), second);
        assert_eq!(resolve_task(&unit, &second.0).unwrap(), second);
        assert!(matches!(
            resolve_task(&unit, "3"),
            Err(CoreError::TaskNotFound(_))
        ));
        assert!(resolve_task(&unit, "0").is_err());
    }
}
