use super::Context;
use crate::cli::TemplateCommands;
use crate::output::{print_one, print_out};
use crate::state::AppState;
use anyhow::bail;
use inncheck_core::{ChecklistTemplate, CoreError};

/// 1-based position from the command line to a vector index
fn item_index(position: usize, template: &ChecklistTemplate) -> Result<usize, CoreError> {
    position
        .checked_sub(1)
        .ok_or(CoreError::TemplateItemOutOfRange {
            index: position,
            len: template.items.len(),
        })
}

fn render(template: &ChecklistTemplate) -> String {
    let mut lines = vec![format!(
        "{}\t{}\t{} items",
        template.id,
        template.name,
        template.items.len()
    )];
    lines.extend(template.items.iter().enumerate().map(|(i, item)| {
        format!("{:>3}  {:<12} {}", i + 1, item.category.label(), item.title)
    }));
    lines.join("\n")
}

pub fn handle(ctx: &Context, state: &mut AppState, command: TemplateCommands) -> anyhow::Result<()> {
    match command {
        TemplateCommands::List => print_out(ctx.json, &state.templates, render),
        TemplateCommands::Add { name } => {
            if state.template(&name).is_ok() {
                bail!("template {} already exists", name.trim());
            }
            let template = ChecklistTemplate::new(&name)?;
            tracing::info!(template = %template.name, "Template created");
            state.templates.push(template.clone());
            print_one(ctx.json, template, |t| format!("created template {} ({})", t.name, t.id))
        }
        TemplateCommands::Remove { template } => {
            let removed = state.remove_template(&template)?;
            tracing::info!(template = %removed.name, "Template removed");
            print_one(ctx.json, removed, |t| format!("removed template {}", t.name))
        }
        TemplateCommands::AddItem {
            template,
            title,
            category,
        } => {
            let template = state.template_mut(&template)?;
            template.add_item(&title, category)?;
            print_one(ctx.json, &*template, |t| render(t))
        }
        TemplateCommands::EditItem {
            template,
            index,
            title,
        } => {
            let template = state.template_mut(&template)?;
            let index = item_index(index, template)?;
            template.edit_item(index, &title)?;
            print_one(ctx.json, &*template, |t| render(t))
        }
        TemplateCommands::RemoveItem { template, index } => {
            let template = state.template_mut(&template)?;
            let index = item_index(index, template)?;
            let removed = template.remove_item(index)?;
            print_one(ctx.json, removed, |item| format!("removed {}", item.title))
        }
    }
}
