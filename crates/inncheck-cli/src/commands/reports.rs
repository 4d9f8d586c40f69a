use super::Context;
use crate::cli::{PdfKind, ReportCommands};
use crate::output::print_one;
use crate::state::AppState;
use anyhow::{bail, Context as _};
use chrono::{DateTime, Local};
use inncheck_core::cpf::{self, IdentifierFeedback};
use inncheck_core::report::pdf::{self, ReportKind};
use inncheck_core::report::text;
use inncheck_core::{Cpf, DashboardStats, Unit};
use serde::Serialize;
use std::path::PathBuf;

fn report_path(ctx: &Context, file_name: &str) -> anyhow::Result<PathBuf> {
    let dir = ctx.config.report_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating report dir {}", dir.display()))?;
    Ok(dir.join(file_name))
}

/// Lay out the inspection PDF and write it as `<file name>.json`
pub(crate) fn write_pdf_layout(
    ctx: &Context,
    unit: &Unit,
    kind: ReportKind,
    now: &DateTime<Local>,
) -> anyhow::Result<PathBuf> {
    let layout = pdf::layout(unit, kind, &ctx.config.property_name, now)?;
    let path = report_path(ctx, &format!("{}.json", layout.file_name))?;
    std::fs::write(&path, serde_json::to_string_pretty(&layout)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(unit = %unit.number, path = %path.display(), pages = layout.pages.len(), "Wrote report layout");
    Ok(path)
}

pub fn handle_report(ctx: &Context, state: &AppState, command: ReportCommands) -> anyhow::Result<()> {
    let now = Local::now();
    match command {
        ReportCommands::Text { unit, stdout } => {
            let unit = state.unit(&unit)?;
            let body = text::render(unit, &ctx.config.property_name, &now);
            if stdout && !ctx.json {
                println!("{body}");
                return Ok(());
            }
            let path = report_path(ctx, &text::file_name(unit, now.date_naive()))?;
            std::fs::write(&path, &body).with_context(|| format!("writing {}", path.display()))?;
            print_one(ctx.json, path, |p| format!("wrote {}", p.display()))
        }
        ReportCommands::Pdf { unit, kind } => {
            let unit = state.unit(&unit)?;
            let kind = match kind {
                PdfKind::Entry => ReportKind::Entry,
                PdfKind::Exit => ReportKind::Exit,
            };
            let path = write_pdf_layout(ctx, unit, kind, &now)?;
            print_one(ctx.json, path, |p| format!("wrote {}", p.display()))
        }
    }
}

pub fn share(ctx: &Context, state: &AppState, unit: &str) -> anyhow::Result<()> {
    let unit = state.unit(unit)?;
    let summary = text::share_summary(unit, &ctx.config.property_name);
    print_one(ctx.json, summary, String::clone)
}

pub fn dashboard(ctx: &Context, state: &AppState) -> anyhow::Result<()> {
    let stats = DashboardStats::compute(&state.units);
    print_one(ctx.json, stats, |s| {
        format!(
            "units: {}\noccupied: {}\navailable: {}\ncleaning: {}\noccupancy: {}%",
            s.total, s.occupied, s.available, s.cleaning, s.occupancy_rate
        )
    })
}

#[derive(Debug, Serialize)]
struct CpfCheck {
    digits: String,
    formatted: String,
    feedback: IdentifierFeedback,
}

pub fn validate_cpf(ctx: &Context, value: &str) -> anyhow::Result<()> {
    let digits = cpf::normalize(value);
    if digits.len() > cpf::CPF_LEN {
        bail!("CPF inválido: {} digits", digits.len());
    }
    match cpf::feedback(&digits) {
        IdentifierFeedback::Valid => {
            let parsed = Cpf::parse(&digits)?;
            let check = CpfCheck {
                digits,
                formatted: parsed.formatted(),
                feedback: IdentifierFeedback::Valid,
            };
            print_one(ctx.json, check, |c| format!("{} válido", c.formatted))
        }
        IdentifierFeedback::Empty => bail!("CPF vazio"),
        other => bail!("{}: {}", other.message().unwrap_or("CPF inválido"), value.trim()),
    }
}
