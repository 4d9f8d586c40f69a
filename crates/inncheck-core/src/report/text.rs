//! Plain-text inspection report and share summary

use super::{completion, progress, underscore_whitespace};
use crate::unit::Unit;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt::{self, Write as _};

const SEPARATOR: &str = "==========================================";
const SIGNATURE: &str = "InnCheck Intelligent System";

/// Render the downloadable checklist report for a unit
#[must_use]
pub fn render<Tz: TimeZone>(unit: &Unit, property_name: &str, issued_at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    let _ = writeln!(
        out,
        "RELATÓRIO DE VISTORIA - {}",
        property_name.to_uppercase()
    );
    let _ = writeln!(out, "UNIDADE: {} | TIPO: {}", unit.number, unit.unit_type);
    let _ = writeln!(out, "STATUS ATUAL: {}", unit.status.label());
    let _ = writeln!(
        out,
        "DATA DE EMISSÃO: {}",
        issued_at.format("%d/%m/%Y, %H:%M:%S")
    );
    let _ = writeln!(out, "{SEPARATOR}");
    out.push_str("\nCHECKLIST DETALHADO:\n");

    let body: Vec<String> = unit
        .tasks
        .iter()
        .map(|t| {
            let marker = if t.status.is_ok() {
                "[CONCLUÍDO]"
            } else {
                "[PENDENTE] "
            };
            format!("{marker} {}", t.title)
        })
        .collect();
    out.push_str(&body.join("\n"));

    let _ = write!(out, "\n\n{SEPARATOR}\n{SIGNATURE}");
    out
}

/// `vistoria_<number>_<yyyy-mm-dd>.txt`, number lowercased with whitespace runs as `_`
#[must_use]
pub fn file_name(unit: &Unit, date: NaiveDate) -> String {
    format!(
        "vistoria_{}_{}.txt",
        underscore_whitespace(&unit.number.to_lowercase()),
        date.format("%Y-%m-%d")
    )
}

/// Short status message for sharing with staff
#[must_use]
pub fn share_summary(unit: &Unit, property_name: &str) -> String {
    let (ok, total) = completion(&unit.tasks);
    format!(
        "*InnCheck - {property_name}*\n\n\
         📍 Unidade: {}\n\
         📋 Tipo: {}\n\
         ⭕ Status: {}\n\
         ✅ Progresso da Vistoria: {}% ({ok}/{total} itens)",
        unit.number,
        unit.unit_type,
        unit.status.label(),
        progress(&unit.tasks),
    )
}
