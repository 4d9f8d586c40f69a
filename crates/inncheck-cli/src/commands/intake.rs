//! Check-in and check-out
//!
//! Check-in drives the capture sequencer against a file-backed camera: the
//! document photo is taken as soon as the rear camera opens, the face photo
//! when the countdown expires (or immediately with `--capture-now`). Ctrl-C
//! during the countdown cancels the intake and leaves the unit untouched.

use super::reports::write_pdf_layout;
use super::Context;
use crate::cli::CheckInArgs;
use crate::output::print_one;
use crate::state::AppState;
use anyhow::Context as _;
use chrono::Local;
use inncheck_capture::{
    CaptureCommand, CaptureSequencer, IntakeError, JpegStillEncoder, StillImageCamera,
};
use inncheck_core::report::pdf::ReportKind;
use inncheck_core::{CoreError, GuestRecord, UnitStatus};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntakeOutcome {
    unit: String,
    guest: GuestRecord,
    report: PathBuf,
}

async fn run_intake(ctx: &Context, args: &CheckInArgs) -> Result<GuestRecord, IntakeError> {
    let camera = StillImageCamera::new(&args.document_photo, &args.face_photo);
    let encoder = JpegStillEncoder::new(ctx.config.jpeg_quality);
    let mut seq = CaptureSequencer::new(camera, encoder, ctx.config.capture_config());

    seq.set_name(&args.name)?;
    seq.set_identifier(&args.cpf)?;
    if let Some(issue) = seq.identity_issue() {
        return Err(issue.into());
    }
    seq.advance().await?;
    seq.capture().await?;

    if args.capture_now {
        seq.capture().await?;
    } else {
        tracing::info!(secs = seq.session().countdown(), "Face photo countdown started");
        let (tx, mut commands) = mpsc::channel(1);
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(CaptureCommand::Cancel).await;
            }
        });
        let outcome = seq.run_face_countdown(&mut commands).await;
        interrupt.abort();
        outcome?;
    }

    seq.complete(&Local::now())
}

pub async fn check_in(ctx: &Context, state: &mut AppState, args: CheckInArgs) -> anyhow::Result<()> {
    {
        let unit = state.unit(&args.unit)?;
        if unit.status != UnitStatus::Available {
            return Err(CoreError::UnitNotAvailable {
                number: unit.number.clone(),
                status: unit.status,
            }
            .into());
        }
    }

    let guest = run_intake(ctx, &args)
        .await
        .with_context(|| format!("check-in of {} failed", args.unit))?;

    let unit = state.unit_mut(&args.unit)?;
    unit.check_in(guest.clone())?;
    let report = write_pdf_layout(ctx, unit, ReportKind::Entry, &Local::now())?;

    let outcome = IntakeOutcome {
        unit: unit.number.clone(),
        guest,
        report,
    };
    print_one(ctx.json, outcome, |o| {
        format!(
            "checked in {} to {} at {}\nentry report: {}",
            o.guest.name(),
            o.unit,
            o.guest.check_in_time(),
            o.report.display()
        )
    })
}

pub fn check_out(ctx: &Context, state: &mut AppState, key: &str) -> anyhow::Result<()> {
    let reset = ctx.config.reset_tasks_on_checkout;
    let unit = state.unit_mut(key)?;
    let now = Local::now();

    // exit report shows the checklist as inspected, before any reset
    let report = write_pdf_layout(ctx, unit, ReportKind::Exit, &now)?;
    let guest = unit.check_out(&now, reset)?;

    let outcome = IntakeOutcome {
        unit: unit.number.clone(),
        guest,
        report,
    };
    print_one(ctx.json, outcome, |o| {
        format!(
            "checked out {} from {} at {}\nexit report: {}",
            o.guest.name(),
            o.unit,
            o.guest.check_out_time().unwrap_or_default(),
            o.report.display()
        )
    })
}
