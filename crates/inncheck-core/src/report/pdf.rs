//! Inspection PDF layout
//!
//! Produces a device-independent page model for the entry/exit inspection
//! report on A4 paper (millimetre coordinates, origin top-left, text `y` is
//! the baseline). Encoding the model into PDF bytes is left to a renderer;
//! the layout itself is fixed:
//! - colored header band with property name and report kind
//! - guest metadata block and the two captured images
//! - checklist grouped by category with colored status markers
//! - closing message block

use super::{group_by_category, underscore_whitespace};
use crate::checklist::TaskStatus;
use crate::error::CoreError;
use crate::unit::Unit;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;

/// Page width in millimetres
pub const PAGE_WIDTH: f32 = 210.0;
/// Page height in millimetres
pub const PAGE_HEIGHT: f32 = 297.0;

const CENTER_X: f32 = PAGE_WIDTH / 2.0;
const CATEGORY_BREAK_Y: f32 = 260.0;
const ITEM_BREAK_Y: f32 = 275.0;
const FIRST_ROW_Y: f32 = 145.0;
const NEW_PAGE_Y: f32 = 20.0;
const FOOTER_Y: f32 = 285.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Entry header and confirmation green
    pub const GREEN: Rgb = Rgb(16, 185, 129);
    /// Exit header blue
    pub const BLUE: Rgb = Rgb(59, 130, 246);
    /// Damage marker orange
    pub const ORANGE: Rgb = Rgb(245, 158, 11);
    /// Pending marker red
    pub const RED: Rgb = Rgb(239, 68, 68);
    /// Header text
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Body text
    pub const BODY: Rgb = Rgb(60, 60, 60);
    /// Section title
    pub const TITLE: Rgb = Rgb(40, 40, 40);
    /// Closing message
    pub const FOOTER: Rgb = Rgb(80, 80, 80);
    /// Signature line
    pub const MUTED: Rgb = Rgb(150, 150, 150);
}

/// Whether the report documents the start or the end of a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    /// Check-in report
    Entry,
    /// Check-out report
    Exit,
}

impl ReportKind {
    fn slug(self) -> &'static str {
        match self {
            Self::Entry => "entrada",
            Self::Exit => "saida",
        }
    }

    fn subtitle(self) -> &'static str {
        match self {
            Self::Entry => "RELATORIO DE VISTORIA - ENTRADA",
            Self::Exit => "RELATORIO DE VISTORIA - SAIDA",
        }
    }

    fn primary(self) -> Rgb {
        match self {
            Self::Entry => Rgb::GREEN,
            Self::Exit => Rgb::BLUE,
        }
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontStyle {
    /// Regular
    Normal,
    /// Bold
    Bold,
    /// Italic
    Italic,
}

/// Horizontal anchoring of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    /// `x` is the left edge
    Left,
    /// `x` is the center
    Center,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Filled rectangle
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// Text run
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    },
    /// Stroked line
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Embedded JPEG image (as a data URI)
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        source: String,
    },
}

/// One page of drawing instructions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Instructions in paint order
    pub ops: Vec<DrawOp>,
}

/// A laid out report ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfLayout {
    /// Suggested output file name
    pub file_name: String,
    /// Report kind
    pub kind: ReportKind,
    /// Pages in order
    pub pages: Vec<Page>,
}

/// `vistoria_<entrada|saida>_<number with whitespace runs as _>.pdf`
#[must_use]
pub fn file_name(unit: &Unit, kind: ReportKind) -> String {
    format!(
        "vistoria_{}_{}.pdf",
        kind.slug(),
        underscore_whitespace(&unit.number)
    )
}

/// Status marker text and color
#[must_use]
pub fn status_marker(status: TaskStatus) -> (&'static str, Rgb) {
    match status {
        TaskStatus::Ok => ("[ OK ]", Rgb::GREEN),
        TaskStatus::Failed => ("[ AVARIA ]", Rgb::ORANGE),
        TaskStatus::Pending => ("[ PENDENTE ]", Rgb::RED),
    }
}

/// Width in millimetres of `text` set in Helvetica Bold at `size` points
#[must_use]
pub fn bold_text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' ' | 'I' => 278,
            '[' | ']' | '-' => 333,
            'T' => 611,
            'E' | 'P' | 'V' => 667,
            'A' | 'D' | 'K' | 'N' | 'R' => 722,
            'O' => 778,
            _ => 556,
        })
        .sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

struct Cursor {
    pages: Vec<Page>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    ) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size,
            style,
            color,
            align,
        });
    }
}

/// Lay out the inspection report for the unit's current guest
///
/// # Errors
/// `CoreError::NoGuest` when no guest is attached to the unit.
pub fn layout<Tz: TimeZone>(
    unit: &Unit,
    kind: ReportKind,
    property_name: &str,
    now: &DateTime<Tz>,
) -> Result<PdfLayout, CoreError>
where
    Tz::Offset: fmt::Display,
{
    let guest = unit
        .current_guest
        .as_ref()
        .ok_or_else(|| CoreError::NoGuest(unit.number.clone()))?;
    let primary = kind.primary();
    let mut doc = Cursor::new();

    // header band
    doc.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH,
        height: 40.0,
        color: primary,
    });
    doc.text(
        CENTER_X,
        20.0,
        property_name.to_uppercase(),
        20.0,
        FontStyle::Bold,
        Rgb::WHITE,
        Align::Center,
    );
    doc.text(
        CENTER_X,
        30.0,
        kind.subtitle(),
        10.0,
        FontStyle::Normal,
        Rgb::WHITE,
        Align::Center,
    );

    // guest metadata
    let meta = [
        (15.0, 50.0, format!("Hospede: {}", guest.name())),
        (15.0, 56.0, format!("CPF: {}", guest.identifier())),
        (15.0, 62.0, format!("Unidade: {}", unit.number)),
        (130.0, 50.0, format!("Data: {}", now.format("%d/%m/%Y"))),
        (130.0, 56.0, format!("Hora: {}", now.format("%H:%M"))),
    ];
    for (x, y, text) in meta {
        doc.text(x, y, text, 9.0, FontStyle::Normal, Rgb::BODY, Align::Left);
    }

    // captured images
    let images = [
        (15.0, "Foto Documento:", guest.document_image()),
        (65.0, "Biometria Facial:", guest.face_image()),
    ];
    for (x, caption, image) in images {
        doc.text(x, 75.0, caption, 9.0, FontStyle::Normal, Rgb::BODY, Align::Left);
        doc.push(DrawOp::Image {
            x,
            y: 80.0,
            width: 40.0,
            height: 40.0,
            source: image.to_data_uri(),
        });
    }

    doc.text(
        15.0,
        135.0,
        "CONSOLIDADO DE PATRIMONIO POR AREA:",
        12.0,
        FontStyle::Bold,
        Rgb::TITLE,
        Align::Left,
    );
    doc.push(DrawOp::Line {
        x1: 15.0,
        y1: 137.0,
        x2: 195.0,
        y2: 137.0,
    });

    let mut y = FIRST_ROW_Y;
    for report in group_by_category(&unit.tasks).values() {
        if y > CATEGORY_BREAK_Y {
            doc.new_page();
            y = NEW_PAGE_Y;
        }
        doc.text(
            15.0,
            y,
            report.label().to_uppercase(),
            10.0,
            FontStyle::Bold,
            primary,
            Align::Left,
        );
        y += 6.0;

        for task in &report.tasks {
            if y > ITEM_BREAK_Y {
                doc.new_page();
                y = NEW_PAGE_Y;
            }
            let (marker, color) = status_marker(task.status);
            doc.text(20.0, y, marker, 8.0, FontStyle::Bold, color, Align::Left);
            let offset = bold_text_width(marker, 8.0) + 2.0;
            doc.text(
                20.0 + offset,
                y,
                format!("- {}", task.title),
                8.0,
                FontStyle::Normal,
                Rgb::BODY,
                Align::Left,
            );
            y += 5.0;
        }
        y += 4.0;
    }

    // closing block on the last page
    let message = match kind {
        ReportKind::Entry => {
            format!("Seja bem-vindo ao {property_name}! Desejamos uma excelente estadia.")
        }
        ReportKind::Exit => {
            "Agradecemos a preferencia! Esperamos que tenha desfrutado de momentos felizes."
                .to_string()
        }
    };
    doc.text(
        CENTER_X,
        FOOTER_Y - 8.0,
        message,
        10.0,
        FontStyle::Italic,
        Rgb::FOOTER,
        Align::Center,
    );
    doc.text(
        CENTER_X,
        FOOTER_Y,
        "Gerado por InnCheck Intelligent - Gestao de Propriedades",
        7.0,
        FontStyle::Normal,
        Rgb::MUTED,
        Align::Center,
    );

    tracing::debug!(
        unit = %unit.number,
        pages = doc.pages.len(),
        "Laid out inspection report"
    );

    Ok(PdfLayout {
        file_name: file_name(unit, kind),
        kind,
        pages: doc.pages,
    })
}
