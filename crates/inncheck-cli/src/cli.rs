//! Command line definition

use clap::{Args, Parser, Subcommand, ValueEnum};
use inncheck_core::{Category, OperatorRole};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".inncheck";

#[derive(Parser, Debug)]
#[command(name = "inncheck", version, about = "InnCheck property inspection and guest intake")]
pub struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR, help = "Directory holding persisted state")]
    pub data_dir: PathBuf,
    #[arg(long, global = true, help = "Config file (default: <data-dir>/inncheck.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an operator session
    Login {
        name: String,
        #[arg(long, default_value = "admin")]
        role: OperatorRole,
    },
    /// End the operator session
    Logout,
    /// Manage units
    Units {
        #[command(subcommand)]
        command: UnitCommands,
    },
    /// Edit a unit's checklist
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage checklist templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Admit a guest: validate identity, capture document and face, write the entry report
    CheckIn(CheckInArgs),
    /// Release a unit and write the exit report
    CheckOut { unit: String },
    /// Generate a report for a unit
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Print a short status message for sharing
    Share { unit: String },
    /// Occupancy overview
    Dashboard,
    /// Check a CPF
    ValidateCpf { value: String },
}

impl Commands {
    /// Whether the command changes persisted state
    #[must_use]
    pub fn mutates(&self) -> bool {
        match self {
            Self::Login { .. } | Self::Logout | Self::CheckIn(_) | Self::CheckOut { .. } => true,
            Self::Units { command } => !matches!(command, UnitCommands::List | UnitCommands::Show { .. }),
            Self::Tasks { .. } => true,
            Self::Templates { command } => !matches!(command, TemplateCommands::List),
            Self::Report { .. } | Self::Share { .. } | Self::Dashboard | Self::ValidateCpf { .. } => {
                false
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum UnitCommands {
    List,
    Add {
        number: String,
        #[arg(long = "type", default_value = "Padrão")]
        unit_type: String,
        #[arg(long, help = "Seed the checklist from this template (id or name)")]
        template: Option<String>,
    },
    Remove {
        unit: String,
    },
    Show {
        unit: String,
    },
}

/// Tasks are addressed by id or by 1-based position in `units show`
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Cycle PENDENTE -> OK -> NAO_OK -> PENDENTE
    Toggle {
        unit: String,
        task: String,
    },
    Edit {
        unit: String,
        task: String,
        title: String,
    },
    Delete {
        unit: String,
        task: String,
    },
    Add {
        unit: String,
        title: String,
        #[arg(long, default_value = "INSPECTION")]
        category: Category,
    },
    DeleteCategory {
        unit: String,
        category: Category,
    },
    /// Add suggested inspection items for the unit type
    Suggest {
        unit: String,
    },
}

/// Template items are addressed by 1-based position
#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    List,
    Add {
        name: String,
    },
    Remove {
        template: String,
    },
    AddItem {
        template: String,
        title: String,
        #[arg(long, default_value = "INSPECTION")]
        category: Category,
    },
    EditItem {
        template: String,
        index: usize,
        title: String,
    },
    RemoveItem {
        template: String,
        index: usize,
    },
}

#[derive(Args, Debug)]
pub struct CheckInArgs {
    pub unit: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub cpf: String,
    #[arg(long, help = "Image served by the rear camera")]
    pub document_photo: PathBuf,
    #[arg(long, help = "Image served by the front camera")]
    pub face_photo: PathBuf,
    #[arg(long, help = "Take the face photo immediately instead of after the countdown")]
    pub capture_now: bool,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Plain text checklist report
    Text {
        unit: String,
        #[arg(long, help = "Print to stdout instead of writing a file")]
        stdout: bool,
    },
    /// Inspection PDF page layout, written as JSON
    Pdf {
        unit: String,
        #[arg(long, value_enum, default_value_t = PdfKind::Entry)]
        kind: PdfKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PdfKind {
    Entry,
    Exit,
}
