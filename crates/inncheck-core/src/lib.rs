//! InnCheck Core - property inspection domain model
//!
//! Pure logic shared by the capture sequencer and the CLI:
//! - CPF identifier validation with incremental feedback
//! - Units, checklists and reusable templates
//! - Guest record assembly for check-in and check-out
//! - Category-grouped reports (plain text and PDF page layout)
//! - Dashboard figures and inspection suggestions
//!
//! # Example
//!
//! ```rust
//! use inncheck_core::prelude::*;
//!
//! assert!(cpf::validate("529.982.247-25"));
//!
//! let mut unit = Unit::new("Chalé 1", "Padrão", None).unwrap();
//! let id = unit.add_task("Conferir controle da TV", Category::CasaSede).unwrap();
//! assert_eq!(unit.toggle_task(&id).unwrap(), TaskStatus::Ok);
//! assert_eq!(unit.progress(), 100);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod checklist;
pub mod cpf;
pub mod dashboard;
pub mod error;
pub mod guest;
pub mod operator;
pub mod report;
pub mod suggest;
pub mod template;
pub mod unit;

pub use checklist::{Category, Task, TaskId, TaskStatus};
pub use cpf::{Cpf, IdentifierFeedback};
pub use dashboard::DashboardStats;
pub use error::{CoreError, ValidationError};
pub use guest::{assemble, CapturedImage, GuestRecord};
pub use operator::{Operator, OperatorRole};
pub use report::{group_by_category, progress, CategoryReport};
pub use template::{ChecklistItem, ChecklistTemplate, TemplateId};
pub use unit::{Unit, UnitId, UnitStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with InnCheck Core
    pub use crate::cpf;
    pub use crate::{
        Category, ChecklistTemplate, Cpf, CoreError, GuestRecord, Task, TaskId, TaskStatus, Unit,
        UnitStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
