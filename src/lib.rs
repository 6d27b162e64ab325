pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, TomlConfig};

pub use crate::adapters::report::{AssignmentSummary, OutputFormat};
pub use crate::core::assignment::{assign, assign_in_order, check_capacity};
pub use crate::core::engine::AssignmentEngine;
pub use crate::core::ordering::AttendeeOrder;
pub use crate::core::pipeline::CsvPipeline;
pub use crate::domain::model::{Attendee, AttendeeId, Roster, Venue, VenueId};
pub use crate::utils::error::{Result, SummitError};
