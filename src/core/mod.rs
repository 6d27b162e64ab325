pub mod assignment;
pub mod engine;
pub mod graph;
pub mod matching;
pub mod ordering;
pub mod pipeline;

pub use crate::domain::model::{Attendee, AttendeeId, Roster, Venue, VenueId};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
