use crate::adapters::report::{AssignmentSummary, OutputFormat};
use crate::core::ordering::AttendeeOrder;
use crate::domain::model::{Roster, Venue};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn attendees_path(&self) -> &str;
    fn venues(&self) -> Result<Vec<Venue>>;
    fn attendee_order(&self) -> AttendeeOrder;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Roster>;
    fn transform(&self, roster: Roster) -> Result<Roster>;
    fn load(&self, roster: &Roster) -> Result<AssignmentSummary>;
}
