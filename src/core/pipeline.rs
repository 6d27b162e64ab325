use crate::adapters::csv_input::parse_attendees;
use crate::adapters::report::AssignmentSummary;
use crate::core::assignment::assign_in_order;
use crate::core::{ConfigProvider, Pipeline, Roster, Storage};
use crate::utils::error::{Result, SummitError};

/// Reads attendees from a CSV file, assigns them, and writes the report through `Storage`.
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    fn extract(&self) -> Result<Roster> {
        let venues = self.config.venues()?;
        if venues.is_empty() {
            return Err(SummitError::NoVenues);
        }

        tracing::debug!("Reading attendees from: {}", self.config.attendees_path());
        let data = self.storage.read_file(self.config.attendees_path())?;
        let attendees = parse_attendees(data.as_slice())?;

        Roster::new(venues, attendees)
    }

    fn transform(&self, mut roster: Roster) -> Result<Roster> {
        let order = self
            .config
            .attendee_order()
            .permutation(roster.attendees.len());
        tracing::debug!("Attendee order: {:?}", self.config.attendee_order());

        assign_in_order(&mut roster.venues, &mut roster.attendees, &order)?;
        Ok(roster)
    }

    fn load(&self, roster: &Roster) -> Result<AssignmentSummary> {
        let summary = AssignmentSummary::from_roster(roster);

        if let Some(path) = self.config.output_path() {
            let rendered = summary.render(self.config.output_format())?;
            self.storage.write_file(path, rendered.as_bytes())?;
            tracing::info!("📁 Report saved to: {}", path);
        }

        Ok(summary)
    }
}
