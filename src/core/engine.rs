use crate::adapters::report::AssignmentSummary;
use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct AssignmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AssignmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<AssignmentSummary> {
        tracing::info!("📥 Reading venues and attendees...");
        let roster = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} venues ({} places) and {} attendees",
            roster.venues.len(),
            roster.total_capacity(),
            roster.attendees.len()
        );

        tracing::info!("🧮 Assigning attendees to venues...");
        let roster = self.pipeline.transform(roster)?;

        tracing::info!("📝 Writing assignment report...");
        let summary = self.pipeline.load(&roster)?;
        tracing::info!(
            "Assigned {} attendees, {} without a preferred venue",
            summary.attendees.len(),
            summary.unmet_preferences
        );

        Ok(summary)
    }
}
