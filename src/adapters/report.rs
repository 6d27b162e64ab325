use crate::domain::model::Roster;
use crate::utils::error::{Result, SummitError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text, csv or json)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueSummary {
    pub name: String,
    pub capacity: usize,
    pub used: usize,
    pub attendees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRow {
    pub attendee: String,
    pub venue: Option<String>,
    pub got_preference: Option<bool>,
}

/// Read-only view of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub generated_at: DateTime<Utc>,
    pub total_capacity: usize,
    pub unmet_preferences: usize,
    pub venues: Vec<VenueSummary>,
    pub attendees: Vec<AttendeeRow>,
}

impl AssignmentSummary {
    pub fn from_roster(roster: &Roster) -> Self {
        let venues = roster
            .venues
            .iter()
            .map(|venue| VenueSummary {
                name: venue.name().to_string(),
                capacity: venue.capacity(),
                used: venue.used_capacity(),
                attendees: venue
                    .assigned()
                    .iter()
                    .filter_map(|id| roster.attendee(*id))
                    .map(|attendee| attendee.name().to_string())
                    .collect(),
            })
            .collect();

        let attendees: Vec<AttendeeRow> = roster
            .attendees
            .iter()
            .map(|attendee| AttendeeRow {
                attendee: attendee.name().to_string(),
                venue: roster.venue_of(attendee).map(|venue| venue.name().to_string()),
                got_preference: attendee.got_preference(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            total_capacity: roster.total_capacity(),
            unmet_preferences: attendees
                .iter()
                .filter(|row| row.got_preference == Some(false))
                .count(),
            venues,
            attendees,
        }
    }

    pub fn unmet(&self) -> impl Iterator<Item = &AttendeeRow> {
        self.attendees
            .iter()
            .filter(|row| row.got_preference == Some(false))
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for venue in &self.venues {
            let _ = writeln!(out, "{} ({}/{})", venue.name, venue.used, venue.capacity);
            for name in &venue.attendees {
                let _ = writeln!(out, "    {}", name);
            }
        }

        let unmet: Vec<&str> = self.unmet().map(|row| row.attendee.as_str()).collect();
        if unmet.is_empty() {
            let _ = writeln!(out, "All {} attendees got a preferred venue", self.attendees.len());
        } else {
            let _ = writeln!(
                out,
                "{} of {} attendees did not get a preferred venue: {}",
                unmet.len(),
                self.attendees.len(),
                unmet.join(", ")
            );
        }
        out
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.attendees {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| SummitError::IoError(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| SummitError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
