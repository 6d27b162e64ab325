use crate::adapters::csv_input::parse_venues;
use crate::adapters::report::OutputFormat;
use crate::config::toml_config::{OutputConfig, TomlConfig, VenueConfig};
use crate::core::ordering::AttendeeOrder;
use crate::core::{ConfigProvider, Venue};
use crate::utils::error::{Result, SummitError};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "summit")]
#[command(about = "Assign attendees to venues, honouring their preferences")]
pub struct CliConfig {
    /// CSV file of attendees
    pub attendees: Option<String>,

    /// List of venues with capacity e.g. venue1:5 venue2:6
    #[arg(short = 'v', long, num_args = 1..)]
    pub venues: Vec<String>,

    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Shuffle attendees with this seed before assigning
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report format: text, csv or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 將命令列參數覆蓋到 TOML 配置
    pub fn apply_overrides(&self, config: &mut TomlConfig) -> Result<()> {
        if let Some(attendees) = &self.attendees {
            config.input.attendees = Some(attendees.clone());
        }
        if !self.venues.is_empty() {
            config.venues = parse_venues(&self.venues)?
                .iter()
                .map(|venue| VenueConfig {
                    name: venue.name().to_string(),
                    capacity: venue.capacity(),
                })
                .collect();
        }
        if let Some(seed) = self.seed {
            config.assignment.get_or_insert_with(Default::default).seed = Some(seed);
        }
        if self.output.is_some() || self.format.is_some() {
            let output = config.output.get_or_insert_with(OutputConfig::default);
            if let Some(path) = &self.output {
                output.path = Some(path.clone());
            }
            if let Some(format) = self.format {
                output.format = Some(format);
            }
        }
        if self.verbose || self.json_logs {
            let logging = config.logging.get_or_insert_with(Default::default);
            if self.verbose {
                logging.verbose = Some(true);
            }
            if self.json_logs {
                logging.json = Some(true);
            }
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn attendees_path(&self) -> &str {
        self.attendees.as_deref().unwrap_or_default()
    }

    fn venues(&self) -> Result<Vec<Venue>> {
        parse_venues(&self.venues)
    }

    fn attendee_order(&self) -> AttendeeOrder {
        AttendeeOrder::from_seed(self.seed)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let attendees = validation::validate_required_field("attendees", &self.attendees)?;
        validation::validate_path("attendees", attendees)?;
        if self.venues.is_empty() {
            return Err(SummitError::NoVenues);
        }
        parse_venues(&self.venues)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}
