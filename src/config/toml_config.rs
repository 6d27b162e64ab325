use crate::adapters::report::OutputFormat;
use crate::core::ordering::AttendeeOrder;
use crate::core::{ConfigProvider, Venue};
use crate::utils::error::{Result, SummitError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub venues: Vec<VenueConfig>,
    pub assignment: Option<AssignmentConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub attendees: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub name: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SUMMIT_DATA})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SummitError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let attendees = validation::validate_required_field("input.attendees", &self.input.attendees)?;
        validation::validate_path("input.attendees", attendees)?;

        if self.venues.is_empty() {
            return Err(SummitError::NoVenues);
        }
        for venue in &self.venues {
            validation::validate_non_empty_string("venues.name", &venue.name)?;
            validation::validate_positive_number("venues.capacity", venue.capacity, 1)?;
        }
        validation::validate_unique_names(self.venues.iter().map(|v| v.name.as_str()))?;

        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validation::validate_path("output.path", path)?;
            validation::validate_file_extension("output.path", path, &["txt", "csv", "json"])?;
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn attendees_path(&self) -> &str {
        self.input.attendees.as_deref().unwrap_or_default()
    }

    fn venues(&self) -> Result<Vec<Venue>> {
        Ok(self
            .venues
            .iter()
            .map(|venue| Venue::new(venue.name.clone(), venue.capacity))
            .collect())
    }

    fn attendee_order(&self) -> AttendeeOrder {
        AttendeeOrder::from_seed(self.assignment.as_ref().and_then(|a| a.seed))
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[input]
attendees = "attendees.csv"

[[venues]]
name = "a"
capacity = 2

[[venues]]
name = "b"
capacity = 1

[assignment]
seed = 11

[output]
path = "rooms.json"
format = "json"

[logging]
verbose = true
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.attendees_path(), "attendees.csv");
        assert_eq!(config.venues().unwrap().len(), 2);
        assert_eq!(config.attendee_order(), AttendeeOrder::Seeded(11));
        assert_eq!(config.output_path(), Some("rooms.json"));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str(
            r#"
[input]
attendees = "attendees.csv"

[[venues]]
name = "a"
capacity = 2
"#,
        )
        .unwrap();

        assert_eq!(config.attendee_order(), AttendeeOrder::Input);
        assert_eq!(config.output_path(), None);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SUMMIT_TEST_ATTENDEES", "people/2026.csv");

        let config = TomlConfig::from_toml_str(
            r#"
[input]
attendees = "${SUMMIT_TEST_ATTENDEES}"
"#,
        )
        .unwrap();
        assert_eq!(config.attendees_path(), "people/2026.csv");

        std::env::remove_var("SUMMIT_TEST_ATTENDEES");
    }

    #[test]
    fn test_config_validation() {
        let zero = TomlConfig::from_toml_str(
            r#"
[input]
attendees = "attendees.csv"

[[venues]]
name = "a"
capacity = 0
"#,
        )
        .unwrap();
        assert!(zero.validate().is_err());

        let duplicate = TomlConfig::from_toml_str(
            r#"
[input]
attendees = "attendees.csv"

[[venues]]
name = "a"
capacity = 1

[[venues]]
name = "a"
capacity = 2
"#,
        )
        .unwrap();
        assert!(matches!(
            duplicate.validate(),
            Err(SummitError::DuplicateVenue { .. })
        ));

        let no_venues = TomlConfig::from_toml_str("[input]\nattendees = \"a.csv\"\n").unwrap();
        assert!(matches!(no_venues.validate(), Err(SummitError::NoVenues)));
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[[venues]]\nname = 3\n").unwrap_err();
        assert!(matches!(err, SummitError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.venues.len(), 2);
    }
}
