// ⚙️ Run Configuration
// Input/output paths and the target month, loaded from JSON with defaults

use crate::error::ScheduleError;
use crate::matrix::{days_in_month, MatrixConfig};
use crate::rules::ExtractionRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "schedule.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Source document (.pdf, or .txt with pre-extracted text)
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Matrix CSV
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Flat per-day table CSV; skipped when unset
    #[serde(default)]
    pub entries_path: Option<PathBuf>,

    #[serde(default = "default_target_year")]
    pub target_year: i32,

    #[serde(default = "default_target_month")]
    pub target_month: u32,

    #[serde(default = "default_highlighted_days")]
    pub highlighted_days: BTreeSet<u32>,

    #[serde(default)]
    pub rules: ExtractionRules,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("oct.pdf")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("10月_各店舗_営業マトリクス.csv")
}

fn default_target_year() -> i32 {
    2025
}

fn default_target_month() -> u32 {
    10
}

fn default_highlighted_days() -> BTreeSet<u32> {
    [22].into_iter().collect()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            input_path: default_input_path(),
            output_path: default_output_path(),
            entries_path: None,
            target_year: default_target_year(),
            target_month: default_target_month(),
            highlighted_days: default_highlighted_days(),
            rules: ExtractionRules::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScheduleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: ScheduleConfig =
            serde_json::from_str(&content).map_err(|e| ScheduleError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when the file does not exist; errors only on a broken file
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        if path.exists() {
            info!(config_file = %path.display(), "config loaded");
            Self::from_file(path)
        } else {
            info!(config_file = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        let days = days_in_month(self.target_year, self.target_month)?;
        for day in &self.highlighted_days {
            if *day == 0 || *day > days {
                warn!(day = *day, days, "highlighted day outside target month");
            }
        }
        Ok(())
    }

    pub fn matrix_config(&self) -> MatrixConfig {
        MatrixConfig {
            target_year: self.target_year,
            target_month: self.target_month,
            highlighted_days: self.highlighted_days.clone(),
        }
    }
}
