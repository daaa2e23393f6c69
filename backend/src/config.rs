//! Dashboard configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! - `DASHBOARD_CONFIG`: path of the TOML file to start from
//! - `HOST`, `PORT`: server bind address
//! - `DASHBOARD_TIMEZONE`: IANA zone used to resolve calendar ranges
//! - `DASHBOARD_UTC_OFFSET_MINUTES`: fixed offset used when no zone is named
//! - `DASHBOARD_WEEK_START`: `monday` or `sunday`
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [calendar]
//! timezone = "America/Los_Angeles"
//! week_start = "monday"
//! ```

use chrono::FixedOffset;
use chrono_tz::Tz;
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{VizError, VizResult};
use crate::models::WeekStart;
use crate::services::{CalendarCalculator, TimeRangeCalculator};

pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TIMEZONE_ENV: &str = "DASHBOARD_TIMEZONE";
pub const UTC_OFFSET_ENV: &str = "DASHBOARD_UTC_OFFSET_MINUTES";
pub const WEEK_START_ENV: &str = "DASHBOARD_WEEK_START";

const MAX_UTC_OFFSET_MINUTES: u32 = 18 * 60;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// Bind address of the HTTP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Calendar conventions used when resolving named time ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// IANA zone such as `America/Los_Angeles`. Wins over the fixed offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Tz>,
    /// Offset east of UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default, deserialize_with = "deserialize_week_start")]
    pub week_start: WeekStart,
}

fn parse_week_start(label: &str) -> Result<WeekStart, String> {
    WeekStart::from_label(label)
        .ok_or_else(|| format!("Unknown week_start '{}', expected 'monday' or 'sunday'", label))
}

fn deserialize_week_start<'de, D>(deserializer: D) -> Result<WeekStart, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    parse_week_start(&label).map_err(serde::de::Error::custom)
}

impl CalendarSettings {
    pub fn fixed_offset(&self) -> VizResult<FixedOffset> {
        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(VizError::configuration(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            VizError::configuration(format!(
                "Invalid utc_offset_minutes: {}",
                self.utc_offset_minutes
            ))
        })
    }

    /// Calculator honoring these settings.
    pub fn calculator(&self) -> VizResult<CalendarCalculator> {
        let calculator: CalendarCalculator = match self.timezone {
            Some(zone) => TimeRangeCalculator::new(zone)
                .with_week_start(self.week_start)
                .into(),
            None => TimeRangeCalculator::new(self.fixed_offset()?)
                .with_week_start(self.week_start)
                .into(),
        };
        Ok(calculator)
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VizError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: DashboardConfig = toml::from_str(&content).map_err(|e| {
            VizError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `dashboard.toml` from the first standard location that has one.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> VizResult<Self> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(VizError::configuration(
            "No dashboard.toml found in standard locations",
        ))
    }

    /// Configuration from the process environment.
    ///
    /// Starts from `DASHBOARD_CONFIG` when set, otherwise from
    /// [`from_default_location`](Self::from_default_location) or defaults,
    /// then applies the variable overrides.
    pub fn from_env() -> VizResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> VizResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_location().unwrap_or_else(|e| {
                info!("{}; using defaults", e);
                Self::default()
            }),
        };

        if let Some(host) = lookup(HOST_ENV) {
            config.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.server.port = port.trim().parse().map_err(|_| {
                VizError::configuration(format!("{} must be a valid port number", PORT_ENV))
            })?;
        }
        if let Some(zone) = lookup(TIMEZONE_ENV) {
            config.calendar.timezone = Some(zone.trim().parse::<Tz>().map_err(|e| {
                VizError::configuration(format!("{} is not a known time zone: {}", TIMEZONE_ENV, e))
            })?);
        }
        if let Some(offset) = lookup(UTC_OFFSET_ENV) {
            config.calendar.utc_offset_minutes = offset.trim().parse().map_err(|_| {
                VizError::configuration(format!(
                    "{} must be a whole number of minutes",
                    UTC_OFFSET_ENV
                ))
            })?;
        }
        if let Some(week_start) = lookup(WEEK_START_ENV) {
            config.calendar.week_start =
                parse_week_start(&week_start).map_err(VizError::configuration)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that serde cannot.
    pub fn validate(&self) -> VizResult<()> {
        self.calendar.fixed_offset()?;
        Ok(())
    }
}
