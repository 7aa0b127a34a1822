use std::env;
use std::str::FromStr;

use crate::entities::{PricingDefaults, DEFAULT_VAT_RATE_PERCENT};
use crate::error::{invalid_configuration_error, Error};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayCalendarKind {
    France,
    None,
}

impl FromStr for HolidayCalendarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "france" | "fr" => Ok(Self::France),
            "none" => Ok(Self::None),
            other => Err(invalid_configuration_error(format!(
                "unknown holiday calendar {:?}",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub default_vat_rate_percent: f64,
    pub holiday_calendar: HolidayCalendarKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            default_vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
            holiday_calendar: HolidayCalendarKind::France,
        }
    }
}

impl Settings {
    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
    /// `DEFAULT_VAT_RATE_PERCENT` and `HOLIDAY_CALENDAR`, loading `.env` first.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settings = Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            default_vat_rate_percent: parse_or(
                &lookup,
                "DEFAULT_VAT_RATE_PERCENT",
                defaults.default_vat_rate_percent,
            )?,
            holiday_calendar: parse_or(&lookup, "HOLIDAY_CALENDAR", defaults.holiday_calendar)?,
        };

        if !settings.default_vat_rate_percent.is_finite() || settings.default_vat_rate_percent < 0.0
        {
            return Err(invalid_configuration_error(
                "DEFAULT_VAT_RATE_PERCENT must be a non-negative number",
            ));
        }

        Ok(settings)
    }

    pub fn pricing_defaults(&self) -> PricingDefaults {
        PricingDefaults {
            vat_rate_percent: self.default_vat_rate_percent,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| invalid_configuration_error(format!("{} is invalid: {:?}", key, raw))),
        None => Ok(default),
    }
}
