use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{invalid_configuration_error, Error};

pub const DEFAULT_VAT_RATE_PERCENT: f64 = 10.0;

/// Who a stored configuration belongs to. Vehicle records take precedence
/// over the driver's default record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PricingOwner {
    Vehicle(Uuid),
    Driver(Uuid),
}

impl PricingOwner {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Vehicle(_) => "vehicle",
            Self::Driver(_) => "driver",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Vehicle(id) | Self::Driver(id) => *id,
        }
    }
}

/// A daily clock-time window with a percentage uplift. `start > end` wraps
/// midnight, `start == end` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateWindow {
    pub enabled: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub surcharge_percent: f64,
}

impl RateWindow {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            start_time: NaiveTime::default(),
            end_time: NaiveTime::default(),
            surcharge_percent: 0.0,
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.start_time > self.end_time
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfiguration {
    pub price_per_km: f64,
    pub minimum_fare: f64,
    pub minimum_distance_km: f64,
    pub night_rate: RateWindow,
    pub sunday_holiday_surcharge_percent: f64,
    pub waiting_fee_per_15_min: f64,
    pub waiting_night_rate: RateWindow,
    pub vat_rate_percent: f64,
}

/// Fallback values applied by [`PricingConfiguration::from_record`] and
/// nowhere else.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingDefaults {
    pub vat_rate_percent: f64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
        }
    }
}

/// Pricing configuration as stored: loosely typed, every field optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub price_per_km: Option<f64>,
    pub minimum_fare: Option<f64>,
    pub minimum_distance_km: Option<f64>,
    pub night_rate: Option<RateWindowRecord>,
    pub sunday_holiday_surcharge_percent: Option<f64>,
    pub waiting_fee_per_15_min: Option<f64>,
    pub waiting_night_rate: Option<RateWindowRecord>,
    pub vat_rate_percent: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateWindowRecord {
    #[serde(default)]
    pub enabled: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub surcharge_percent: Option<f64>,
}

impl PricingConfiguration {
    pub fn from_record(record: &PricingRecord, defaults: &PricingDefaults) -> Result<Self, Error> {
        let price_per_km = record
            .price_per_km
            .ok_or_else(|| invalid_configuration_error("price_per_km is required"))?;

        let config = Self {
            price_per_km: non_negative("price_per_km", price_per_km)?,
            minimum_fare: optional_amount("minimum_fare", record.minimum_fare)?,
            minimum_distance_km: optional_amount(
                "minimum_distance_km",
                record.minimum_distance_km,
            )?,
            night_rate: rate_window("night_rate", record.night_rate.as_ref())?,
            sunday_holiday_surcharge_percent: optional_amount(
                "sunday_holiday_surcharge_percent",
                record.sunday_holiday_surcharge_percent,
            )?,
            waiting_fee_per_15_min: optional_amount(
                "waiting_fee_per_15_min",
                record.waiting_fee_per_15_min,
            )?,
            waiting_night_rate: rate_window(
                "waiting_night_rate",
                record.waiting_night_rate.as_ref(),
            )?,
            vat_rate_percent: non_negative(
                "vat_rate_percent",
                record.vat_rate_percent.unwrap_or(defaults.vat_rate_percent),
            )?,
        };

        Ok(config)
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64, Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid_configuration_error(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }

    Ok(value)
}

fn optional_amount(field: &str, value: Option<f64>) -> Result<f64, Error> {
    non_negative(field, value.unwrap_or(0.0))
}

fn rate_window(field: &str, record: Option<&RateWindowRecord>) -> Result<RateWindow, Error> {
    let record = match record {
        Some(record) if record.enabled => record,
        _ => return Ok(RateWindow::disabled()),
    };

    let start_time = record
        .start_time
        .as_deref()
        .ok_or_else(|| invalid_configuration_error(format!("{}.start_time is required", field)))
        .and_then(|raw| parse_clock_time(&format!("{}.start_time", field), raw))?;

    let end_time = record
        .end_time
        .as_deref()
        .ok_or_else(|| invalid_configuration_error(format!("{}.end_time is required", field)))
        .and_then(|raw| parse_clock_time(&format!("{}.end_time", field), raw))?;

    Ok(RateWindow {
        enabled: true,
        start_time,
        end_time,
        surcharge_percent: optional_amount(
            &format!("{}.surcharge_percent", field),
            record.surcharge_percent,
        )?,
    })
}

/// Accepts `HH:MM` or `HH:MM:SS`; seconds are dropped.
pub fn parse_clock_time(field: &str, raw: &str) -> Result<NaiveTime, Error> {
    let raw = raw.trim();

    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
        .and_then(|time| NaiveTime::from_hms_opt(time.hour(), time.minute(), 0))
        .ok_or_else(|| {
            invalid_configuration_error(format!("{} is not a clock time: {:?}", field, raw))
        })
}
