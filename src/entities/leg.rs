use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Priced breakdown of one directional leg.
///
/// `day_km + night_km` is the actual distance. The `billed_*` figures include
/// any top-up to the configured minimum distance and are what the prices
/// are computed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    pub start_instant: NaiveDateTime,
    pub distance_km: f64,
    pub duration_minutes: i64,
    pub day_km: f64,
    pub night_km: f64,
    pub billed_distance_km: f64,
    pub billed_day_km: f64,
    pub billed_night_km: f64,
    pub day_price_ht: f64,
    /// Includes `night_surcharge_amount`.
    pub night_price_ht: f64,
    pub night_surcharge_amount: f64,
    pub sunday_or_holiday: bool,
    pub sunday_surcharge_amount: f64,
    pub subtotal_ht: f64,
    pub minimum_fare_applied: bool,
    pub price_ht: f64,
    pub price_ttc: f64,
    pub vat_rate_percent: f64,
}
