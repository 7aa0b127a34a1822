use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaitingPeriod {
    pub start_instant: NaiveDateTime,
    pub duration_minutes: i64,
    pub day_minutes: i64,
    pub night_minutes: i64,
    pub day_increments: i64,
    pub night_increments: i64,
    pub price_day_ht: f64,
    /// Includes `night_surcharge_amount`.
    pub price_night_ht: f64,
    pub night_surcharge_amount: f64,
    pub price_ht: f64,
    pub price_ttc: f64,
    pub vat_rate_percent: f64,
}

impl WaitingPeriod {
    pub fn billable_increments(&self) -> i64 {
        self.day_increments + self.night_increments
    }
}
