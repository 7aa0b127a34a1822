use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::external::HolidayCalendar;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NightSurcharge {
    pub base_ht: f64,
    pub surcharge_amount: f64,
    pub price_ht: f64,
}

pub fn uplift(amount: f64, percent: f64) -> f64 {
    amount * (1.0 + percent / 100.0)
}

pub fn percentage_of(amount: f64, percent: f64) -> f64 {
    amount * (percent / 100.0)
}

pub fn with_vat(price_ht: f64, vat_rate_percent: f64) -> f64 {
    uplift(price_ht, vat_rate_percent)
}

pub fn night_surcharge(night_km: f64, price_per_km: f64, surcharge_percent: f64) -> NightSurcharge {
    let base_ht = night_km * price_per_km;

    NightSurcharge {
        base_ht,
        surcharge_amount: percentage_of(base_ht, surcharge_percent),
        price_ht: uplift(base_ht, surcharge_percent),
    }
}

pub fn is_sunday_or_holiday(date: NaiveDate, calendar: &dyn HolidayCalendar) -> bool {
    date.weekday() == Weekday::Sun || calendar.is_holiday(date)
}

/// Applies to the leg's distance price before any night uplift, so night and
/// Sunday surcharges add up rather than compound.
pub fn sunday_holiday_surcharge(base_distance_ht: f64, surcharge_percent: f64, applies: bool) -> f64 {
    if !applies {
        return 0.0;
    }

    percentage_of(base_distance_ht, surcharge_percent)
}
