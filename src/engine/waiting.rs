use chrono::NaiveDateTime;

use super::fare::clamp_minutes;
use super::surcharge::{night_surcharge, with_vat};
use super::time_window::split;
use crate::entities::{PricingConfiguration, WaitingPeriod};

pub const BILLING_INCREMENT_MINUTES: i64 = 15;

/// Number of started billing increments in `minutes`.
pub fn billable_increments(minutes: i64) -> i64 {
    let minutes = minutes.max(0);

    minutes.saturating_add(BILLING_INCREMENT_MINUTES - 1) / BILLING_INCREMENT_MINUTES
}

/// Prices a waiting period in 15 minute increments.
///
/// With a waiting night rate, the raw duration is split across the window
/// first and each side is rounded up on its own, so the billed increments
/// can exceed those of the undivided duration.
#[tracing::instrument(skip(config))]
pub fn price_waiting(
    duration_minutes: i64,
    start_instant: NaiveDateTime,
    config: &PricingConfiguration,
) -> WaitingPeriod {
    let duration_minutes = clamp_minutes(duration_minutes);
    let fee = config.waiting_fee_per_15_min.max(0.0);
    let window = &config.waiting_night_rate;

    let (day_minutes, night_minutes, night_percent) = if window.enabled {
        let window_split = split(
            start_instant,
            duration_minutes,
            window.start_time,
            window.end_time,
        );

        (
            window_split.outside_minutes,
            window_split.inside_minutes,
            window.surcharge_percent,
        )
    } else {
        (duration_minutes, 0, 0.0)
    };

    let day_increments = billable_increments(day_minutes);
    let night_increments = billable_increments(night_minutes);

    let price_day_ht = day_increments as f64 * fee;
    // per-increment fee plays the role of price per km
    let night = night_surcharge(night_increments as f64, fee, night_percent);
    let price_ht = price_day_ht + night.price_ht;

    tracing::debug!(
        day_minutes,
        night_minutes,
        day_increments,
        night_increments,
        "waiting period split"
    );

    WaitingPeriod {
        start_instant,
        duration_minutes,
        day_minutes,
        night_minutes,
        day_increments,
        night_increments,
        price_day_ht,
        price_night_ht: night.price_ht,
        night_surcharge_amount: night.surcharge_amount,
        price_ht,
        price_ttc: with_vat(price_ht, config.vat_rate_percent),
        vat_rate_percent: config.vat_rate_percent,
    }
}
