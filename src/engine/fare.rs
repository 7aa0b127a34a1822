use chrono::NaiveDateTime;

use super::allocator::{allocate, night_share, DistanceSplit};
use super::surcharge::{is_sunday_or_holiday, night_surcharge, sunday_holiday_surcharge, with_vat};
use super::time_window::split;
use crate::entities::{PricingConfiguration, TripLeg, MAX_DURATION_MINUTES};
use crate::external::HolidayCalendar;

pub(crate) fn clamp_distance(distance_km: f64) -> f64 {
    if distance_km.is_finite() && distance_km >= 0.0 {
        return distance_km;
    }

    tracing::warn!(distance_km, "clamping invalid distance to 0");
    0.0
}

pub(crate) fn clamp_minutes(duration_minutes: i64) -> i64 {
    if duration_minutes < 0 {
        tracing::warn!(duration_minutes, "clamping negative duration to 0");
        return 0;
    }

    if duration_minutes > MAX_DURATION_MINUTES {
        tracing::warn!(
            duration_minutes,
            max = MAX_DURATION_MINUTES,
            "capping duration"
        );
        return MAX_DURATION_MINUTES;
    }

    duration_minutes
}

/// Prices one leg.
///
/// Distance shorter than the configured minimum is billed as the minimum.
/// The top-up is split between day and night in the same proportion as the
/// trip's time in each window. The minimum fare is the final clamp.
#[tracing::instrument(skip(config, calendar))]
pub fn price_leg(
    distance_km: f64,
    duration_minutes: i64,
    start_instant: NaiveDateTime,
    config: &PricingConfiguration,
    calendar: &dyn HolidayCalendar,
) -> TripLeg {
    let distance_km = clamp_distance(distance_km);
    let duration_minutes = clamp_minutes(duration_minutes);

    let (actual, share) = if config.night_rate.enabled {
        let window = split(
            start_instant,
            duration_minutes,
            config.night_rate.start_time,
            config.night_rate.end_time,
        );

        tracing::debug!(?window, "night window split");

        (
            allocate(
                distance_km,
                duration_minutes,
                window.inside_minutes,
                window.outside_minutes,
            ),
            night_share(window.inside_minutes, duration_minutes),
        )
    } else {
        (
            DistanceSplit {
                day_km: distance_km,
                night_km: 0.0,
            },
            0.0,
        )
    };

    // a zero-distance leg is never topped up to the minimum distance
    let billed_distance_km = if distance_km > 0.0 {
        distance_km.max(config.minimum_distance_km)
    } else {
        0.0
    };
    // shortfall follows the night time share instead of going wholly to the
    // larger portion, so a mostly-day trip still bills its night minutes at
    // the night rate
    let shortfall_km = billed_distance_km - distance_km;
    let billed_night_km = actual.night_km + shortfall_km * share;
    let billed_day_km = billed_distance_km - billed_night_km;

    let price_per_km = config.price_per_km.max(0.0);
    let night_percent = if config.night_rate.enabled {
        config.night_rate.surcharge_percent
    } else {
        0.0
    };

    let day_price_ht = billed_day_km * price_per_km;
    let night = night_surcharge(billed_night_km, price_per_km, night_percent);
    let subtotal_ht = day_price_ht + night.price_ht;

    let sunday_or_holiday = is_sunday_or_holiday(start_instant.date(), calendar);
    let sunday_surcharge_amount = sunday_holiday_surcharge(
        day_price_ht + night.base_ht,
        config.sunday_holiday_surcharge_percent,
        sunday_or_holiday,
    );

    let price_before_floor = subtotal_ht + sunday_surcharge_amount;
    let minimum_fare_applied = config.minimum_fare > price_before_floor;
    let price_ht = price_before_floor.max(config.minimum_fare).max(0.0);

    if minimum_fare_applied {
        tracing::debug!(price_before_floor, minimum_fare = config.minimum_fare, "minimum fare applied");
    }

    TripLeg {
        start_instant,
        distance_km,
        duration_minutes,
        day_km: actual.day_km,
        night_km: actual.night_km,
        billed_distance_km,
        billed_day_km,
        billed_night_km,
        day_price_ht,
        night_price_ht: night.price_ht,
        night_surcharge_amount: night.surcharge_amount,
        sunday_or_holiday,
        sunday_surcharge_amount,
        subtotal_ht,
        minimum_fare_applied,
        price_ht,
        price_ttc: with_vat(price_ht, config.vat_rate_percent),
        vat_rate_percent: config.vat_rate_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RateWindow;
    use crate::external::{FixedHolidays, NoHolidays};
    use chrono::{NaiveDate, NaiveTime};

    // 2024-03-15 is a Friday, 2024-03-17 a Sunday
    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn config() -> PricingConfiguration {
        PricingConfiguration {
            price_per_km: 2.0,
            minimum_fare: 0.0,
            minimum_distance_km: 0.0,
            night_rate: RateWindow::disabled(),
            sunday_holiday_surcharge_percent: 0.0,
            waiting_fee_per_15_min: 0.0,
            waiting_night_rate: RateWindow::disabled(),
            vat_rate_percent: 10.0,
        }
    }

    fn night_config() -> PricingConfiguration {
        PricingConfiguration {
            night_rate: RateWindow {
                enabled: true,
                start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
                surcharge_percent: 50.0,
            },
            ..config()
        }
    }

    #[test]
    fn weekday_day_trip() {
        let leg = price_leg(10.0, 20, at(15, 10, 0), &config(), &NoHolidays);

        assert_eq!(leg.day_km, 10.0);
        assert_eq!(leg.night_km, 0.0);
        assert_eq!(leg.price_ht, 20.0);
        assert!((leg.price_ttc - 22.0).abs() < 1e-9);
        assert!(!leg.sunday_or_holiday);
    }

    #[test]
    fn sunday_surcharge() {
        let config = PricingConfiguration {
            sunday_holiday_surcharge_percent: 20.0,
            ..config()
        };

        let leg = price_leg(10.0, 20, at(17, 10, 0), &config, &NoHolidays);

        assert!(leg.sunday_or_holiday);
        assert!((leg.subtotal_ht - 20.0).abs() < 1e-9);
        assert!((leg.sunday_surcharge_amount - 4.0).abs() < 1e-9);
        assert!((leg.price_ht - 24.0).abs() < 1e-9);
    }

    #[test]
    fn holiday_surcharge_on_a_weekday() {
        let config = PricingConfiguration {
            sunday_holiday_surcharge_percent: 20.0,
            ..config()
        };
        let calendar = FixedHolidays::new([NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()]);

        let leg = price_leg(10.0, 20, at(15, 10, 0), &config, &calendar);

        assert!(leg.sunday_or_holiday);
        assert!((leg.price_ht - 24.0).abs() < 1e-9);
    }

    #[test]
    fn night_trip_is_surcharged() {
        let leg = price_leg(30.0, 90, at(15, 23, 30), &night_config(), &NoHolidays);

        assert_eq!(leg.night_km, 30.0);
        assert_eq!(leg.day_km, 0.0);
        assert_eq!(leg.night_price_ht, 90.0);
        assert_eq!(leg.night_surcharge_amount, 30.0);
        assert_eq!(leg.price_ht, 90.0);
    }

    #[test]
    fn partial_night_trip() {
        // 21:00 to 23:00: half the time is inside the window
        let leg = price_leg(20.0, 120, at(15, 21, 0), &night_config(), &NoHolidays);

        assert!((leg.day_km - 10.0).abs() < 1e-9);
        assert!((leg.night_km - 10.0).abs() < 1e-9);
        assert!((leg.day_price_ht - 20.0).abs() < 1e-9);
        assert!((leg.night_price_ht - 30.0).abs() < 1e-9);
        assert!((leg.price_ht - 50.0).abs() < 1e-9);
    }

    #[test]
    fn night_and_sunday_do_not_compound() {
        let config = PricingConfiguration {
            sunday_holiday_surcharge_percent: 20.0,
            ..night_config()
        };

        // Sunday 23:30, entirely inside the night window
        let leg = price_leg(10.0, 30, at(17, 23, 30), &config, &NoHolidays);

        assert!((leg.night_price_ht - 30.0).abs() < 1e-9);
        assert!((leg.sunday_surcharge_amount - 4.0).abs() < 1e-9);
        assert!((leg.price_ht - 34.0).abs() < 1e-9);
    }

    #[test]
    fn disabled_night_rate_ignores_start_time() {
        let leg = price_leg(30.0, 90, at(15, 23, 30), &config(), &NoHolidays);

        assert_eq!(leg.night_km, 0.0);
        assert_eq!(leg.night_price_ht, 0.0);
        assert_eq!(leg.night_surcharge_amount, 0.0);
    }

    #[test]
    fn minimum_fare_floor() {
        let config = PricingConfiguration {
            minimum_fare: 20.0,
            price_per_km: 1.0,
            ..config()
        };

        let leg = price_leg(5.0, 10, at(15, 10, 0), &config, &NoHolidays);

        assert!(leg.minimum_fare_applied);
        assert_eq!(leg.subtotal_ht, 5.0);
        assert_eq!(leg.price_ht, 20.0);
        assert!((leg.price_ttc - 22.0).abs() < 1e-9);
    }

    #[test]
    fn minimum_distance_is_billed() {
        let config = PricingConfiguration {
            minimum_distance_km: 8.0,
            ..config()
        };

        let leg = price_leg(5.0, 10, at(15, 10, 0), &config, &NoHolidays);

        assert_eq!(leg.distance_km, 5.0);
        assert_eq!(leg.day_km, 5.0);
        assert_eq!(leg.billed_distance_km, 8.0);
        assert_eq!(leg.billed_day_km, 8.0);
        assert_eq!(leg.price_ht, 16.0);
    }

    #[test]
    fn minimum_distance_shortfall_follows_night_share() {
        let config = PricingConfiguration {
            minimum_distance_km: 8.0,
            ..night_config()
        };

        // 21:00 to 23:00, half inside the window
        let leg = price_leg(4.0, 120, at(15, 21, 0), &config, &NoHolidays);

        assert!((leg.day_km + leg.night_km - 4.0).abs() < 1e-6);
        assert!((leg.billed_day_km - 4.0).abs() < 1e-9);
        assert!((leg.billed_night_km - 4.0).abs() < 1e-9);
        assert!((leg.price_ht - (8.0 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_trip_with_minimum_fare() {
        let config = PricingConfiguration {
            minimum_fare: 15.0,
            minimum_distance_km: 5.0,
            ..night_config()
        };

        let leg = price_leg(0.0, 0, at(15, 23, 0), &config, &NoHolidays);

        assert_eq!(leg.day_km, 0.0);
        assert_eq!(leg.night_km, 0.0);
        assert_eq!(leg.billed_distance_km, 0.0);
        assert_eq!(leg.price_ht, 15.0);
    }

    #[test]
    fn free_price_per_km_only_charges_minimum_fare() {
        let config = PricingConfiguration {
            price_per_km: 0.0,
            minimum_fare: 12.0,
            sunday_holiday_surcharge_percent: 50.0,
            ..night_config()
        };

        let leg = price_leg(20.0, 60, at(17, 23, 0), &config, &NoHolidays);

        assert_eq!(leg.sunday_surcharge_amount, 0.0);
        assert_eq!(leg.night_surcharge_amount, 0.0);
        assert_eq!(leg.price_ht, 12.0);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let config = PricingConfiguration {
            minimum_fare: 15.0,
            ..config()
        };

        let leg = price_leg(-3.0, -10, at(15, 10, 0), &config, &NoHolidays);

        assert_eq!(leg.distance_km, 0.0);
        assert_eq!(leg.duration_minutes, 0);
        assert_eq!(leg.price_ht, 15.0);
    }

    #[test]
    fn huge_duration_is_capped() {
        let leg = price_leg(10.0, i64::MAX, at(15, 23, 0), &night_config(), &NoHolidays);

        assert_eq!(leg.duration_minutes, MAX_DURATION_MINUTES);
        assert!((leg.day_km + leg.night_km - 10.0).abs() < 1e-6);
        assert!(leg.night_km > 0.0);
        assert!(leg.price_ht.is_finite());

        let leg = price_leg(10.0, 200_000_000_000, at(15, 23, 0), &night_config(), &NoHolidays);

        assert_eq!(leg.duration_minutes, MAX_DURATION_MINUTES);
    }

    #[test]
    fn ttc_is_ht_plus_vat() {
        let config = PricingConfiguration {
            sunday_holiday_surcharge_percent: 15.0,
            vat_rate_percent: 20.0,
            ..night_config()
        };

        let leg = price_leg(37.3, 73, at(17, 21, 41), &config, &NoHolidays);

        assert_eq!(leg.price_ttc, leg.price_ht * (1.0 + 20.0 / 100.0));
        assert!(leg.price_ttc >= leg.price_ht);
    }

    #[test]
    fn identical_inputs_give_identical_legs() {
        let config = night_config();

        let first = price_leg(37.3, 73, at(15, 21, 41), &config, &NoHolidays);
        let second = price_leg(37.3, 73, at(15, 21, 41), &config, &NoHolidays);

        assert_eq!(first, second);
        assert_eq!(first.price_ttc.to_bits(), second.price_ttc.to_bits());
    }
}
