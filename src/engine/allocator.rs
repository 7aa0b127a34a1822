use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceSplit {
    pub day_km: f64,
    pub night_km: f64,
}

/// Share of a duration spent inside the night window, in `[0, 1]`.
/// Zero-length durations count as entirely day.
pub fn night_share(inside_minutes: i64, total_duration_minutes: i64) -> f64 {
    if total_duration_minutes <= 0 {
        return 0.0;
    }

    (inside_minutes as f64 / total_duration_minutes as f64).clamp(0.0, 1.0)
}

/// Apportions distance to day and night in proportion to time spent in each.
/// `day_km` is derived by subtraction so the two always sum to the total.
/// The night share comes from `inside_minutes / total_duration_minutes`
/// clamped to `[0, 1]`; minutes that do not add up are tolerated.
pub fn allocate(
    total_distance_km: f64,
    total_duration_minutes: i64,
    inside_minutes: i64,
    _outside_minutes: i64,
) -> DistanceSplit {
    let total_distance_km = total_distance_km.max(0.0);
    let night_km = total_distance_km * night_share(inside_minutes, total_duration_minutes);

    DistanceSplit {
        day_km: total_distance_km - night_km,
        night_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_split() {
        let split = allocate(30.0, 60, 20, 40);

        assert!((split.night_km - 10.0).abs() < 1e-9);
        assert!((split.day_km - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_is_all_day() {
        let split = allocate(12.5, 0, 0, 0);

        assert_eq!(split.day_km, 12.5);
        assert_eq!(split.night_km, 0.0);
    }

    #[test]
    fn sum_is_exact() {
        for (distance, inside, outside) in [(17.3, 7, 36), (0.1, 1, 2), (123.456, 89, 11)] {
            let split = allocate(distance, inside + outside, inside, outside);

            assert!((split.day_km + split.night_km - distance).abs() < 1e-6);
            assert!(split.day_km >= 0.0);
            assert!(split.night_km >= 0.0);
        }
    }

    #[test]
    fn inconsistent_minutes_are_clamped() {
        let split = allocate(20.0, 60, 90, 10);

        assert_eq!(split.night_km, 20.0);
        assert_eq!(split.day_km, 0.0);

        let split = allocate(20.0, 60, -5, 70);

        assert_eq!(split.night_km, 0.0);
        assert_eq!(split.day_km, 20.0);
    }

    #[test]
    fn fully_inside_is_all_night() {
        let split = allocate(42.0, 90, 90, 0);

        assert_eq!(split.night_km, 42.0);
        assert_eq!(split.day_km, 0.0);
    }
}
