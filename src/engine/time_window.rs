use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::entities::MAX_DURATION_MINUTES;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSplit {
    pub inside_minutes: i64,
    pub outside_minutes: i64,
    pub window_crosses_midnight: bool,
}

/// Partitions `[start_instant, start_instant + duration_minutes)` into the
/// minutes falling inside the daily window `[window_start, window_end)` and
/// the minutes outside it.
///
/// When `window_start > window_end` the window wraps midnight. When they are
/// equal the window is empty. The start instant is truncated to the minute
/// and the duration capped to [`MAX_DURATION_MINUTES`].
pub fn split(
    start_instant: NaiveDateTime,
    duration_minutes: i64,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> WindowSplit {
    let duration_minutes = duration_minutes.clamp(0, MAX_DURATION_MINUTES);
    let window_crosses_midnight = window_start > window_end;

    if duration_minutes == 0 || window_start == window_end {
        return WindowSplit {
            inside_minutes: 0,
            outside_minutes: duration_minutes,
            window_crosses_midnight,
        };
    }

    let window_minutes = window_length(window_start, window_end);

    // every whole day contributes exactly one full window, and the window
    // repeats daily, so only the remainder needs intersecting
    let whole_days = duration_minutes / MINUTES_PER_DAY;
    let remainder = duration_minutes % MINUTES_PER_DAY;

    let start = truncate_to_minute(start_instant);
    let end = start
        .checked_add_signed(Duration::minutes(remainder))
        .unwrap_or(NaiveDateTime::MAX);

    let mut inside_minutes = whole_days * window_minutes;
    let mut day = start.date().pred_opt().unwrap_or(start.date());

    loop {
        let (open, close) = occurrence(day, window_start, window_end);
        let overlap = end.min(close) - start.max(open);

        if overlap > Duration::zero() {
            inside_minutes += overlap.num_minutes();
        }

        match day.succ_opt() {
            Some(next) if next <= end.date() => day = next,
            _ => break,
        }
    }

    let inside_minutes = inside_minutes.min(duration_minutes);

    WindowSplit {
        inside_minutes,
        outside_minutes: duration_minutes - inside_minutes,
        window_crosses_midnight,
    }
}

fn window_length(window_start: NaiveTime, window_end: NaiveTime) -> i64 {
    let length = (window_end - window_start).num_minutes();

    if length < 0 {
        length + MINUTES_PER_DAY
    } else {
        length
    }
}

/// The occurrence of the window that opens on `day`.
fn occurrence(
    day: NaiveDate,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let open = day.and_time(window_start);
    let close = if window_start > window_end {
        day.succ_opt()
            .map_or(NaiveDateTime::MAX, |next| next.and_time(window_end))
    } else {
        day.and_time(window_end)
    };

    (open, close)
}

fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        - Duration::seconds(instant.second() as i64)
        - Duration::nanoseconds(instant.nanosecond() as i64)
}
