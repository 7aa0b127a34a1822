use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Answers whether a date is a public holiday. Sundays are detected by the
/// pricing engine itself and need not be reported here.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _: NaiveDate) -> bool {
        false
    }
}

/// An explicit list of dates, e.g. configured by the operator.
#[derive(Clone, Debug, Default)]
pub struct FixedHolidays {
    dates: HashSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Metropolitan French public holidays.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrenchHolidays;

const FRENCH_FIXED_HOLIDAYS: [(u32, u32); 8] = [
    (1, 1),   // Jour de l'an
    (5, 1),   // Fête du Travail
    (5, 8),   // Victoire 1945
    (7, 14),  // Fête nationale
    (8, 15),  // Assomption
    (11, 1),  // Toussaint
    (11, 11), // Armistice
    (12, 25), // Noël
];

impl HolidayCalendar for FrenchHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        if FRENCH_FIXED_HOLIDAYS.contains(&(date.month(), date.day())) {
            return true;
        }

        match easter_sunday(date.year()) {
            Some(easter) => {
                let offset = (date - easter).num_days();
                // Easter Monday, Ascension, Whit Monday
                matches!(offset, 1 | 39 | 50)
            }
            None => false,
        }
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
