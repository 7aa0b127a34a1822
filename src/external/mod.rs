mod holidays;

pub use holidays::{easter_sunday, FixedHolidays, FrenchHolidays, HolidayCalendar, NoHolidays};
