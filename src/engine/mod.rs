mod allocator;
mod fare;
mod pricing_api;
mod surcharge;
mod time_window;
mod totalizer;
mod waiting;

pub use allocator::{allocate, night_share, DistanceSplit};
pub use fare::price_leg;
pub use surcharge::{
    is_sunday_or_holiday, night_surcharge, sunday_holiday_surcharge, with_vat, NightSurcharge,
};
pub use time_window::{split, WindowSplit};
pub use totalizer::totalize;
pub use waiting::{billable_increments, price_waiting, BILLING_INCREMENT_MINUTES};

use std::sync::Arc;

use crate::{
    config::{HolidayCalendarKind, Settings},
    db::{MemoryStore, PgStore, PricingStore},
    entities::{PricingConfiguration, PricingDefaults, QuoteTotal, TripPricingRequest},
    error::Error,
    external::{FrenchHolidays, HolidayCalendar, NoHolidays},
};

/// Prices a whole request against one configuration. Pure: no clock reads,
/// no I/O, the same inputs always give the same breakdown.
pub fn quote(
    request: &TripPricingRequest,
    config: &PricingConfiguration,
    calendar: &dyn HolidayCalendar,
) -> QuoteTotal {
    let outbound_leg = price_leg(
        request.outbound.distance_km,
        request.outbound.duration_minutes,
        request.start_instant,
        config,
        calendar,
    );

    let waiting_period = request.waiting.zip(request.waiting_start()).map(|(waiting, start)| {
        price_waiting(waiting.duration_minutes, start, config)
    });

    let return_leg = request.return_trip.zip(request.return_start()).map(|(return_trip, start)| {
        price_leg(
            return_trip.route.distance_km,
            return_trip.route.duration_minutes,
            start,
            config,
            calendar,
        )
    });

    totalize(outbound_leg, return_leg, waiting_period)
}

type DynStore = Arc<dyn PricingStore + Send + Sync>;
type DynCalendar = Arc<dyn HolidayCalendar + Send + Sync>;

pub struct Engine {
    store: DynStore,
    calendar: DynCalendar,
    defaults: PricingDefaults,
}

impl Engine {
    pub fn new(store: DynStore, calendar: DynCalendar, defaults: PricingDefaults) -> Self {
        Self {
            store,
            calendar,
            defaults,
        }
    }

    /// Uses Postgres when `DATABASE_URL` is set, an in-memory store otherwise.
    #[tracing::instrument(name = "Engine::from_settings", skip_all)]
    pub async fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let store: DynStore = match &settings.database_url {
            Some(database_url) => {
                Arc::new(PgStore::new(database_url, settings.database_max_connections).await?)
            }
            None => {
                tracing::info!("no database configured, using in-memory pricing store");
                Arc::new(MemoryStore::default())
            }
        };

        let calendar: DynCalendar = match settings.holiday_calendar {
            HolidayCalendarKind::France => Arc::new(FrenchHolidays),
            HolidayCalendarKind::None => Arc::new(NoHolidays),
        };

        Ok(Self::new(store, calendar, settings.pricing_defaults()))
    }

    pub fn defaults(&self) -> &PricingDefaults {
        &self.defaults
    }

    pub fn calendar(&self) -> &dyn HolidayCalendar {
        self.calendar.as_ref()
    }
}
