use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Longest leg or waiting period the engine prices (one leap year). Longer
/// durations are capped to this value.
pub const MAX_DURATION_MINUTES: i64 = 366 * 24 * 60;

/// `instant + minutes`, with `minutes` capped to `[0, MAX_DURATION_MINUTES]`
/// and saturating at the latest representable instant.
pub fn advance(instant: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    let minutes = minutes.clamp(0, MAX_DURATION_MINUTES);

    instant
        .checked_add_signed(Duration::minutes(minutes))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Distance and duration for one leg, as reported by the routing provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub duration_minutes: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnTrip {
    /// Defaults to the end of the waiting period, or of the outbound leg.
    #[serde(default)]
    pub start_instant: Option<NaiveDateTime>,
    pub route: RouteEstimate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waiting {
    /// Defaults to the end of the outbound leg.
    #[serde(default)]
    pub start_instant: Option<NaiveDateTime>,
    pub duration_minutes: i64,
}

/// Everything needed to price a quote. Built fresh from the form state on
/// every change and never mutated by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPricingRequest {
    pub start_instant: NaiveDateTime,
    pub outbound: RouteEstimate,
    #[serde(default)]
    pub waiting: Option<Waiting>,
    #[serde(default)]
    pub return_trip: Option<ReturnTrip>,
}

impl TripPricingRequest {
    pub fn new(start_instant: NaiveDateTime, outbound: RouteEstimate) -> Self {
        Self {
            start_instant,
            outbound,
            waiting: None,
            return_trip: None,
        }
    }

    pub fn with_waiting(mut self, waiting: Waiting) -> Self {
        self.waiting = Some(waiting);
        self
    }

    pub fn with_return_trip(mut self, return_trip: ReturnTrip) -> Self {
        self.return_trip = Some(return_trip);
        self
    }

    pub fn outbound_end(&self) -> NaiveDateTime {
        advance(self.start_instant, self.outbound.duration_minutes)
    }

    pub fn waiting_start(&self) -> Option<NaiveDateTime> {
        self.waiting
            .map(|waiting| waiting.start_instant.unwrap_or_else(|| self.outbound_end()))
    }

    pub fn return_start(&self) -> Option<NaiveDateTime> {
        let return_trip = self.return_trip?;

        if let Some(start_instant) = return_trip.start_instant {
            return Some(start_instant);
        }

        let start_instant = match (self.waiting, self.waiting_start()) {
            (Some(waiting), Some(waiting_start)) => advance(waiting_start, waiting.duration_minutes),
            _ => self.outbound_end(),
        };

        Some(start_instant)
    }
}
