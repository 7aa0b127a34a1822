mod leg;
mod pricing;
mod quote;
mod request;
mod waiting;

pub use leg::TripLeg;
pub use pricing::{
    parse_clock_time, PricingConfiguration, PricingDefaults, PricingOwner, PricingRecord,
    RateWindow, RateWindowRecord, DEFAULT_VAT_RATE_PERCENT,
};
pub use quote::QuoteTotal;
pub use request::{
    advance, ReturnTrip, RouteEstimate, TripPricingRequest, Waiting, MAX_DURATION_MINUTES,
};
pub use waiting::WaitingPeriod;
