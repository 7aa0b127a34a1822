use serde::{Deserialize, Serialize};

use crate::entities::{TripLeg, WaitingPeriod};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotal {
    pub outbound_leg: TripLeg,
    pub return_leg: Option<TripLeg>,
    pub waiting_period: Option<WaitingPeriod>,
    pub total_ht: f64,
    pub total_ttc: f64,
    pub vat_rate_percent: f64,
}

impl QuoteTotal {
    pub fn vat_amount(&self) -> f64 {
        self.total_ttc - self.total_ht
    }
}
