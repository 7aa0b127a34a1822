use crate::entities::{QuoteTotal, TripLeg, WaitingPeriod};

/// Sums HT and TTC separately from each component's own figures rather than
/// recomputing TTC from the HT total.
pub fn totalize(
    outbound_leg: TripLeg,
    return_leg: Option<TripLeg>,
    waiting_period: Option<WaitingPeriod>,
) -> QuoteTotal {
    let total_ht = outbound_leg.price_ht
        + return_leg.as_ref().map_or(0.0, |leg| leg.price_ht)
        + waiting_period.as_ref().map_or(0.0, |waiting| waiting.price_ht);

    let total_ttc = outbound_leg.price_ttc
        + return_leg.as_ref().map_or(0.0, |leg| leg.price_ttc)
        + waiting_period.as_ref().map_or(0.0, |waiting| waiting.price_ttc);

    QuoteTotal {
        vat_rate_percent: outbound_leg.vat_rate_percent,
        outbound_leg,
        return_leg,
        waiting_period,
        total_ht,
        total_ttc,
    }
}
