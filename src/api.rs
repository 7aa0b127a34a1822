use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    PricingConfiguration, PricingOwner, PricingRecord, QuoteTotal, TripPricingRequest,
};
use crate::error::Error;

#[async_trait]
pub trait PricingAPI {
    /// Validates `record` and stores it for `owner`. Invalid records are
    /// rejected before anything is written.
    async fn save_pricing(
        &self,
        owner: PricingOwner,
        record: PricingRecord,
    ) -> Result<PricingConfiguration, Error>;

    /// Vehicle configuration, or the driver's default when the vehicle has none.
    async fn find_pricing(
        &self,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
    ) -> Result<PricingConfiguration, Error>;

    async fn create_quote(
        &self,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        request: TripPricingRequest,
    ) -> Result<QuoteTotal, Error>;
}

pub type DynAPI = Arc<dyn PricingAPI + Send + Sync>;
