use super::{quote, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PricingAPI,
    entities::{
        PricingConfiguration, PricingOwner, PricingRecord, QuoteTotal, TripPricingRequest,
    },
    error::{missing_configuration_error, Error},
};

#[async_trait]
impl PricingAPI for Engine {
    #[tracing::instrument(skip(self, record))]
    async fn save_pricing(
        &self,
        owner: PricingOwner,
        record: PricingRecord,
    ) -> Result<PricingConfiguration, Error> {
        let config = PricingConfiguration::from_record(&record, &self.defaults)?;

        self.store.save_record(owner, &record).await?;

        Ok(config)
    }

    #[tracing::instrument(skip(self))]
    async fn find_pricing(
        &self,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
    ) -> Result<PricingConfiguration, Error> {
        let mut record = self
            .store
            .find_record(PricingOwner::Vehicle(vehicle_id))
            .await?;

        if record.is_none() {
            if let Some(driver_id) = driver_id {
                tracing::info!("no vehicle pricing, falling back to driver default");
                record = self.store.find_record(PricingOwner::Driver(driver_id)).await?;
            }
        }

        let record = record.ok_or_else(missing_configuration_error)?;

        PricingConfiguration::from_record(&record, &self.defaults)
    }

    #[tracing::instrument(skip(self, request))]
    async fn create_quote(
        &self,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        request: TripPricingRequest,
    ) -> Result<QuoteTotal, Error> {
        let config = self.find_pricing(vehicle_id, driver_id).await?;
        let total = quote(&request, &config, self.calendar.as_ref());

        tracing::info!(
            total_ht = total.total_ht,
            total_ttc = total.total_ttc,
            "quote priced"
        );

        Ok(total)
    }
}
