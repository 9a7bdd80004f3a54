use anyhow::Result;
use prometheus::{histogram_opts, Histogram, IntCounter, IntGauge, Registry};

#[derive(Debug)]
pub struct Metrics {
    // Attestation pool
    pub attestations_seen: IntCounter,
    pub attestation_pool_size: IntGauge,
    pub attestation_pool_limit: IntGauge,
    pub att_pool_batch_update_times: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        Ok(Self {
            attestations_seen: IntCounter::new(
                "beacon_attestations_seen_total",
                "Number of attestations processed by the attestation pool",
            )?,

            attestation_pool_size: IntGauge::new(
                "beacon_attestation_pool_size",
                "Number of attestations staged for the next batch update",
            )?,

            attestation_pool_limit: IntGauge::new(
                "beacon_attestation_pool_limit",
                "Number of staged attestations that triggers a batch update",
            )?,

            att_pool_batch_update_times: Histogram::with_opts(histogram_opts!(
                "att_pool_batch_update_times",
                "Attestation pool batch update times",
            ))?,
        })
    }

    pub fn register_in(&self, registry: &Registry) -> Result<()> {
        registry.register(Box::new(self.attestations_seen.clone()))?;
        registry.register(Box::new(self.attestation_pool_size.clone()))?;
        registry.register(Box::new(self.attestation_pool_limit.clone()))?;
        registry.register(Box::new(self.att_pool_batch_update_times.clone()))?;

        Ok(())
    }
}
