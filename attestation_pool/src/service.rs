use core::mem;
use std::sync::Arc;

use anyhow::Result;
use futures::{channel::mpsc::UnboundedReceiver, select, StreamExt as _};
use helper_functions::accessors;
use log::{debug, warn};
use prometheus_metrics::Metrics;
use typenum::Unsigned as _;
use types::{phase0::containers::Attestation, preset::Preset};

use crate::{
    messages::{AttestationReceiver, ControlMessage},
    pool::Pool,
    traits::Controller,
};

/// Capacity of the inbound attestation channel. Producers block once this
/// many attestations are waiting.
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// The ingestion task. Drains the inbound feed, stages attestations and
/// flushes them through the [`Pool`] in adaptively sized batches, so that
/// head state and committee lookups are amortized over a slot's worth of
/// attestations.
pub struct Service<P: Preset, S> {
    pub(crate) controller: Arc<S>,
    pub(crate) pool: Arc<Pool<P>>,
    pub(crate) metrics: Option<Arc<Metrics>>,
    pub(crate) pooled_attestations: Vec<Arc<Attestation<P>>>,
    pub(crate) pool_limit: usize,
    pub(crate) attestation_rx: AttestationReceiver<P>,
    pub(crate) control_rx: UnboundedReceiver<ControlMessage>,
}

impl<P: Preset, S: Controller<P>> Service<P, S> {
    pub async fn run(mut self) -> Result<()> {
        loop {
            select! {
                control_message = self.control_rx.select_next_some() => {
                    match control_message {
                        ControlMessage::Stop => {
                            debug!("attestation pool service stopped");
                            break Ok(());
                        }
                    }
                },

                attestation = self.attestation_rx.select_next_some() => {
                    if let Err(error) = self.handle_attestation(attestation).await {
                        warn!("error while processing incoming attestation: {error:?}");
                    }
                },
            }
        }
    }

    async fn handle_attestation(&mut self, attestation: Arc<Attestation<P>>) -> Result<()> {
        if let Some(metrics) = self.metrics.as_ref() {
            metrics.attestations_seen.inc();
        }

        self.pooled_attestations.push(attestation);

        if self.pooled_attestations.len() > self.pool_limit {
            self.flush().await?;
        }

        if let Some(metrics) = self.metrics.as_ref() {
            metrics
                .attestation_pool_size
                .set(self.pooled_attestations.len().try_into()?);
        }

        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        let _timer = self
            .metrics
            .as_ref()
            .map(|metrics| metrics.att_pool_batch_update_times.start_timer());

        // The head state is fetched before the pool takes any locks.
        let state = self.controller.head_state()?;

        let attestations = mem::take(&mut self.pooled_attestations);

        self.pool
            .batch_update(self.controller.as_ref(), &state, &attestations)
            .await;

        let current_epoch = accessors::get_current_epoch(&state);
        let active_validator_count = self
            .controller
            .active_validator_count(&state, current_epoch)?;
        let attestations_per_slot = active_validator_count / P::SlotsPerEpoch::U64;

        // Flush at 70% of the expected per-slot volume so a new slot's
        // attestations are unlikely to queue behind the previous slot's batch.
        self.pool_limit = usize::try_from(attestations_per_slot * 7 / 10)?.max(1);

        if let Some(metrics) = self.metrics.as_ref() {
            metrics
                .attestation_pool_limit
                .set(self.pool_limit.try_into()?);
        }

        self.pooled_attestations = Vec::with_capacity(self.pool_limit);

        Ok(())
    }
}
