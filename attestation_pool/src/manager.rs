use std::sync::Arc;

use anyhow::Result;
use bls::PublicKeyBytes;
use futures::channel::mpsc::{self, UnboundedSender};
use prometheus_metrics::Metrics;
use types::{
    nonstandard::AttestationTarget,
    phase0::{beacon_state::BeaconState, containers::Attestation, primitives::ValidatorIndex},
    preset::Preset,
};

use crate::{
    error::Error,
    messages::{AttestationSender, ControlMessage},
    pool::Pool,
    service::{Service, DEFAULT_BUFFER_SIZE},
    traits::Controller,
};

/// External handle to the latest-attestation pool.
///
/// Constructed together with the [`Service`] that owns the ingestion loop.
/// The embedding runtime is expected to spawn [`Service::run`] and call
/// [`Manager::stop`] on shutdown.
pub struct Manager<P: Preset, S> {
    controller: Arc<S>,
    metrics: Option<Arc<Metrics>>,
    pool: Arc<Pool<P>>,
    attestation_tx: AttestationSender<P>,
    control_tx: UnboundedSender<ControlMessage>,
}

impl<P: Preset, S: Controller<P>> Manager<P, S> {
    #[must_use]
    pub fn new(controller: Arc<S>, metrics: Option<Arc<Metrics>>) -> (Arc<Self>, Service<P, S>) {
        let (attestation_tx, attestation_rx) = mpsc::channel(DEFAULT_BUFFER_SIZE);
        let (control_tx, control_rx) = mpsc::unbounded();

        let pool = Arc::new(Pool::default());

        let service = Service {
            controller: controller.clone(),
            pool: pool.clone(),
            metrics: metrics.clone(),
            pooled_attestations: Vec::with_capacity(1),
            pool_limit: 1,
            attestation_rx,
            control_rx,
        };

        let manager = Arc::new(Self {
            controller,
            metrics,
            pool,
            attestation_tx,
            control_tx,
        });

        (manager, service)
    }

    /// Handle for publishing inbound attestations from gossip.
    #[must_use]
    pub fn incoming_feed(&self) -> AttestationSender<P> {
        self.attestation_tx.clone()
    }

    pub fn stop(&self) {
        ControlMessage::Stop.send(&self.control_tx);
    }

    /// Merges one attestation against the current head state, bypassing the
    /// ingestion loop. Used by tests and replay.
    pub async fn update_latest_attestation(&self, attestation: Arc<Attestation<P>>) -> Result<()> {
        if let Some(metrics) = self.metrics.as_ref() {
            metrics.attestations_seen.inc();
        }

        let state = self.controller.head_state()?;

        self.pool
            .update_one(self.controller.as_ref(), &state, &attestation)
            .await
    }

    /// Merges a batch against the current head state, bypassing the ingestion
    /// loop. Per-attestation failures are logged, not returned.
    pub async fn batch_update_latest_attestations(
        &self,
        attestations: &[Arc<Attestation<P>>],
    ) -> Result<()> {
        if attestations.is_empty() {
            return Ok(());
        }

        if let Some(metrics) = self.metrics.as_ref() {
            metrics
                .attestations_seen
                .inc_by(attestations.len().try_into()?);
        }

        let state = self.controller.head_state()?;

        self.pool
            .batch_update(self.controller.as_ref(), &state, attestations)
            .await;

        Ok(())
    }

    /// Target of the latest attestation recorded for the validator at
    /// `validator_index`.
    ///
    /// Returns `None` when the validator has not attested or when the voted
    /// block has not been ingested yet. A vote for an unknown block cannot
    /// influence fork choice.
    pub async fn latest_attestation_target(
        &self,
        state: &BeaconState<P>,
        validator_index: ValidatorIndex,
    ) -> Result<Option<AttestationTarget>> {
        let validator = usize::try_from(validator_index)
            .ok()
            .and_then(|index| state.validators.get(index))
            .ok_or(Error::ValidatorIndexOutOfRange {
                validator_index,
                registry_size: state.validators.len(),
            })?;

        let Some(attestation) = self.pool.latest_attestation(validator.pubkey).await else {
            return Ok(None);
        };

        let block_root = attestation.data.beacon_block_root;

        if !self.controller.contains_block(block_root) {
            return Ok(None);
        }

        self.controller.attestation_target(block_root).map(Some)
    }

    /// Places an attestation directly into the store, bypassing the merge
    /// protocol. Test backdoor.
    pub async fn insert_attestation_into_store(
        &self,
        pubkey: PublicKeyBytes,
        attestation: Arc<Attestation<P>>,
    ) {
        self.pool.insert(pubkey, attestation).await;
    }
}
