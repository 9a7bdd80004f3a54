use std::sync::Arc;

use anyhow::Result;
use helper_functions::accessors;
use types::{
    nonstandard::AttestationTarget,
    phase0::{
        beacon_state::BeaconState,
        primitives::{Epoch, Shard, ValidatorIndex, H256},
    },
    preset::Preset,
};

/// Content-addressed lookup of block records.
pub trait BlockStore<P: Preset> {
    fn contains_block(&self, block_root: H256) -> bool;

    fn attestation_target(&self, block_root: H256) -> Result<AttestationTarget>;
}

pub trait ChainStateProvider<P: Preset> {
    fn head_state(&self) -> Result<Arc<BeaconState<P>>>;
}

/// Committee assignments for a state. The default methods compute them
/// directly from the state; implementations backed by caches or test fixtures
/// may override them.
pub trait CommitteeOracle<P: Preset> {
    fn crosslink_committee(
        &self,
        state: &BeaconState<P>,
        epoch: Epoch,
        shard: Shard,
    ) -> Result<Vec<ValidatorIndex>> {
        accessors::crosslink_committee(state, epoch, shard)
    }

    fn active_validator_count(&self, state: &BeaconState<P>, epoch: Epoch) -> Result<u64> {
        Ok(accessors::active_validator_count(state, epoch))
    }
}

/// Everything the attestation pool needs from the embedding node.
pub trait Controller<P: Preset>:
    BlockStore<P> + ChainStateProvider<P> + CommitteeOracle<P> + Send + Sync + 'static
{
}

impl<P: Preset, S> Controller<P> for S where
    S: BlockStore<P> + ChainStateProvider<P> + CommitteeOracle<P> + Send + Sync + 'static
{
}
