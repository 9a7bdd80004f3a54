use std::{collections::HashMap, sync::Arc};

use anyhow::{anyhow, Result};
use bls::{AggregateSignatureBytes, PublicKeyBytes};
use helper_functions::accessors;
use itertools::Itertools as _;
use ssz_types::{BitList, VariableList};
use types::{
    nonstandard::AttestationTarget,
    phase0::{
        beacon_state::BeaconState,
        consts::{FAR_FUTURE_EPOCH, GENESIS_EPOCH, GENESIS_SLOT},
        containers::{Attestation, AttestationData, Checkpoint, Crosslink, Validator},
        primitives::{Epoch, Shard, Slot, ValidatorIndex, H256},
    },
    preset::Preset,
};

use crate::traits::{BlockStore, ChainStateProvider, CommitteeOracle};

/// Stub collaborator: a block map, a fixed head state and optional fixed
/// committees. With no fixed committees it resolves them from the state.
pub struct TestController<P: Preset> {
    head_state: Arc<BeaconState<P>>,
    blocks: HashMap<H256, AttestationTarget>,
    committees: HashMap<Shard, Vec<ValidatorIndex>>,
}

impl<P: Preset> TestController<P> {
    pub fn new(head_state: BeaconState<P>) -> Self {
        Self {
            head_state: Arc::new(head_state),
            blocks: HashMap::new(),
            committees: HashMap::new(),
        }
    }

    pub fn with_block(mut self, block_root: H256, target: AttestationTarget) -> Self {
        self.blocks.insert(block_root, target);
        self
    }

    pub fn with_committee(mut self, shard: Shard, committee: Vec<ValidatorIndex>) -> Self {
        self.committees.insert(shard, committee);
        self
    }
}

impl<P: Preset> BlockStore<P> for TestController<P> {
    fn contains_block(&self, block_root: H256) -> bool {
        self.blocks.contains_key(&block_root)
    }

    fn attestation_target(&self, block_root: H256) -> Result<AttestationTarget> {
        self.blocks
            .get(&block_root)
            .copied()
            .ok_or_else(|| anyhow!("block {block_root:?} is not in the store"))
    }
}

impl<P: Preset> ChainStateProvider<P> for TestController<P> {
    fn head_state(&self) -> Result<Arc<BeaconState<P>>> {
        Ok(self.head_state.clone())
    }
}

impl<P: Preset> CommitteeOracle<P> for TestController<P> {
    fn crosslink_committee(
        &self,
        state: &BeaconState<P>,
        epoch: Epoch,
        shard: Shard,
    ) -> Result<Vec<ValidatorIndex>> {
        if self.committees.is_empty() {
            return accessors::crosslink_committee(state, epoch, shard);
        }

        self.committees
            .get(&shard)
            .cloned()
            .ok_or_else(|| anyhow!("shard {shard} has no committee"))
    }
}

pub fn state_with_validators<P: Preset>(validator_count: u64) -> BeaconState<P> {
    let validators = (0..validator_count)
        .map(|index| Validator {
            pubkey: PublicKeyBytes::from_low_u64_be(index + 1),
            withdrawal_credentials: H256::zero(),
            effective_balance: 32_000_000_000,
            slashed: false,
            activation_eligibility_epoch: GENESIS_EPOCH,
            activation_epoch: GENESIS_EPOCH,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        })
        .collect_vec();

    BeaconState {
        slot: GENESIS_SLOT,
        validators: VariableList::new(validators)
            .expect("validator count is below the registry limit"),
        ..BeaconState::default()
    }
}

/// Attestation with the given committee positions set, voting for
/// `beacon_block_root` at the target epoch boundary.
pub fn attestation<P: Preset>(
    set_bits: &[usize],
    committee_length: usize,
    target_epoch: Epoch,
    beacon_block_root: H256,
    shard: Shard,
) -> Arc<Attestation<P>> {
    let mut aggregation_bits = BitList::with_capacity(committee_length)
        .expect("committee length is below the committee size limit");

    for position in set_bits {
        aggregation_bits
            .set(*position, true)
            .expect("set positions are within the committee");
    }

    Arc::new(Attestation {
        aggregation_bits,
        data: AttestationData {
            beacon_block_root,
            source: Checkpoint::default(),
            target: Checkpoint {
                epoch: target_epoch,
                root: beacon_block_root,
            },
            crosslink: Crosslink {
                shard,
                ..Crosslink::default()
            },
        },
        signature: AggregateSignatureBytes::zero(),
    })
}

pub fn target(slot: Slot, beacon_block_root: H256, parent_root: H256) -> AttestationTarget {
    AttestationTarget {
        slot,
        beacon_block_root,
        parent_root,
    }
}
