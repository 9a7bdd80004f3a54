use core::num::NonZeroU64;

use anyhow::Result;
use itertools::Itertools as _;
use typenum::Unsigned as _;
use types::{
    phase0::{
        beacon_state::BeaconState,
        consts::DOMAIN_BEACON_ATTESTER,
        primitives::{DomainType, Epoch, Shard, ValidatorIndex, H256},
    },
    preset::Preset,
};

use crate::{error::Error, misc, predicates};

#[must_use]
pub fn get_current_epoch<P: Preset>(state: &BeaconState<P>) -> Epoch {
    misc::compute_epoch_at_slot::<P>(state.slot)
}

pub fn get_active_validator_indices<P: Preset>(
    state: &BeaconState<P>,
    epoch: Epoch,
) -> impl Iterator<Item = ValidatorIndex> + '_ {
    (0..)
        .zip(state.validators.iter())
        .filter(move |(_, validator)| predicates::is_active_validator(validator, epoch))
        .map(|(index, _)| index)
}

#[must_use]
pub fn active_validator_count<P: Preset>(state: &BeaconState<P>, epoch: Epoch) -> u64 {
    get_active_validator_indices(state, epoch)
        .count()
        .try_into()
        .expect("active validator count fits in u64")
}

#[must_use]
pub fn get_randao_mix<P: Preset>(state: &BeaconState<P>, epoch: Epoch) -> H256 {
    let index = usize::try_from(epoch % P::EpochsPerHistoricalVector::U64)
        .expect("epochs per historical vector fits in usize");

    state.randao_mixes[index]
}

#[must_use]
pub fn get_seed<P: Preset>(state: &BeaconState<P>, epoch: Epoch, domain_type: DomainType) -> H256 {
    let mix = get_randao_mix(
        state,
        epoch + P::EpochsPerHistoricalVector::U64 - P::MIN_SEED_LOOKAHEAD - 1,
    );

    hashing::hash_32_64_256(domain_type.to_fixed_bytes(), epoch, mix)
}

/// Validators assigned to vote on `shard` during `epoch`, in committee order.
///
/// Active validators are partitioned into equal committees by slicing their
/// shuffled order, so every validator sits in exactly one committee per epoch.
pub fn crosslink_committee<P: Preset>(
    state: &BeaconState<P>,
    epoch: Epoch,
    shard: Shard,
) -> Result<Vec<ValidatorIndex>> {
    let indices = get_active_validator_indices(state, epoch).collect_vec();

    let validator_count = u64::try_from(indices.len())?;
    let index_count = NonZeroU64::new(validator_count).ok_or(Error::NoActiveValidators)?;

    let committees_in_epoch = misc::committee_count_from_active_validator_count::<P>(validator_count);
    let index_in_epoch = shard % committees_in_epoch;
    let seed = get_seed(state, epoch, DOMAIN_BEACON_ATTESTER);

    let start = validator_count * index_in_epoch / committees_in_epoch;
    let end = validator_count * (index_in_epoch + 1) / committees_in_epoch;

    (start..end)
        .map(|position| {
            let shuffled = shuffling::shuffle_single::<P>(position, index_count, seed);
            let index = usize::try_from(shuffled)?;
            Ok(indices[index])
        })
        .collect()
}
