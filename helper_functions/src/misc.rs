use typenum::Unsigned as _;

use types::{
    phase0::primitives::{Epoch, Slot},
    preset::Preset,
};

#[must_use]
pub fn compute_epoch_at_slot<P: Preset>(slot: Slot) -> Epoch {
    slot / P::SlotsPerEpoch::U64
}

/// First slot of `epoch`, used as the coarse freshness measure for
/// attestation targets.
#[must_use]
pub const fn compute_start_slot_at_epoch<P: Preset>(epoch: Epoch) -> Slot {
    epoch.saturating_mul(P::SlotsPerEpoch::U64)
}

/// Number of committees formed in one epoch. Every slot gets the same number
/// of committees, at least one and at most the shard quota for the slot.
#[must_use]
pub fn committee_count_from_active_validator_count<P: Preset>(active_validator_count: u64) -> u64 {
    let slots_per_epoch = P::SlotsPerEpoch::U64;

    let committees_per_slot = (active_validator_count / slots_per_epoch
        / P::TARGET_COMMITTEE_SIZE)
        .clamp(1, P::SHARD_COUNT.get() / slots_per_epoch);

    committees_per_slot * slots_per_epoch
}
