use core::{fmt::Debug, hash::Hash, num::NonZeroU64};

use nonzero_ext::nonzero;
use typenum::{NonZero, Unsigned, U1099511627776, U2048, U32, U64, U65536, U8};

/// Compile-time configuration variables.
///
/// See [presets in `consensus-specs`](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/presets).
pub trait Preset: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    type EpochsPerHistoricalVector: Unsigned + NonZero + Clone + Eq + Debug + Send + Sync;
    type MaxValidatorsPerCommittee: Unsigned + NonZero + Clone + Eq + Debug + Send + Sync;
    type SlotsPerEpoch: Unsigned + NonZero;
    type ValidatorRegistryLimit: Unsigned + Clone + Eq + Debug + Send + Sync;

    const MIN_SEED_LOOKAHEAD: u64 = 1;
    const SHARD_COUNT: NonZeroU64;
    const SHUFFLE_ROUND_COUNT: u8;
    const TARGET_COMMITTEE_SIZE: NonZeroU64;
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Mainnet;

impl Preset for Mainnet {
    type EpochsPerHistoricalVector = U65536;
    type MaxValidatorsPerCommittee = U2048;
    type SlotsPerEpoch = U32;
    type ValidatorRegistryLimit = U1099511627776;

    const SHARD_COUNT: NonZeroU64 = nonzero!(1024_u64);
    const SHUFFLE_ROUND_COUNT: u8 = 90;
    const TARGET_COMMITTEE_SIZE: NonZeroU64 = nonzero!(128_u64);
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Minimal;

impl Preset for Minimal {
    type EpochsPerHistoricalVector = U64;
    type MaxValidatorsPerCommittee = U2048;
    type SlotsPerEpoch = U8;
    type ValidatorRegistryLimit = U1099511627776;

    const SHARD_COUNT: NonZeroU64 = nonzero!(8_u64);
    const SHUFFLE_ROUND_COUNT: u8 = 10;
    const TARGET_COMMITTEE_SIZE: NonZeroU64 = nonzero!(4_u64);
}
