use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;

pub use ethereum_types::H256;

pub type DomainType = H32;
pub type Epoch = u64;
pub type Gwei = u64;
pub type Shard = u64;
pub type Slot = u64;
pub type ValidatorIndex = u64;

construct_fixed_hash! {
    pub struct H32(4);
}

impl_fixed_hash_serde!(H32, 4);
