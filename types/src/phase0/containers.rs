use bls::{AggregateSignatureBytes, PublicKeyBytes};
use serde::{Deserialize, Serialize};
use ssz_types::BitList;

use crate::{
    phase0::primitives::{Epoch, Gwei, Shard, H256},
    preset::Preset,
};

/// Vote cast by a subset of a committee for a block at an epoch boundary.
///
/// Bit `i` of `aggregation_bits` covers the validator at position `i` of the
/// committee for `data.crosslink.shard`.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(bound = "", deny_unknown_fields)]
pub struct Attestation<P: Preset> {
    pub aggregation_bits: BitList<P::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: AggregateSignatureBytes,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttestationData {
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
    pub crosslink: Crosslink,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Crosslink {
    pub shard: Shard,
    pub start_epoch: Epoch,
    pub end_epoch: Epoch,
    pub parent_root: H256,
    pub data_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}
