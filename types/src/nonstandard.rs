use serde::{Deserialize, Serialize};

use crate::phase0::primitives::{Slot, H256};

/// Resolved fork choice vote: the block a validator's latest attestation
/// points to, in the form the fork choice engine consumes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttestationTarget {
    pub slot: Slot,
    pub beacon_block_root: H256,
    pub parent_root: H256,
}
