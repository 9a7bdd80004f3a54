use serde::{Deserialize, Serialize};
use ssz_types::{FixedVector, VariableList};

use crate::{
    phase0::{
        containers::Validator,
        primitives::{Slot, H256},
    },
    preset::Preset,
};

/// The slice of the phase 0 `BeaconState` consumed by attestation tracking:
/// the validator registry and the RANDAO mixes that seed committee selection.
#[derive(Clone, PartialEq, Default, Debug, Deserialize, Serialize)]
#[serde(bound = "", deny_unknown_fields)]
pub struct BeaconState<P: Preset> {
    pub slot: Slot,
    pub validators: VariableList<Validator, P::ValidatorRegistryLimit>,
    pub randao_mixes: FixedVector<H256, P::EpochsPerHistoricalVector>,
}
