use thiserror::Error;
use types::phase0::primitives::ValidatorIndex;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validator index {validator_index} is out of range (registry size: {registry_size})")]
    ValidatorIndexOutOfRange {
        validator_index: ValidatorIndex,
        registry_size: usize,
    },
}
