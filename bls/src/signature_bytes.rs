use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;

pub const SIGNATURE_SIZE: usize = 96;

construct_fixed_hash! {
    pub struct SignatureBytes(SIGNATURE_SIZE);
}

impl_fixed_hash_serde!(SignatureBytes, SIGNATURE_SIZE);
