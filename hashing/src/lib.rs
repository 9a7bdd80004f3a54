use ethereum_types::H256;
use sha2::{Digest as _, Sha256};

/// Hashes a 4 byte domain, a little-endian `u64` and a 32 byte hash.
/// Used to derive committee selection seeds.
#[must_use]
pub fn hash_32_64_256(prefix: [u8; 4], number: u64, suffix: H256) -> H256 {
    digest(
        Sha256::new()
            .chain_update(prefix)
            .chain_update(number.to_le_bytes())
            .chain_update(suffix),
    )
}

/// Hashes a 32 byte hash and a single byte. Used to select shuffling pivots.
#[must_use]
pub fn hash_256_8(hash: H256, byte: u8) -> H256 {
    digest(Sha256::new().chain_update(hash).chain_update([byte]))
}

/// Hashes a 32 byte hash, a single byte and a little-endian `u32`.
/// Used to derive shuffling sources.
#[must_use]
pub fn hash_256_8_32(hash: H256, byte: u8, number: u32) -> H256 {
    digest(
        Sha256::new()
            .chain_update(hash)
            .chain_update([byte])
            .chain_update(number.to_le_bytes()),
    )
}

fn digest(hasher: Sha256) -> H256 {
    H256::from_slice(hasher.finalize().as_slice())
}
