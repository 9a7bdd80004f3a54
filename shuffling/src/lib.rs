use core::num::NonZeroU64;

use types::{phase0::primitives::H256, preset::Preset};

const BITS_PER_HASH: u64 = H256::len_bytes() as u64 * 8;

// Swap-or-not shuffling of a single index, one round per hash bit.
// See the following for an explanation of the algorithm:
// - <https://github.com/protolambda/eth2-docs/tree/de65f38857f1e27ffb6f25107d61e795cf1a5ad7#shuffling>
// - <https://github.com/protolambda/eth2-impl-design/tree/782b1d2da088e4ebbbea227cfa0a8752399239fb#shuffling>
#[must_use]
pub fn shuffle_single<P: Preset>(mut index: u64, index_count: NonZeroU64, seed: H256) -> u64 {
    assert!(index < index_count.get());

    for round in 0..P::SHUFFLE_ROUND_COUNT {
        let pivot = compute_pivot(seed, round, index_count);
        let flip = (pivot + index_count.get() - index) % index_count;
        let position = index.max(flip);
        let source = compute_source(seed, round, position / BITS_PER_HASH);
        let byte = source.as_bytes()[(position % BITS_PER_HASH / 8) as usize];
        let bit = (byte >> (position % 8)) & 1 == 1;

        if bit {
            index = flip;
        }
    }

    index
}

fn compute_pivot(seed: H256, round: u8, index_count: NonZeroU64) -> u64 {
    let digest = hashing::hash_256_8(seed, round);

    let mut bytes = [0; size_of::<u64>()];
    bytes.copy_from_slice(&digest.as_bytes()[..size_of::<u64>()]);

    u64::from_le_bytes(bytes) % index_count
}

fn compute_source(seed: H256, round: u8, position_window: u64) -> H256 {
    // Truncate to match the behavior of `compute_shuffled_index` in `consensus-specs`.
    #[allow(clippy::cast_possible_truncation)]
    hashing::hash_256_8_32(seed, round, position_window as u32)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools as _;
    use types::preset::Minimal;

    use super::*;

    #[test]
    fn shuffles_indices_into_a_permutation() {
        let seed = H256::repeat_byte(0xaa);
        let index_count = NonZeroU64::new(8).expect("index count is nonzero");

        let mapping = (0..8)
            .map(|index| shuffle_single::<Minimal>(index, index_count, seed))
            .collect_vec();

        assert_eq!(mapping, [0, 3, 2, 4, 5, 6, 1, 7]);

        let mut sorted = mapping;
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect_vec());
    }

    #[test]
    fn shuffled_positions_depend_only_on_the_seed() {
        let index_count = NonZeroU64::new(8).expect("index count is nonzero");

        let mapping = (0..8)
            .map(|index| shuffle_single::<Minimal>(index, index_count, H256::zero()))
            .collect_vec();

        assert_eq!(mapping, [4, 1, 0, 2, 6, 5, 3, 7]);
    }
}
