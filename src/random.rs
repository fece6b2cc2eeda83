use crate::error::Result;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

const BUFFER_LEN: usize = 512;

/// A source of uniformly distributed 32-bit values.
///
/// Every generator takes one of these by `&mut` so callers decide where the
/// randomness comes from. Production code uses [`ChaChaSource::from_entropy`];
/// tests use [`ChaChaSource::from_seed`] for reproducible output.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform index in `[0, bound)`. Values from the biased tail of the
    /// `u32` range are rejected and redrawn.
    fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        let bound = bound as u64;
        let range = 1u64 << 32;
        let rejection_threshold = range - (range % bound);

        loop {
            let value = self.next_u32() as u64;
            if value < rejection_threshold {
                return (value % bound) as usize;
            }
        }
    }
}

/// Fisher–Yates shuffle.
pub fn shuffle<R, T>(rng: &mut R, items: &mut [T])
where
    R: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// ChaCha20 keystream used as a CSPRNG.
pub struct ChaChaSource {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl ChaChaSource {
    /// Deterministic stream for a fixed 256-bit seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let seed = Zeroizing::new(seed);
        let cipher = ChaCha20::new((&*seed).into(), &[0u8; 12].into());

        let mut source = ChaChaSource {
            cipher,
            buffer: Zeroizing::new(vec![0u8; BUFFER_LEN]),
            pos: 0,
        };
        source.refill();
        source
    }

    /// Seeds the keystream from the operating system.
    pub fn from_entropy() -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng.try_fill_bytes(&mut seed[..])?;
        log::debug!("seeded ChaCha20 source from OS entropy");
        Ok(Self::from_seed(*seed))
    }

    fn refill(&mut self) {
        self.buffer.iter_mut().for_each(|b| *b = 0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }
}

impl RandomSource for ChaChaSource {
    fn next_u32(&mut self) -> u32 {
        if self.pos + 4 > self.buffer.len() {
            self.refill();
        }

        let bytes = [
            self.buffer[self.pos],
            self.buffer[self.pos + 1],
            self.buffer[self.pos + 2],
            self.buffer[self.pos + 3],
        ];
        self.buffer[self.pos..self.pos + 4].fill(0);
        self.pos += 4;

        u32::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of values, wrapping around.
    struct Scripted {
        values: Vec<u32>,
        pos: usize,
    }

    impl RandomSource for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.pos % self.values.len()];
            self.pos += 1;
            value
        }
    }

    #[test]
    fn test_seeded_source_deterministic() {
        let mut a = ChaChaSource::from_seed([7u8; 32]);
        let mut b = ChaChaSource::from_seed([7u8; 32]);
        let left: Vec<u32> = (0..300).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..300).map(|_| b.next_u32()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = ChaChaSource::from_seed([1u8; 32]);
        let mut b = ChaChaSource::from_seed([2u8; 32]);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn test_keystream_continues_across_refill() {
        let mut source = ChaChaSource::from_seed([3u8; 32]);
        let values: Vec<u32> = (0..(BUFFER_LEN / 4) * 3).map(|_| source.next_u32()).collect();
        let first_block = &values[..BUFFER_LEN / 4];
        let second_block = &values[BUFFER_LEN / 4..BUFFER_LEN / 2];
        assert_ne!(first_block, second_block, "refill must advance the keystream");
    }

    #[test]
    fn test_below_rejects_biased_tail() {
        // bound 3: 2^32 % 3 == 1, so u32::MAX is the single rejected value
        let mut rng = Scripted {
            values: vec![u32::MAX, 5],
            pos: 0,
        };
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.pos, 2);
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut source = ChaChaSource::from_seed([9u8; 32]);
        for bound in [1usize, 2, 7, 10, 26, 94, 256, 7776] {
            for _ in 0..200 {
                assert!(source.below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_below_covers_every_value() {
        let mut source = ChaChaSource::from_seed([11u8; 32]);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            seen[source.below(10)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some digit never drawn: {:?}", seen);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut source = ChaChaSource::from_seed([5u8; 32]);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut source, &mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted, "50 items left in order by a shuffle");
    }

    #[test]
    fn test_shuffle_handles_short_slices() {
        let mut source = ChaChaSource::from_seed([5u8; 32]);
        let mut empty: [u8; 0] = [];
        shuffle(&mut source, &mut empty);
        let mut one = [42u8];
        shuffle(&mut source, &mut one);
        assert_eq!(one, [42]);
    }

    #[test]
    fn test_from_entropy_produces_values() {
        let mut source = ChaChaSource::from_entropy().unwrap();
        let values: Vec<u32> = (0..16).map(|_| source.next_u32()).collect();
        assert!(values.iter().any(|&v| v != 0));
    }
}
