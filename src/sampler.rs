use crate::random::RandomSource;

/// Draws characters for one password, optionally refusing to hand out the
/// same character twice.
///
/// When repeats are being avoided and every character of the requested pool
/// is already used, the draw falls back to the whole pool and a repeat is
/// allowed. Password validation keeps the length within the total alphabet,
/// so this only happens when a caller samples a pool directly.
pub struct Sampler {
    avoid_repeated: bool,
    used: [bool; 128],
}

impl Sampler {
    pub fn new(avoid_repeated: bool) -> Self {
        Sampler {
            avoid_repeated,
            used: [false; 128],
        }
    }

    /// `pool` must be non-empty ASCII.
    pub fn draw<R>(&mut self, rng: &mut R, pool: &[u8]) -> u8
    where
        R: RandomSource + ?Sized,
    {
        debug_assert!(!pool.is_empty(), "cannot sample an empty pool");

        let candidates: Vec<u8> = if self.avoid_repeated {
            self.unused(pool).collect()
        } else {
            pool.to_vec()
        };

        let ch = if candidates.is_empty() {
            log::debug!("pool of {} exhausted, allowing a repeat", pool.len());
            pool[rng.below(pool.len())]
        } else {
            candidates[rng.below(candidates.len())]
        };

        if self.avoid_repeated {
            self.used[ch as usize] = true;
        }
        ch
    }

    pub fn is_used(&self, c: u8) -> bool {
        self.used[c as usize]
    }

    fn unused<'a>(&'a self, pool: &'a [u8]) -> impl Iterator<Item = u8> + 'a {
        pool.iter().copied().filter(move |&c| !self.used[c as usize])
    }
}
