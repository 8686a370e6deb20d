use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound (exclusive) of the jitter added to composite scores.
pub const MAX_JITTER: f64 = 0.1;

/// Source of the small random offset applied to each composite score.
///
/// Production seeds from entropy; tests use `NoJitter` or a fixed seed.
pub trait JitterSource {
    /// Returns a value in `[0, MAX_JITTER)`.
    fn next_jitter(&mut self) -> f64;
}

/// `StdRng`-backed jitter.
pub struct RngJitter {
    rng: StdRng,
}

impl RngJitter {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl JitterSource for RngJitter {
    fn next_jitter(&mut self) -> f64 {
        self.rng.gen_range(0.0..MAX_JITTER)
    }
}

/// Always zero. Makes composite scores exact.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

#[cfg(test)]
impl JitterSource for NoJitter {
    fn next_jitter(&mut self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_jitter_stays_in_range() {
        let mut jitter = RngJitter::from_entropy();
        for _ in 0..1000 {
            let j = jitter.next_jitter();
            assert!((0.0..MAX_JITTER).contains(&j), "jitter was {j}");
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = RngJitter::seeded(42);
        let mut b = RngJitter::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.next_jitter(), b.next_jitter());
        }
    }

    #[test]
    fn test_no_jitter_is_zero() {
        assert_eq!(NoJitter.next_jitter(), 0.0);
    }
}
