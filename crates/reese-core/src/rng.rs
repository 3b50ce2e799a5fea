//! Seedable pseudo-random number generator.
//!
//! [`Xorshift32`] is a 32-bit xorshift generator (Marsaglia, 2003): three
//! shift/xor steps per draw, no allocation, no global state. Each noise or
//! modulation module owns its own instance, so channels never share a random
//! sequence, and tests can pin the sequence through [`Xorshift32::new`].
//!
//! Reference: G. Marsaglia, "Xorshift RNGs", Journal of Statistical
//! Software 8(14), 2003.

/// Fallback state used when a seed would leave the generator at zero.
const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// 32-bit xorshift PRNG.
///
/// # Example
///
/// ```rust
/// use reese_core::Xorshift32;
///
/// let mut a = Xorshift32::new(42);
/// let mut b = Xorshift32::new(42);
/// assert_eq!(a.next_u32(), b.next_u32());
///
/// let x = a.next_bipolar();
/// assert!((-1.0..=1.0).contains(&x));
/// ```
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a 64-bit seed.
    ///
    /// The seed is folded to 32 bits; a fold of zero (the one state xorshift
    /// cannot leave) is replaced with a fixed non-zero constant.
    pub fn new(seed: u64) -> Self {
        let folded = (seed as u32) ^ ((seed >> 32) as u32);
        let state = if folded == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            folded
        };
        Self { state }
    }

    /// Next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn next_unit(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly.
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform draw in [-1, 1).
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_unit() * 2.0 - 1.0
    }

    /// Uniform draw in [low, high).
    #[inline]
    pub fn next_range(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_unit()
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(u64::from(ZERO_SEED_REPLACEMENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift32::new(1234);
        let mut b = Xorshift32::new(1234);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Xorshift32::new(1);
        let mut b = Xorshift32::new(2);
        let same = (0..32).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 2);
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn bipolar_range_and_mean() {
        let mut rng = Xorshift32::new(7);
        let mut sum = 0.0f64;
        let n = 100_000;
        for _ in 0..n {
            let x = rng.next_bipolar();
            assert!((-1.0..1.0).contains(&x), "out of range: {x}");
            sum += f64::from(x);
        }
        let mean = sum / f64::from(n);
        assert!(mean.abs() < 0.02, "mean should be near zero, got {mean}");
    }

    #[test]
    fn next_range_bounds() {
        let mut rng = Xorshift32::new(99);
        for _ in 0..10_000 {
            let x = rng.next_range(-0.05, 0.05);
            assert!((-0.05..0.05).contains(&x));
        }
    }
}
