//! Randomness samplers for error and secret polynomials.
//!
//! χ_e is a discrete Gaussian (Box-Muller with a 6σ tail cut) and χ_s a
//! ternary distribution over {−1, 0, 1}. Both run over a ChaCha20 stream
//! seeded from OS entropy per exchange; the seeded constructors exist for
//! reproducible tests. Sampled values are small signed integers lifted
//! into every residue row of the chain.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::math::poly::{Ring, RnsPoly};

/// Gaussian sampler for error polynomials.
pub struct GaussianSampler {
    sigma: f64,
    bound: i64,
    rng: ChaCha20Rng,
}

impl GaussianSampler {
    /// Create a sampler with the given standard deviation.
    pub fn new(sigma: f64) -> Self {
        Self::from_rng(sigma, ChaCha20Rng::from_entropy())
    }

    /// Create a seeded sampler for reproducibility.
    pub fn with_seed(sigma: f64, seed: u64) -> Self {
        Self::from_rng(sigma, ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(sigma: f64, rng: ChaCha20Rng) -> Self {
        Self {
            sigma,
            bound: (sigma * crate::params::ERROR_TAIL_CUT).ceil() as i64,
            rng,
        }
    }

    /// Sample from the discrete Gaussian via Box-Muller, rejecting past
    /// the tail cut.
    pub fn sample(&mut self) -> i64 {
        loop {
            let u1: f64 = self.rng.gen_range(0.0001..1.0);
            let u2: f64 = self.rng.gen_range(0.0..1.0);

            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            let v = (z * self.sigma).round() as i64;
            if v.abs() <= self.bound {
                return v;
            }
        }
    }

    /// Sample an error polynomial over the full residue chain.
    pub fn sample_poly(&mut self, ring: &Ring) -> RnsPoly {
        let mut poly = ring.new_poly();
        for j in 0..ring.degree() {
            let v = self.sample();
            set_signed(ring, &mut poly, j, v);
        }
        poly
    }

    /// Standard deviation of this sampler.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

/// Ternary sampler for secret polynomials: coefficients in {−1, 0, 1},
/// zero with probability 1/3.
pub struct TernarySampler {
    rng: ChaCha20Rng,
}

impl TernarySampler {
    /// Create a sampler over OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create a seeded sampler for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Sample one coefficient.
    pub fn sample(&mut self) -> i64 {
        match self.rng.gen_range(0..3u8) {
            0 => 0,
            1 => 1,
            _ => -1,
        }
    }

    /// Sample a secret polynomial over the full residue chain.
    pub fn sample_poly(&mut self, ring: &Ring) -> RnsPoly {
        let mut poly = ring.new_poly();
        for j in 0..ring.degree() {
            let v = self.sample();
            set_signed(ring, &mut poly, j, v);
        }
        poly
    }
}

impl Default for TernarySampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Lift a small signed value into every residue row at index `j`.
fn set_signed(ring: &Ring, poly: &mut RnsPoly, j: usize, v: i64) {
    for (level, m) in ring.moduli().iter().enumerate() {
        let q = m.modulus();
        poly.level_mut(level)[j] = if v >= 0 {
            (v as u64) % q
        } else {
            q - ((-v) as u64 % q)
        };
    }
}
