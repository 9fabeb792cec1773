//! Fixed parameter set for the exchange.
//!
//! The ring is R_q = Z[X]/(X^N + 1) with N = 2^14 and coefficients held in
//! a residue-number representation over a chain of ten ~40-bit primes.
//! All arithmetic runs level-wise over the chain, but reconciliation and
//! transcript hashing consume only the first prime `MODULI[0]`.
//!
//! Both parties must use the identical chain: the public polynomial and
//! the password polynomial are expanded deterministically from seeds, and
//! their coefficient streams are reduced modulo each prime in chain order.

use crate::error::{Error, Result};

/// log2 of the ring degree.
pub const LOG_DEGREE: usize = 14;

/// Ring degree N.
pub const RING_DEGREE: usize = 1 << LOG_DEGREE;

/// Residue modulus chain Q. Reconciliation uses `MODULI[0]` exclusively.
pub const MODULI: [u64; 10] = [
    0x2000_0000_8001,
    0x4_0001_8001,
    0x3_FFFD_0001,
    0x4_0006_0001,
    0x4_0006_8001,
    0x3_FFF9_0001,
    0x4_0008_0001,
    0x4_000A_8001,
    0x4_0010_8001,
    0x3_FFEB_8001,
];

/// Standard deviation of the discrete Gaussian error distribution χ_e.
pub const ERROR_SIGMA: f64 = 3.2;

/// Tail cut for χ_e, in standard deviations.
pub const ERROR_TAIL_CUT: f64 = 6.0;

/// Probability that a ternary secret coefficient is zero (χ_s draws the
/// remaining mass evenly over ±1).
pub const TERNARY_ZERO_PROB: f64 = 1.0 / 3.0;

/// Length of a party identifier on the wire.
pub const ID_LEN: usize = 16;

/// Length of a confirmation tag and of the derived session key.
pub const KEY_LEN: usize = 32;

/// Validates a (degree, moduli) pair before ring construction.
///
/// The degree must be a power of two and every modulus must be an odd
/// prime-sized value below 2^63, leaving headroom for single-limb modular
/// addition. The reconciliation quadrant test additionally needs
/// `q/4 ≥ 1` on the first modulus.
pub fn validate(degree: usize, moduli: &[u64]) -> Result<()> {
    if !degree.is_power_of_two() || degree < 2 {
        return Err(Error::Crypto(format!(
            "ring degree {degree} is not a power of two ≥ 2"
        )));
    }
    if moduli.is_empty() {
        return Err(Error::Crypto("empty modulus chain".into()));
    }
    for (level, &q) in moduli.iter().enumerate() {
        if q % 2 == 0 {
            return Err(Error::Crypto(format!(
                "modulus {q:#x} at level {level} is even"
            )));
        }
        if q >= 1 << 63 {
            return Err(Error::Crypto(format!(
                "modulus {q:#x} at level {level} exceeds 63 bits"
            )));
        }
        if q < 8 {
            return Err(Error::Crypto(format!(
                "modulus {q} at level {level} is too small to reconcile"
            )));
        }
    }
    Ok(())
}
