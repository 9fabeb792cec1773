//! Polynomials over R_q in residue-number representation.
//!
//! A polynomial holds one coefficient row per residue prime in the chain;
//! row `i` carries the coefficients modulo `moduli[i]`. Arithmetic is
//! coefficient-wise per level: addition, negation, exact pointwise
//! Montgomery products, and scalar-multiply-then-accumulate. There is no
//! NTT; the protocol's algebra is Hadamard throughout, and products of
//! small-coefficient polynomials keep small coefficients, which
//! reconciliation requires.
//!
//! # Wire encoding
//!
//! `write_to`/`read_from` use a self-delimiting layout so a reader never
//! needs out-of-band length information:
//!
//! ```text
//! [degree: u32 LE][levels: u32 LE]
//! [level 0 coefficients: degree × u64 LE]
//! ...
//! [level L coefficients: degree × u64 LE]
//! ```
//!
//! Readers reject dimension mismatches and out-of-range coefficients
//! before any value reaches ring arithmetic.
//!
//! # Seeded expansion
//!
//! [`Ring::from_seed`] is a bit-exact contract shared by both parties: a
//! SHAKE-256 stream over the seed, read 8 bytes at a time as little-endian
//! u64 and reduced modulo each prime in chain order. The reduction is
//! deliberately biased (no rejection sampling); changing it would break
//! interoperability.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tiny_keccak::{Hasher, Shake, Xof};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::math::mod_q::Modulus;
use crate::params;

/// Immutable ring context: degree plus the per-prime Montgomery contexts.
///
/// Safe to share across concurrent exchanges; all operations take `&self`.
#[derive(Debug, Clone)]
pub struct Ring {
    degree: usize,
    moduli: Vec<Modulus>,
}

/// Polynomial in residue-number representation, one row per prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RnsPoly {
    coeffs: Vec<Vec<u64>>,
}

impl Ring {
    /// Builds a ring after validating the parameter set.
    pub fn new(degree: usize, moduli: &[u64]) -> Result<Self> {
        params::validate(degree, moduli)?;
        Ok(Self {
            degree,
            moduli: moduli.iter().map(|&q| Modulus::new(q)).collect(),
        })
    }

    /// Ring degree N.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of residue levels in the chain.
    #[inline]
    pub fn levels(&self) -> usize {
        self.moduli.len()
    }

    /// Per-prime Montgomery contexts, in chain order.
    #[inline]
    pub fn moduli(&self) -> &[Modulus] {
        &self.moduli
    }

    /// The first prime of the chain, which governs reconciliation.
    #[inline]
    pub fn first_modulus(&self) -> u64 {
        self.moduli[0].modulus()
    }

    /// All-zero polynomial of this ring's dimensions.
    pub fn new_poly(&self) -> RnsPoly {
        RnsPoly {
            coeffs: vec![vec![0u64; self.degree]; self.moduli.len()],
        }
    }

    /// Coefficient-wise sum.
    pub fn add(&self, a: &RnsPoly, b: &RnsPoly) -> RnsPoly {
        self.check_dims(a);
        self.check_dims(b);
        let mut out = self.new_poly();
        for (level, m) in self.moduli.iter().enumerate() {
            let (ra, rb) = (&a.coeffs[level], &b.coeffs[level]);
            for (j, o) in out.coeffs[level].iter_mut().enumerate() {
                *o = m.add(ra[j], rb[j]);
            }
        }
        out
    }

    /// Coefficient-wise negation.
    pub fn neg(&self, a: &RnsPoly) -> RnsPoly {
        self.check_dims(a);
        let mut out = self.new_poly();
        for (level, m) in self.moduli.iter().enumerate() {
            let ra = &a.coeffs[level];
            for (j, o) in out.coeffs[level].iter_mut().enumerate() {
                *o = m.neg(ra[j]);
            }
        }
        out
    }

    /// Coefficient-wise exact product via Montgomery reduction.
    pub fn mul(&self, a: &RnsPoly, b: &RnsPoly) -> RnsPoly {
        self.check_dims(a);
        self.check_dims(b);
        let mut out = self.new_poly();
        for (level, m) in self.moduli.iter().enumerate() {
            let (ra, rb) = (&a.coeffs[level], &b.coeffs[level]);
            for (j, o) in out.coeffs[level].iter_mut().enumerate() {
                *o = m.mul(ra[j], rb[j]);
            }
        }
        out
    }

    /// Accumulates `scalar · src` into `acc`, coefficient-wise.
    pub fn mul_scalar_then_add(&self, src: &RnsPoly, scalar: u64, acc: &mut RnsPoly) {
        self.check_dims(src);
        self.check_dims(acc);
        for (level, m) in self.moduli.iter().enumerate() {
            let q = m.modulus() as u128;
            let s = (scalar as u128) % q;
            let rs = &src.coeffs[level];
            for (j, o) in acc.coeffs[level].iter_mut().enumerate() {
                let term = ((rs[j] as u128 * s) % q) as u64;
                *o = m.add(*o, term);
            }
        }
    }

    /// Deterministic uniform polynomial from a seed.
    ///
    /// SHAKE-256 over the seed, 8 bytes per coefficient read as
    /// little-endian u64 and reduced modulo each prime in chain order.
    /// Identical seeds yield bitwise-identical polynomials on every
    /// platform; the biased reduction is part of the contract.
    pub fn from_seed(&self, seed: &[u8]) -> RnsPoly {
        let mut xof = Shake::v256();
        xof.update(seed);

        let mut out = self.new_poly();
        let mut word = [0u8; 8];
        for (level, m) in self.moduli.iter().enumerate() {
            let q = m.modulus();
            for c in out.coeffs[level].iter_mut() {
                xof.squeeze(&mut word);
                *c = u64::from_le_bytes(word) % q;
            }
        }
        out
    }

    fn check_dims(&self, p: &RnsPoly) {
        debug_assert_eq!(p.levels(), self.moduli.len(), "level count mismatch");
        debug_assert_eq!(p.degree(), self.degree, "degree mismatch");
    }
}

impl RnsPoly {
    /// Ring degree of this polynomial.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs[0].len()
    }

    /// Number of residue levels.
    #[inline]
    pub fn levels(&self) -> usize {
        self.coeffs.len()
    }

    /// Coefficient row for one residue level.
    #[inline]
    pub fn level(&self, i: usize) -> &[u64] {
        &self.coeffs[i]
    }

    /// Mutable coefficient row for one residue level.
    #[inline]
    pub fn level_mut(&mut self, i: usize) -> &mut [u64] {
        &mut self.coeffs[i]
    }

    /// First-level coefficients serialized as big-endian u64 words.
    ///
    /// This is the transcript-hash view of a polynomial: exactly
    /// `8 × degree` bytes from row 0; the higher rows never reach a hash.
    pub fn level0_be_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 * self.degree());
        for &c in &self.coeffs[0] {
            buf.extend_from_slice(&c.to_be_bytes());
        }
        buf
    }

    /// Writes the polynomial in the canonical wire layout.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u32::<LittleEndian>(self.degree() as u32)?;
        w.write_u32::<LittleEndian>(self.levels() as u32)?;
        let mut body = Vec::with_capacity(8 * self.degree() * self.levels());
        for row in &self.coeffs {
            for &c in row {
                body.extend_from_slice(&c.to_le_bytes());
            }
        }
        w.write_all(&body)?;
        Ok(())
    }

    /// Reads one polynomial, validating dimensions against `ring` and the
    /// range of every coefficient against its level's modulus.
    pub fn read_from<R: Read>(ring: &Ring, r: &mut R) -> Result<Self> {
        let degree = r.read_u32::<LittleEndian>()? as usize;
        let levels = r.read_u32::<LittleEndian>()? as usize;
        if degree != ring.degree() || levels != ring.levels() {
            return Err(Error::Protocol(format!(
                "polynomial dimensions {degree}×{levels} do not match ring {}×{}",
                ring.degree(),
                ring.levels()
            )));
        }

        let mut body = vec![0u8; 8 * degree * levels];
        r.read_exact(&mut body)?;

        let mut coeffs = vec![vec![0u64; degree]; levels];
        let mut words = body.as_slice();
        for (level, row) in coeffs.iter_mut().enumerate() {
            let q = ring.moduli[level].modulus();
            for c in row.iter_mut() {
                let v = words.read_u64::<LittleEndian>()?;
                if v >= q {
                    return Err(Error::Protocol(format!(
                        "coefficient {v:#x} out of range for level {level}"
                    )));
                }
                *c = v;
            }
        }
        Ok(Self { coeffs })
    }
}

impl Zeroize for RnsPoly {
    fn zeroize(&mut self) {
        for row in &mut self.coeffs {
            row.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MODULI;

    fn test_ring() -> Ring {
        Ring::new(64, &MODULI[..3]).unwrap()
    }

    #[test]
    fn from_seed_is_deterministic() {
        let ring = test_ring();
        let a = ring.from_seed(b"abc");
        let b = ring.from_seed(b"abc");
        assert_eq!(a, b);
    }

    #[test]
    fn from_seed_separates_seeds() {
        let ring = test_ring();
        assert_ne!(ring.from_seed(b"abc"), ring.from_seed(b"abd"));
    }

    #[test]
    fn from_seed_respects_each_modulus() {
        let ring = test_ring();
        let p = ring.from_seed(b"range check");
        for (level, m) in ring.moduli().iter().enumerate() {
            assert!(p.level(level).iter().all(|&c| c < m.modulus()));
        }
    }

    #[test]
    fn add_neg_cancels() {
        let ring = test_ring();
        let a = ring.from_seed(b"x");
        let sum = ring.add(&a, &ring.neg(&a));
        assert_eq!(sum, ring.new_poly());
    }

    #[test]
    fn mul_matches_wide_reference() {
        let ring = test_ring();
        let a = ring.from_seed(b"left");
        let b = ring.from_seed(b"right");
        let c = ring.mul(&a, &b);
        for (level, m) in ring.moduli().iter().enumerate() {
            let q = m.modulus() as u128;
            for j in 0..ring.degree() {
                let expected = ((a.level(level)[j] as u128 * b.level(level)[j] as u128) % q) as u64;
                assert_eq!(c.level(level)[j], expected);
            }
        }
    }

    #[test]
    fn scalar_accumulate_matches_reference() {
        let ring = test_ring();
        let e = ring.from_seed(b"error");
        let mut acc = ring.from_seed(b"base");
        let before = acc.clone();
        ring.mul_scalar_then_add(&e, 2, &mut acc);
        for (level, m) in ring.moduli().iter().enumerate() {
            let q = m.modulus() as u128;
            for j in 0..ring.degree() {
                let expected =
                    ((before.level(level)[j] as u128 + 2 * e.level(level)[j] as u128) % q) as u64;
                assert_eq!(acc.level(level)[j], expected);
            }
        }
    }

    #[test]
    fn wire_roundtrip() {
        let ring = test_ring();
        let p = ring.from_seed(b"wire");
        let mut buf = Vec::new();
        p.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 8 + 8 * ring.degree() * ring.levels());
        let q = RnsPoly::read_from(&ring, &mut buf.as_slice()).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn wire_rejects_dimension_mismatch() {
        let ring = test_ring();
        let other = Ring::new(128, &MODULI[..3]).unwrap();
        let p = other.from_seed(b"wrong shape");
        let mut buf = Vec::new();
        p.write_to(&mut buf).unwrap();
        match RnsPoly::read_from(&ring, &mut buf.as_slice()) {
            Err(Error::Protocol(_)) => {}
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[test]
    fn wire_rejects_out_of_range_coefficient() {
        let ring = test_ring();
        let p = ring.new_poly();
        let mut buf = Vec::new();
        p.write_to(&mut buf).unwrap();
        // Corrupt the first coefficient of level 0 to q0.
        buf[8..16].copy_from_slice(&ring.first_modulus().to_le_bytes());
        match RnsPoly::read_from(&ring, &mut buf.as_slice()) {
            Err(Error::Protocol(_)) => {}
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[test]
    fn wire_truncation_is_a_channel_error() {
        let ring = test_ring();
        let p = ring.from_seed(b"short");
        let mut buf = Vec::new();
        p.write_to(&mut buf).unwrap();
        buf.truncate(buf.len() / 2);
        match RnsPoly::read_from(&ring, &mut buf.as_slice()) {
            Err(Error::Channel(_)) => {}
            other => panic!("expected channel error, got {other:?}"),
        }
    }

    #[test]
    fn level0_be_bytes_is_big_endian_row_zero() {
        let ring = test_ring();
        let mut p = ring.new_poly();
        p.level_mut(0)[0] = 0x0102_0304_0506_0708;
        let bytes = p.level0_be_bytes();
        assert_eq!(bytes.len(), 8 * ring.degree());
        assert_eq!(&bytes[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn zeroize_clears_all_levels() {
        let ring = test_ring();
        let mut p = ring.from_seed(b"secret");
        p.zeroize();
        assert_eq!(p, ring.new_poly());
    }
}
