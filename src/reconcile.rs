//! Signal extraction and reconciliation.
//!
//! Both functions view polynomials through the first residue prime
//! `q = MODULI[0]` only. The signal marks coefficients that fall outside
//! the safe set E = [0, q/4] ∪ [q − q/4, q); reconciliation then shifts
//! flagged coefficients by q/2 before taking the parity of the centered
//! representative. Two coefficient vectors that differ by an even offset
//! of magnitude below q/4 reconcile to identical bits, which is the
//! property the exchange rests on.
//!
//! Output polynomials carry meaningful data in row 0 only; the higher
//! residue rows are zero and must not be consumed.

use crate::math::poly::{Ring, RnsPoly};

/// Signal function: 1 where the coefficient lies outside the safe set.
///
/// The output is public and sent in the clear, so no constant-time
/// guarantee is needed here.
pub fn cha(ring: &Ring, k: &RnsPoly) -> RnsPoly {
    let q = ring.first_modulus();
    let q_div4 = q / 4;
    let neg_q_div4 = q - q_div4;

    let mut w = ring.new_poly();
    for (bit, &v) in w.level_mut(0).iter_mut().zip(k.level(0)) {
        *bit = u64::from(v > q_div4 && v < neg_q_div4);
    }
    w
}

/// Reconciliation: extract one agreed bit per coefficient given the
/// signal `w`.
///
/// For each coefficient: shift by q/2 where the signal is set, reduce mod
/// q, lift into the centered range (−q/2, q/2], and keep the parity.
pub fn mod2(ring: &Ring, k: &RnsPoly, w: &RnsPoly) -> RnsPoly {
    let q = ring.first_modulus();
    let q_over2 = q / 2;

    let mut sigma = ring.new_poly();
    for ((bit, &kv), &wv) in sigma
        .level_mut(0)
        .iter_mut()
        .zip(k.level(0))
        .zip(w.level(0))
    {
        let t = if wv == 1 { q_over2 } else { 0 };
        let u = (t + kv) % q;
        let centered = if u <= q_over2 {
            u as i64
        } else {
            u as i64 - q as i64
        };
        *bit = (centered & 1) as u64;
    }
    sigma
}
