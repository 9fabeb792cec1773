//! Domain-separated transcript hashing.
//!
//! Every protocol hash is SHA-256 over an ASCII tag followed by the fixed
//! transcript tuple. The tag is the only thing that distinguishes the
//! server confirmation, the client confirmation, and the session key, so
//! the three digests are computed from one borrowed view of the
//! transcript. Polynomials enter the hash as their first-level
//! coefficients in big-endian order, see
//! [`RnsPoly::level0_be_bytes`](crate::math::RnsPoly::level0_be_bytes).

use sha2::{Digest, Sha256};

use crate::math::poly::RnsPoly;
use crate::params::{ID_LEN, KEY_LEN};

/// Tag for the password digest that seeds the password polynomial.
pub const TAG_PASSWORD: &[u8] = b"H1";
/// Tag for the server's confirmation tag `k`.
pub const TAG_CONFIRM_SERVER: &[u8] = b"H2";
/// Tag for the client's confirmation tag `k'`.
pub const TAG_CONFIRM_CLIENT: &[u8] = b"H3";
/// Tag for the derived session key.
pub const TAG_SESSION: &[u8] = b"Session";

/// Digest of the password under the `H1` domain. Seeds the password
/// polynomial; the password itself never enters any other hash.
pub fn password_digest(password: &[u8]) -> [u8; KEY_LEN] {
    let mut h = Sha256::new();
    h.update(TAG_PASSWORD);
    h.update(password);
    h.finalize().into()
}

/// Borrowed view of the transcript tuple hashed by both parties.
///
/// `password_negated` is `−γ` on the client and `γ' = −γ` on the server;
/// the two are coefficient-identical when the passwords match.
pub struct Transcript<'a> {
    /// Client party identifier.
    pub client_id: &'a [u8; ID_LEN],
    /// Server party identifier.
    pub server_id: &'a [u8; ID_LEN],
    /// Client commitment `m`.
    pub commit: &'a RnsPoly,
    /// Server response `μ`.
    pub response: &'a RnsPoly,
    /// Reconciled bit polynomial `σ`.
    pub shared_bits: &'a RnsPoly,
    /// Negated password polynomial.
    pub password_negated: &'a RnsPoly,
}

impl Transcript<'_> {
    /// SHA-256 over `tag ‖ C ‖ S ‖ m ‖ μ ‖ σ ‖ −γ`.
    pub fn digest(&self, tag: &[u8]) -> [u8; KEY_LEN] {
        let mut h = Sha256::new();
        h.update(tag);
        h.update(self.client_id);
        h.update(self.server_id);
        h.update(self.commit.level0_be_bytes());
        h.update(self.response.level0_be_bytes());
        h.update(self.shared_bits.level0_be_bytes());
        h.update(self.password_negated.level0_be_bytes());
        h.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly::Ring;
    use crate::params::MODULI;

    fn fixture() -> (Ring, [u8; ID_LEN], [u8; ID_LEN], Vec<RnsPoly>) {
        let ring = Ring::new(64, &MODULI[..2]).unwrap();
        let polys = [b"m".as_slice(), b"mu".as_slice(), b"sigma".as_slice(), b"gamma".as_slice()]
            .iter()
            .map(|s| ring.from_seed(s))
            .collect();
        (ring, [1u8; ID_LEN], [2u8; ID_LEN], polys)
    }

    #[test]
    fn tags_separate_domains() {
        let (_ring, cid, sid, polys) = fixture();
        let t = Transcript {
            client_id: &cid,
            server_id: &sid,
            commit: &polys[0],
            response: &polys[1],
            shared_bits: &polys[2],
            password_negated: &polys[3],
        };
        let digests = [
            t.digest(TAG_CONFIRM_SERVER),
            t.digest(TAG_CONFIRM_CLIENT),
            t.digest(TAG_SESSION),
        ];
        assert_ne!(digests[0], digests[1]);
        assert_ne!(digests[0], digests[2]);
        assert_ne!(digests[1], digests[2]);
    }

    #[test]
    fn every_tuple_element_binds_the_digest() {
        let (ring, cid, sid, polys) = fixture();
        let base = Transcript {
            client_id: &cid,
            server_id: &sid,
            commit: &polys[0],
            response: &polys[1],
            shared_bits: &polys[2],
            password_negated: &polys[3],
        }
        .digest(TAG_CONFIRM_SERVER);

        let other_id = [3u8; ID_LEN];
        let other_poly = ring.from_seed(b"swapped");
        for variant in 0..6 {
            let t = Transcript {
                client_id: if variant == 0 { &other_id } else { &cid },
                server_id: if variant == 1 { &other_id } else { &sid },
                commit: if variant == 2 { &other_poly } else { &polys[0] },
                response: if variant == 3 { &other_poly } else { &polys[1] },
                shared_bits: if variant == 4 { &other_poly } else { &polys[2] },
                password_negated: if variant == 5 { &other_poly } else { &polys[3] },
            };
            assert_ne!(
                t.digest(TAG_CONFIRM_SERVER),
                base,
                "element {variant} did not bind"
            );
        }
    }

    #[test]
    fn password_digest_is_domain_separated() {
        // "H1" ‖ pw must not collide with a raw hash of pw.
        let pw = b"hunter2";
        let mut plain = Sha256::new();
        plain.update(pw);
        let plain: [u8; KEY_LEN] = plain.finalize().into();
        assert_ne!(password_digest(pw), plain);
    }
}
