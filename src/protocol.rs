//! The two-message exchange state machines.
//!
//! Client and server each run a linear sequence of steps coordinated only
//! by the ordered reads and writes on the shared conduit:
//!
//! ```text
//! C → S   client_id            (16 bytes)
//! S → C   server_id            (16 bytes)
//! C → S   commitment m         (polynomial)
//! S → C   response μ, signal w (polynomials), tag k (32 bytes)
//! C → S   tag k'               (32 bytes)
//! ```
//!
//! Both parties derive the public polynomial `a` from the two identifiers
//! and the password polynomial `γ` from the `H1` password digest. The
//! client commits to `m = a·s_C + 2e_C + γ`; the server strips `γ`,
//! responds with `μ = a·s_S + 2e_S`, and reconciles its preimage into the
//! bit polynomial `σ` both sides hash. Agreement of the confirmation tags
//! implies agreement on `σ` and therefore on the password.
//!
//! Every secret intermediate is wiped on every exit path, success and
//! failure alike. Tag comparisons are constant-time. Nothing is retried:
//! a failed attempt costs an online attacker exactly one password guess.

use std::io::{Read, Write};

use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::channel;
use crate::error::{Error, Result};
use crate::math::poly::Ring;
use crate::math::sampler::{GaussianSampler, TernarySampler};
use crate::params::{ERROR_SIGMA, ID_LEN, KEY_LEN, MODULI, RING_DEGREE};
use crate::reconcile;
use crate::transcript::{
    password_digest, Transcript, TAG_CONFIRM_CLIENT, TAG_CONFIRM_SERVER, TAG_SESSION,
};

/// A derived 32-byte session key, wiped when dropped.
pub type SessionKey = Zeroizing<[u8; KEY_LEN]>;

/// Immutable ring and parameter context.
///
/// Construct once and share freely: concurrent exchanges may borrow the
/// same context from multiple threads.
pub struct CryptoContext {
    ring: Ring,
}

impl CryptoContext {
    /// Context over the fixed production parameter set (N = 2^14, the
    /// ten-prime chain).
    pub fn new() -> Result<Self> {
        Self::with_params(RING_DEGREE, &MODULI)
    }

    /// Context over an explicit parameter set. Intended for tests and
    /// experimentation; both parties must agree on the set.
    pub fn with_params(degree: usize, moduli: &[u64]) -> Result<Self> {
        Ok(Self {
            ring: Ring::new(degree, moduli)?,
        })
    }

    /// The underlying ring.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }
}

/// Seed for the public polynomial `a`: the session's identifier pair.
fn public_seed(client_id: &[u8; ID_LEN], server_id: &[u8; ID_LEN]) -> [u8; 2 * ID_LEN] {
    let mut seed = [0u8; 2 * ID_LEN];
    seed[..ID_LEN].copy_from_slice(client_id);
    seed[ID_LEN..].copy_from_slice(server_id);
    seed
}

/// Run the client side of the exchange over `conduit`.
///
/// Returns the 32-byte session key, or the first error encountered; no
/// partial key is ever released.
pub fn client<C: Read + Write>(
    ctx: &CryptoContext,
    conduit: &mut C,
    client_id: [u8; ID_LEN],
    password: &[u8],
) -> Result<SessionKey> {
    let ring = ctx.ring();

    channel::write_id(conduit, &client_id)?;
    let server_id = channel::read_id(conduit)?;
    debug!(
        client = %hex::encode(client_id),
        server = %hex::encode(server_id),
        "identifiers exchanged"
    );

    let a = ring.from_seed(&public_seed(&client_id, &server_id));

    let secret = Zeroizing::new(TernarySampler::new().sample_poly(ring));
    let noise = Zeroizing::new(GaussianSampler::new(ERROR_SIGMA).sample_poly(ring));

    let pw_digest = Zeroizing::new(password_digest(password));
    let pw_poly = Zeroizing::new(ring.from_seed(&pw_digest[..]));

    // m = a·s_C + 2e_C + γ
    let mut commit = ring.mul(&a, &secret);
    ring.mul_scalar_then_add(&noise, 2, &mut commit);
    let commit = ring.add(&commit, &pw_poly);

    channel::write_poly(conduit, &commit)?;
    debug!("commitment sent");

    let response = channel::read_poly(ring, conduit)?;
    let signal = channel::read_poly(ring, conduit)?;
    let server_tag = channel::read_tag(conduit)?;
    debug!("response received");

    // k_C = s_C·μ, reconciled against the server's signal.
    let preimage = Zeroizing::new(ring.mul(&secret, &response));
    let shared_bits = Zeroizing::new(reconcile::mod2(ring, &preimage, &signal));
    let pw_negated = Zeroizing::new(ring.neg(&pw_poly));

    let transcript = Transcript {
        client_id: &client_id,
        server_id: &server_id,
        commit: &commit,
        response: &response,
        shared_bits: &shared_bits,
        password_negated: &pw_negated,
    };

    let expected = Zeroizing::new(transcript.digest(TAG_CONFIRM_SERVER));
    if !bool::from(server_tag[..].ct_eq(&expected[..])) {
        debug!("server confirmation tag rejected");
        return Err(Error::AuthFailed);
    }

    let confirm = transcript.digest(TAG_CONFIRM_CLIENT);
    channel::write_tag(conduit, &confirm)?;
    debug!("confirmation sent");

    Ok(Zeroizing::new(transcript.digest(TAG_SESSION)))
}

/// Run the server side of the exchange over `conduit`.
///
/// Accepts exactly one attempt; any failure terminates the exchange and
/// the caller decides whether to accept a fresh connection.
pub fn server<C: Read + Write>(
    ctx: &CryptoContext,
    conduit: &mut C,
    server_id: [u8; ID_LEN],
    password: &[u8],
) -> Result<SessionKey> {
    let ring = ctx.ring();

    let client_id = channel::read_id(conduit)?;
    channel::write_id(conduit, &server_id)?;
    debug!(
        client = %hex::encode(client_id),
        server = %hex::encode(server_id),
        "identifiers exchanged"
    );

    let pw_digest = Zeroizing::new(password_digest(password));

    let commit = channel::read_poly(ring, conduit)?;
    debug!("commitment received");

    // α = m + γ' where γ' = −γ strips the password layer.
    let pw_poly = Zeroizing::new(ring.from_seed(&pw_digest[..]));
    let pw_negated = Zeroizing::new(ring.neg(&pw_poly));
    let alpha = Zeroizing::new(ring.add(&commit, &pw_negated));

    let secret = Zeroizing::new(TernarySampler::new().sample_poly(ring));
    let noise = Zeroizing::new(GaussianSampler::new(ERROR_SIGMA).sample_poly(ring));

    // μ = a·s_S + 2e_S
    let a = ring.from_seed(&public_seed(&client_id, &server_id));
    let mut response = ring.mul(&a, &secret);
    ring.mul_scalar_then_add(&noise, 2, &mut response);

    // k_S = α·s_S, then derive the signal and reconcile.
    let preimage = Zeroizing::new(ring.mul(&alpha, &secret));
    let signal = reconcile::cha(ring, &preimage);
    let shared_bits = Zeroizing::new(reconcile::mod2(ring, &preimage, &signal));

    let transcript = Transcript {
        client_id: &client_id,
        server_id: &server_id,
        commit: &commit,
        response: &response,
        shared_bits: &shared_bits,
        password_negated: &pw_negated,
    };
    let server_tag = transcript.digest(TAG_CONFIRM_SERVER);
    let expected_confirm = Zeroizing::new(transcript.digest(TAG_CONFIRM_CLIENT));

    channel::write_poly(conduit, &response)?;
    channel::write_poly(conduit, &signal)?;
    channel::write_tag(conduit, &server_tag)?;
    debug!("response sent");

    let client_confirm = channel::read_tag(conduit)?;
    if !bool::from(client_confirm[..].ct_eq(&expected_confirm[..])) {
        debug!("client confirmation tag rejected");
        return Err(Error::AuthFailed);
    }

    Ok(Zeroizing::new(transcript.digest(TAG_SESSION)))
}
