//! RLWE-based password-authenticated key exchange.
//!
//! Two parties who share a low-entropy password derive a high-entropy
//! 32-byte session key over an untrusted full-duplex byte channel. A
//! passive eavesdropper learns nothing about the password or the key; an
//! active attacker gets at most one password guess per exchange attempt.
//!
//! Key components:
//! - Coefficient-wise arithmetic over R_q in a ten-prime residue
//!   representation ([`math`])
//! - Deterministic SHAKE-256 seeded expansion for the public and password
//!   polynomials ([`math::Ring::from_seed`])
//! - Signal extraction and Mod₂ reconciliation ([`reconcile`])
//! - Domain-separated SHA-256 transcript hashing ([`transcript`])
//! - The client/server state machines ([`protocol`])
//!
//! # Example
//!
//! ```no_run
//! use std::net::TcpStream;
//!
//! use polyseed::CryptoContext;
//!
//! # fn main() -> polyseed::Result<()> {
//! let ctx = CryptoContext::new()?;
//! let mut conn = TcpStream::connect("127.0.0.1:4433")?;
//! let key = polyseed::client(&ctx, &mut conn, *b"0123456789abcdef", b"hunter2")?;
//! assert_eq!(key.len(), 32);
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod error;
pub mod link;
pub mod math;
pub mod params;
pub mod protocol;
pub mod reconcile;
pub mod transcript;

pub use error::{Error, Result};
pub use protocol::{client, server, CryptoContext, SessionKey};
