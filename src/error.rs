//! Error taxonomy for the exchange.
//!
//! Every failure mode surfaces as one of four variants; none are retried
//! or swallowed inside the core. Secret buffers are wiped before an error
//! propagates out of the protocol engine.

use thiserror::Error;

/// The library's error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Short read, write failure, or premature close on the conduit.
    #[error("channel i/o failed: {0}")]
    Channel(#[from] std::io::Error),

    /// Parameter or sampler construction failure.
    #[error("invalid cryptographic parameters: {0}")]
    Crypto(String),

    /// The constant-time confirmation tag comparison failed.
    ///
    /// Terminal for this attempt. The caller may reconnect and run a
    /// fresh exchange, which draws fresh randomness and a fresh public
    /// polynomial; each attempt costs an online attacker one password
    /// guess.
    #[error("authentication failed")]
    AuthFailed,

    /// Unexpected payload dimensions or framing violation.
    #[error("malformed protocol payload: {0}")]
    Protocol(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
