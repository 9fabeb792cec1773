//! Connection link encoding shared by the CLI front-ends.
//!
//! A link is `base64( "host:port" ‖ "|" ‖ base64(password) )`: everything
//! a peer needs to dial in and authenticate, printable as one token. The
//! inner base64 keeps arbitrary password bytes clear of the separator.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;
use zeroize::Zeroize;

/// Failures while parsing a link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Outer or inner token is not valid base64.
    #[error("link is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded link is not UTF-8.
    #[error("link payload is not utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// No `|` separator between address and password.
    #[error("link is missing the address/password separator")]
    MissingSeparator,
}

/// A decoded connection advertisement.
pub struct ConnectionLink {
    /// Dialable `host:port` address.
    pub addr: String,
    /// Shared password bytes; wiped on drop.
    pub password: Vec<u8>,
}

impl ConnectionLink {
    /// Bundle an address and password into a link.
    pub fn new(addr: String, password: Vec<u8>) -> Self {
        Self { addr, password }
    }

    /// Render the printable link token.
    pub fn encode(&self) -> String {
        let payload = format!("{}|{}", self.addr, BASE64.encode(&self.password));
        BASE64.encode(payload)
    }

    /// Parse a link token.
    pub fn decode(link: &str) -> Result<Self, LinkError> {
        let payload = String::from_utf8(BASE64.decode(link.trim())?)?;
        let (addr, password_b64) = payload
            .split_once('|')
            .ok_or(LinkError::MissingSeparator)?;
        Ok(Self {
            addr: addr.to_string(),
            password: BASE64.decode(password_b64)?,
        })
    }
}

impl Drop for ConnectionLink {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
