//! Mathematical primitives for the exchange.
//!
//! - **Modular arithmetic** over each residue prime using Montgomery
//!   reduction
//! - **RNS polynomials** over R_q = Z_q[X]/(X^N + 1) with coefficient-wise
//!   arithmetic, deterministic seeded expansion, and the wire codec
//! - **Samplers** for the Gaussian error and ternary secret distributions

pub mod mod_q;
pub mod poly;
pub mod sampler;

pub use mod_q::Modulus;
pub use poly::{Ring, RnsPoly};
pub use sampler::{GaussianSampler, TernarySampler};
