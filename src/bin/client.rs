//! ps-client: consume a pairing link and derive the shared session key.
//!
//! Decodes the link printed by ps-server, dials the advertised address,
//! and runs the client side of the exchange with a fresh random client
//! identifier. On success the derived session key is printed as
//! lowercase hex and the process exits 0.

use std::net::TcpStream;

use clap::Parser;
use eyre::{Result, WrapErr};
use rand::RngCore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use polyseed::link::ConnectionLink;
use polyseed::CryptoContext;

#[derive(Parser)]
#[command(name = "ps-client")]
#[command(about = "Dial a pairing link and derive a shared session key")]
#[command(version)]
struct Args {
    /// Pairing link printed by ps-server
    link: String,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let link = ConnectionLink::decode(&args.link).wrap_err("decode link")?;

    let ctx = CryptoContext::new().wrap_err("crypto context")?;

    let mut conn =
        TcpStream::connect(&link.addr).wrap_err_with(|| format!("connect {}", link.addr))?;
    info!(addr = %link.addr, "connected");

    let mut client_id = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut client_id);

    let key = polyseed::client(&ctx, &mut conn, client_id, &link.password)
        .wrap_err("exchange failed")?;
    info!("session key established");

    println!("{}", hex::encode(&key[..]));
    Ok(())
}
