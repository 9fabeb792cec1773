//! ps-server: advertise a connection link and run one exchange.
//!
//! Generates a fresh random password and server identifier, prints the
//! link a peer pastes into ps-client, then accepts a single connection
//! and runs one exchange attempt on it. On success the derived session
//! key is printed as lowercase hex and the process exits 0.

use std::net::TcpListener;

use clap::Parser;
use eyre::{Result, WrapErr};
use rand::RngCore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use polyseed::link::ConnectionLink;
use polyseed::CryptoContext;

#[derive(Parser)]
#[command(name = "ps-server")]
#[command(about = "Advertise a pairing link and derive a shared session key")]
#[command(version)]
struct Args {
    /// Bind address; port 0 lets the OS pick a free port
    #[arg(long, default_value = "127.0.0.1:0")]
    bind: String,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let ctx = CryptoContext::new().wrap_err("crypto context")?;

    let mut password = vec![0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut password);
    let mut server_id = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut server_id);

    let listener =
        TcpListener::bind(&args.bind).wrap_err_with(|| format!("bind {}", args.bind))?;
    let addr = listener.local_addr().wrap_err("local addr")?;

    let link = ConnectionLink::new(addr.to_string(), password);
    println!("{}", link.encode());

    let (mut conn, peer) = listener.accept().wrap_err("accept")?;
    info!(%peer, "peer connected");

    // One attempt per accepted connection; a failed exchange exits
    // non-zero and the peer must reconnect for another guess.
    let key = polyseed::server(&ctx, &mut conn, server_id, &link.password)
        .wrap_err("exchange failed")?;
    info!("session key established");

    println!("{}", hex::encode(&key[..]));
    Ok(())
}
