//! Basic example: issue a token, then validate it the way a receiving service would
//!
//! Run with `RUST_LOG=swtiny=debug` to see the library's tracing events.

use swtiny::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swtiny=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Issuer side: the key is provisioned out of band
    let signer = TokenSigner::new(
        SignOptions::new()
            .key("your-symmetric-key")
            .issuer("http://issuer.com/")
            .audience("http://nice-audience.com/")
            .expires_in_minutes(60.0),
    )?;

    let token = signer.sign([("name", "Leandro"), ("age", "27")])?;
    println!("Token: {token}\n");

    // Receiving side
    let validator = TokenValidator::new(
        ValidateOptions::with_key("your-symmetric-key").audience("http://nice-audience.com/"),
    )?;

    let profile = validator.validate(&token)?;
    println!("Issuer: {:?}", profile.issuer());
    println!("Audience: {:?}", profile.audience());
    println!("Expires on: {:?}", profile.expires_on());
    for (key, value) in profile.claims() {
        println!("  {key} = {value}");
    }

    // A tampered token is rejected
    let tampered = token.replace("Leandro", "John");
    match validator.validate(&tampered) {
        Ok(_) => println!("\nTampered token accepted?!"),
        Err(err) => println!("\nTampered token rejected: {err}"),
    }

    Ok(())
}
