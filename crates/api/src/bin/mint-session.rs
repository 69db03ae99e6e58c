#!/usr/bin/env cargo
//! Session token minting utility for SalonSuite
//!
//! Issues a signed session token for local development and manual testing,
//! using the same secret and expiry as the server.
//!
//! Usage:
//!   cargo run --bin mint-session -- <subject> [email] [--super-admin]
//!
//! The token can be sent as `Authorization: Bearer <token>` or as the
//! `salon_session` cookie.

use anyhow::{bail, Context};
use salonsuite_api::auth::{SessionManager, SESSION_COOKIE};
use std::env;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let mut super_admin = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--super-admin" {
            super_admin = true;
        } else {
            positional.push(arg);
        }
    }

    let Some(subject) = positional.first().cloned() else {
        eprintln!("Usage: mint-session <subject> [email] [--super-admin]");
        std::process::exit(1);
    };
    let email = positional
        .get(1)
        .cloned()
        .unwrap_or_else(|| format!("{}@localhost", subject));

    let secret =
        env::var("SESSION_JWT_SECRET").context("SESSION_JWT_SECRET must be set (see .env)")?;
    if secret.len() < 32 {
        bail!("SESSION_JWT_SECRET must be at least 32 characters");
    }
    let expiry_hours = salonsuite_api::config::session_expiry_hours()
        .context("Invalid SESSION_EXPIRY_HOURS")?;

    let sessions = SessionManager::new(&secret, expiry_hours);
    let token = sessions
        .issue(&subject, &email, super_admin)
        .context("Failed to sign session token")?;

    println!("\n===========================================");
    println!("Session token ({}{}):", subject, if super_admin { ", super-admin" } else { "" });
    println!("===========================================");
    println!("{}", token);
    println!("===========================================\n");

    println!("Usage:");
    println!("  curl -H 'Authorization: Bearer {}' http://app.localhost:3000/dashboard", token);
    println!("  curl -b '{}={}' http://beleza-pura.localhost:3000/book", SESSION_COOKIE, token);

    Ok(())
}
