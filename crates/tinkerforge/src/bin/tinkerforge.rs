//! # TINKERFORGE Crafting Demo
//!
//! Crafts the starter recipes against the starter inventory and prints the
//! result.
//!
//! ```text
//! tinkerforge [CATALOG.toml]
//! ```
//!
//! With no argument the built-in starter catalog is used. Diagnostics go to
//! stderr and are filtered with `RUST_LOG` (default `warn`).

use std::io::{self, Write};

use anyhow::Context;
use tinkerforge::economy::Catalog;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let catalog = match std::env::args_os().nth(1) {
        Some(path) => Catalog::from_toml_file(&path)
            .with_context(|| format!("loading catalog {}", path.to_string_lossy()))?,
        None => Catalog::starter().context("loading starter catalog")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = tinkerforge::run(&catalog, &mut out)?;
    out.flush()?;

    let crafted = report.attempts.iter().filter(|a| a.crafted).count();
    tracing::info!(crafted, attempted = report.attempts.len(), "demo finished");

    Ok(())
}
