// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod config;
mod error;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::config::PortalConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PortalConfig::load()?;
    app::run(config).map_err(|err| anyhow!("UI event loop failed: {err}"))
}
