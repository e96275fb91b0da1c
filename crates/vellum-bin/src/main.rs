// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! Vellum server binary entry point.

mod cli;
mod error;
mod logging;
mod shutdown;

use clap::Parser;
use vellum_api::{ApiConfig, ApiServer, AppState, JwtConfig};

use crate::cli::Cli;
use crate::error::{BinError, BinResult};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> BinResult<()> {
    // The signing secret must be present before anything else starts; a
    // missing secret is fatal here, never a per-request failure.
    let secret = cli
        .jwt_secret
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BinError::config("VELLUM_JWT_SECRET is not set"))?;

    let jwt = JwtConfig::new(secret)
        .with_issuer(cli.jwt_issuer)
        .with_audience(cli.jwt_audience)
        .with_ttl_secs(cli.token_ttl_secs);

    let config = ApiConfig::default()
        .with_host(cli.host)
        .with_port(cli.port)
        .with_jwt(jwt);

    let state = AppState::builder().config(config).build()?;
    let server = ApiServer::new(state);

    tracing::info!(version = vellum_api::VERSION, "Starting Vellum");

    server.run_with_shutdown(shutdown::shutdown_signal()).await?;

    Ok(())
}
