// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Vellum Project. All rights reserved.

//! CLI argument parsing.
//!
//! All settings can come from flags or from `VELLUM_*` environment
//! variables. The signing secret has no default: starting without one is a
//! configuration error, not a silently insecure server.

use std::net::IpAddr;

use clap::{Parser, ValueEnum};

/// Vellum — note service with revocable JWT sessions.
#[derive(Parser, Debug)]
#[command(
    name = "vellum",
    version = vellum_api::VERSION,
    about = "Note service with revocable JWT sessions",
    long_about = None
)]
pub struct Cli {
    /// Host address to bind
    #[arg(long, default_value = "0.0.0.0", env = "VELLUM_HOST")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value_t = 8080, env = "VELLUM_PORT")]
    pub port: u16,

    /// JWT signing secret (at least 32 bytes recommended)
    #[arg(long, env = "VELLUM_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Token issuer name
    #[arg(long, default_value = "vellum", env = "VELLUM_JWT_ISSUER")]
    pub jwt_issuer: String,

    /// Token audience name
    #[arg(long, default_value = "vellum-clients", env = "VELLUM_JWT_AUDIENCE")]
    pub jwt_audience: String,

    /// Session token lifetime in seconds
    #[arg(long, default_value_t = 3600, env = "VELLUM_TOKEN_TTL_SECS")]
    pub token_ttl_secs: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "VELLUM_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, default_value = "text", env = "VELLUM_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for log aggregation.
    Json,
}

// =============================================================================
// Tests
// =============================================================================
