// ABOUTME: Structured logging setup for the meal-planning core
// ABOUTME: Configures tracing-subscriber with env-driven filtering and output format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line format for development
    #[default]
    Pretty,
    /// Single-line format for space-constrained environments
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_level: String,
    /// Output format
    pub format: LogFormat,
    /// Include module targets in output
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "info".into(),
            format: LogFormat::Pretty,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Build configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };
        Self {
            default_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format,
            include_target: false,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Safe to call once per process; embedding hosts that install their own
/// subscriber should skip this and the core's spans will flow into it.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.clone()));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(config.include_target))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(config.include_target))
                .init();
        }
    }
}

/// Initialize logging from environment variables alone
pub fn init_from_env() {
    init(&LoggingConfig::from_env());
}
