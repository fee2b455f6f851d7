//! Common utilities shared across examples.

#![allow(dead_code)]

use std::env;

/// Default number of entries encoded by the array demo.
pub const DEFAULT_ENTRIES: usize = 10_000;

/// Example configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ExampleConfig {
    /// Number of entries to encode.
    pub entries: usize,
    /// Initial encoder buffer size in bytes.
    pub initial_capacity: usize,
}

impl ExampleConfig {
    /// Loads the configuration from `RWF_ENTRIES` and `RWF_CAPACITY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            entries: env::var("RWF_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ENTRIES),
            initial_capacity: env::var("RWF_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

/// Initializes logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Formats bytes as space-separated hex.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
