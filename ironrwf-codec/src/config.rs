/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Encoder and decoder configuration.

use ironrwf_core::WireVersion;
use serde::{Deserialize, Serialize};

/// Maximum number of entries an array header can count.
pub const MAX_ENTRIES: usize = u16::MAX as usize;

/// Configuration for an [`crate::ArrayEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Initial backing buffer size in bytes. Zero is permitted.
    pub initial_capacity: usize,
    /// Wire version governing length-prefix widths.
    pub wire_version: WireVersion,
    /// Capacity multiplier applied on overflow, at least 2.
    pub growth_factor: usize,
    /// Maximum entries accepted before `TooManyEntries`.
    pub max_entries: usize,
}

impl EncoderConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: 256,
            wire_version: WireVersion::V14_1,
            growth_factor: 2,
            max_entries: MAX_ENTRIES,
        }
    }

    /// Sets the initial buffer capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the wire version.
    #[must_use]
    pub const fn with_wire_version(mut self, version: WireVersion) -> Self {
        self.wire_version = version;
        self
    }

    /// Sets the growth factor, clamped to at least 2.
    #[must_use]
    pub const fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = if factor < 2 { 2 } else { factor };
        self
    }

    /// Sets the maximum entry count, clamped to the wire limit.
    #[must_use]
    pub const fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = if max > MAX_ENTRIES { MAX_ENTRIES } else { max };
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode context for an [`crate::ArrayDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Wire version governing length-prefix widths.
    pub wire_version: WireVersion,
}

impl DecoderConfig {
    /// Creates a decode context for the given wire version.
    #[must_use]
    pub const fn new(wire_version: WireVersion) -> Self {
        Self { wire_version }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_config_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.initial_capacity, 256);
        assert_eq!(config.growth_factor, 2);
        assert_eq!(config.max_entries, 65_535);
        assert_eq!(config.wire_version, WireVersion::V14_1);
    }

    #[test]
    fn test_encoder_config_clamps() {
        let config = EncoderConfig::new()
            .with_initial_capacity(0)
            .with_growth_factor(1)
            .with_max_entries(1_000_000);
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.growth_factor, 2);
        assert_eq!(config.max_entries, MAX_ENTRIES);
    }
}
