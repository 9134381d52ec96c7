//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (guest memory size, cycle budget).
//! 2. **Structures:** Hierarchical config for general and system concerns.
//! 3. **Ingestion:** `serde` deserialization for host-supplied JSON, or
//!    `Config::default()` for embedding.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Guest memory size (16 MiB).
    ///
    /// One flat region shared by text, data, and stack; comfortably covers
    /// the conventional `0x0040_0000` text base used by MIPS toolchains.
    pub const MEM_SIZE: usize = 16 * 1024 * 1024;

    /// Host cycle budget; 0 disables the budget entirely.
    ///
    /// When non-zero, the run loop checks the budget between cycles and halts
    /// with a host-termination fault once it is reached.
    pub const MAX_CYCLES: u64 = 0;

    /// Whether loading an image points `$sp` at the top of guest memory.
    pub const INIT_STACK: bool = true;
}

/// Root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Observability and output settings.
    pub general: GeneralConfig,
    /// Guest machine settings.
    pub system: SystemConfig,
}

/// Observability and output configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable per-stage pipeline tracing to stderr.
    pub trace: bool,
    /// Echo printed integers to stdout as the guest emits them.
    pub echo_output: bool,
}

/// Guest machine configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Bytes of flat guest memory.
    pub mem_size: usize,
    /// Point `$sp` at the top of guest memory when an image is loaded.
    pub init_stack: bool,
    /// Host cycle budget checked between cycles; 0 = unlimited.
    pub max_cycles: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mem_size: defaults::MEM_SIZE,
            init_stack: defaults::INIT_STACK,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

impl Config {
    /// Parses a configuration from host-supplied JSON.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
