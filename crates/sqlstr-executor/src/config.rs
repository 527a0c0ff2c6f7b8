//! Kernel execution configuration
//!
//! Process-wide settings, read once on first access:
//! - whether batches whose string inputs are all ASCII may use the ASCII fast
//!   path (`SQLSTR_ASCII_FAST_PATH`, default on)
//! - how many independent batches are needed before they are evaluated in
//!   parallel (`PARALLEL_THRESHOLD`, default derived from the thread count)
//!
//! Both settings are immutable after initialization and read without locking.

use std::sync::OnceLock;

/// Global kernel configuration, initialized once on first access
static KERNEL_CONFIG: OnceLock<KernelConfig> = OnceLock::new();

pub const ASCII_FAST_PATH_ENV: &str = "SQLSTR_ASCII_FAST_PATH";
pub const PARALLEL_THRESHOLD_ENV: &str = "PARALLEL_THRESHOLD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Allow the ASCII implementation for batches whose string inputs are all ASCII
    pub ascii_fast_path: bool,
    /// Minimum number of batches before `eval_batches_parallel` fans out
    pub parallel_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            ascii_fast_path: true,
            parallel_threshold: Self::threshold_for_hardware(Self::available_threads()),
        }
    }
}

impl KernelConfig {
    /// Get or initialize the global configuration
    pub fn global() -> &'static KernelConfig {
        KERNEL_CONFIG.get_or_init(Self::from_env)
    }

    /// Configuration that always runs the generic implementation
    pub fn generic_only() -> Self {
        KernelConfig { ascii_fast_path: false, ..Default::default() }
    }

    fn from_env() -> Self {
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        log::debug!("kernel configuration: {:?}", config);
        config
    }

    /// Build a configuration from an environment-like lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = KernelConfig::default();
        if let Some(value) = lookup(ASCII_FAST_PATH_ENV) {
            config.ascii_fast_path = Self::parse_switch(&value).unwrap_or(true);
        }
        if let Some(value) = lookup(PARALLEL_THRESHOLD_ENV) {
            config.parallel_threshold = Self::parse_threshold_override(&value);
        }
        config
    }

    fn parse_switch(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "on" | "true" | "1" | "yes" => Some(true),
            "off" | "false" | "0" | "no" => Some(false),
            other => {
                log::warn!("ignoring unrecognized {} value '{}'", ASCII_FAST_PATH_ENV, other);
                None
            }
        }
    }

    /// Parse PARALLEL_THRESHOLD
    /// Supports:
    /// - Numbers: "4" -> custom threshold
    /// - "max" or "disabled" -> never parallelize
    fn parse_threshold_override(threshold_str: &str) -> usize {
        let threshold_str = threshold_str.trim().to_lowercase();

        if threshold_str == "max" || threshold_str == "disabled" {
            usize::MAX
        } else if let Ok(threshold) = threshold_str.parse::<usize>() {
            threshold
        } else {
            // Invalid value, fall back to auto-detection
            Self::threshold_for_hardware(Self::available_threads())
        }
    }

    #[cfg(feature = "parallel")]
    fn available_threads() -> usize {
        rayon::current_num_threads()
    }

    #[cfg(not(feature = "parallel"))]
    fn available_threads() -> usize {
        1
    }

    /// Batch-count threshold based on hardware tier
    fn threshold_for_hardware(num_threads: usize) -> usize {
        match num_threads {
            // Single core: never parallelize
            0 | 1 => usize::MAX,
            // 2-3 cores: coordination overhead dominates small fan-outs
            2..=3 => 8,
            _ => 2,
        }
    }

    /// Check if `batch_count` independent batches should be evaluated in parallel
    pub fn should_parallelize(&self, batch_count: usize) -> bool {
        batch_count >= self.parallel_threshold
    }
}
