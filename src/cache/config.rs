//! Configuration for the cache system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eviction policy applied when the cache is over capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Evict the entry with the oldest last-access time
    Lru,
    /// Evict the entry with the smallest hit count
    Lfu,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        EvictionPolicy::Lru
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::Lfu => write!(f, "lfu"),
        }
    }
}

/// Configuration for the temporal activation cache
///
/// Capacity is byte-based: the sum of cached buffer sizes never exceeds
/// `max_size_bytes` after any mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum total size of cached activations in bytes
    pub max_size_bytes: usize,

    /// Eviction policy used when capacity is exceeded
    pub eviction_policy: EvictionPolicy,

    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // 100 MB default, enough for ~50k frames of 512 f32 samples
            max_size_bytes: 100 * 1024 * 1024,
            eviction_policy: EvictionPolicy::Lru,
            enable_metrics: true,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_size_bytes == 0 {
            return Err("max_size_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    max_size_bytes: Option<usize>,
    eviction_policy: Option<EvictionPolicy>,
    enable_metrics: Option<bool>,
}

impl CacheConfigBuilder {
    /// Set maximum cache size in bytes
    pub fn max_size_bytes(mut self, size: usize) -> Self {
        self.max_size_bytes = Some(size);
        self
    }

    /// Set the eviction policy
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }

    /// Enable or disable metrics collection
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = Some(enable);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            max_size_bytes: self.max_size_bytes.unwrap_or(defaults.max_size_bytes),
            eviction_policy: self.eviction_policy.unwrap_or(defaults.eviction_policy),
            enable_metrics: self.enable_metrics.unwrap_or(defaults.enable_metrics),
        }
    }
}

/// Preset configurations for common use cases
impl CacheConfig {
    /// Configuration for memory-constrained environments
    pub fn small() -> Self {
        Self {
            max_size_bytes: 10 * 1024 * 1024, // 10 MB
            ..Default::default()
        }
    }

    /// Configuration sized for a single interactive editing session
    /// (a few minutes of 44.1 kHz audio in 512-sample frames)
    pub fn session() -> Self {
        Self {
            max_size_bytes: 256 * 1024 * 1024, // 256 MB
            ..Default::default()
        }
    }

    /// Configuration for long-form material or many concurrent layers
    pub fn large() -> Self {
        Self {
            max_size_bytes: 1024 * 1024 * 1024, // 1 GB
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.eviction_policy, EvictionPolicy::Lru);
        assert!(config.enable_metrics);
    }

    #[test]
    fn test_config_validation() {
        let valid_config = CacheConfig::default();
        assert!(valid_config.validate().is_ok());

        let invalid_config = CacheConfig {
            max_size_bytes: 0,
            ..Default::default()
        };
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::builder()
            .max_size_bytes(50_000_000)
            .eviction_policy(EvictionPolicy::Lfu)
            .enable_metrics(false)
            .build();

        assert_eq!(config.max_size_bytes, 50_000_000);
        assert_eq!(config.eviction_policy, EvictionPolicy::Lfu);
        assert!(!config.enable_metrics);
    }

    #[test]
    fn test_preset_configs() {
        let small = CacheConfig::small();
        assert_eq!(small.max_size_bytes, 10 * 1024 * 1024);

        let session = CacheConfig::session();
        assert_eq!(session.max_size_bytes, 256 * 1024 * 1024);

        let large = CacheConfig::large();
        assert_eq!(large.max_size_bytes, 1024 * 1024 * 1024);
    }

    #[test]
    fn test_eviction_policy_serde() {
        let json = serde_json::to_string(&EvictionPolicy::Lfu).unwrap();
        assert_eq!(json, "\"lfu\"");

        let policy: EvictionPolicy = serde_json::from_str("\"lru\"").unwrap();
        assert_eq!(policy, EvictionPolicy::Lru);
    }
}
