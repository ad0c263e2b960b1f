//! Process-wide engine configuration, immutable once built at startup.

use crate::search::tt::DEFAULT_CAPACITY;

const BYTES_PER_TT_ENTRY: usize = 48;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub name: String,
    pub author: String,
    pub tt_capacity: usize,
    pub log_path: String,
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: "Kestrel 0.1".to_string(),
            author: "the Kestrel contributors".to_string(),
            tt_capacity: DEFAULT_CAPACITY,
            log_path: "logs/kestrel.log".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Build from defaults, overridden by `KESTREL_HASH_MB` (megabytes of
    /// transposition table, converted to an entry count) and `RUST_LOG`
    /// (consumed later by [`crate::logger`], not stored here).
    pub fn from_env() -> Self {
        let mut config = EngineConfig::default();
        if let Ok(mb) = std::env::var("KESTREL_HASH_MB") {
            if let Ok(mb) = mb.parse::<usize>() {
                config.tt_capacity = (mb * 1024 * 1024) / BYTES_PER_TT_ENTRY;
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_nonzero_tt_capacity() {
        assert!(EngineConfig::default().tt_capacity > 0);
    }

    #[test]
    fn hash_mb_override_scales_capacity() {
        std::env::set_var("KESTREL_HASH_MB", "1");
        let config = EngineConfig::from_env();
        std::env::remove_var("KESTREL_HASH_MB");
        assert_eq!(config.tt_capacity, (1024 * 1024) / BYTES_PER_TT_ENTRY);
    }
}
