// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted preferences for cham front ends.

use cham_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Saved preferences: engine tuning plus the default log filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChamPrefs {
    /// Engine configuration used when no command-line override is given.
    pub engine: EngineConfig,
    /// `tracing` filter directive, e.g. `"cham_core=debug"`.
    pub log_filter: Option<String>,
}

impl ChamPrefs {
    /// Config key the preferences live under.
    pub const KEY: &'static str = "cham";

    /// Loads the saved preferences, or defaults when none are stored.
    pub fn load<S: ConfigStore>(service: &ConfigService<S>) -> Result<Self, ConfigError> {
        service.load_or_default(Self::KEY)
    }

    /// Persists these preferences.
    pub fn save<S: ConfigStore>(&self, service: &ConfigService<S>) -> Result<(), ConfigError> {
        service.save(Self::KEY, self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::tests::MemoryStore;

    #[test]
    fn defaults_when_nothing_saved() {
        let service = ConfigService::new(MemoryStore::default());
        assert_eq!(ChamPrefs::load(&service).unwrap(), ChamPrefs::default());
    }

    #[test]
    fn saved_prefs_come_back() {
        let service = ConfigService::new(MemoryStore::default());
        let prefs = ChamPrefs {
            engine: EngineConfig::default()
                .with_workers(4)
                .with_expansion_depth_limit(Some(12)),
            log_filter: Some("cham_core=debug".into()),
        };
        prefs.save(&service).unwrap();
        assert!(service.store().data.borrow().contains_key("cham"));
        assert_eq!(ChamPrefs::load(&service).unwrap(), prefs);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let store = MemoryStore::default();
        store
            .save_raw(ChamPrefs::KEY, br#"{"engine": {"constant_partition": 64}}"#)
            .unwrap();
        let prefs = ChamPrefs::load(&ConfigService::new(store)).unwrap();
        assert_eq!(prefs.engine.constant_partition, 64);
        assert_eq!(prefs.engine.reducing_initial_partition, 8);
        assert_eq!(prefs.log_filter, None);
    }
}
