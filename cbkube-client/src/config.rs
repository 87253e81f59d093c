use envconfig::Envconfig;

/// Provider-level settings, loaded once from the environment and passed by
/// reference into every engine constructor. Nothing here is mutated after
/// construction.
#[derive(Envconfig, Clone, Debug)]
pub struct ProviderConfig {
    /// Namespace used when a caller does not pick one explicitly.
    /// Env: CBK_NAMESPACE
    #[envconfig(from = "CBK_NAMESPACE", default = "default")]
    pub namespace: String,

    /// Field manager name under which server-side-apply patches claim
    /// ownership.
    /// Env: CBK_FIELD_MANAGER
    #[envconfig(from = "CBK_FIELD_MANAGER", default = "cbkube")]
    pub field_manager: String,

    /// Override conflicting field ownership on apply.
    /// Env: CBK_FORCE_CONFLICTS
    #[envconfig(from = "CBK_FORCE_CONFLICTS", default = "true")]
    pub force_conflicts: bool,

    /// Offline mode: every cluster operation fails fast; manifest rendering
    /// and CRD generation keep working.
    /// Env: CBK_OFFLINE
    #[envconfig(from = "CBK_OFFLINE", default = "false")]
    pub offline: bool,

    #[envconfig(nested)]
    pub wait: WaitConfig,
}

#[derive(Envconfig, Clone, Debug)]
pub struct WaitConfig {
    /// Seconds to wait for delete confirmation. 0 checks once and returns
    /// immediately; negative waits up to one week.
    /// Env: CBK_DELETE_TIMEOUT_SECS
    #[envconfig(from = "CBK_DELETE_TIMEOUT_SECS", default = "300")]
    pub delete_timeout_secs: i64,

    /// Seconds between existence checks while waiting.
    /// Env: CBK_POLL_INTERVAL_SECS
    #[envconfig(from = "CBK_POLL_INTERVAL_SECS", default = "5")]
    pub poll_interval_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            namespace: "default".into(),
            field_manager: "cbkube".into(),
            force_conflicts: true,
            offline: false,
            wait: WaitConfig::default(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self { delete_timeout_secs: 300, poll_interval_secs: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_env_defaults() {
        let cfg = ProviderConfig::default();
        assert_eq!(cfg.namespace, "default");
        assert_eq!(cfg.field_manager, "cbkube");
        assert!(cfg.force_conflicts);
        assert!(!cfg.offline);
        assert_eq!(cfg.wait.delete_timeout_secs, 300);
        assert_eq!(cfg.wait.poll_interval_secs, 5);
    }

    #[test]
    fn init_from_hashmap_overrides() {
        let mut env = std::collections::HashMap::new();
        env.insert("CBK_FIELD_MANAGER".to_string(), "terraform".to_string());
        env.insert("CBK_OFFLINE".to_string(), "true".to_string());
        env.insert("CBK_DELETE_TIMEOUT_SECS".to_string(), "-1".to_string());
        let cfg = ProviderConfig::init_from_hashmap(&env).unwrap();
        assert_eq!(cfg.field_manager, "terraform");
        assert!(cfg.offline);
        assert_eq!(cfg.wait.delete_timeout_secs, -1);
        // untouched fields keep their defaults
        assert_eq!(cfg.namespace, "default");
        assert_eq!(cfg.wait.poll_interval_secs, 5);
    }
}
