use crate::config::ResolutionLogConfig;
use crate::core::SpecializationSignal;

pub const WHITELIST_PREFIX_VAR: &str = "FUNCTIONS_SERVICE_RESOLUTION_LOGS_WHITELIST_TYPE_PREFIX";
pub const LOG_ENABLED_VAR: &str = "FUNCTIONS_SERVICE_RESOLUTION_LOG_ENABLED";

/// `"1"` (exactly, ignoring case) turns the flag on; anything else, including blank, is off.
pub fn is_enabled_value(value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => v.eq_ignore_ascii_case("1"),
        _ => false,
    }
}

impl ResolutionLogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 從任意的鍵值來源讀取設定，方便測試
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_prefixes = lookup(WHITELIST_PREFIX_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            enabled: is_enabled_value(lookup(LOG_ENABLED_VAR).as_deref()),
            allowed_prefixes,
        }
    }
}

/// Re-reads an environment variable each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvActivationSignal {
    var_name: String,
}

impl EnvActivationSignal {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvActivationSignal {
    fn default() -> Self {
        Self::new(LOG_ENABLED_VAR)
    }
}

impl SpecializationSignal for EnvActivationSignal {
    fn has_specialized(&self) -> bool {
        is_enabled_value(std::env::var(&self.var_name).ok().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_absent_variables_mean_disabled_and_unfiltered() {
        let config = ResolutionLogConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ResolutionLogConfig::default());
    }

    #[test]
    fn test_reads_prefix_list() {
        let config = ResolutionLogConfig::from_lookup(lookup_from(&[(
            WHITELIST_PREFIX_VAR,
            "Microsoft.Azure.WebJobs, System.",
        )]));
        assert_eq!(config.allowed_prefixes, vec!["Microsoft.Azure.WebJobs", "System."]);
        assert!(!config.enabled);
    }

    #[test]
    fn test_blank_prefix_list_is_ignored() {
        let config = ResolutionLogConfig::from_lookup(lookup_from(&[(WHITELIST_PREFIX_VAR, "   ")]));
        assert!(config.allowed_prefixes.is_empty());
    }

    #[test]
    fn test_enabled_flag_values() {
        assert!(is_enabled_value(Some("1")));
        assert!(!is_enabled_value(Some("true")));
        assert!(!is_enabled_value(Some("0")));
        assert!(!is_enabled_value(Some(" ")));
        assert!(!is_enabled_value(None));
    }

    #[test]
    fn test_env_signal_rereads_variable() {
        let signal = EnvActivationSignal::new("STARTUP_DIAG_TEST_SPECIALIZED");
        assert!(!signal.has_specialized());

        std::env::set_var("STARTUP_DIAG_TEST_SPECIALIZED", "1");
        assert!(signal.has_specialized());

        std::env::remove_var("STARTUP_DIAG_TEST_SPECIALIZED");
        assert!(!signal.has_specialized());
    }
}
