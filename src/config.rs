use std::env;

pub const DEFAULT_DB_PATH: &str = "edufinder.db";

/// Server settings that are not part of the Leptos options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: String,
    /// Write the demo catalog when the colleges table is empty.
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: DEFAULT_DB_PATH.to_string(),
            seed_catalog: true,
        }
    }
}

impl AppConfig {
    /// Reads `EDUFINDER_DB` and `EDUFINDER_SEED`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            database_path: lookup("EDUFINDER_DB")
                .filter(|path| !path.trim().is_empty())
                .unwrap_or(defaults.database_path),
            seed_catalog: lookup("EDUFINDER_SEED")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.seed_catalog),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[("EDUFINDER_DB", "/tmp/colleges.db"), ("EDUFINDER_SEED", "off")]);
        assert_eq!(config.database_path, "/tmp/colleges.db");
        assert!(!config.seed_catalog);
    }

    #[test]
    fn blank_path_falls_back() {
        let config = config_from(&[("EDUFINDER_DB", "  "), ("EDUFINDER_SEED", "yes")]);
        assert_eq!(config.database_path, DEFAULT_DB_PATH);
        assert!(config.seed_catalog);
    }
}
