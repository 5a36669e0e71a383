//! Environment configuration for the API binary
use archgrade_quality::{ProfileError, ScoringProfile};
use std::env;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_PROFILE: &str = "standard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Listen address
    pub addr: String,
    /// Preset name or path to a YAML profile
    pub profile: String,
}

impl ApiConfig {
    /// Read `ARCHGRADE_ADDR` and `ARCHGRADE_PROFILE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            addr: value("ARCHGRADE_ADDR", DEFAULT_ADDR),
            profile: value("ARCHGRADE_PROFILE", DEFAULT_PROFILE),
        }
    }

    pub fn load_profile(&self) -> Result<ScoringProfile, ProfileError> {
        ScoringProfile::load(&self.profile)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset_or_blank() {
        let config = ApiConfig::from_lookup(|key| match key {
            "ARCHGRADE_PROFILE" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(|key| match key {
            "ARCHGRADE_ADDR" => Some("127.0.0.1:9000".to_string()),
            "ARCHGRADE_PROFILE" => Some("strict".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.load_profile().unwrap().name, "strict@1.0");
    }
}
