//! Runtime Settings
//!
//! Reads the instance list location, the single-instance fallback credential and
//! request tuning from environment variables.

use crate::instances::registry::InstanceRegistry;
use crate::instances::types::Instance;
use crate::remote::client::{DEFAULT_TIMEOUT, RemoteService};
use crate::remote::protocol::SEARCH_LIMIT;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const ENV_INSTANCES: &str = "OUTLINE_INSTANCES";
pub const ENV_API_KEY: &str = "OUTLINE_API_KEY";
pub const ENV_INSTANCE_URL: &str = "OUTLINE_INSTANCE_URL";
pub const ENV_TIMEOUT_MS: &str = "OUTLINE_TIMEOUT_MS";
pub const ENV_SEARCH_LIMIT: &str = "OUTLINE_SEARCH_LIMIT";

/// Name given to the instance built from `OUTLINE_API_KEY`.
pub const FALLBACK_INSTANCE_NAME: &str = "Outline";

#[derive(Debug, Clone)]
pub struct Settings {
    pub instances_file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub instance_url: Option<String>,
    pub timeout: Duration,
    pub search_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instances_file: None,
            api_key: None,
            instance_url: None,
            timeout: DEFAULT_TIMEOUT,
            search_limit: SEARCH_LIMIT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key/value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        settings.instances_file = get(ENV_INSTANCES).map(PathBuf::from);
        settings.api_key = get(ENV_API_KEY);
        settings.instance_url = get(ENV_INSTANCE_URL);

        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds", ENV_TIMEOUT_MS))?;
            settings.timeout = Duration::from_millis(ms);
        }

        if let Some(raw) = get(ENV_SEARCH_LIMIT) {
            settings.search_limit = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer", ENV_SEARCH_LIMIT))?;
        }

        Ok(settings)
    }

    /// The instance list file wins; otherwise a lone API key yields a single instance.
    pub fn build_registry(&self) -> Result<Arc<InstanceRegistry>> {
        if let Some(path) = &self.instances_file {
            return Ok(InstanceRegistry::load_from_file(path)?);
        }

        if let Some(api_key) = &self.api_key {
            let instance = Instance::new(
                FALLBACK_INSTANCE_NAME,
                self.instance_url.as_deref().unwrap_or(""),
                api_key.clone(),
            );
            return Ok(InstanceRegistry::from_instances(vec![instance])?);
        }

        anyhow::bail!(
            "no instances configured: set {} or {}",
            ENV_INSTANCES,
            ENV_API_KEY
        )
    }

    pub fn remote_service(&self) -> RemoteService {
        RemoteService::new(self.timeout).with_search_limit(self.search_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::registry::InstanceSource;
    use crate::instances::types::DEFAULT_INSTANCE_URL;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();

        assert!(settings.instances_file.is_none());
        assert!(settings.api_key.is_none());
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.search_limit, 20);
    }

    #[test]
    fn test_tuning_values_are_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_SEARCH_LIMIT, "5"),
        ]))
        .unwrap();

        assert_eq!(settings.timeout, Duration::from_millis(2500));
        assert_eq!(settings.search_limit, 5);
        assert_eq!(settings.remote_service().timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let result = Settings::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let settings = Settings::from_lookup(lookup(&[(ENV_API_KEY, "  ")])).unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_registry_requires_some_instance() {
        let settings = Settings::default();
        assert!(settings.build_registry().is_err());
    }

    #[tokio::test]
    async fn test_api_key_fallback_uses_default_url() {
        let settings = Settings::from_lookup(lookup(&[(ENV_API_KEY, "secret")])).unwrap();

        let registry = settings.build_registry().unwrap();
        let snapshot = registry.snapshot().await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, FALLBACK_INSTANCE_NAME);
        assert_eq!(snapshot[0].url, DEFAULT_INSTANCE_URL);
        assert_eq!(snapshot[0].api_key, "secret");
    }

    #[tokio::test]
    async fn test_api_key_fallback_honors_instance_url() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_API_KEY, "secret"),
            (ENV_INSTANCE_URL, "https://wiki.example.com/"),
        ]))
        .unwrap();

        let snapshot = settings.build_registry().unwrap().snapshot().await;
        assert_eq!(snapshot[0].url, "https://wiki.example.com");
    }
}
