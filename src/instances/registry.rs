//! Instance Registry
//!
//! Holds the configured instances in insertion order. Query cycles never keep a
//! reference to the live list: they take a [`InstanceRegistry::snapshot`] when
//! they start, so a credential edited or removed mid-cycle only affects the
//! next cycle.

use super::types::Instance;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("instance '{0}' is already configured")]
    DuplicateName(String),
    #[error("instance '{0}' is not configured")]
    UnknownInstance(String),
    #[error("instance name must not be empty")]
    EmptyName,
    #[error("instance '{name}' has an invalid url '{url}'")]
    InvalidUrl { name: String, url: String },
    #[error("failed to read instances from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse instances from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand the fan-out core the current instance list.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    async fn snapshot(&self) -> Vec<Instance>;
}

/// In-memory registry keyed by instance name.
pub struct InstanceRegistry {
    instances: RwLock<Vec<Instance>>,
}

impl InstanceRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Builds a registry from an already validated list.
    pub fn from_instances(instances: Vec<Instance>) -> Result<Arc<Self>, RegistryError> {
        let mut validated: Vec<Instance> = Vec::with_capacity(instances.len());
        for instance in instances {
            let instance = validate(instance.normalized())?;
            if validated.iter().any(|i| i.name == instance.name) {
                return Err(RegistryError::DuplicateName(instance.name));
            }
            validated.push(instance);
        }

        Ok(Arc::new(Self {
            instances: RwLock::new(validated),
        }))
    }

    /// Loads a JSON array of `{ "name", "url", "apiKey" }` objects.
    pub fn load_from_file(path: &Path) -> Result<Arc<Self>, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let instances: Vec<Instance> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let registry = Self::from_instances(instances)?;
        tracing::info!("Loaded instances from {}", path.display());
        Ok(registry)
    }

    pub async fn add(&self, instance: Instance) -> Result<(), RegistryError> {
        let instance = validate(instance.normalized())?;
        let mut instances = self.instances.write().await;
        if instances.iter().any(|i| i.name == instance.name) {
            return Err(RegistryError::DuplicateName(instance.name));
        }

        tracing::info!("Added instance {} ({})", instance.name, instance.url);
        instances.push(instance);
        Ok(())
    }

    /// Replaces the instance stored under `name`, keeping its position.
    pub async fn update(&self, name: &str, instance: Instance) -> Result<(), RegistryError> {
        let instance = validate(instance.normalized())?;
        let mut instances = self.instances.write().await;

        if instance.name != name && instances.iter().any(|i| i.name == instance.name) {
            return Err(RegistryError::DuplicateName(instance.name));
        }

        let slot = instances
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))?;
        *slot = instance;
        Ok(())
    }

    pub async fn remove(&self, name: &str) -> Result<Instance, RegistryError> {
        let mut instances = self.instances.write().await;
        let idx = instances
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))?;

        tracing::info!("Removed instance {}", name);
        Ok(instances.remove(idx))
    }

    pub async fn get(&self, name: &str) -> Option<Instance> {
        self.instances
            .read()
            .await
            .iter()
            .find(|i| i.name == name)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.instances.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.instances.read().await.is_empty()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self {
            instances: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InstanceSource for InstanceRegistry {
    async fn snapshot(&self) -> Vec<Instance> {
        self.instances.read().await.clone()
    }
}

fn validate(instance: Instance) -> Result<Instance, RegistryError> {
    if instance.name.trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if !(instance.url.starts_with("http://") || instance.url.starts_with("https://")) {
        return Err(RegistryError::InvalidUrl {
            name: instance.name,
            url: instance.url,
        });
    }
    Ok(instance)
}
