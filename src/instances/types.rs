use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL used when an instance is configured without one.
pub const DEFAULT_INSTANCE_URL: &str = "https://app.getoutline.com";

/// One configured deployment of the document service.
///
/// `name` is the registry key. `url` is stored without a trailing slash so that
/// endpoint paths can be appended directly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl Instance {
    pub fn new(name: impl Into<String>, url: &str, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: normalize_base_url(url),
            api_key: api_key.into(),
        }
    }

    /// Returns a copy with the base URL normalized. Used after deserializing
    /// user-supplied configuration.
    pub fn normalized(mut self) -> Self {
        self.url = normalize_base_url(&self.url);
        self
    }

    /// Joins an absolute path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

// The credential must never reach the logs.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_INSTANCE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
