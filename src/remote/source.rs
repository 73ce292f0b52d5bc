//! Document Source Seam
//!
//! The three read operations the fan-out core dispatches per instance. The
//! HTTP-backed [`RemoteService`] is the production implementation; tests plug
//! in scripted sources.

use super::client::{RemoteError, RemoteService};
use super::types::Document;
use crate::instances::types::Instance;

use async_trait::async_trait;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn search(&self, instance: &Instance, query: &str) -> Result<Vec<Document>, RemoteError>;

    async fn starred(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError>;

    async fn recent(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError>;
}

#[async_trait]
impl DocumentSource for RemoteService {
    async fn search(&self, instance: &Instance, query: &str) -> Result<Vec<Document>, RemoteError> {
        self.search_documents(instance, query).await
    }

    async fn starred(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError> {
        self.starred_documents(instance).await
    }

    async fn recent(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError> {
        self.recent_documents(instance).await
    }
}
