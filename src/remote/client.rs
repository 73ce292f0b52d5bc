//! Remote Document Service Client
//!
//! Thin request/response shims over the service API. Nothing here holds
//! per-instance state: every call takes the [`Instance`] it talks to, so the
//! fan-out engine can treat each call as `operation(instance)`.

use super::protocol::*;
use super::types::*;
use crate::instances::types::Instance;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for a single request when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{action} request to {instance} failed: {source}")]
    Transport {
        instance: String,
        action: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{action} on {instance} returned HTTP {status}")]
    Status {
        instance: String,
        action: String,
        status: StatusCode,
    },
    #[error("{action} on {instance} returned an unreadable body: {source}")]
    Decode {
        instance: String,
        action: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// HTTP status for non-2xx failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::Transport { source, .. } if source.is_timeout())
    }

    pub fn instance(&self) -> &str {
        match self {
            RemoteError::Transport { instance, .. }
            | RemoteError::Status { instance, .. }
            | RemoteError::Decode { instance, .. } => instance,
        }
    }
}

/// Performs one action against one instance and returns the `data` payload.
pub async fn perform_action<P, T>(
    http: &reqwest::Client,
    instance: &Instance,
    action: &str,
    params: &P,
    timeout: Duration,
) -> Result<T, RemoteError>
where
    P: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let url = instance.endpoint(&action_path(action));
    tracing::debug!("POST {} ({})", url, instance.name);

    let transport = |source: reqwest::Error| RemoteError::Transport {
        instance: instance.name.clone(),
        action: action.to_string(),
        source,
    };

    let response = http
        .post(url)
        .header(AUTHORIZATION, format!("Bearer {}", instance.api_key))
        .header(CONTENT_TYPE, "application/json")
        .json(params)
        .timeout(timeout)
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            instance: instance.name.clone(),
            action: action.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    let envelope: DataEnvelope<T> =
        serde_json::from_slice(&body).map_err(|source| RemoteError::Decode {
            instance: instance.name.clone(),
            action: action.to_string(),
            source,
        })?;

    Ok(envelope.data)
}

/// Shared HTTP plumbing for every instance.
///
/// Holds the connection pool and the per-request timeout only. The timeout is
/// what keeps one unresponsive instance from stalling a whole fan-out cycle.
#[derive(Clone)]
pub struct RemoteService {
    http: reqwest::Client,
    timeout: Duration,
    search_limit: usize,
}

impl RemoteService {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
            search_limit: SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn perform<P, T>(
        &self,
        instance: &Instance,
        action: &str,
        params: &P,
    ) -> Result<T, RemoteError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        perform_action(&self.http, instance, action, params, self.timeout).await
    }

    // --- Queries used by the fan-out core ---

    pub async fn search_documents(
        &self,
        instance: &Instance,
        query: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        let params = SearchParams {
            query,
            limit: self.search_limit,
        };
        let hits: Vec<SearchHit> = self
            .perform(instance, ACTION_DOCUMENTS_SEARCH, &params)
            .await?;
        Ok(hits.into_iter().map(|hit| hit.document).collect())
    }

    pub async fn recent_documents(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError> {
        self.perform(
            instance,
            ACTION_DOCUMENTS_VIEWED,
            &LimitParams {
                limit: RECENT_LIMIT,
            },
        )
        .await
    }

    pub async fn starred_documents(
        &self,
        instance: &Instance,
    ) -> Result<Vec<Document>, RemoteError> {
        let items: Vec<StarredItem> = self
            .perform(instance, ACTION_STARS_LIST, &LimitParams { limit: LIST_LIMIT })
            .await?;
        Ok(items.into_iter().map(|item| item.document).collect())
    }

    pub async fn list_documents(&self, instance: &Instance) -> Result<Vec<Document>, RemoteError> {
        self.perform(instance, ACTION_DOCUMENTS_LIST, &LimitParams { limit: LIST_LIMIT })
            .await
    }

    pub async fn collection_documents(
        &self,
        instance: &Instance,
        collection_id: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        self.perform(
            instance,
            ACTION_COLLECTIONS_DOCUMENTS,
            &IdLimitParams {
                id: collection_id,
                limit: LIST_LIMIT,
            },
        )
        .await
    }

    pub async fn list_collections(
        &self,
        instance: &Instance,
    ) -> Result<Vec<Collection>, RemoteError> {
        self.perform(instance, ACTION_COLLECTIONS_LIST, &LimitParams { limit: LIST_LIMIT })
            .await
    }

    pub async fn collection_info(
        &self,
        instance: &Instance,
        collection_id: &str,
    ) -> Result<Collection, RemoteError> {
        self.perform(instance, ACTION_COLLECTIONS_INFO, &IdParams { id: collection_id })
            .await
    }

    pub async fn document_info(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<Document, RemoteError> {
        self.perform(instance, ACTION_DOCUMENTS_INFO, &IdParams { id: document_id })
            .await
    }

    /// Returns `None` when the credential is rejected or the instance is unreachable.
    pub async fn authentication(&self, instance: &Instance) -> Option<Authentication> {
        match self.perform(instance, ACTION_AUTH_INFO, &Empty {}).await {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::warn!("Failed to fetch authentication from {}: {}", instance.url, e);
                None
            }
        }
    }

    // --- Mutations ---
    //
    // Star/unstar responses carry no payload on some server versions, so their
    // `data` is read as optional.

    pub async fn create_document(
        &self,
        instance: &Instance,
        title: &str,
        collection_id: &str,
        text: Option<&str>,
    ) -> Result<Document, RemoteError> {
        let params = CreateDocumentParams {
            title,
            collection_id,
            text: text.unwrap_or(""),
            publish: true,
        };
        self.perform(instance, ACTION_DOCUMENTS_CREATE, &params).await
    }

    pub async fn update_document(
        &self,
        instance: &Instance,
        document_id: &str,
        changes: &DocumentChanges,
    ) -> Result<Document, RemoteError> {
        let params = UpdateDocumentParams {
            id: document_id,
            changes,
            publish: true,
        };
        self.perform(instance, ACTION_DOCUMENTS_UPDATE, &params).await
    }

    pub async fn move_document(
        &self,
        instance: &Instance,
        document_id: &str,
        collection_id: &str,
    ) -> Result<Document, RemoteError> {
        let params = MoveDocumentParams {
            id: document_id,
            collection_id,
        };
        self.perform(instance, ACTION_DOCUMENTS_MOVE, &params).await
    }

    pub async fn star_document(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<(), RemoteError> {
        let _: Option<serde_json::Value> = self
            .perform(instance, ACTION_DOCUMENTS_STAR, &IdParams { id: document_id })
            .await?;
        Ok(())
    }

    pub async fn unstar_document(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<(), RemoteError> {
        let _: Option<serde_json::Value> = self
            .perform(instance, ACTION_DOCUMENTS_UNSTAR, &IdParams { id: document_id })
            .await?;
        Ok(())
    }

    pub async fn list_shares(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<Vec<Share>, RemoteError> {
        self.perform(instance, ACTION_SHARES_LIST, &DocumentIdParams { document_id })
            .await
    }

    pub async fn create_share(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<Share, RemoteError> {
        self.perform(instance, ACTION_SHARES_CREATE, &DocumentIdParams { document_id })
            .await
    }

    pub async fn list_comments(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<Vec<Comment>, RemoteError> {
        self.perform(instance, ACTION_COMMENTS_LIST, &DocumentIdParams { document_id })
            .await
    }

    pub async fn create_comment(
        &self,
        instance: &Instance,
        document_id: &str,
        text: &str,
    ) -> Result<Comment, RemoteError> {
        let params = CreateCommentParams {
            document_id,
            data: RichTextNode::paragraph_doc(text),
        };
        self.perform(instance, ACTION_COMMENTS_CREATE, &params).await
    }

    pub async fn list_revisions(
        &self,
        instance: &Instance,
        document_id: &str,
    ) -> Result<Vec<Revision>, RemoteError> {
        self.perform(
            instance,
            ACTION_REVISIONS_LIST,
            &DocumentIdLimitParams {
                document_id,
                limit: REVISIONS_LIMIT,
            },
        )
        .await
    }

    pub async fn revision_info(
        &self,
        instance: &Instance,
        revision_id: &str,
    ) -> Result<Revision, RemoteError> {
        self.perform(instance, ACTION_REVISIONS_INFO, &IdParams { id: revision_id })
            .await
    }
}

impl Default for RemoteService {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}
