//! Remote Service Protocol
//!
//! Action names and request/response bodies for the document service's RPC-style API.
//!
//! Every action is `POST {base}/api/{action}` with a JSON body and a bearer token.
//! Successful responses wrap their payload in a `data` field.

use super::types::{Document, RichTextNode};
use serde::{Deserialize, Serialize};

// --- Actions ---

pub const ACTION_AUTH_INFO: &str = "auth.info";
pub const ACTION_DOCUMENTS_SEARCH: &str = "documents.search";
pub const ACTION_DOCUMENTS_LIST: &str = "documents.list";
pub const ACTION_DOCUMENTS_INFO: &str = "documents.info";
pub const ACTION_DOCUMENTS_VIEWED: &str = "documents.viewed";
pub const ACTION_DOCUMENTS_CREATE: &str = "documents.create";
pub const ACTION_DOCUMENTS_UPDATE: &str = "documents.update";
pub const ACTION_DOCUMENTS_MOVE: &str = "documents.move";
pub const ACTION_DOCUMENTS_STAR: &str = "documents.star";
pub const ACTION_DOCUMENTS_UNSTAR: &str = "documents.unstar";
pub const ACTION_STARS_LIST: &str = "stars.list";
pub const ACTION_COLLECTIONS_LIST: &str = "collections.list";
pub const ACTION_COLLECTIONS_INFO: &str = "collections.info";
pub const ACTION_COLLECTIONS_DOCUMENTS: &str = "collections.documents";
pub const ACTION_SHARES_LIST: &str = "shares.list";
pub const ACTION_SHARES_CREATE: &str = "shares.create";
pub const ACTION_COMMENTS_LIST: &str = "comments.list";
pub const ACTION_COMMENTS_CREATE: &str = "comments.create";
pub const ACTION_REVISIONS_LIST: &str = "revisions.list";
pub const ACTION_REVISIONS_INFO: &str = "revisions.info";

// --- Page sizes ---

pub const SEARCH_LIMIT: usize = 20;
pub const RECENT_LIMIT: usize = 50;
pub const REVISIONS_LIMIT: usize = 50;
pub const LIST_LIMIT: usize = 100;

/// Path of an action relative to the instance base URL.
pub fn action_path(action: &str) -> String {
    format!("/api/{}", action)
}

// --- Envelopes ---

/// The `{ "data": ... }` wrapper every successful response carries.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// One hit of `documents.search`. Results arrive in ranking order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub ranking: f64,
    #[serde(default)]
    pub context: String,
    pub document: Document,
}

/// One entry of `stars.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarredItem {
    pub document: Document,
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub struct Empty {}

#[derive(Debug, Serialize)]
pub struct LimitParams {
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct IdParams<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IdLimitParams<'a> {
    pub id: &'a str,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentIdParams<'a> {
    pub document_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentIdLimitParams<'a> {
    pub document_id: &'a str,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentParams<'a> {
    pub title: &'a str,
    pub collection_id: &'a str,
    pub text: &'a str,
    pub publish: bool,
}

/// Fields of a document that `documents.update` may change. Unset fields are
/// left untouched on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateDocumentParams<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub changes: &'a DocumentChanges,
    pub publish: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDocumentParams<'a> {
    pub id: &'a str,
    pub collection_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentParams<'a> {
    pub document_id: &'a str,
    pub data: RichTextNode,
}
