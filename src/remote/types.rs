//! Remote Entity Types
//!
//! Entities returned by the document service. Field names follow the service's
//! camelCase JSON; unknown fields are ignored so newer server versions keep
//! deserializing.

use serde::{Deserialize, Serialize};

/// Subtitle length used by list views.
pub const SNIPPET_CHARS: usize = 50;

/// A document as seen by one instance.
///
/// `id` is only unique within its instance. Two instances may hand out the same
/// id, so any cross-instance bookkeeping must pair it with the owning instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_id: Option<String>,
    #[serde(default)]
    pub collection_id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub archived_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Document {
    /// First `max_chars` characters of the body, with an ellipsis when cut.
    pub fn snippet(&self, max_chars: usize) -> String {
        let text = self.text.as_deref().unwrap_or("");
        let mut out: String = text.chars().take(max_chars).collect();
        if text.chars().count() > max_chars {
            out.push_str("...");
        }
        out
    }

    /// Case-insensitive substring match against title and body.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .text
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
    }
}

/// Keeps the documents whose title or text contains `needle`.
///
/// A blank needle keeps everything, which is what a list view shows before
/// the user has typed anything.
pub fn filter_documents(documents: &[Document], needle: &str) -> Vec<Document> {
    let needle = needle.trim();
    if needle.is_empty() {
        return documents.to_vec();
    }
    documents
        .iter()
        .filter(|doc| doc.matches_text(needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSort {
    pub field: String,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort: Option<CollectionSort>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub id: String,
    pub document_id: String,
    pub url: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A node of the rich-text tree the service stores comments as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<RichTextNode>,
}

impl RichTextNode {
    /// `doc > paragraph > text`, the shape a plain-text comment is posted as.
    pub fn paragraph_doc(text: &str) -> Self {
        Self {
            kind: "doc".to_string(),
            text: None,
            content: vec![Self {
                kind: "paragraph".to_string(),
                text: None,
                content: vec![Self {
                    kind: "text".to_string(),
                    text: Some(text.to_string()),
                    content: Vec::new(),
                }],
            }],
        }
    }

    /// Concatenated text of every leaf, paragraphs separated by newlines.
    pub fn plain_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        let sep = if self.kind == "doc" { "\n" } else { "" };
        self.content
            .iter()
            .map(RichTextNode::plain_text)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub document_id: String,
    pub data: RichTextNode,
    pub created_at: String,
    pub created_by: Author,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub created_at: String,
    pub created_by: Author,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    pub user: AuthenticatedUser,
}
