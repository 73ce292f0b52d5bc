use super::types::Document;
use crate::instances::types::Instance;

/// Browser URL of a document.
///
/// The service usually returns a relative `url` such as `/doc/title-abc123`.
/// Absolute URLs are used verbatim, relative ones are joined onto the owning
/// instance, and a missing url falls back to `/doc/{id}`.
pub fn document_url(instance: &Instance, document: &Document) -> String {
    match document.url.as_deref().map(str::trim) {
        Some(url) if has_scheme(url) => url.to_string(),
        Some(url) if !url.is_empty() => {
            if url.starts_with('/') {
                instance.endpoint(url)
            } else {
                instance.endpoint(&format!("/{}", url))
            }
        }
        _ => instance.endpoint(&format!("/doc/{}", document.id)),
    }
}

/// `scheme ":" ...` per RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
