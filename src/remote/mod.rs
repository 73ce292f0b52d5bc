//! Remote Document Service Module
//!
//! Per-instance request/response shims for the note/wiki API.
//!
//! ## Overview
//! Every remote action is one authenticated `POST {base}/api/{action}` with a
//! JSON body, answered by a JSON `{ "data": ... }` envelope. A non-2xx status
//! becomes [`client::RemoteError::Status`].
//!
//! ## Submodules
//! - **`client`**: `perform_action` and the typed wrappers for each action.
//! - **`protocol`**: action names, page sizes and request/response bodies.
//! - **`source`**: the `DocumentSource` trait consumed by query cycles.
//! - **`types`**: remote entities (documents, collections, comments, ...).
//! - **`url`**: browser URL resolution for documents.

pub mod client;
pub mod protocol;
pub mod source;
pub mod types;
pub mod url;
