//! Multi-Instance Document Search Library
//!
//! Queries one or more deployments of a note/wiki service and merges their
//! answers into a single result set.
//!
//! ## Architecture Modules
//! - **`instances`**: configured deployments (name, base URL, credential) and
//!   the registry that hands out a snapshot of them per query cycle.
//! - **`remote`**: per-instance request shims for the service API
//!   (`POST {base}/api/{action}` with a bearer token).
//! - **`fanout`**: runs one operation against every instance concurrently,
//!   isolating per-instance failures and keeping input order.
//! - **`aggregate`**: merges per-instance results into a flat list or into
//!   sections per instance, with a total count for user feedback.
//! - **`cycle`**: the query trigger discipline: blank-query short circuit,
//!   refresh, and sequence numbers for discarding stale results.
//! - **`config`**: environment-driven settings.

pub mod aggregate;
pub mod config;
pub mod cycle;
pub mod fanout;
pub mod instances;
pub mod remote;
