//! Instance Configuration Module
//!
//! Describes the remote document-service deployments a query cycle fans out to.
//!
//! ## Core Concepts
//! - **Instance**: display name (unique key), base URL and API credential.
//! - **Registry**: ordered, in-memory list of instances. The order defines the
//!   order of grouped results.
//! - **Snapshot**: each cycle reads the list once at its start and never mutates it.

pub mod registry;
pub mod types;
