//! Result Aggregator Module
//!
//! Turns the per-instance outcomes of a dispatch into the single view a caller
//! renders: a flat list for one instance, or sections per instance with a total
//! count when several are configured.
//!
//! Whether a query was issued at all is the caller's concern. An empty view here
//! always means "queried, nothing matched".

pub mod aggregator;
pub mod types;
