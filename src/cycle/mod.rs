//! Query Cycle Module
//!
//! Drives how often the fan-out engine runs.
//!
//! ## Workflow
//! 1. **Trigger**: the caller passes the query (search text, starred or recent).
//! 2. **Short circuit**: a blank search resets the view without touching the network.
//! 3. **Fan-out**: the current instance snapshot is queried concurrently.
//! 4. **Aggregate**: results are flattened (one instance) or grouped (several).
//! 5. **Apply**: the caller hands the outcome to a `DisplayedView`, which keeps
//!    only the newest cycle.
//!
//! ## Submodules
//! - **`session`**: runs and refreshes cycles.
//! - **`state`**: sequence-based staleness rejection for displayed results.
//! - **`types`**: query kinds and cycle outcomes.

pub mod session;
pub mod state;
pub mod types;
