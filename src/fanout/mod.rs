//! Fan-Out Query Engine
//!
//! Issues the same logical query to every configured instance concurrently.
//!
//! ## Guarantees
//! - **All-settle join**: the engine waits for every instance; it never stops at
//!   the first failure or the first success.
//! - **Isolation**: an instance's error becomes an empty result plus a diagnostic
//!   naming that instance.
//! - **Stable order**: results come back in input instance order.
//!
//! The engine holds no locks and shares no mutable state between instances.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;
