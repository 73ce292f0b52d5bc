//! Fan-Out Dispatch
//!
//! Runs one operation against every instance at once and waits for all of them
//! to settle. A failing instance is logged, downgraded to an empty result and
//! never cuts the others short.
//!
//! The engine adds no timeout of its own. An operation that never resolves
//! stalls the whole dispatch, so operations must be bounded upstream (the
//! remote client applies a per-request timeout).

use super::types::*;
use crate::instances::types::Instance;

use futures::FutureExt;
use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// Dispatches `operation` for every instance concurrently.
///
/// # Returns
/// * `Ok` with one [`PerInstanceResult`] per instance, in input order, no
///   matter in which order the operations completed or how many failed.
/// * `Err` only if an operation panicked. Every other operation is still
///   awaited before the error is returned.
pub async fn dispatch<T, E, F, Fut>(
    instances: &[Instance],
    operation: F,
) -> Result<Vec<PerInstanceResult<T>>, OrchestrationError>
where
    F: Fn(Instance) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    E: Display,
{
    if instances.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!("Dispatching to {} instance(s)", instances.len());

    let pending: Vec<_> = instances
        .iter()
        .map(|instance| {
            // Building the future may itself panic; that is caught here so the
            // remaining instances still get dispatched.
            let started = panic::catch_unwind(AssertUnwindSafe(|| operation(instance.clone())));
            async move {
                match started {
                    Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await.ok(),
                    Err(_) => None,
                }
            }
        })
        .collect();

    // join_all yields outputs in input order, which keeps each outcome paired
    // with the instance it was dispatched for.
    let settled = join_all(pending).await;

    let mut results = Vec::with_capacity(instances.len());
    let mut panicked: Option<String> = None;

    for (instance, outcome) in instances.iter().zip(settled) {
        match outcome {
            Some(Ok(items)) => {
                tracing::debug!("Instance {} returned {} item(s)", instance.name, items.len());
                results.push(PerInstanceResult::succeeded(instance.clone(), items));
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to query instance {}: {}", instance.name, e);
                results.push(PerInstanceResult::failed(instance.clone(), e.to_string()));
            }
            None => {
                tracing::error!("Operation for instance {} panicked", instance.name);
                panicked.get_or_insert_with(|| instance.name.clone());
            }
        }
    }

    if let Some(instance) = panicked {
        return Err(OrchestrationError::OperationPanicked { instance });
    }

    Ok(results)
}

/// Diagnostics of every failed instance, in dispatch order.
pub fn failures<T>(results: &[PerInstanceResult<T>]) -> Vec<&InstanceFailure> {
    results.iter().filter_map(|r| r.failure.as_ref()).collect()
}
