//! Query Session
//!
//! Owns the decision of what a cycle runs, never when. A presentation layer
//! calls [`QuerySession::run`] on every text change and
//! [`QuerySession::refresh`] after a mutation.
//!
//! Cycles already in flight are not cancelled. Each cycle is stamped with a
//! sequence number so the caller can drop a result that arrives after a newer
//! one (see [`super::state::DisplayedView`]).

use super::types::*;
use crate::aggregate::aggregator::aggregate;
use crate::aggregate::types::{AggregatedView, AggregationMode};
use crate::fanout::engine::{dispatch, failures};
use crate::fanout::types::OrchestrationError;
use crate::instances::registry::InstanceSource;
use crate::remote::source::DocumentSource;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

pub struct QuerySession {
    instances: Arc<dyn InstanceSource>,
    source: Arc<dyn DocumentSource>,
    sequence: AtomicU64,
    last_query: RwLock<Option<QueryKind>>,
}

impl QuerySession {
    pub fn new(instances: Arc<dyn InstanceSource>, source: Arc<dyn DocumentSource>) -> Arc<Self> {
        Arc::new(Self {
            instances,
            source,
            sequence: AtomicU64::new(0),
            last_query: RwLock::new(None),
        })
    }

    /// Sequence number of the most recently started cycle (0 before the first).
    pub fn current_seq(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub async fn last_query(&self) -> Option<QueryKind> {
        self.last_query.read().await.clone()
    }

    /// Runs one full fan-out and aggregation cycle.
    ///
    /// The instance list is read fresh for every cycle, so credentials are
    /// never reused from an earlier one. A blank search resolves at once with
    /// an empty view and no network traffic.
    pub async fn run(&self, query: QueryKind) -> Result<CycleOutcome, OrchestrationError> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_query.write().await = Some(query.clone());

        let instances = self.instances.snapshot().await;
        let mode = AggregationMode::for_instance_count(instances.len());

        if query.is_blank() {
            tracing::debug!("Cycle {}: blank query, nothing dispatched", seq);
            return Ok(CycleOutcome {
                seq,
                query,
                dispatched: false,
                view: AggregatedView::empty(mode),
                failures: Vec::new(),
            });
        }

        tracing::debug!(
            "Cycle {}: {} across {} instance(s)",
            seq,
            query.label(),
            instances.len()
        );

        let results = dispatch(&instances, |instance| {
            let source = self.source.clone();
            let query = query.clone();
            async move {
                match &query {
                    QueryKind::Search(text) => source.search(&instance, text).await,
                    QueryKind::Starred => source.starred(&instance).await,
                    QueryKind::Recent => source.recent(&instance).await,
                }
            }
        })
        .await?;

        let view = aggregate(&results, mode);
        let diagnostics: Vec<_> = failures(&results).into_iter().cloned().collect();

        tracing::info!(
            "Cycle {} ({}): {} item(s) from {} instance(s), {} failure(s)",
            seq,
            query.label(),
            view.total_count(),
            instances.len(),
            diagnostics.len()
        );

        Ok(CycleOutcome {
            seq,
            query,
            dispatched: true,
            view,
            failures: diagnostics,
        })
    }

    /// Re-runs the last query against the current instance list.
    ///
    /// Returns `None` if no query has been run yet.
    pub async fn refresh(&self) -> Option<Result<CycleOutcome, OrchestrationError>> {
        let query = self.last_query().await?;
        tracing::debug!("Refreshing {}", query.label());
        Some(self.run(query).await)
    }
}
