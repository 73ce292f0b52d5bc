use crate::aggregate::types::{AggregatedView, Feedback};
use crate::fanout::types::InstanceFailure;
use crate::remote::types::Document;

/// The logical operation a cycle fans out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    Search(String),
    Starred,
    Recent,
}

impl QueryKind {
    /// A search without text is never sent to any instance.
    pub fn is_blank(&self) -> bool {
        matches!(self, QueryKind::Search(text) if text.trim().is_empty())
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Search(_) => "search",
            QueryKind::Starred => "starred",
            QueryKind::Recent => "recent",
        }
    }

    /// Notification title for an instance that failed this query.
    pub fn failure_title(&self, instance_name: &str) -> String {
        match self {
            QueryKind::Search(_) => format!("Failed to search in {}", instance_name),
            QueryKind::Starred => {
                format!("Failed to load starred documents from {}", instance_name)
            }
            QueryKind::Recent => format!("Failed to load recent documents from {}", instance_name),
        }
    }
}

/// Everything a presentation layer needs after one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    /// Monotonically increasing per session. Larger means newer.
    pub seq: u64,
    pub query: QueryKind,
    /// `false` when the query was blank and nothing was sent.
    pub dispatched: bool,
    pub view: AggregatedView<Document>,
    pub failures: Vec<InstanceFailure>,
}

impl CycleOutcome {
    /// `None` for a cycle that never dispatched: "not queried" is not "no matches".
    pub fn feedback(&self) -> Option<Feedback> {
        self.dispatched.then(|| self.view.feedback())
    }

    pub fn failure_titles(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| self.query.failure_title(&f.instance))
            .collect()
    }
}
