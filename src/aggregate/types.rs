use crate::instances::types::Instance;
use serde::{Deserialize, Serialize};

/// How per-instance results are merged for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// One flat list, no section per instance.
    Flatten,
    /// One section per instance that returned at least one item.
    Group,
}

impl AggregationMode {
    /// Grouping only makes sense when more than one instance is in play.
    pub fn for_instance_count(count: usize) -> Self {
        if count > 1 {
            AggregationMode::Group
        } else {
            AggregationMode::Flatten
        }
    }
}

/// An item paired with the instance it came from. Item ids are only unique per
/// instance, so the pair is the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedItem<T> {
    pub item: T,
    pub instance: Instance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGroup<T> {
    pub instance: Instance,
    pub items: Vec<T>,
}

/// Unified result of one query cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedView<T> {
    Flat(Vec<OwnedItem<T>>),
    Grouped {
        groups: Vec<InstanceGroup<T>>,
        total_count: usize,
    },
}

impl<T> AggregatedView<T> {
    pub fn empty(mode: AggregationMode) -> Self {
        match mode {
            AggregationMode::Flatten => AggregatedView::Flat(Vec::new()),
            AggregationMode::Group => AggregatedView::Grouped {
                groups: Vec::new(),
                total_count: 0,
            },
        }
    }

    pub fn mode(&self) -> AggregationMode {
        match self {
            AggregatedView::Flat(_) => AggregationMode::Flatten,
            AggregatedView::Grouped { .. } => AggregationMode::Group,
        }
    }

    /// Number of items across all instances.
    pub fn total_count(&self) -> usize {
        match self {
            AggregatedView::Flat(items) => items.len(),
            AggregatedView::Grouped { total_count, .. } => *total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Every item with its owning instance, in display order.
    pub fn entries(&self) -> Vec<(&T, &Instance)> {
        match self {
            AggregatedView::Flat(items) => items.iter().map(|o| (&o.item, &o.instance)).collect(),
            AggregatedView::Grouped { groups, .. } => groups
                .iter()
                .flat_map(|g| g.items.iter().map(move |item| (item, &g.instance)))
                .collect(),
        }
    }

    pub fn feedback(&self) -> Feedback {
        match self.total_count() {
            0 => Feedback::NoMatches,
            n => Feedback::Found(n),
        }
    }
}

/// What the user is told once a query cycle has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Found(usize),
    NoMatches,
}

impl Feedback {
    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Found(_))
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Found(n) => format!("Found {} matching documents!", n),
            Feedback::NoMatches => "Found no matching documents!".to_string(),
        }
    }
}
