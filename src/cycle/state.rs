use super::types::CycleOutcome;

/// The outcome currently on screen.
///
/// Outcomes are applied in completion order, but one older than the outcome
/// already shown is discarded. A blank-query reset carries a fresh sequence
/// number too, so a search still in flight cannot overwrite it.
#[derive(Debug, Default)]
pub struct DisplayedView {
    current: Option<CycleOutcome>,
}

impl DisplayedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `outcome` replaced the displayed one.
    pub fn apply(&mut self, outcome: CycleOutcome) -> bool {
        if let Some(current) = &self.current
            && outcome.seq < current.seq
        {
            tracing::debug!(
                "Discarding stale cycle {} (showing {})",
                outcome.seq,
                current.seq
            );
            return false;
        }

        self.current = Some(outcome);
        true
    }

    pub fn current(&self) -> Option<&CycleOutcome> {
        self.current.as_ref()
    }

    pub fn applied_seq(&self) -> u64 {
        self.current.as_ref().map(|o| o.seq).unwrap_or(0)
    }
}
