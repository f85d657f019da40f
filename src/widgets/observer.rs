//! Fire-once intersection tracking.

use std::collections::HashSet;

use crate::dom::NodeId;

/// Ratio at which a stats counter starts.
pub const STATS_THRESHOLD: f64 = 0.5;
/// Ratio at which a `.reveal` element becomes visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Reports each observed element at most once, the first time its
/// intersection ratio reaches the threshold.
#[derive(Debug, Clone, Default)]
pub struct OnceObserver {
    threshold: f64,
    targets: HashSet<NodeId>,
    observed: HashSet<NodeId>,
}

impl OnceObserver {
    pub fn new(threshold: f64, targets: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            threshold,
            targets: targets.into_iter().collect(),
            observed: HashSet::new(),
        }
    }

    /// True exactly once per watched target.
    pub fn observe(&mut self, target: NodeId, ratio: f64) -> bool {
        if !(ratio >= self.threshold) || !self.targets.contains(&target) {
            return false;
        }
        self.observed.insert(target)
    }

    pub fn has_fired(&self, target: NodeId) -> bool {
        self.observed.contains(&target)
    }
}
