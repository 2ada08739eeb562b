//! Causal ordering between histories.

use crate::event::Event;
use crate::stamp::Stamp;

/// Causal ordering relationship between two histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CausalOrder {
    /// `self` happened strictly before `other`.
    Before,
    /// `self` happened strictly after `other`.
    After,
    /// `self` and `other` describe the same history.
    Equal,
    /// Neither history contains the other.
    Concurrent,
}

impl CausalOrder {
    fn from_leq(self_leq_other: bool, other_leq_self: bool) -> Self {
        match (self_leq_other, other_leq_self) {
            (true, true) => Self::Equal,
            (true, false) => Self::Before,
            (false, true) => Self::After,
            (false, false) => Self::Concurrent,
        }
    }

    /// Lowercase label used in human-facing output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Equal => "equal",
            Self::Concurrent => "concurrent",
        }
    }
}

impl std::fmt::Display for CausalOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Event {
    /// Compare two histories in both directions.
    pub fn causal_order(&self, other: &Event) -> CausalOrder {
        CausalOrder::from_leq(self.leq(other), other.leq(self))
    }
}

impl Stamp {
    /// Compare the histories of two stamps; identity is ignored.
    pub fn causal_order(&self, other: &Stamp) -> CausalOrder {
        self.event_tree().causal_order(other.event_tree())
    }

    /// Returns true if `self` happened strictly before `other`.
    pub fn happens_before(&self, other: &Stamp) -> bool {
        self.causal_order(other) == CausalOrder::Before
    }

    /// Returns true if neither stamp's history contains the other's.
    pub fn is_concurrent_with(&self, other: &Stamp) -> bool {
        self.causal_order(other) == CausalOrder::Concurrent
    }
}
