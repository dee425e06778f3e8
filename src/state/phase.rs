/// Crawl lifecycle definitions
///
/// A crawl moves strictly forward through its phases:
/// Active → Draining → Terminated.
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Workers dequeue, claim and fetch new URLs
    Active,

    /// Budget reached, frontier exhausted or shutdown requested.
    /// Workers finish what they already claimed; no new claims start.
    Draining,

    /// All workers have been joined
    Terminated,
}

impl CrawlPhase {
    /// Returns true while new claims may still be made
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true once every worker has exited
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Draining) | (Self::Draining, Self::Terminated)
        )
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Draining => 1,
            Self::Terminated => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Active,
            1 => Self::Draining,
            _ => Self::Terminated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a crawl left the Active phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The number of claimed pages reached the page budget
    BudgetReached,

    /// The frontier stayed empty past the grace period with nothing in flight
    FrontierExhausted,

    /// Shutdown was requested from outside the crawl
    Cancelled,
}

impl StopReason {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::BudgetReached => 1,
            Self::FrontierExhausted => 2,
            Self::Cancelled => 3,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::BudgetReached),
            2 => Some(Self::FrontierExhausted),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetReached => "budget_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
