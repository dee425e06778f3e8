//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the Active → Draining → Terminated lifecycle
//! - `StopReason`: why a crawl left the Active phase
//! - `CrawlLifecycle`: the shared, atomically updated phase of one crawl
//! - `ShutdownHandle`: external cancellation of a running crawl

mod lifecycle;
mod phase;

// Re-export main types
pub use lifecycle::{CrawlLifecycle, ShutdownHandle};
pub use phase::{CrawlPhase, StopReason};
