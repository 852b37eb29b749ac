//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound call (upstream fetch or translation):
//!     → timeouts.rs (enforce deadline, idle deadline between body chunks)
//!     → On failure: caller decides (502/504 upstream, fallback text for translation)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a translation is attempted at most once per text node

pub mod timeouts;

pub use timeouts::{with_deadline, with_idle_deadline, BoxError, DeadlineExceeded};
