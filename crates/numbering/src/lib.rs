//! Hierarchical numbering for headings.
//!
//! A [`CounterChain`] holds named counters plus parent → child edges. Advancing
//! a parent resets every counter reachable from it, which is what turns a run
//! of headings at levels `0, 1, 1, 2, 0` into `1`, `1.1`, `1.2`, `1.2.1`, `2`.
//!
//! A [`NumberingTemplate`] lists the counters that make up one label: every
//! entry but the last is read as-is, the last one is advanced.

mod chain;
mod error;
mod template;

pub use chain::{Counter, CounterChain};
pub use error::NumberingError;
pub use template::{MAX_DEPTH, NumberingTemplate};
