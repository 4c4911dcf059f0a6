//! Link verification module
//!
//! Every hyperlink discovered during analysis is probed independently for
//! reachability:
//!
//! - `probe_link` issues one bounded-timeout fetch and reports a finding for
//!   failures and error statuses
//! - `verify_links` runs the probes concurrently through a bounded pool and
//!   converges them into a single finding set once every probe has finished

mod pool;
mod probe;

pub use pool::verify_links;
pub use probe::{probe_link, BrokenLink};
