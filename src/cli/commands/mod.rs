//! Each command lives in its own file so the dispatcher stays thin and each
//! handler owns its error reporting.

mod cleanup;
mod stats;

pub use cleanup::cmd_cleanup;
pub use stats::cmd_stats;
