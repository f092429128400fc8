mod rewrite;
mod split;
mod state;
mod summary;

pub use rewrite::run_rewrite;
pub use split::{run_split, write_split};
pub use state::{ComponentState, Progress};
pub use summary::{CategoryReport, Finding, Operation, RunSummary, Severity, Tally};
