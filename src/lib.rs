//! Batch rewriting of large TSX component files.
//!
//! Three transformations share one boundary-aware locator:
//!
//! - throttle guards injected into per-tick (`useFrame`) callbacks,
//!   driven by a shared tick counter in the orchestrating component;
//! - memoization wrappers around selected component definitions;
//! - splitting a monolithic file into category files that share its
//!   import block.
//!
//! Every edit re-resolves its target by name, so offsets never outlive the
//! edit that produced them.

pub mod config;
pub mod error;
pub mod parser;
pub mod pass;
pub mod rewrite;

pub use config::{CategoryGroup, Config, ConfigError, RewriteStyle, ThrottleClass, TickCounter};
pub use error::{Result, RewriteError};
pub use parser::{locate, ComponentBounds, LocateError};
pub use pass::{run_rewrite, run_split, write_split, RunSummary};
pub use rewrite::SourceBuffer;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log to stderr, `info` for this crate unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("component_rewriter=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
