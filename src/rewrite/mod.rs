mod buffer;
mod extract;
mod guard;
mod memo;

pub use buffer::{write_atomic, SourceBuffer};
pub use extract::{build_category_file, extract, extract_with_docs, CategoryFile};
pub use guard::{GuardOutcome, ImportOutcome, Injector};
pub use memo::{is_memoized, wrap, WrapOutcome};
