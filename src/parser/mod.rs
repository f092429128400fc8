mod callbacks;
mod headers;
mod jsx;
mod locate;
mod scanner;
mod types;

pub use callbacks::{find_direct_tick_callback, find_tick_callback, MAX_CALLBACK_ARITY};
pub use headers::{doc_start, find_header, import_block, import_block_end};
pub use locate::{locate, LocateError};
pub use scanner::{
    is_ident_byte, line_indent, line_start, matching_close, next_code, CodeBytes, Unbalanced,
};
pub use types::{ComponentBounds, Header, TickCallback};
