use tracing::debug;

use super::buffer::SourceBuffer;
use crate::config::RewriteStyle;
use crate::parser::{is_ident_byte, ComponentBounds, LocateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapOutcome {
    Wrapped,
    AlreadyApplied,
}

/// Whether `expr` starts with a call to `callee`, optionally with type
/// arguments: `React.memo(`, `memo<Props>(`.
fn is_call_to(expr: &str, callee: &str) -> bool {
    let Some(rest) = expr.strip_prefix(callee) else {
        return false;
    };
    if rest.bytes().next().is_some_and(is_ident_byte) {
        return false;
    }
    matches!(rest.trim_start().as_bytes().first(), Some(b'(') | Some(b'<'))
}

fn applies_memo(src: &str, bounds: &ComponentBounds, style: &RewriteStyle) -> bool {
    let rhs = &src[bounds.rhs_start..];
    style.memo_callees.iter().any(|c| is_call_to(rhs, c))
}

/// Whether the definition of `name` already applies a memoization call.
pub fn is_memoized(
    buf: &SourceBuffer,
    name: &str,
    style: &RewriteStyle,
) -> Result<bool, LocateError> {
    let bounds = buf.locate(name)?;
    Ok(applies_memo(buf.as_str(), &bounds, style))
}

/// Wrap the definition's initializer in the memoization call.
///
/// The opening call goes before the initializer and the single closing
/// `)` right after the located body, both from the same lookup; the closer
/// is inserted first so the opener's offset stays valid.
pub fn wrap(
    buf: &mut SourceBuffer,
    name: &str,
    style: &RewriteStyle,
) -> Result<WrapOutcome, LocateError> {
    let bounds = buf.locate(name)?;
    if applies_memo(buf.as_str(), &bounds, style) {
        return Ok(WrapOutcome::AlreadyApplied);
    }

    buf.insert(bounds.body_end, ")");
    buf.insert(bounds.rhs_start, &format!("{}(", style.memo_callee));

    debug!(component = name, callee = %style.memo_callee, "wrapped definition");
    Ok(WrapOutcome::Wrapped)
}
