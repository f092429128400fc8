use thiserror::Error;

use super::headers::{doc_start, find_header};
use super::jsx::{element_end, starts_element};
use super::scanner::{
    closer_for, is_ident_byte, matching_close, next_code, CodeBytes, Unbalanced,
};
use super::types::ComponentBounds;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocateError {
    #[error("component '{name}' not found")]
    NotFound { name: String },

    #[error("component '{name}': boundary mismatch: {reason}")]
    BoundaryMismatch { name: String, reason: String },
}

impl LocateError {
    /// The component the lookup was for.
    pub fn name(&self) -> &str {
        match self {
            LocateError::NotFound { name } | LocateError::BoundaryMismatch { name, .. } => name,
        }
    }

    fn mismatch(name: &str, reason: impl Into<String>) -> Self {
        Self::BoundaryMismatch {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

fn describe(unbalanced: Unbalanced, src: &str) -> String {
    match unbalanced {
        Unbalanced::Unclosed { depth } => {
            format!("reached end of file with {depth} delimiter(s) still open")
        }
        Unbalanced::Mismatched {
            at,
            found,
            expected,
        } => {
            let line = src[..at].matches('\n').count() + 1;
            format!("found '{found}' on line {line} where '{expected}' was expected")
        }
    }
}

/// Offset of the initializer `=` after the declared name, skipping `=>`,
/// `==` and `!=` and anything nested in a type annotation.
fn find_initializer(src: &str, from: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0i32;

    for (at, b) in CodeBytes::new(src, from) {
        match b {
            b'(' | b'{' | b'[' => depth += 1,
            b')' | b'}' | b']' => depth -= 1,
            b';' if depth <= 0 => return None,
            b'=' if depth == 0 => {
                let next = bytes.get(at + 1).copied();
                let prev = bytes[at - 1];
                if next != Some(b'>') && next != Some(b'=') && prev != b'=' && prev != b'!' {
                    return Some(at);
                }
            }
            _ => {}
        }
    }

    None
}

/// True when the group closed at `close_at` is a parameter list rather than
/// the definition body.
fn is_parameter_group(src: &str, open: u8, close_at: usize) -> bool {
    match next_code(src, close_at + 1) {
        Some((at, b'=')) => src[at..].starts_with("=>"),
        Some((_, b':')) => true,
        Some((_, b'{')) => open == b'(',
        _ => false,
    }
}

/// A newline whose next line starts in column 0 with a keyword, an
/// identifier or a comment ends an undelimited top-level expression.
fn starts_top_level_line(src: &str, at: usize, b: u8) -> bool {
    b == b'\n'
        && src
            .as_bytes()
            .get(at + 1)
            .is_some_and(|next| is_ident_byte(*next) || *next == b'/')
}

/// True when nothing but a `;`, the next top-level line or EOF follows
/// `after`.
fn ends_expression(src: &str, after: usize) -> bool {
    match next_code(src, after) {
        None | Some((_, b';')) => true,
        Some((at, _)) => src.as_bytes()[at - 1] == b'\n',
    }
}

/// What ends one step of the initializer scan.
enum Stop {
    /// An opening delimiter.
    Group(usize, u8),
    /// The `<` of a JSX element.
    Element(usize),
    /// A `;` or the newline before a top-level line.
    End(usize, u8),
}

fn next_stop(src: &str, pos: usize, mut prev: Option<(usize, u8)>) -> Option<Stop> {
    for (at, b) in CodeBytes::new(src, pos) {
        if closer_for(b).is_some() {
            return Some(Stop::Group(at, b));
        }
        if b == b';' || starts_top_level_line(src, at, b) {
            return Some(Stop::End(at, b));
        }
        if b == b'<' && starts_element(src, prev, at) {
            return Some(Stop::Element(at));
        }
        if !b.is_ascii_whitespace() {
            prev = Some((at, b));
        }
    }
    None
}

/// Resolve the boundaries of the definition of `name`.
///
/// The body is the first delimited group of the initializer that is not a
/// parameter list and ends the expression; it ends where its delimiter depth
/// returns to zero. An initializer without such a group is its own body.
pub fn locate(src: &str, name: &str) -> Result<ComponentBounds, LocateError> {
    let header = find_header(src, name).ok_or_else(|| LocateError::NotFound {
        name: name.to_string(),
    })?;

    let eq = find_initializer(src, header.name_end)
        .ok_or_else(|| LocateError::mismatch(name, "definition has no initializer"))?;
    let (rhs_start, _) = next_code(src, eq + 1)
        .ok_or_else(|| LocateError::mismatch(name, "initializer is empty"))?;

    let mut pos = rhs_start;
    let mut prev = Some((eq, b'='));
    let mut undelimited = false;
    let (body_start, body_end, terminator) = loop {
        match next_stop(src, pos, prev) {
            Some(Stop::Group(at, b)) => {
                let close = matching_close(src, at)
                    .map_err(|e| LocateError::mismatch(name, describe(e, src)))?;
                if !undelimited && !is_parameter_group(src, b, close) {
                    if ends_expression(src, close + 1) {
                        break (at, close + 1, None);
                    }
                    // `() => fn(a) || null`: the group is part of a larger
                    // expression.
                    undelimited = true;
                }
                pos = close + 1;
                prev = Some((close, src.as_bytes()[close]));
            }
            // Markup is opaque: `;` and newlines in its text belong to it.
            Some(Stop::Element(at)) => {
                let end = element_end(src, at).ok_or_else(|| {
                    let line = src[..at].matches('\n').count() + 1;
                    let reason = format!("JSX element on line {line} is never closed");
                    LocateError::mismatch(name, reason)
                })?;
                undelimited = true;
                pos = end;
                prev = Some((end - 1, b'>'));
            }
            // Undelimited initializer such as `() => <mesh />`: the
            // expression runs to its `;`, the next top-level line, or EOF.
            Some(Stop::End(at, b)) => {
                let expr_end = rhs_start + src[rhs_start..at].trim_end().len();
                break (rhs_start, expr_end, (b == b';').then_some(at));
            }
            None => break (rhs_start, rhs_start + src[rhs_start..].trim_end().len(), None),
        }
    };

    let end = match terminator {
        Some(semi) => semi + 1,
        None => {
            let rest = &src[body_end..];
            let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            if rest[gap..].starts_with(';') {
                body_end + gap + 1
            } else {
                body_end
            }
        }
    };

    Ok(ComponentBounds {
        name: name.to_string(),
        doc_start: doc_start(src, header.line_start),
        header_start: header.line_start,
        rhs_start,
        body_start,
        body_end,
        end,
    })
}
