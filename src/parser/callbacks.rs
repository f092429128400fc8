use super::scanner::{
    closer_for, count_items, is_ident_byte, matching_close, next_code, CodeBytes,
};
use super::types::TickCallback;

/// Most parameters a per-tick callback may declare (frame state, delta).
pub const MAX_CALLBACK_ARITY: usize = 2;

/// Identifier starting at `at`.
fn ident_at(src: &str, at: usize) -> &str {
    let len = src.as_bytes()[at..]
        .iter()
        .take_while(|b| is_ident_byte(**b))
        .count();
    &src[at..at + len]
}

/// Match `<name>( <params> => {` with the registration name starting at
/// `at`. `<params>` is a parenthesized list of at most
/// [`MAX_CALLBACK_ARITY`] parameters or one bare identifier.
fn parse_registration(src: &str, at: usize, name: &str) -> Option<TickCallback> {
    let (open, b) = next_code(src, at + name.len())?;
    if b != b'(' {
        return None;
    }

    let (params_at, b) = next_code(src, open + 1)?;
    let (arity, params_end) = match b {
        b'(' => {
            let close = matching_close(src, params_at).ok()?;
            (count_items(src, params_at, close), close + 1)
        }
        b if is_ident_byte(b) && !b.is_ascii_digit() => {
            let ident = ident_at(src, params_at);
            if ident == "async" || ident == "function" {
                return None;
            }
            (1, params_at + ident.len())
        }
        _ => return None,
    };
    if arity > MAX_CALLBACK_ARITY {
        return None;
    }

    let (arrow, _) = next_code(src, params_end)?;
    if !src[arrow..].starts_with("=>") {
        return None;
    }
    let (body_open, b) = next_code(src, arrow + 2)?;
    if b != b'{' {
        return None;
    }
    let body_close = matching_close(src, body_open).ok()?;

    Some(TickCallback {
        registration: name.to_string(),
        call_start: at,
        arity,
        body_open,
        body_close,
    })
}

/// Recognized registration whose name starts at `at` and whose body closes
/// before `to`.
fn registration_at(
    src: &str,
    at: usize,
    to: usize,
    registrations: &[String],
) -> Option<TickCallback> {
    let bytes = src.as_bytes();
    let prev = at.checked_sub(1).map(|i| bytes[i]);
    if !is_ident_byte(bytes[at]) || prev.is_some_and(|p| is_ident_byte(p) || p == b'.') {
        return None;
    }
    let ident = ident_at(src, at);
    let name = registrations.iter().find(|r| r.as_str() == ident)?;
    parse_registration(src, at, name).filter(|found| found.body_close < to)
}

/// First recognized per-tick callback registration in `src[from..to]`.
///
/// Calls to a registration name whose shape does not match (an expression
/// body, too many parameters) are passed over.
pub fn find_tick_callback(
    src: &str,
    from: usize,
    to: usize,
    registrations: &[String],
) -> Option<TickCallback> {
    CodeBytes::new(src, from)
        .take_while(|&(at, _)| at < to)
        .find_map(|(at, _)| registration_at(src, at, to, registrations))
}

/// First recognized registration made directly in the body spanning
/// `src[body_start..body_end]`, not inside a nested function, component or
/// block.
pub fn find_direct_tick_callback(
    src: &str,
    body_start: usize,
    body_end: usize,
    registrations: &[String],
) -> Option<TickCallback> {
    let from = if closer_for(src.as_bytes()[body_start]).is_some() {
        body_start + 1
    } else {
        body_start
    };
    let mut depth = 0usize;

    for (at, b) in CodeBytes::new(src, from) {
        if at >= body_end {
            break;
        }
        match b {
            b'(' | b'{' | b'[' => depth += 1,
            b')' | b'}' | b']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                if let Some(found) = registration_at(src, at, body_end, registrations) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["useFrame".to_string()]
    }

    #[test]
    fn recognizes_state_and_delta() {
        let src = "useFrame((state, delta) => {\n  a();\n});";
        let cb = find_tick_callback(src, 0, src.len(), &names()).unwrap();
        assert_eq!(cb.arity, 2);
        assert_eq!(&src[cb.body_open..=cb.body_close], "{\n  a();\n}");
    }

    #[test]
    fn recognizes_bare_parameter() {
        let src = "useFrame(state => { a(); });";
        let cb = find_tick_callback(src, 0, src.len(), &names()).unwrap();
        assert_eq!(cb.arity, 1);
    }

    #[test]
    fn skips_expression_body_and_finds_next() {
        let src = "useFrame(() => spin());\nuseFrame(({ clock }) => {\n  b();\n});";
        let cb = find_tick_callback(src, 0, src.len(), &names()).unwrap();
        assert_eq!(cb.call_start, 24);
        assert_eq!(cb.arity, 1);
    }

    #[test]
    fn rejects_three_parameters_and_member_calls() {
        let src = "useFrame((a, b, c) => { x(); });\nthree.useFrame((s) => { y(); });";
        assert_eq!(find_tick_callback(src, 0, src.len(), &names()), None);
    }

    #[test]
    fn direct_search_skips_nested_components() {
        let src = "{\n  const Inner = () => {\n    useFrame((s) => { a(); });\n  };\n  useFrame((state, delta) => {\n    b();\n  });\n}";
        let cb = find_direct_tick_callback(src, 0, src.len(), &names()).unwrap();
        assert_eq!(cb.arity, 2);
        assert_eq!(cb.call_start, src.find("useFrame((state").unwrap());

        let any = find_tick_callback(src, 0, src.len(), &names()).unwrap();
        assert_eq!(any.arity, 1);
    }

    #[test]
    fn ignores_names_in_strings_and_comments() {
        let src = "// useFrame((s) => {})\nconst label = 'useFrame((s) => {})';";
        assert_eq!(find_tick_callback(src, 0, src.len(), &names()), None);
    }
}
