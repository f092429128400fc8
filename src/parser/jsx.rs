use super::scanner::{is_ident_byte, matching_close};

fn is_tag_name_byte(b: u8) -> bool {
    is_ident_byte(b) || matches!(b, b'.' | b'-' | b':')
}

/// Identifier ending at `end` (inclusive).
fn word_ending_at(src: &str, end: usize) -> &str {
    let bytes = src.as_bytes();
    let start = bytes[..=end]
        .iter()
        .rev()
        .take_while(|b| is_ident_byte(**b))
        .count();
    &src[end + 1 - start..=end]
}

/// Whether the `<` at `at` opens a JSX element or fragment.
///
/// `prev` is the last non-blank code byte before it. After an operand
/// (`a < b`, `useRef<Mesh>(`) the `<` is a comparison or type argument;
/// `<T,>` and `<T extends U>` are generic parameter lists.
pub fn starts_element(src: &str, prev: Option<(usize, u8)>, at: usize) -> bool {
    let bytes = src.as_bytes();
    let name_len = bytes[at + 1..]
        .iter()
        .take_while(|b| is_tag_name_byte(**b))
        .count();
    let after = at + 1 + name_len;

    if name_len == 0 {
        if bytes.get(after) != Some(&b'>') {
            return false;
        }
    } else {
        if bytes[at + 1].is_ascii_digit() {
            return false;
        }
        let shaped = matches!(
            bytes.get(after),
            Some(b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/' | b'{')
        );
        if !shaped || src[after..].trim_start().starts_with("extends ") {
            return false;
        }
    }

    match prev {
        None => true,
        Some((p, b)) if is_ident_byte(b) => word_ending_at(src, p) == "return",
        Some((_, b)) => !matches!(b, b')' | b']' | b'.'),
    }
}

/// Offset just past the JSX element opened at `open`, or `None` when it is
/// never closed.
///
/// Attribute and child `{ ... }` expressions are matched as code; child
/// text is skipped verbatim, so `1) Wear goggles` or `Step 1; step 2`
/// inside markup does not count.
pub fn element_end(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut pos = open;
    let mut depth = 0usize;

    loop {
        if bytes.get(pos + 1) == Some(&b'/') {
            let gt = pos + src[pos..].find('>')?;
            depth = depth.checked_sub(1)?;
            pos = gt + 1;
            if depth == 0 {
                return Some(pos);
            }
        } else {
            pos += 1;
            loop {
                match *bytes.get(pos)? {
                    b'{' => pos = matching_close(src, pos).ok()? + 1,
                    quote @ (b'"' | b'\'') => {
                        pos += src[pos + 1..].find(quote as char)? + 2;
                    }
                    b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                        pos += 2;
                        if depth == 0 {
                            return Some(pos);
                        }
                        break;
                    }
                    b'>' => {
                        pos += 1;
                        depth += 1;
                        break;
                    }
                    _ => pos += 1,
                }
            }
        }

        // Children up to the next tag.
        loop {
            match *bytes.get(pos)? {
                b'{' => pos = matching_close(src, pos).ok()? + 1,
                b'<' => break,
                _ => pos += 1,
            }
        }
    }
}
