use super::jsx::{element_end, starts_element};

/// Lexical context the scanner is inside while walking source text.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Frame {
    /// Inside a template literal, between backticks.
    Template,
    /// Inside `${ ... }` of a template literal, with the brace depth of the
    /// interpolated expression.
    Interpolation { braces: u32 },
}

/// Iterator over the bytes of `src` that are code, skipping strings,
/// template literal text and comments.
///
/// Must start at a position that is itself code (a line start of a
/// definition, a delimiter found by an earlier scan, and so on).
pub struct CodeBytes<'a> {
    src: &'a [u8],
    pos: usize,
    stack: Vec<Frame>,
}

impl<'a> CodeBytes<'a> {
    pub fn new(src: &'a str, pos: usize) -> Self {
        Self {
            src: src.as_bytes(),
            pos,
            stack: Vec::new(),
        }
    }

    /// Continue scanning at `pos`, which must be a code position in the
    /// current lexical context.
    pub fn resume_at(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn peek_at(&self, at: usize) -> Option<u8> {
        self.src.get(at).copied()
    }

    fn prev_is_word(&self, at: usize) -> bool {
        at > 0 && is_ident_byte(self.src[at - 1])
    }

    fn skip_quoted(&mut self, quote: u8) {
        // `'` and `"` strings cannot span lines; an unterminated one ends at
        // the newline so a stray apostrophe cannot swallow the file.
        self.pos += 1;
        while let Some(b) = self.peek_at(self.pos) {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => return,
                _ if b == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.peek_at(self.pos) {
            if b == b'\n' {
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.src.len() {
            if self.src[self.pos] == b'*' && self.peek_at(self.pos + 1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<(usize, u8)> {
        loop {
            let at = self.pos;
            let b = self.peek_at(at)?;
            let next = self.peek_at(at + 1);

            if self.stack.last() == Some(&Frame::Template) {
                match b {
                    b'\\' => self.pos += 2,
                    b'`' => {
                        self.stack.pop();
                        self.pos += 1;
                    }
                    b'$' if next == Some(b'{') => {
                        self.stack.push(Frame::Interpolation { braces: 0 });
                        self.pos += 2;
                    }
                    _ => self.pos += 1,
                }
                continue;
            }

            match b {
                b'/' if next == Some(b'/') && !(at > 0 && self.src[at - 1] == b':') => {
                    self.skip_line_comment();
                    continue;
                }
                b'/' if next == Some(b'*') => {
                    self.skip_block_comment();
                    continue;
                }
                b'\'' | b'"' if !self.prev_is_word(at) => {
                    self.skip_quoted(b);
                    continue;
                }
                b'`' => {
                    self.stack.push(Frame::Template);
                    self.pos += 1;
                    continue;
                }
                b'{' => {
                    if let Some(Frame::Interpolation { braces }) = self.stack.last_mut() {
                        *braces += 1;
                    }
                }
                b'}' => {
                    if let Some(Frame::Interpolation { braces }) = self.stack.last_mut() {
                        if *braces == 0 {
                            self.stack.pop();
                            self.pos += 1;
                            continue;
                        }
                        *braces -= 1;
                    }
                }
                _ => {}
            }

            self.pos += 1;
            return Some((at, b));
        }
    }
}

/// Why a delimiter scan did not close.
#[derive(Debug, Clone, PartialEq)]
pub enum Unbalanced {
    /// End of input reached with `depth` delimiters still open.
    Unclosed { depth: usize },
    /// A closer that does not match the innermost opener.
    Mismatched { at: usize, found: char, expected: char },
}

pub fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'{' => Some(b'}'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Index of the delimiter closing the one at `open_at`.
///
/// JSX elements are skipped whole, so delimiters in their text do not
/// count.
pub fn matching_close(src: &str, open_at: usize) -> Result<usize, Unbalanced> {
    let mut expected: Vec<u8> = Vec::new();
    let mut prev: Option<(usize, u8)> = None;
    let mut bytes = CodeBytes::new(src, open_at);

    while let Some((at, b)) = bytes.next() {
        if b == b'<' && starts_element(src, prev, at) {
            if let Some(end) = element_end(src, at) {
                bytes.resume_at(end);
                prev = Some((end - 1, b'>'));
                continue;
            }
        }
        if !b.is_ascii_whitespace() {
            prev = Some((at, b));
        }

        if let Some(close) = closer_for(b) {
            expected.push(close);
            continue;
        }
        if matches!(b, b')' | b'}' | b']') {
            match expected.pop() {
                Some(want) if want == b => {
                    if expected.is_empty() {
                        return Ok(at);
                    }
                }
                Some(want) => {
                    return Err(Unbalanced::Mismatched {
                        at,
                        found: b as char,
                        expected: want as char,
                    })
                }
                None => {
                    return Err(Unbalanced::Mismatched {
                        at,
                        found: b as char,
                        expected: '?',
                    })
                }
            }
        }
    }

    Err(Unbalanced::Unclosed {
        depth: expected.len(),
    })
}

/// First code byte at or after `pos` that is not whitespace.
pub fn next_code(src: &str, pos: usize) -> Option<(usize, u8)> {
    CodeBytes::new(src, pos).find(|(_, b)| !b.is_ascii_whitespace())
}

/// Count comma-separated items of the group opened at `open_at` and closed
/// at `close_at`, ignoring commas nested in inner delimiters.
pub fn count_items(src: &str, open_at: usize, close_at: usize) -> usize {
    let mut depth = 0i32;
    let mut items = 0usize;
    let mut pending = false;

    for (at, b) in CodeBytes::new(src, open_at + 1) {
        if at >= close_at {
            break;
        }
        match b {
            b'(' | b'{' | b'[' => {
                depth += 1;
                pending = true;
            }
            b')' | b'}' | b']' => depth -= 1,
            b',' if depth == 0 => {
                if pending {
                    items += 1;
                }
                pending = false;
            }
            b if b.is_ascii_whitespace() => {}
            _ => pending = true,
        }
    }

    if pending {
        items += 1;
    }
    items
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Leading spaces and tabs of the line containing `pos`.
pub fn line_indent(src: &str, pos: usize) -> &str {
    let start = line_start(src, pos);
    let rest = &src[start..];
    let len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..len]
}

pub fn line_start(src: &str, pos: usize) -> usize {
    src[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_inside_strings_do_not_count() {
        let src = r#"{ const a = "}"; const b = '{'; }"#;
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn template_interpolation_is_scanned_as_code() {
        let src = "{ const s = `a } ${ obj[`k}`] } b`; }";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn apostrophe_in_jsx_text_is_not_a_string() {
        let src = "(\n  <p>Don't touch {x}</p>\n)";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn comments_are_opaque() {
        let src = "{ // }\n /* ) */ a(); }";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn url_in_jsx_text_is_not_a_comment() {
        let src = "(<a>https://example.com</a>)";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn delimiters_in_jsx_text_do_not_count() {
        let src = "{\n  return <Text>1) Wear goggles</Text>;\n}";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn generic_calls_are_not_jsx() {
        let src = "{ const r = useRef<Mesh>(null); if (a < b) { go(); } }";
        assert_eq!(matching_close(src, 0), Ok(src.len() - 1));
    }

    #[test]
    fn unclosed_reports_depth() {
        assert_eq!(
            matching_close("{ ( [ ]", 0),
            Err(Unbalanced::Unclosed { depth: 2 })
        );
    }

    #[test]
    fn mismatched_closer() {
        assert_eq!(
            matching_close("{ ) }", 0),
            Err(Unbalanced::Mismatched {
                at: 2,
                found: ')',
                expected: '}'
            })
        );
    }

    #[test]
    fn counts_top_level_items() {
        let src = "({ clock, camera }, delta)";
        assert_eq!(count_items(src, 0, src.len() - 1), 2);
        assert_eq!(count_items("()", 0, 1), 0);
        assert_eq!(count_items("(state,)", 0, 7), 1);
    }
}
