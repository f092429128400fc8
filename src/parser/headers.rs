use std::collections::HashSet;

use super::scanner::{is_ident_byte, line_start, matching_close, CodeBytes};
use super::types::Header;

const DECLARATION_KEYWORDS: [&str; 3] = ["const", "let", "var"];

/// Byte offset of each line together with the line text (without `\n`).
fn lines_with_offsets(src: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0usize;
    src.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line.trim_end_matches(['\n', '\r']))
    })
}

/// Length of `[export ]<keyword> <name>` at the start of `text` if it
/// declares `name`.
fn declares(text: &str, name: &str) -> Option<usize> {
    let rest = text.strip_prefix("export ").map(str::trim_start).unwrap_or(text);
    let rest = DECLARATION_KEYWORDS.iter().find_map(|kw| {
        rest.strip_prefix(kw)
            .filter(|r| r.starts_with([' ', '\t']))
            .map(str::trim_start)
    })?;
    let after = rest.strip_prefix(name)?;
    if after.bytes().next().is_some_and(is_ident_byte) {
        return None;
    }
    Some(text.len() - after.len())
}

/// Starts of the lines whose first non-blank byte is code, not the inside
/// of a string, template literal or comment.
fn code_line_starts(src: &str) -> HashSet<usize> {
    let mut starts = HashSet::new();
    let mut last_line = None;

    for (at, b) in CodeBytes::new(src, 0) {
        if b.is_ascii_whitespace() {
            continue;
        }
        let start = line_start(src, at);
        let first_on_line = src[start..at].bytes().all(|c| c == b' ' || c == b'\t');
        if last_line != Some(start) && first_on_line {
            starts.insert(start);
        }
        last_line = Some(start);
    }

    starts
}

/// Find the header line declaring `name`.
///
/// A top-level (unindented) header wins over a nested local of the same
/// name; among equals the first one wins. Lines inside strings, template
/// literals and comments never count.
pub fn find_header(src: &str, name: &str) -> Option<Header> {
    let mut nested: Option<Header> = None;
    let mut code_lines: Option<HashSet<usize>> = None;

    for (start, line) in lines_with_offsets(src) {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(len) = declares(trimmed, name) {
            let code_lines = code_lines.get_or_insert_with(|| code_line_starts(src));
            if !code_lines.contains(&start) {
                continue;
            }
            let header = Header {
                line_start: start,
                name_end: start + indent + len,
                indented: indent > 0,
            };
            if !header.indented {
                return Some(header);
            }
            if nested.is_none() {
                nested = Some(header);
            }
        }
    }

    nested
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

/// Start of the run of comment lines directly above the line starting at
/// `line_start`. A blank line ends the run.
pub fn doc_start(src: &str, line_start: usize) -> usize {
    let mut start = line_start;
    while start > 0 {
        let prev = super::scanner::line_start(src, start - 1);
        let text = src[prev..start].trim();
        if text.is_empty() || !is_comment_line(text) {
            break;
        }
        start = prev;
    }
    start
}

/// End of the leading import section: directives, comments, blank lines
/// and `import` statements (which may span several lines).
pub fn import_block_end(src: &str) -> usize {
    let mut end = 0usize;
    let mut pos = 0usize;

    while pos < src.len() {
        let line_end = src[pos..].find('\n').map(|i| pos + i + 1).unwrap_or(src.len());
        let trimmed = src[pos..line_end].trim();

        if trimmed.is_empty() || is_comment_line(trimmed) {
            pos = line_end;
            continue;
        }

        let directive = trimmed.starts_with("'use ") || trimmed.starts_with("\"use ");
        if !directive && !trimmed.starts_with("import ") && !trimmed.starts_with("import{") {
            break;
        }

        let stmt_end = if directive {
            line_end
        } else {
            import_statement_end(src, pos).unwrap_or(line_end)
        };
        end = stmt_end;
        pos = stmt_end;
    }

    end
}

/// Line end of the import statement starting at `pos`, following a braced
/// specifier list across lines.
fn import_statement_end(src: &str, pos: usize) -> Option<usize> {
    let mut close = pos;
    for (at, b) in CodeBytes::new(src, pos) {
        match b {
            b'{' => {
                close = matching_close(src, at).ok()?;
                break;
            }
            b'\n' | b';' => break,
            _ => {}
        }
    }
    Some(
        src[close..]
            .find('\n')
            .map(|i| close + i + 1)
            .unwrap_or(src.len()),
    )
}

/// The verbatim import section copied into every split file.
pub fn import_block(src: &str) -> &str {
    &src[..import_block_end(src)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_requires_whole_name() {
        let src = "const FanBlade = 1;\nconst Fan = () => {};\n";
        let header = find_header(src, "Fan").unwrap();
        assert_eq!(header.line_start, 20);
        assert_eq!(&src[header.line_start..header.name_end], "const Fan");
    }

    #[test]
    fn top_level_header_beats_nested_local() {
        let src = "const A = () => {\n  const Fan = 2;\n};\nexport const Fan = () => {};\n";
        let header = find_header(src, "Fan").unwrap();
        assert!(!header.indented);
        assert!(src[header.line_start..].starts_with("export const Fan"));
    }

    #[test]
    fn header_inside_template_literal_is_not_code() {
        let src = "const DOC = `\nconst Fan = () => <mesh />;\n`;\n\nconst Fan = () => {};\n";
        let header = find_header(src, "Fan").unwrap();
        assert_eq!(header.line_start, src.find("\nconst Fan = () => {").unwrap() + 1);
    }

    #[test]
    fn header_inside_block_comment_is_not_code() {
        let src = "/*\nconst Fan = () => {\n*/\n\nexport const Fan = () => {};\n";
        let header = find_header(src, "Fan").unwrap();
        assert!(src[header.line_start..].starts_with("export const Fan"));
        assert_eq!(find_header("// const Gone = 1;\n", "Gone"), None);
    }

    #[test]
    fn multi_line_imports_belong_to_block() {
        let src = "'use client';\nimport React from 'react';\nimport {\n  a,\n  b,\n} from './x';\n\nconst A = 1;\n";
        assert_eq!(import_block(src), "'use client';\nimport React from 'react';\nimport {\n  a,\n  b,\n} from './x';\n");
    }

    #[test]
    fn doc_start_takes_adjacent_comments_only() {
        let src = "// unrelated\n\n// Fan blade\n// spins\nconst Fan = 1;\n";
        let header = find_header(src, "Fan").unwrap();
        assert_eq!(&src[doc_start(src, header.line_start)..header.line_start], "// Fan blade\n// spins\n");
    }
}
