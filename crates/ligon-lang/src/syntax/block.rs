//! Block extraction: resolves a brace-delimited body that may span lines.

use crate::error::{Error, ErrorCode};
use crate::syntax::source::braces;

/// A block body with its outermost `{` / `}` removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Interior lines. `body[k]` comes from source line index `start + k`, so
    /// the first entry is whatever followed `{` on the header line.
    pub body: Vec<String>,
    /// Index of the line holding the matching `}`.
    pub end: usize,
    /// Byte offset of the matching `}` within `lines[end]`.
    pub close: usize,
}

impl Block {
    /// Whatever follows the matching `}` on its line. Not part of the block.
    pub fn trailing<'a>(&self, lines: &'a [String]) -> &'a str {
        lines.get(self.end)
            .and_then(|line| line.get(self.close + 1..))
            .unwrap_or_default()
    }
}

/// Scan from `lines[start]` (a header line containing the opening brace) until
/// brace depth returns to zero.
///
/// `first_line` is the 1-based source line of `lines[0]`, used for the error.
/// Running out of input first is the only fatal parse condition.
pub fn extract_block(lines: &[String], start: usize, first_line: usize) -> Result<Block, Error> {
    let mut depth = 0usize;
    let mut open: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        for (offset, ch) in braces(line) {
            match ch {
                '{' => {
                    if open.is_none() { open = Some(offset); }
                    depth += 1;
                }
                _ => {
                    // a `}` before the block opened has nothing to close
                    let Some(open_offset) = open else { continue };
                    depth -= 1;
                    if depth == 0 {
                        let body = slice_body(lines, start, open_offset, idx, offset);
                        return Ok(Block { body, end: idx, close: offset });
                    }
                }
            }
        }
    }

    let header = lines.get(start).map(String::as_str).unwrap_or_default();
    Err(Error::new(
        ErrorCode::P001,
        first_line + start,
        header.find('{').map_or(1, |c| c + 1),
        "unterminated block: `{` has no matching `}`",
    ))
}

fn slice_body(lines: &[String], start: usize, open: usize, end: usize, close: usize) -> Vec<String> {
    if start == end {
        return vec![lines[start][open + 1..close].to_string()];
    }
    let mut body = Vec::with_capacity(end - start + 1);
    body.push(lines[start][open + 1..].to_string());
    body.extend(lines[start + 1..end].iter().cloned());
    body.push(lines[end][..close].to_string());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(String::from).collect()
    }

    #[test]
    fn multi_line_body() {
        let src = lines("ligon.draw(\"bg\"): {\n  a = 1\n  b = 2\n}\nafter()");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.end, 3);
        assert_eq!(block.body, vec!["", "  a = 1", "  b = 2", ""]);
    }

    #[test]
    fn single_line_body() {
        let src = lines("f(): { g(1) }");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.end, 0);
        assert_eq!(block.body, vec![" g(1) "]);
    }

    #[test]
    fn nested_blocks_keep_inner_braces() {
        let src = lines("outer(): {\n  inner(): {\n    x = 1\n  }\n}");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.end, 4);
        assert!(block.body.iter().any(|l| l.contains("inner(): {")));
        assert_eq!(block.body.iter().filter(|l| l.contains('}')).count(), 1);
    }

    #[test]
    fn body_never_contains_outer_pair() {
        let src = lines("a(): {\n}");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.body, vec!["", ""]);
    }

    #[test]
    fn quoted_braces_are_ignored() {
        let src = lines("a(\"{\"): {\n  x = \"}\"\n}");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.end, 2);
    }

    #[test]
    fn trailing_text_after_close() {
        let src = lines("if (1 > 0).run: { a = 1 } b = 2");
        let block = extract_block(&src, 0, 1).unwrap();
        assert_eq!(block.body, vec![" a = 1 "]);
        assert_eq!(block.trailing(&src), " b = 2");

        let src = lines("f(): {\n}");
        assert_eq!(extract_block(&src, 0, 1).unwrap().trailing(&src), "");
    }

    #[test]
    fn unterminated_block_fails() {
        let src = lines("x = 0\nf(): {\n  y = 1\n");
        let err = extract_block(&src, 1, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::P001);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 6);
    }
}
