//! Line-level helpers shared by the block extractor and the statement parser.
//! Everything here is quote-aware: `//`, braces and commas inside a
//! double-quoted string are plain characters.

/// Tracks whether a scan position is inside a double-quoted string.
/// Strings never span lines, so a fresh scanner is used per line.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    in_string: bool,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns `true` when the character is code
    /// (outside a string and not a quote delimiter).
    pub(crate) fn feed(&mut self, ch: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.in_string = false;
            }
            false
        } else if ch == '"' {
            self.in_string = true;
            false
        } else {
            true
        }
    }
}

/// Strip `//` line comments and split into lines. Line count is preserved so
/// indices map back to 1-based source lines.
pub fn strip_comments(source: &str) -> Vec<String> {
    source.lines().map(|line| strip_line_comment(line).to_string()).collect()
}

fn strip_line_comment(line: &str) -> &str {
    let mut quotes = QuoteState::default();
    let mut prev_slash = None;
    for (i, ch) in line.char_indices() {
        let is_code = quotes.feed(ch);
        if is_code && ch == '/' {
            if let Some(start) = prev_slash {
                return &line[..start];
            }
            prev_slash = Some(i);
        } else {
            prev_slash = None;
        }
    }
    line
}

/// Byte offsets and kinds of the unquoted braces on one line.
pub(crate) fn braces(line: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut quotes = QuoteState::default();
    line.char_indices()
        .filter(move |&(_, ch)| quotes.feed(ch) && (ch == '{' || ch == '}'))
}

/// Byte offset of the `)` closing the `(` at `open`, skipping quoted text.
pub(crate) fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut quotes = QuoteState::default();
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        if !quotes.feed(ch) { continue; }
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 { return Some(open + i); }
            }
            _ => {}
        }
    }
    None
}

/// 1-based column of the first non-blank character.
pub(crate) fn indent_column(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(strip_comments("x = 1 // one\n// whole line\ny = 2"), vec!["x = 1 ", "", "y = 2"]);
    }

    #[test]
    fn keeps_slashes_inside_strings() {
        let lines = strip_comments(r#"render.model("http://host/a.obj") // tail"#);
        assert_eq!(lines, vec![r#"render.model("http://host/a.obj") "#]);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let lines = strip_comments(r#"x = "a\"//b""#);
        assert_eq!(lines, vec![r#"x = "a\"//b""#]);
    }

    #[test]
    fn braces_skip_quoted() {
        let found: Vec<_> = braces(r#"f("{"): { "}" }"#).collect();
        assert_eq!(found, vec![(8, '{'), (14, '}')]);
    }

    #[test]
    fn matching_paren_is_quote_aware() {
        let s = r#"f("a)b", (1)) tail"#;
        assert_eq!(matching_paren(s, 1), Some(12));
        assert_eq!(matching_paren("f(1", 1), None);
    }
}
