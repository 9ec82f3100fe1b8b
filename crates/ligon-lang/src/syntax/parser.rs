use crate::error::{Error, ErrorCode};
use crate::syntax::args::{parse_args, parse_literal};
use crate::syntax::ast::*;
use crate::syntax::block::extract_block;
use crate::syntax::source::{indent_column, matching_paren, strip_comments};

// ─── Line classification ─────────────────────────────────────────────────────

/// What a single trimmed line looks like, before any block is resolved.
#[derive(Debug, Clone, PartialEq)]
enum Statement<'a> {
    Conditional { condition: &'a str },
    BlockCall { target: &'a str, args: &'a str },
    Call { target: &'a str, args: &'a str },
    Assignment { name: &'a str, expr: &'a str },
    Namespaced { target: &'a str, arg: &'a str },
}

/// Fixed priority: conditional, call (with or without block), assignment,
/// namespaced-argument form. `None` means the line is dropped.
fn classify(line: &str) -> Option<Statement<'_>> {
    conditional(line)
        .or_else(|| call(line))
        .or_else(|| assignment(line))
        .or_else(|| namespaced(line))
}

/// `if (condition).run: {`. The condition ends at the first `)` that is
/// followed by `.run`, `:` and `{`.
fn conditional(line: &str) -> Option<Statement<'_>> {
    let rest = line.strip_prefix("if")?.trim_start();
    let inner = rest.strip_prefix('(')?;
    inner.match_indices(')').find_map(|(pos, _)| {
        let tail = inner[pos + 1..].strip_prefix(".run")?.trim_start();
        let tail = tail.strip_prefix(':')?.trim_start();
        tail.starts_with('{')
            .then(|| Statement::Conditional { condition: inner[..pos].trim() })
    })
}

fn is_target_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '"' | '/' | '\\' | '-')
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Leading run of characters satisfying `pred`, and the remainder.
fn take_while(line: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = line.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(line.len(), |(i, _)| i);
    line.split_at(end)
}

/// `target(args)`, `target(args):`, `target(args);` or `target(args): {`.
/// Anything after the closing paren other than a block opener is ignored.
fn call(line: &str) -> Option<Statement<'_>> {
    let (target, rest) = take_while(line, is_target_char);
    let target = target.trim_matches('"');
    if target.is_empty() {
        return None;
    }
    let rest = rest.trim_start();
    if !rest.starts_with('(') {
        return None;
    }
    let close = matching_paren(rest, 0)?;
    let args = &rest[1..close];
    let tail = rest[close + 1..].trim_start();
    let opens_block = tail.strip_prefix(':')
        .is_some_and(|t| t.trim_start().starts_with('{'));
    Some(if opens_block {
        Statement::BlockCall { target, args }
    } else {
        Statement::Call { target, args }
    })
}

/// `name = expr` with an optional trailing `:` or `;`.
fn assignment(line: &str) -> Option<Statement<'_>> {
    let (name, rest) = take_while(line, is_ident_char);
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('=')?;
    if rest.starts_with('=') {
        return None;
    }
    let expr = rest.trim();
    let expr = expr.strip_suffix([':', ';']).unwrap_or(expr).trim_end();
    (!expr.is_empty()).then_some(Statement::Assignment { name, expr })
}

/// `ligon.getservice{example}`, the service-style declaration.
fn namespaced(line: &str) -> Option<Statement<'_>> {
    let (target, rest) = take_while(line, |c| is_ident_char(c) || c == '.');
    if target.is_empty() {
        return None;
    }
    let inner = rest.trim_start().strip_prefix('{')?.trim_start();
    let (arg, rest) = take_while(inner, is_ident_char);
    if arg.is_empty() {
        return None;
    }
    rest.trim_start().starts_with('}')
        .then_some(Statement::Namespaced { target, arg })
}

// ─── Parser ──────────────────────────────────────────────────────────────────

pub struct Parser {
    warnings: Vec<Error>,
}

impl Parser {
    pub fn new() -> Self {
        Self { warnings: Vec::new() }
    }

    /// Parse a whole source file. Only an unterminated block fails.
    pub fn parse(mut self, source: &str) -> Result<Program, Error> {
        let lines = strip_comments(source);
        let nodes = self.parse_lines(&lines, 1)?;
        Ok(Program { nodes, warnings: self.warnings })
    }

    /// `first_line` is the 1-based source line of `lines[0]`.
    fn parse_lines(&mut self, lines: &[String], first_line: usize) -> Result<Vec<Node>, Error> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let raw = &lines[i];
            let line = raw.trim();
            let span = Span::new(first_line + i, indent_column(raw));
            let start = i;
            i += 1;

            if line.is_empty() {
                continue;
            }

            let Some(stmt) = classify(line) else {
                log::debug!("dropping unparsable line {}: {line}", span.line);
                self.warnings.push(Error::new(ErrorCode::W001, span.line, span.column,
                    format!("unrecognized statement `{line}` ignored")));
                continue;
            };

            let node = match stmt {
                Statement::Conditional { condition } => {
                    let block = self.parse_block(lines, start, first_line, &mut i)?;
                    Node::Conditional { condition: condition.to_string(), block, span }
                }
                Statement::BlockCall { target, args } => {
                    let args = parse_args(args);
                    let block = self.parse_block(lines, start, first_line, &mut i)?;
                    Node::Call(Call { target: target.to_string(), args, block, span })
                }
                Statement::Call { target, args } => Node::Call(Call {
                    target: target.to_string(),
                    args: parse_args(args),
                    block: Vec::new(),
                    span,
                }),
                Statement::Assignment { name, expr } => Node::Assignment {
                    name: name.to_string(),
                    expr: parse_literal(expr),
                    span,
                },
                Statement::Namespaced { target, arg } => Node::Call(Call {
                    target: target.to_string(),
                    args: vec![Expr::Str(arg.to_string())],
                    block: Vec::new(),
                    span,
                }),
            };
            nodes.push(node);
        }

        Ok(nodes)
    }

    /// Extract and recursively parse the block opened on `lines[start]`,
    /// moving `next` past its closing line.
    fn parse_block(
        &mut self,
        lines: &[String],
        start: usize,
        first_line: usize,
        next: &mut usize,
    ) -> Result<Vec<Node>, Error> {
        let block = extract_block(lines, start, first_line)?;
        *next = block.end + 1;

        let trailing = block.trailing(lines);
        if !trailing.trim().is_empty() {
            let line = first_line + block.end;
            let column = block.close + 2 + (trailing.len() - trailing.trim_start().len());
            log::debug!("dropping text after `}}` on line {line}: {}", trailing.trim());
            self.warnings.push(Error::new(ErrorCode::W001, line, column,
                format!("text after closing `}}` ignored: `{}`", trailing.trim())));
        }

        self.parse_lines(&block.body, first_line + start)
    }
}

impl Default for Parser {
    fn default() -> Self { Self::new() }
}
