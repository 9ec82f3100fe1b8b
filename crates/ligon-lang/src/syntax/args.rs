//! Argument-list splitting and literal classification.

use crate::syntax::ast::Expr;
use crate::syntax::source::QuoteState;

/// Split `a, "b, c", 3` on unquoted commas and classify each token.
/// Blank tokens (`f(1,,2)`) are skipped.
pub fn parse_args(text: &str) -> Vec<Expr> {
    let mut args = Vec::new();
    let mut quotes = QuoteState::default();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if quotes.feed(ch) && ch == ',' {
            push_token(&mut args, &text[start..i]);
            start = i + 1;
        }
    }
    push_token(&mut args, &text[start..]);
    args
}

fn push_token(args: &mut Vec<Expr>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        args.push(parse_literal(token));
    }
}

/// Classify one token, in order: quoted string, integer (no `.`), float
/// (has a `.` and parses), otherwise a variable reference kept verbatim.
pub fn parse_literal(token: &str) -> Expr {
    let token = token.trim();
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return Expr::Str(unescape(&token[1..token.len() - 1]));
    }
    if !token.contains('.') {
        if let Ok(v) = token.parse::<i64>() {
            return Expr::Integer(v);
        }
    } else if let Ok(v) = token.parse::<f64>() {
        return Expr::Float(v);
    }
    Expr::Var(token.to_string())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n')  => out.push('\n'),
            Some('t')  => out.push('\t'),
            Some(c)    => out.push(c),
            None       => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order() {
        assert_eq!(parse_literal("\"3\""), Expr::Str("3".into()));
        assert_eq!(parse_literal("3"), Expr::Integer(3));
        assert_eq!(parse_literal("3.0"), Expr::Float(3.0));
        assert_eq!(parse_literal("x"), Expr::Var("x".into()));
    }

    #[test]
    fn signed_numbers() {
        assert_eq!(parse_literal("-12"), Expr::Integer(-12));
        assert_eq!(parse_literal("-0.5"), Expr::Float(-0.5));
        assert_eq!(parse_literal(".5"), Expr::Float(0.5));
    }

    #[test]
    fn dotted_non_numbers_are_variables() {
        assert_eq!(parse_literal("player.health"), Expr::Var("player.health".into()));
        assert_eq!(parse_literal("1.2.3"), Expr::Var("1.2.3".into()));
    }

    #[test]
    fn commas_inside_strings_do_not_split() {
        let args = parse_args(r#""a, b", 2 , "c\"d,""#);
        assert_eq!(args, vec![
            Expr::Str("a, b".into()),
            Expr::Integer(2),
            Expr::Str("c\"d,".into()),
        ]);
    }

    #[test]
    fn empty_list_and_blank_tokens() {
        assert!(parse_args("").is_empty());
        assert!(parse_args("   ").is_empty());
        assert_eq!(parse_args("1,,2"), vec![Expr::Integer(1), Expr::Integer(2)]);
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(parse_literal(r#""a\\b\tc""#), Expr::Str("a\\b\tc".into()));
    }
}
