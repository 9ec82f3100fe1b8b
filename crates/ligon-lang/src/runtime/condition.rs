//! Restricted condition language for `if (...).run:` blocks.
//!
//! The grammar is closed: literals, variable references, comparisons and
//! boolean combinators. There is no arithmetic, no calls and no access to
//! anything outside the variable table.
//!
//! ```text
//! or      := and (("or" | "||") and)*
//! and     := not (("and" | "&&") not)*
//! not     := ("not" | "!") not | compare
//! compare := unary (cmp_op unary)*
//! unary   := "-" unary | primary
//! primary := INT | FLOAT | STRING | true | false | IDENT | "(" or ")"
//! ```
//!
//! Comparisons chain: `a < b < c` means `a < b and b < c`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    #[error("empty condition")]
    Empty,
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unexpected {0}")]
    UnexpectedToken(String),
    #[error("cannot negate {0}")]
    BadNegation(&'static str),
    #[error("integer overflow negating {0}")]
    Overflow(i64),
    #[error("cannot order {0} against {1}")]
    Incomparable(&'static str, &'static str),
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Cmp(CmpOp),
    And,
    Or,
    Not,
    Minus,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp { Lt, Gt, Le, Ge, Eq, Ne }

fn tokenize(src: &str) -> Result<Vec<Tok>, ConditionError> {
    let chars: Vec<char> = src.chars().collect();
    let mut toks = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        i += 1;
        let tok = match (c, next) {
            (c, _) if c.is_whitespace() => continue,
            ('(', _) => Tok::LParen,
            (')', _) => Tok::RParen,
            ('-', _) => Tok::Minus,
            ('<', Some('=')) => { i += 1; Tok::Cmp(CmpOp::Le) }
            ('>', Some('=')) => { i += 1; Tok::Cmp(CmpOp::Ge) }
            ('=', Some('=')) => { i += 1; Tok::Cmp(CmpOp::Eq) }
            ('!', Some('=')) => { i += 1; Tok::Cmp(CmpOp::Ne) }
            ('&', Some('&')) => { i += 1; Tok::And }
            ('|', Some('|')) => { i += 1; Tok::Or }
            ('<', _) => Tok::Cmp(CmpOp::Lt),
            ('>', _) => Tok::Cmp(CmpOp::Gt),
            ('!', _) => Tok::Not,
            ('"', _) => {
                let mut s = String::new();
                loop {
                    match chars.get(i) {
                        None => return Err(ConditionError::UnterminatedString),
                        Some('"') => { i += 1; break; }
                        Some('\\') => {
                            let escaped = chars.get(i + 1).ok_or(ConditionError::UnterminatedString)?;
                            s.push(*escaped);
                            i += 2;
                        }
                        Some(ch) => { s.push(*ch); i += 1; }
                    }
                }
                Tok::Str(s)
            }
            (c, _) if c.is_ascii_digit() || c == '.' => {
                let start = i - 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') { i += 1; }
                let text: String = chars[start..i].iter().collect();
                if text.contains('.') {
                    Tok::Float(text.parse().map_err(|_| ConditionError::InvalidNumber(text.clone()))?)
                } else {
                    Tok::Int(text.parse().map_err(|_| ConditionError::InvalidNumber(text.clone()))?)
                }
            }
            (c, _) if c.is_alphabetic() || c == '_' => {
                let start = i - 1;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') { i += 1; }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "and" => Tok::And,
                    "or"  => Tok::Or,
                    "not" => Tok::Not,
                    _     => Tok::Ident(word),
                }
            }
            (c, _) => return Err(ConditionError::UnexpectedChar(c)),
        };
        toks.push(tok);
    }
    Ok(toks)
}

// ─── Syntax tree ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Lit(Value),
    Var(String),
    Neg(Box<Cond>),
    Not(Box<Cond>),
    And(Box<Cond>, Box<Cond>),
    Or(Box<Cond>, Box<Cond>),
    /// First operand followed by `(op, operand)` links.
    Compare(Box<Cond>, Vec<(CmpOp, Cond)>),
}

struct CondParser {
    toks: Vec<Tok>,
    pos: usize,
}

impl CondParser {
    fn peek(&self) -> Option<&Tok> { self.toks.get(self.pos) }

    fn advance(&mut self) -> Option<Tok> {
        let tok = self.toks.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn matches(&mut self, tok: &Tok) -> bool {
        if self.peek() == Some(tok) { self.pos += 1; true } else { false }
    }

    fn or(&mut self) -> Result<Cond, ConditionError> {
        let mut left = self.and()?;
        while self.matches(&Tok::Or) {
            left = Cond::Or(Box::new(left), Box::new(self.and()?));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Cond, ConditionError> {
        let mut left = self.not()?;
        while self.matches(&Tok::And) {
            left = Cond::And(Box::new(left), Box::new(self.not()?));
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Cond, ConditionError> {
        if self.matches(&Tok::Not) {
            return Ok(Cond::Not(Box::new(self.not()?)));
        }
        self.compare()
    }

    fn compare(&mut self) -> Result<Cond, ConditionError> {
        let first = self.unary()?;
        let mut links = Vec::new();
        while let Some(Tok::Cmp(op)) = self.peek() {
            let op = *op;
            self.pos += 1;
            links.push((op, self.unary()?));
        }
        Ok(if links.is_empty() { first } else { Cond::Compare(Box::new(first), links) })
    }

    fn unary(&mut self) -> Result<Cond, ConditionError> {
        if self.matches(&Tok::Minus) {
            return Ok(Cond::Neg(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Cond, ConditionError> {
        match self.advance() {
            Some(Tok::Int(v))   => Ok(Cond::Lit(Value::Int(v))),
            Some(Tok::Float(v)) => Ok(Cond::Lit(Value::Float(v))),
            Some(Tok::Str(s))   => Ok(Cond::Lit(Value::Str(s))),
            Some(Tok::Ident(name)) => Ok(match name.as_str() {
                "true" | "True"   => Cond::Lit(Value::Bool(true)),
                "false" | "False" => Cond::Lit(Value::Bool(false)),
                _ => Cond::Var(name),
            }),
            Some(Tok::LParen) => {
                let inner = self.or()?;
                match self.advance() {
                    Some(Tok::RParen) => Ok(inner),
                    other => Err(unexpected(other)),
                }
            }
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(tok: Option<Tok>) -> ConditionError {
    match tok {
        Some(t) => ConditionError::UnexpectedToken(format!("{t:?}")),
        None    => ConditionError::UnexpectedToken("end of condition".into()),
    }
}

/// Parse condition text into a `Cond` tree.
pub fn parse(src: &str) -> Result<Cond, ConditionError> {
    let toks = tokenize(src)?;
    if toks.is_empty() {
        return Err(ConditionError::Empty);
    }
    let mut parser = CondParser { toks, pos: 0 };
    let cond = parser.or()?;
    match parser.advance() {
        None => Ok(cond),
        extra => Err(unexpected(extra)),
    }
}

/// Parse and evaluate. Unset variables read as `0`.
pub fn evaluate(src: &str, vars: &HashMap<String, Value>) -> Result<bool, ConditionError> {
    Ok(parse(src)?.eval(vars)?.is_truthy())
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

impl Cond {
    pub fn eval(&self, vars: &HashMap<String, Value>) -> Result<Value, ConditionError> {
        match self {
            Cond::Lit(v)  => Ok(v.clone()),
            Cond::Var(n)  => Ok(vars.get(n).cloned().unwrap_or(Value::Int(0))),
            Cond::Neg(e)  => match e.eval(vars)? {
                Value::Int(v)   => v.checked_neg().map(Value::Int).ok_or(ConditionError::Overflow(v)),
                Value::Float(v) => Ok(Value::Float(-v)),
                other => Err(ConditionError::BadNegation(other.type_name())),
            },
            Cond::Not(e)  => Ok(Value::Bool(!e.eval(vars)?.is_truthy())),
            Cond::And(l, r) => Ok(Value::Bool(l.eval(vars)?.is_truthy() && r.eval(vars)?.is_truthy())),
            Cond::Or(l, r)  => Ok(Value::Bool(l.eval(vars)?.is_truthy() || r.eval(vars)?.is_truthy())),
            Cond::Compare(first, links) => {
                let mut left = first.eval(vars)?;
                for (op, operand) in links {
                    let right = operand.eval(vars)?;
                    if !compare(*op, &left, &right)? {
                        return Ok(Value::Bool(false));
                    }
                    left = right;
                }
                Ok(Value::Bool(true))
            }
        }
    }
}

fn compare(op: CmpOp, left: &Value, right: &Value) -> Result<bool, ConditionError> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => None,
        // remaining pairs are numeric or boolean
        (a, b) => a.as_float().zip(b.as_float()).and_then(|(a, b)| a.partial_cmp(&b)),
    };
    match (op, ordering) {
        (CmpOp::Eq, ord) => Ok(ord == Some(Ordering::Equal)),
        (CmpOp::Ne, ord) => Ok(ord != Some(Ordering::Equal)),
        (_, None) => Err(ConditionError::Incomparable(left.type_name(), right.type_name())),
        (CmpOp::Lt, Some(o)) => Ok(o == Ordering::Less),
        (CmpOp::Gt, Some(o)) => Ok(o == Ordering::Greater),
        (CmpOp::Le, Some(o)) => Ok(o != Ordering::Greater),
        (CmpOp::Ge, Some(o)) => Ok(o != Ordering::Less),
    }
}
