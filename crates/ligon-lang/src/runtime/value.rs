use std::fmt;

use crate::syntax::ast::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Literal expressions map directly; variable references are resolved by
    /// the caller.
    pub(crate) fn from_literal(expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Integer(v) => Some(Value::Int(*v)),
            Expr::Float(v)   => Some(Value::Float(*v)),
            Expr::Str(s)     => Some(Value::Str(s.clone())),
            Expr::Var(_)     => None,
        }
    }

    /// Integer view. Floats truncate toward zero, booleans are 0/1, strings
    /// must hold an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v)   => Some(*v),
            Value::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Value::Float(_) => None,
            Value::Bool(b)  => Some(*b as i64),
            Value::Str(s)   => s.trim().parse().ok(),
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(v)   => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(b)  => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s)   => s.trim().parse().ok(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(v)   => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Str(s)   => !s.is_empty(),
            Value::Bool(b)  => *b,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_)   => "int",
            Value::Float(_) => "float",
            Value::Str(_)   => "string",
            Value::Bool(_)  => "bool",
        }
    }
}

/// Text form used wherever a call expects a name or path.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s)   => f.write_str(s),
            Value::Bool(b)  => write!(f, "{b}"),
        }
    }
}
