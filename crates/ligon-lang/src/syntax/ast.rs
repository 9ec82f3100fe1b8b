/// Source location attached to every node for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ─── Program ─────────────────────────────────────────────────────────────────

/// A parsed source file: top-level nodes plus the lines the parser dropped.
#[derive(Debug, Clone)]
pub struct Program {
    pub nodes: Vec<Node>,
    pub warnings: Vec<crate::Error>,
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `score = 10`
    Assignment {
        name: String,
        expr: Expr,
        span: Span,
    },
    /// `window.create("main", 800, 600)` or `ligon.draw("bg"): { ... }`
    Call(Call),
    /// `if (x > 5).run: { ... }`
    Conditional {
        /// Raw condition text, evaluated by `runtime::condition` at run time.
        condition: String,
        block: Vec<Node>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Dot-separated namespaced identifier, e.g. `ligon.sprite.set_velocity`.
    pub target: String,
    pub args: Vec<Expr>,
    /// Empty when the call has no `: { ... }` body.
    pub block: Vec<Node>,
    pub span: Span,
}

// ─── Expressions ─────────────────────────────────────────────────────────────

/// Argument and assignment values. Only literals and variable references exist.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    Str(String),
    /// A bare token that is neither a string nor a number, kept verbatim.
    Var(String),
}
