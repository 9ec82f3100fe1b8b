/// Error codes prefixed by kind: P = parser (fatal), W = absorbed warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Parser
    P001, // unterminated block

    // Warnings: the run continues, the anomaly is only recorded
    W001, // unparsable statement dropped
    W002, // unrecognized call target
    W003, // malformed condition, treated as false
    W004, // call rejected by its handler
    W005, // unknown key name in a binding
    W006, // asset failed to load, placeholder used
}

impl ErrorCode {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::P001)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P001 => "P001",
            Self::W001 => "W001",
            Self::W002 => "W002",
            Self::W003 => "W003",
            Self::W004 => "W004",
            Self::W005 => "W005",
            Self::W006 => "W006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{code}] {line}:{column}: {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { code, line, column, message: message.into() }
    }

    pub fn is_error(&self) -> bool { self.code.is_error() }
}

// ─────────────────────────────────────────────────────────────────────────────

/// Raised by a call handler that cannot use its arguments. Never escapes the
/// interpreter: it is downgraded to a `W004` warning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[runtime] {line}: {message}")]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}
