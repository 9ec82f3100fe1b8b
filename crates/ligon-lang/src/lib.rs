pub mod syntax;
pub mod runtime;
pub mod namespaces;
pub mod frame;
pub mod error;

pub use error::{Error, ErrorCode, RuntimeError};
pub use syntax::ast::{Call, Expr, Node, Program, Span};
pub use runtime::value::Value;
pub use runtime::state::{Rgb, RuntimeState, Vec2};
pub use runtime::interpreter::Interpreter;
pub use namespaces::{CallRegistry, NamespaceProvider};
pub use frame::{
    AssetLoader, Backend, BackendError, FrameConfig, FrameError, FrameLoop, FrameSnapshot,
    FrameStats, InputSnapshot, Key, SpriteDraw, WindowSpec, run,
};

// ─── Public API ───────────────────────────────────────────────────────────────

/// Parse source text. Only an unterminated block (`P001`) fails; dropped
/// lines are returned as `Program::warnings`.
pub fn parse(source: &str) -> Result<Program, Error> {
    syntax::parser::Parser::new().parse(source)
}

/// A program after its setup pass.
#[derive(Debug, Clone)]
pub struct Setup {
    pub state: RuntimeState,
    /// Parser warnings followed by interpreter warnings.
    pub warnings: Vec<Error>,
}

/// Parse `source` and run the setup pass against a fresh state using the
/// standard call table.
pub fn setup(source: &str) -> Result<Setup, Error> {
    let program = parse(source)?;
    let registry = CallRegistry::standard();
    let mut interp = Interpreter::new(&registry);
    let mut state = RuntimeState::new();
    interp.run(&program.nodes, &mut state);

    let mut warnings = program.warnings;
    warnings.extend(interp.take_diagnostics());
    Ok(Setup { state, warnings })
}
