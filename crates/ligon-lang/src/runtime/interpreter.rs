//! Setup pass: walks the AST once, top to bottom, against a `RuntimeState`.
//! Every domain call goes through the `CallRegistry`; the interpreter only
//! handles assignment, argument evaluation and conditionals.

use crate::error::{Error, ErrorCode};
use crate::namespaces::{CallRegistry, Dispatch};
use crate::runtime::condition;
use crate::runtime::state::RuntimeState;
use crate::syntax::ast::{Call, Expr, Node, Span};
use crate::Value;

// ─── Interpreter ──────────────────────────────────────────────────────────────

pub struct Interpreter<'a> {
    registry: &'a CallRegistry,
    diagnostics: Vec<Error>,
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a CallRegistry) -> Self {
        Self { registry, diagnostics: Vec::new() }
    }

    /// Execute `nodes` in order. Never fails: anomalies become diagnostics.
    pub fn run(&mut self, nodes: &[Node], state: &mut RuntimeState) {
        for node in nodes {
            self.exec(node, state);
        }
    }

    /// Warnings recorded so far, in execution order.
    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    fn warn(&mut self, code: ErrorCode, span: Span, message: String) {
        log::debug!("{code} at {}:{}: {message}", span.line, span.column);
        self.diagnostics.push(Error::new(code, span.line, span.column, message));
    }

    // ─── Statements ───────────────────────────────────────────────────────────

    fn exec(&mut self, node: &Node, state: &mut RuntimeState) {
        match node {
            Node::Assignment { name, expr, .. } => {
                let value = eval_expr(expr, state);
                state.variables.insert(name.clone(), value);
            }
            Node::Call(call) => self.exec_call(call, state),
            Node::Conditional { condition, block, span } => {
                match condition::evaluate(condition, &state.variables) {
                    Ok(true)  => self.run(block, state),
                    Ok(false) => {}
                    Err(e)    => self.warn(ErrorCode::W003, *span,
                        format!("condition `{condition}` treated as false: {e}")),
                }
            }
        }
    }

    fn exec_call(&mut self, call: &Call, state: &mut RuntimeState) {
        let args: Vec<Value> = call.args.iter().map(|a| eval_expr(a, state)).collect();
        match self.registry.call(&call.target, &args, state, call.span.line) {
            Ok(Dispatch::Handled(_)) => self.run(&call.block, state),
            Ok(Dispatch::Unrecognized) => self.warn(ErrorCode::W002, call.span,
                format!("unrecognized call target `{}` ignored", call.target)),
            Err(e) => self.warn(ErrorCode::W004, call.span, e.message),
        }
    }
}

// ─── Expressions ──────────────────────────────────────────────────────────────

/// Literals map directly; unset variables read as `Int(0)`.
fn eval_expr(expr: &Expr, state: &RuntimeState) -> Value {
    match expr {
        Expr::Var(name) => state.variable(name).cloned().unwrap_or(Value::Int(0)),
        literal => Value::from_literal(literal).unwrap_or(Value::Int(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parser::Parser;

    fn run(src: &str) -> (RuntimeState, Vec<Error>) {
        let program = Parser::new().parse(src).unwrap();
        let registry = CallRegistry::standard();
        let mut interp = Interpreter::new(&registry);
        let mut state = RuntimeState::new();
        interp.run(&program.nodes, &mut state);
        (state, interp.take_diagnostics())
    }

    #[test]
    fn assignment_copies_variables() {
        let (state, diags) = run("a = 3\nb = a\nc = missing");
        assert_eq!(state.variable("b"), Some(&Value::Int(3)));
        assert_eq!(state.variable("c"), Some(&Value::Int(0)));
        assert!(diags.is_empty());
    }

    #[test]
    fn unrecognized_call_skips_block() {
        let (state, diags) = run("foo.bar(1): {\n  x = 1\n}");
        assert!(state.variable("x").is_none());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::W002);
        assert_eq!(diags[0].line, 1);
    }

    #[test]
    fn rejected_call_is_a_warning() {
        let (state, diags) = run("window.create(\"main\", wide, 600)\nwindow.create(\"x\")");
        // `wide` is unset and reads as 0, so only the second call is rejected
        assert_eq!(state.windows.len(), 1);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::W004);
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn malformed_condition_is_false() {
        let (state, diags) = run("if (x >).run: {\n  y = 1\n}");
        assert!(state.variable("y").is_none());
        assert_eq!(diags[0].code, ErrorCode::W003);
    }

    #[test]
    fn call_block_shares_scope() {
        let (state, _) = run("ligon.draw(\"bg\"): {\n  inside = 2\n}\nafter = inside");
        assert_eq!(state.variable("after"), Some(&Value::Int(2)));
    }
}
