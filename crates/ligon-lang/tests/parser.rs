//! Front-end tests: comment stripping, block extraction and statement
//! classification through the public `parse` entry point.

use ligon_lang::syntax::block::extract_block;
use ligon_lang::syntax::source::strip_comments;
use ligon_lang::{parse, Call, ErrorCode, Expr, Node};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn nodes(src: &str) -> Vec<Node> {
    parse(src).unwrap_or_else(|e| panic!("parse failed: {e}")).nodes
}

fn call(node: &Node) -> &Call {
    match node {
        Node::Call(c) => c,
        other => panic!("expected call, got {other:?}"),
    }
}

fn lines(src: &str) -> Vec<String> {
    src.lines().map(String::from).collect()
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

#[test]
fn block_body_excludes_outer_braces() {
    let src = lines("ligon.draw(\"bg\"): {\n  a = 1\n  if (a).run: {\n    b = 2\n  }\n}\nafter = 3");
    let block = extract_block(&src, 0, 1).unwrap();
    assert_eq!(block.end, 5);
    assert_eq!(block.body.len(), 6);
    assert!(!block.body.first().is_some_and(|l| l.contains("ligon.draw")));
    assert!(!block.body.last().is_some_and(|l| l.trim() == "}"));
    assert_eq!(block.body.iter().filter(|l| l.contains('{')).count(), 1);
    assert_eq!(block.body.iter().filter(|l| l.contains('}')).count(), 1);
}

#[test]
fn parse_resumes_after_block() {
    let nodes = nodes("ligon.draw(\"bg\"): {\n  a = 1\n}\nafter = 3");
    assert_eq!(nodes.len(), 2);
    assert_eq!(call(&nodes[0]).block.len(), 1);
    assert!(matches!(&nodes[1], Node::Assignment { name, span, .. } if name == "after" && span.line == 4));
}

#[test]
fn unterminated_block_fails() {
    let err = parse("x = 1\nligon.draw(\"bg\"): {\n  y = 2\n").unwrap_err();
    assert_eq!(err.code, ErrorCode::P001);
    assert!(err.is_error());
    assert_eq!(err.line, 2);
}

#[test]
fn unterminated_nested_block_fails() {
    assert!(parse("if (a).run: {\n  ligon.draw(\"x\"): {\n}").is_err());
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[test]
fn argument_classification() {
    let nodes = nodes("t.call(\"3\", 3, 3.0, x)");
    assert_eq!(call(&nodes[0]).args, vec![
        Expr::Str("3".into()),
        Expr::Integer(3),
        Expr::Float(3.0),
        Expr::Var("x".into()),
    ]);
}

#[test]
fn namespaced_argument_form() {
    let nodes = nodes("ligon.getservice{physics}");
    let c = call(&nodes[0]);
    assert_eq!(c.target, "ligon.getservice");
    assert_eq!(c.args, vec![Expr::Str("physics".into())]);
}

#[test]
fn comments_are_stripped_outside_strings() {
    let nodes = nodes("// header\nrender.model(\"http://host/a.obj\") // trailing\n");
    assert_eq!(nodes.len(), 1);
    assert_eq!(call(&nodes[0]).args, vec![Expr::Str("http://host/a.obj".into())]);
    assert_eq!(strip_comments("a // b\n// c").len(), 2);
}

#[test]
fn dropped_lines_become_warnings() {
    let program = parse("x = 1\nthis is not ligon\ny = 2").unwrap();
    assert_eq!(program.nodes.len(), 2);
    assert_eq!(program.warnings.len(), 1);
    assert_eq!(program.warnings[0].code, ErrorCode::W001);
    assert_eq!(program.warnings[0].line, 2);
    assert!(!program.warnings[0].is_error());
}

#[test]
fn block_lines_keep_source_numbering() {
    let nodes = nodes("\n\nwindow.create(\"w\", 1, 1): {\n\n    inner = 1\n}");
    let c = call(&nodes[0]);
    assert_eq!(c.span.line, 3);
    match &c.block[0] {
        Node::Assignment { span, .. } => {
            assert_eq!(span.line, 5);
            assert_eq!(span.column, 5);
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn conditional_keeps_condition_text() {
    let nodes = nodes("if (score >= 10 and alive).run: { won = 1 }");
    match &nodes[0] {
        Node::Conditional { condition, block, .. } => {
            assert_eq!(condition, "score >= 10 and alive");
            assert_eq!(block.len(), 1);
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn text_after_closing_brace_is_a_warning() {
    let program = parse("if (1 > 0).run: { a = 1 } b = 2\nc = 3").unwrap();
    assert_eq!(program.nodes.len(), 2);
    assert_eq!(program.warnings.len(), 1);
    let w = &program.warnings[0];
    assert_eq!(w.code, ErrorCode::W001);
    assert_eq!((w.line, w.column), (1, 27));
    assert!(w.message.contains("b = 2"));
}

#[test]
fn closing_brace_alone_is_silent() {
    let program = parse("ligon.draw(\"bg\"): {\n  a = 1\n}   \nb = 2").unwrap();
    assert!(program.warnings.is_empty());
}
