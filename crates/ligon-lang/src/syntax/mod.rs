pub mod ast;
pub mod args;
pub mod block;
pub mod parser;
pub mod source;
