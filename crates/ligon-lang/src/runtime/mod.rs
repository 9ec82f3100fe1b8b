pub mod condition;
pub mod interpreter;
pub mod state;
pub mod value;
