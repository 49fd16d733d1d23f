/*!
## Machine Module

This Rust module is a bytecode compiler and virtual machine for HL.

*/

pub type Address = usize;

mod compile;
mod expr;
mod link;
mod opcode;
mod operation;
mod program;
mod runtime;
mod var;

pub use compile::compile;
pub use compile::MAX_DEPTH;
pub use expr::TempPool;
pub use expr::MAX_TEMPS;
pub use link::link;
pub use opcode::Op;
pub use opcode::Rel;
pub use opcode::Target;
pub use operation::Operation;
pub use program::Program;
pub use program::MAX_OPS;
pub use runtime::Event;
pub use runtime::Runtime;
pub use var::Var;
