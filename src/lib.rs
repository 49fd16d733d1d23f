//! # HL
//!
//! A translator for HL, a small imperative language with integer
//! variables, labels and `goto`, structured `if`/`else`, and
//! `print`/`time` diagnostics.
//!
//! Source text is tokenized into interned symbol codes, recognized
//! statement by statement against a template catalog, compiled to
//! register-machine bytecode with relocated jump targets, and executed
//! by a flat dispatch loop.
//!
//! Run the `hl` binary with no arguments for an interactive session:
//! ```text
//! > a=1; b=2; print a+b;
//! 3
//! ```
//! Pass a source file to compile and run it in one shot.

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod _Language;

pub mod lang;
pub mod mach;
pub mod term;
