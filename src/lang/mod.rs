/*!
# Language Module

This Rust module provides lexical analysis and statement recognition
for HL: the symbol interner, the tokenizer, and the statement-template
matcher.

*/

#[macro_use]
mod error;
mod lex;
mod phrase;
mod symbol;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::PADDING;
pub use phrase::Bind;
pub use phrase::PhraseSet;
pub use phrase::Stmt;
pub use phrase::MAX_SLOTS;
pub use symbol::Sym;
pub use symbol::SymbolTable;
pub use symbol::WellKnown;
pub use symbol::MAX_SYMBOLS;

pub(crate) use lex::is_hl_name;

/// Range of token positions a diagnostic or a wildcard binding refers to.
pub type Column = std::ops::Range<usize>;
