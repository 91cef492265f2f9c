/*!
## Rust Language Module

This Rust module provides lexical analysis for PL/0: the token kinds,
a streaming tokenizer with one symbol of lookahead, the symbol sets
used by the parser for recovery, and the diagnostic type shared by the
whole crate.

*/

pub type Column = std::ops::Range<usize>;
pub type LineNumber = Option<u16>;

#[macro_use]
mod error;
mod lex;
mod symset;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::Lex;
pub use symset::SymSet;
pub use token::Sym;
