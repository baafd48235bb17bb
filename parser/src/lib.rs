pub mod ast;
pub mod diag;
pub mod dump;
pub mod idx;
pub mod lexer;
pub mod parser;
pub mod str_pool;
pub mod token;


pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::dump::*;
  pub use crate::idx;
  pub use crate::lexer::*;
  pub use crate::parser::*;
  pub use crate::str_pool::*;
  pub use crate::token::*;
  pub use bilge::prelude::*;
  pub use tracing::{debug, instrument, trace};
}

use internal::*;

/// Parses one compilation unit. The first lexical or syntax error ends the
/// parse and is returned as is; rendering it is up to the caller.
pub fn parse<'src>(src: &'src str, file: &'src str) -> Result<Ast, CompileError<'src>> {
  Parser::new(src, file).parse()
}

/// Token stream of `src` through the first `Eof`, comments included.
pub fn tokenize<'src>(src: &'src str, file: &'src str) -> Vec<Token<'src>> {
  Lexer::new(src, file).tokenize()
}
