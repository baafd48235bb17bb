use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Illegal,
  Comment,
  Ident,

  // literals
  IntLit,
  FloatLit,
  UnsignedLit,
  BoolLit,
  StringLit,
  ByteLit,

  // operators
  Plus,
  Minus,
  Asterisk,
  Slash,
  Percent,
  Assign,
  Eq,
  NotEq,
  Lt,
  Gt,
  LtEq,
  GtEq,
  Not,
  And,
  Or,
  Vbar,

  // delimiters
  LParen,
  RParen,
  LBrace,
  RBrace,
  LBracket,
  RBracket,
  Comma,
  Semicolon,
  Colon,
  Dot,

  // keywords
  Public,
  Private,
  Virtual,
  Override,
  Static,
  Const,
  Var,
  If,
  Else,
  Match,
  For,
  Return,
  Structure,
  Enumeration,
  Define,
  Typedef,
  Class,

  // primitive type keywords
  Int8,
  Int16,
  Int32,
  Int64,
  UInt8,
  UInt16,
  UInt32,
  UInt64,
  Float32,
  Float64,
  Boolean,
  String,
  Byte,
  Void,

  Eof,
}

use TokenKind as T;

pub const KEYWORDS: [(&str, TokenKind); 33] = [
  ("public", T::Public),
  ("private", T::Private),
  ("virtual", T::Virtual),
  ("override", T::Override),
  ("static", T::Static),
  ("const", T::Const),
  ("var", T::Var),
  ("if", T::If),
  ("else", T::Else),
  ("match", T::Match),
  ("for", T::For),
  ("return", T::Return),
  ("structure", T::Structure),
  ("enumeration", T::Enumeration),
  ("define", T::Define),
  ("typedef", T::Typedef),
  ("class", T::Class),
  ("true", T::BoolLit),
  ("false", T::BoolLit),
  ("int8", T::Int8),
  ("int16", T::Int16),
  ("int32", T::Int32),
  ("int64", T::Int64),
  ("uint8", T::UInt8),
  ("uint16", T::UInt16),
  ("uint32", T::UInt32),
  ("uint64", T::UInt64),
  ("float32", T::Float32),
  ("float64", T::Float64),
  ("boolean", T::Boolean),
  ("string", T::String),
  ("byte", T::Byte),
  ("void", T::Void),
];

static KEYWORD_TABLE: Lazy<HashMap<&'static str, TokenKind>> =
  Lazy::new(|| KEYWORDS.iter().copied().collect());

/// Exact-spelling keyword lookup, `None` for plain identifiers.
pub fn keyword(spelling: &str) -> Option<TokenKind> {
  KEYWORD_TABLE.get(spelling).copied()
}

impl TokenKind {
  /// Binding power for binary operators, `0` ends expression climbing.
  pub const fn precedence(self) -> u8 {
    match self {
      T::Vbar | T::Colon => 1,
      T::And => 2,
      T::Eq | T::NotEq => 3,
      T::Lt | T::LtEq | T::Gt | T::GtEq => 4,
      T::Plus | T::Minus => 5,
      T::Asterisk | T::Slash | T::Percent => 6,
      _ => 0,
    }
  }

  pub const fn is_access(self) -> bool {
    matches!(self, T::Public | T::Private)
  }

  pub const fn is_modifier(self) -> bool {
    matches!(self, T::Static | T::Virtual | T::Override)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub lexeme: &'src str,
  pub file: &'src str,
  pub offset: u32,
  pub line: u32,
  pub col: u32,
}

impl<'src> Token<'src> {
  pub const fn new(
    kind: TokenKind,
    lexeme: &'src str,
    file: &'src str,
    offset: u32,
    line: u32,
    col: u32,
  ) -> Self {
    Token { kind, lexeme, file, offset, line, col }
  }

  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}
