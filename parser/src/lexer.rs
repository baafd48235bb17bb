use crate::internal::{TokenKind as T, *};

#[derive(Debug, Clone)]
pub struct Lexer<'src> {
  src: &'src str,
  file: &'src str,
  pos: usize,
  line: u32,
  col: u32,
}

impl<'src> Lexer<'src> {
  pub fn new(src: &'src str, file: &'src str) -> Self {
    assert!(src.len() <= u32::MAX as usize);
    Lexer { src, file, pos: 0, line: 1, col: 1 }
  }

  /// All tokens up to and including the first `Eof`.
  pub fn tokenize(mut self) -> Vec<Token<'src>> {
    let mut tokens = Vec::with_capacity(64);
    loop {
      let token = self.next_token();
      tokens.push(token);
      if token.is(T::Eof) {
        return tokens;
      }
    }
  }

  /// Once the source is exhausted every call yields `Eof` at the same position.
  pub fn next_token(&mut self) -> Token<'src> {
    self.skip_whitespace();
    let (start, line, col) = (self.pos, self.line, self.col);
    let Some(byte) = self.peek() else {
      return self.token(T::Eof, start, line, col);
    };
    let kind = match byte {
      b if b.is_ascii_alphabetic() || b == b'_' => self.ident(start),
      b if b.is_ascii_digit() => self.number(),
      b'"' => self.string_lit(),
      b'\'' => self.byte_lit(),
      b'/' if self.peek_at(1) == Some(b'/') => self.line_comment(),
      _ => self.operator(),
    };
    self.token(kind, start, line, col)
  }

  fn token(&self, kind: TokenKind, start: usize, line: u32, col: u32) -> Token<'src> {
    let mut lexeme = &self.src[start..self.pos];
    if kind == T::Comment {
      lexeme = lexeme.trim_end_matches([' ', '\t', '\r']);
    }
    Token::new(kind, lexeme, self.file, start as u32, line, col)
  }

  fn ident(&mut self, start: usize) -> TokenKind {
    self.bump();
    while let Some(b) = self.peek() {
      if b.is_ascii_alphanumeric() || b == b'_' || b == b'\'' {
        self.bump();
      } else {
        break;
      }
    }
    keyword(&self.src[start..self.pos]).unwrap_or(T::Ident)
  }

  fn number(&mut self) -> TokenKind {
    let mut is_float = false;
    while let Some(b) = self.peek() {
      if b == b'.' && !is_float {
        is_float = true;
      } else if !b.is_ascii_digit() {
        break;
      }
      self.bump();
    }
    if !is_float && self.peek() == Some(b'u') {
      self.bump();
      return T::UnsignedLit;
    }
    if is_float { T::FloatLit } else { T::IntLit }
  }

  // escapes are only skipped here, the parser decodes them
  fn string_lit(&mut self) -> TokenKind {
    self.bump(); // `"`
    while let Some(b) = self.peek() {
      self.bump();
      match b {
        b'"' => break,
        b'\\' => {
          self.bump();
        }
        _ => {}
      }
    }
    T::StringLit
  }

  fn byte_lit(&mut self) -> TokenKind {
    self.bump(); // `'`
    match self.peek() {
      Some(b'\\') => {
        self.bump();
        self.bump();
      }
      Some(_) => {
        self.bump();
      }
      None => {}
    }
    if self.peek() == Some(b'\'') {
      self.bump();
    }
    T::ByteLit
  }

  fn line_comment(&mut self) -> TokenKind {
    while self.peek().is_some_and(|b| b != b'\n') {
      self.bump();
    }
    T::Comment
  }

  fn operator(&mut self) -> TokenKind {
    let Some(ch) = self.bump() else {
      return T::Eof;
    };
    match ch {
      '=' => self.either(b'=', T::Eq, T::Assign),
      '!' => self.either(b'=', T::NotEq, T::Not),
      '<' => self.either(b'=', T::LtEq, T::Lt),
      '>' => self.either(b'=', T::GtEq, T::Gt),
      '&' => self.either(b'&', T::And, T::Illegal),
      '|' => self.either(b'|', T::Or, T::Vbar),
      '+' => T::Plus,
      '-' => T::Minus,
      '*' => T::Asterisk,
      '/' => T::Slash,
      '%' => T::Percent,
      '(' => T::LParen,
      ')' => T::RParen,
      '{' => T::LBrace,
      '}' => T::RBrace,
      '[' => T::LBracket,
      ']' => T::RBracket,
      ',' => T::Comma,
      ';' => T::Semicolon,
      ':' => T::Colon,
      '.' => T::Dot,
      _ => T::Illegal,
    }
  }

  fn either(&mut self, second: u8, pair: TokenKind, single: TokenKind) -> TokenKind {
    if self.peek() == Some(second) {
      self.bump();
      pair
    } else {
      single
    }
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
      self.bump();
    }
  }

  /// Consumes one whole char, keeping line/col in step.
  fn bump(&mut self) -> Option<char> {
    let ch = self.src[self.pos..].chars().next()?;
    self.pos += ch.len_utf8();
    if ch == '\n' {
      self.line += 1;
      self.col = 1;
    } else {
      self.col += 1;
    }
    Some(ch)
  }

  fn peek(&self) -> Option<u8> {
    self.peek_at(0)
  }

  fn peek_at(&self, offset: usize) -> Option<u8> {
    self.src.as_bytes().get(self.pos + offset).copied()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::token::TokenKind as T;
  use pretty_assertions::assert_eq;

  fn assert_tokens(input: &str, cases: &[(T, &str)]) {
    let mut lexer = Lexer::new(input, "test.vs");
    for (index, (kind, lexeme)) in cases.iter().enumerate() {
      let token = lexer.next_token();
      assert_eq!((token.kind, token.lexeme), (*kind, *lexeme), "token {index}");
    }
  }

  #[test]
  fn single_char_tokens_and_whitespace() {
    let mut lexer = Lexer::new("{ };.(\t)\n=,", "test.vs");
    let cases: &[(T, u32, u32, &str)] = &[
      (T::LBrace, 1, 1, "{"),
      (T::RBrace, 1, 3, "}"),
      (T::Semicolon, 1, 4, ";"),
      (T::Dot, 1, 5, "."),
      (T::LParen, 1, 6, "("),
      (T::RParen, 1, 8, ")"),
      (T::Assign, 2, 1, "="),
      (T::Comma, 2, 2, ","),
      (T::Eof, 2, 3, ""),
    ];
    for (kind, line, col, lexeme) in cases {
      let token = lexer.next_token();
      assert_eq!(token.kind, *kind);
      assert_eq!((token.line, token.col), (*line, *col), "{kind:?}");
      assert_eq!(token.lexeme, *lexeme);
      assert_eq!(token.file, "test.vs");
    }
  }

  #[test]
  fn operators_prefer_two_chars() {
    assert_tokens(
      "== != <= >= && || = ! < > | & + - * / % [ ] :",
      &[
        (T::Eq, "=="),
        (T::NotEq, "!="),
        (T::LtEq, "<="),
        (T::GtEq, ">="),
        (T::And, "&&"),
        (T::Or, "||"),
        (T::Assign, "="),
        (T::Not, "!"),
        (T::Lt, "<"),
        (T::Gt, ">"),
        (T::Vbar, "|"),
        (T::Illegal, "&"),
        (T::Plus, "+"),
        (T::Minus, "-"),
        (T::Asterisk, "*"),
        (T::Slash, "/"),
        (T::Percent, "%"),
        (T::LBracket, "["),
        (T::RBracket, "]"),
        (T::Colon, ":"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn declarations_comments_and_literals() {
    let input = "var x: int16; \nconst y: float32;\n// This is a comment\t\n// Another comment\nprivate add(int32 a, int32 b) int32 {\n    return a + b;\n}\n\nclass MyClass {\n    private field1: int32;\n    public get() int32 {\n        return field1;\n    }\n}\n\"Hello, World!\"\n'b'";
    assert_tokens(
      input,
      &[
        (T::Var, "var"),
        (T::Ident, "x"),
        (T::Colon, ":"),
        (T::Int16, "int16"),
        (T::Semicolon, ";"),
        (T::Const, "const"),
        (T::Ident, "y"),
        (T::Colon, ":"),
        (T::Float32, "float32"),
        (T::Semicolon, ";"),
        (T::Comment, "// This is a comment"),
        (T::Comment, "// Another comment"),
        (T::Private, "private"),
        (T::Ident, "add"),
        (T::LParen, "("),
        (T::Int32, "int32"),
        (T::Ident, "a"),
        (T::Comma, ","),
        (T::Int32, "int32"),
        (T::Ident, "b"),
        (T::RParen, ")"),
        (T::Int32, "int32"),
        (T::LBrace, "{"),
        (T::Return, "return"),
        (T::Ident, "a"),
        (T::Plus, "+"),
        (T::Ident, "b"),
        (T::Semicolon, ";"),
        (T::RBrace, "}"),
        (T::Class, "class"),
        (T::Ident, "MyClass"),
        (T::LBrace, "{"),
        (T::Private, "private"),
        (T::Ident, "field1"),
        (T::Colon, ":"),
        (T::Int32, "int32"),
        (T::Semicolon, ";"),
        (T::Public, "public"),
        (T::Ident, "get"),
        (T::LParen, "("),
        (T::RParen, ")"),
        (T::Int32, "int32"),
        (T::LBrace, "{"),
        (T::Return, "return"),
        (T::Ident, "field1"),
        (T::Semicolon, ";"),
        (T::RBrace, "}"),
        (T::RBrace, "}"),
        (T::StringLit, "\"Hello, World!\""),
        (T::ByteLit, "'b'"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn identifiers_allow_trailing_apostrophes() {
    assert_tokens(
      "foo _bar x1 z' z'' tail",
      &[
        (T::Ident, "foo"),
        (T::Ident, "_bar"),
        (T::Ident, "x1"),
        (T::Ident, "z'"),
        (T::Ident, "z''"),
        (T::Ident, "tail"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn string_escapes_are_kept_raw() {
    assert_tokens(
      r#""Hello" "Line1\nLine2" "Quote: \"" "Backslash: \\""#,
      &[
        (T::StringLit, r#""Hello""#),
        (T::StringLit, r#""Line1\nLine2""#),
        (T::StringLit, r#""Quote: \"""#),
        (T::StringLit, r#""Backslash: \\""#),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn unterminated_string_runs_to_end() {
    assert_tokens(
      "x \"abc\ndef",
      &[
        (T::Ident, "x"),
        (T::StringLit, "\"abc\ndef"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn byte_literals() {
    assert_tokens(
      r"'a' '\n' '\'' '\\' 'x",
      &[
        (T::ByteLit, "'a'"),
        (T::ByteLit, r"'\n'"),
        (T::ByteLit, r"'\''"),
        (T::ByteLit, r"'\\'"),
        (T::ByteLit, "'x"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn numbers() {
    assert_tokens(
      "17 3.14 42u 1. 1.2.3 7up 1.5u",
      &[
        (T::IntLit, "17"),
        (T::FloatLit, "3.14"),
        (T::UnsignedLit, "42u"),
        (T::FloatLit, "1."),
        (T::FloatLit, "1.2"),
        (T::Dot, "."),
        (T::IntLit, "3"),
        (T::UnsignedLit, "7u"),
        (T::Ident, "p"),
        (T::FloatLit, "1.5"),
        (T::Ident, "u"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn comments_trim_trailing_whitespace() {
    let mut lexer = Lexer::new("// First comment  \r\n// Second\n//", "test.vs");
    let cases: &[(T, u32, &str)] = &[
      (T::Comment, 1, "// First comment"),
      (T::Comment, 2, "// Second"),
      (T::Comment, 3, "//"),
      (T::Eof, 3, ""),
    ];
    for (kind, line, lexeme) in cases {
      let token = lexer.next_token();
      assert_eq!((token.kind, token.line, token.lexeme), (*kind, *line, *lexeme));
    }
  }

  #[test]
  fn illegal_chars() {
    assert_tokens(
      "@ é #",
      &[
        (T::Illegal, "@"),
        (T::Illegal, "é"),
        (T::Illegal, "#"),
        (T::Eof, ""),
      ],
    );
  }

  #[test]
  fn columns_count_chars() {
    let tokens = Lexer::new("\"héllo\" x", "test.vs").tokenize();
    assert_eq!(tokens[1].lexeme, "x");
    assert_eq!(tokens[1].col, 9);
    assert_eq!(tokens[1].offset, 9);
  }

  #[test]
  fn eof_is_idempotent() {
    let mut lexer = Lexer::new("a\n  ", "test.vs");
    assert_eq!(lexer.next_token().kind, T::Ident);
    let eof = lexer.next_token();
    assert_eq!((eof.kind, eof.line, eof.col), (T::Eof, 2, 3));
    for _ in 0..3 {
      assert_eq!(lexer.next_token(), eof);
    }
  }

  #[test]
  fn tokenize_ends_with_single_eof() {
    let tokens = Lexer::new("if a > b { return a; }", "test.vs").tokenize();
    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens.iter().filter(|t| t.is(T::Eof)).count(), 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(T::Eof));
  }
}
