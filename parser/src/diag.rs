use crate::internal::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  Lexical,
  Syntax,
  // raised by later compiler stages
  Semantic,
  TypeError,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ErrorKind::Lexical => "Lexical",
      ErrorKind::Syntax => "Syntax",
      ErrorKind::Semantic => "Semantic",
      ErrorKind::TypeError => "TypeError",
    };
    f.write_str(name)
  }
}

/// A fatal error at one offending token. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}:{}:{}: {kind}: {message}", .token.file, .token.line, .token.col)]
pub struct CompileError<'src> {
  pub kind: ErrorKind,
  pub message: String,
  pub token: Token<'src>,
}

impl<'src> CompileError<'src> {
  pub fn new(kind: ErrorKind, message: impl Into<String>, token: Token<'src>) -> Self {
    CompileError { kind, message: message.into(), token }
  }

  pub fn lexical(message: impl Into<String>, token: Token<'src>) -> Self {
    Self::new(ErrorKind::Lexical, message, token)
  }

  pub fn syntax(message: impl Into<String>, token: Token<'src>) -> Self {
    Self::new(ErrorKind::Syntax, message, token)
  }

  pub fn semantic(message: impl Into<String>, token: Token<'src>) -> Self {
    Self::new(ErrorKind::Semantic, message, token)
  }

  pub fn type_error(message: impl Into<String>, token: Token<'src>) -> Self {
    Self::new(ErrorKind::TypeError, message, token)
  }

  /// Full report: header, offending source line, caret line.
  pub fn render(&self, src: &str) -> String {
    Diagnostic::from(self).render(src)
  }
}

/// Owned copy of a `CompileError`'s position and text, detached from the
/// source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub kind: ErrorKind,
  pub file: String,
  pub line: u32,
  pub col: u32,
  pub msg: String,
}

impl From<&CompileError<'_>> for Diagnostic {
  fn from(err: &CompileError<'_>) -> Self {
    Diagnostic {
      kind: err.kind,
      file: err.token.file.to_string(),
      line: err.token.line,
      col: err.token.col,
      msg: err.message.clone(),
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}:{}:{}: {}: {}",
      self.file, self.line, self.col, self.kind, self.msg
    )
  }
}

impl Diagnostic {
  pub fn render(&self, src: &str) -> String {
    let text = source_line(src, self.line);
    let number = self.line.to_string();
    let gutter = " ".repeat(2 + number.len());

    // keep tabs from the source so the caret lines up under the lexeme
    let before = self.col.saturating_sub(1) as usize;
    let mut pad: String = text
      .chars()
      .take(before)
      .map(|c| if c == '\t' { '\t' } else { ' ' })
      .collect();
    let short = before.saturating_sub(pad.chars().count());
    pad.push_str(&" ".repeat(short));

    format!("{self}\n  {number} | {text}\n{gutter} | {pad}^\n")
  }
}

/// Text of the 1-based `line`, without its line terminator.
fn source_line(src: &str, line: u32) -> &str {
  let mut start = if line <= 1 { 0 } else { src.len() };
  let mut current = 1;
  if line > 1 {
    for (i, byte) in src.bytes().enumerate() {
      if byte == b'\n' {
        current += 1;
        if current == line {
          start = i + 1;
          break;
        }
      }
    }
  }
  let rest = &src[start..];
  let end = rest.find('\n').unwrap_or(rest.len());
  rest[..end].trim_end_matches('\r')
}
