use super::{ParseResult, Parser};
use crate::internal::{TokenKind as T, *};

impl<'src> Parser<'src> {
  /// Value of a literal token. Integers are `int64`, unsigned literals
  /// `uint64` and floats `float64`; nothing is narrowed here.
  pub(super) fn literal_value(&mut self, token: Token<'src>) -> ParseResult<'src, LiteralValue> {
    let value = match token.kind {
      T::IntLit => LiteralValue::Int64(token.lexeme.parse().map_err(|_| out_of_range(token))?),
      T::UnsignedLit => {
        let digits = token.lexeme.strip_suffix('u').unwrap_or(token.lexeme);
        LiteralValue::UInt64(digits.parse().map_err(|_| out_of_range(token))?)
      }
      T::FloatLit => LiteralValue::Float64(token.lexeme.parse().map_err(|_| {
        CompileError::syntax(format!("invalid float literal '{}'", token.lexeme), token)
      })?),
      T::BoolLit => LiteralValue::Boolean(token.lexeme == "true"),
      T::StringLit => {
        let text = decode_string(token)?;
        LiteralValue::String(self.ast.intern(&text))
      }
      T::ByteLit => LiteralValue::Byte(decode_byte(token)?),
      _ => return Err(CompileError::syntax("expected a literal", token)),
    };
    Ok(value)
  }
}

fn out_of_range(token: Token<'_>) -> CompileError<'_> {
  CompileError::syntax(
    format!("integer literal '{}' is out of range", token.lexeme),
    token,
  )
}

/// `\n \t \r \\ \' \"` are recognized, any other escaped char stands for
/// itself.
pub fn unescape(escaped: char) -> char {
  match escaped {
    'n' => '\n',
    't' => '\t',
    'r' => '\r',
    other => other,
  }
}

/// Text between the quotes of a string token, escapes resolved.
pub fn decode_string(token: Token<'_>) -> ParseResult<'_, String> {
  let body = token.lexeme.strip_prefix('"').unwrap_or(token.lexeme);
  let mut text = String::with_capacity(body.len());
  let mut chars = body.chars();
  while let Some(ch) = chars.next() {
    match ch {
      // the lexer ends a string right after its closing quote
      '"' => return Ok(text),
      '\\' => match chars.next() {
        Some(escaped) => text.push(unescape(escaped)),
        None => break,
      },
      _ => text.push(ch),
    }
  }
  Err(CompileError::lexical("unterminated string literal", token))
}

pub fn decode_byte(token: Token<'_>) -> ParseResult<'_, u8> {
  let inner = token
    .lexeme
    .strip_prefix('\'')
    .and_then(|rest| rest.strip_suffix('\''));
  let Some(inner) = inner else {
    return Err(CompileError::lexical("unterminated byte literal", token));
  };

  let mut chars = inner.chars();
  let ch = match (chars.next(), chars.next(), chars.next()) {
    (None, _, _) => return Err(CompileError::lexical("empty byte literal", token)),
    (Some('\\'), None, _) => {
      return Err(CompileError::lexical("unterminated byte literal", token));
    }
    (Some('\\'), Some(escaped), None) => unescape(escaped),
    (Some(ch), None, _) => ch,
    _ => {
      return Err(CompileError::lexical(
        "byte literal must hold a single character",
        token,
      ));
    }
  };
  if !ch.is_ascii() {
    return Err(CompileError::lexical(
      format!("byte literal '{ch}' is not an ASCII character"),
      token,
    ));
  }
  Ok(ch as u8)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn tok(kind: TokenKind, lexeme: &str) -> Token<'_> {
    Token::new(kind, lexeme, "test.vs", 0, 1, 1)
  }

  #[test]
  fn string_escapes() {
    let cases = [
      (r#""""#, ""),
      (r#""plain""#, "plain"),
      (r#""a\nb""#, "a\nb"),
      (r#""\t\r\\""#, "\t\r\\"),
      (r#""say \"hi\"""#, "say \"hi\""),
      (r#""it\'s""#, "it's"),
      (r#""\q""#, "q"),
      (r#""héllo""#, "héllo"),
    ];
    for (lexeme, expected) in cases {
      assert_eq!(decode_string(tok(T::StringLit, lexeme)), Ok(expected.to_string()));
    }
  }

  #[test]
  fn unterminated_strings() {
    for lexeme in [r#""abc"#, r#"""#, r#""abc\"#, r#""x\""#] {
      let err = decode_string(tok(T::StringLit, lexeme)).expect_err(lexeme);
      assert_eq!(err.kind, ErrorKind::Lexical);
    }
  }

  #[test]
  fn byte_values() {
    let cases = [
      ("'a'", b'a'),
      ("'0'", b'0'),
      (r"'\n'", b'\n'),
      (r"'\t'", b'\t'),
      (r"'\\'", b'\\'),
      (r"'\''", b'\''),
      (r"'\z'", b'z'),
      ("'''", b'\''),
    ];
    for (lexeme, expected) in cases {
      assert_eq!(decode_byte(tok(T::ByteLit, lexeme)), Ok(expected), "lexeme: {lexeme}");
    }
  }

  #[test]
  fn malformed_bytes() {
    let cases = [
      ("''", "empty byte literal"),
      ("'a", "unterminated byte literal"),
      ("'", "unterminated byte literal"),
      (r"'\'", "unterminated byte literal"),
      ("'ab'", "byte literal must hold a single character"),
      ("'é'", "byte literal 'é' is not an ASCII character"),
    ];
    for (lexeme, message) in cases {
      let err = decode_byte(tok(T::ByteLit, lexeme)).expect_err(lexeme);
      assert_eq!((err.kind, err.message.as_str()), (ErrorKind::Lexical, message));
    }
  }

  #[test]
  fn numeric_limits() {
    let mut parser = Parser::new("", "test.vs");
    let cases = [
      (tok(T::IntLit, "9223372036854775807"), Some(LiteralValue::Int64(i64::MAX))),
      (tok(T::IntLit, "9223372036854775808"), None),
      (tok(T::UnsignedLit, "18446744073709551615u"), Some(LiteralValue::UInt64(u64::MAX))),
      (tok(T::UnsignedLit, "18446744073709551616u"), None),
      (tok(T::FloatLit, "0.25"), Some(LiteralValue::Float64(0.25))),
      (tok(T::BoolLit, "false"), Some(LiteralValue::Boolean(false))),
    ];
    for (token, expected) in cases {
      assert_eq!(parser.literal_value(token).ok(), expected, "lexeme: {}", token.lexeme);
    }
  }
}
