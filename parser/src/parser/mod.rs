use crate::internal::{TokenKind as T, *};
#[cfg(test)]
use std::sync::Once;
#[cfg(test)]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(test)]
use tracing_subscriber::{EnvFilter, fmt};

mod decls;
mod literals;

pub use decls::DeclPrefix;

pub type ParseResult<'src, R> = std::result::Result<R, CompileError<'src>>;

/// Deepest nesting of expressions and classes accepted before parsing fails.
pub const MAX_NESTING: u32 = 64;

/// Recursive-descent parser with two tokens of lookahead. Comments never
/// reach the grammar.
#[derive(Debug)]
pub struct Parser<'src> {
  lexer: Lexer<'src>,
  current: Token<'src>,
  next: Token<'src>,
  ast: Ast,
  depth: u32,
}

impl<'src> Parser<'src> {
  pub fn new(src: &'src str, file: &'src str) -> Parser<'src> {
    #[cfg(test)]
    configure_test_tracing();

    let mut lexer = Lexer::new(src, file);
    let current = Self::pump(&mut lexer);
    let next = Self::pump(&mut lexer);
    Parser {
      lexer,
      current,
      next,
      ast: Ast::with_capacity(src.len() / 4 + 1),
      depth: 0,
    }
  }

  #[instrument(skip_all)]
  pub fn parse(mut self) -> ParseResult<'src, Ast> {
    trace!("Parser::parse()");
    let root = self.parse_program()?;
    self.ast.set_root(root);
    debug!(nodes = self.ast.len(), strings = self.ast.strings().len(), "parsed");
    Ok(self.ast)
  }

  fn parse_program(&mut self) -> ParseResult<'src, idx::AstNode> {
    self.parse_body(T::Eof, None, false)
  }

  /// Declarations and expressions up to `terminator`, collected into a
  /// `Block`. Every member's parent is set to `parent`: `None` for the
  /// top level, the enclosing class otherwise.
  #[instrument(skip_all)]
  pub(crate) fn parse_body(
    &mut self,
    terminator: TokenKind,
    parent: Option<idx::AstNode>,
    consume_terminator: bool,
  ) -> ParseResult<'src, idx::AstNode> {
    let mut members = Vec::new();
    while !self.current.is(terminator) {
      let member = match self.current.kind {
        T::Eof => return Err(self.unexpected("expected '}' to close class body")),
        T::Public | T::Private | T::Static | T::Virtual | T::Override => {
          self.parse_declaration(parent)?
        }
        T::Ident if self.next.is(T::LParen) => {
          self.parse_function(parent, DeclPrefix::default())?
        }
        T::Class => self.parse_class_decl(parent, DeclPrefix::default())?,
        T::Var | T::Const => self.parse_var_decl(parent, DeclPrefix::default())?,
        _ if parent.is_some() => return Err(self.unexpected("expected a class member")),
        _ => self.parse_expression(1)?,
      };
      trace!(kind = ?self.ast.node(member).kind(), "body member");
      members.push(member);
      self.skip(T::Semicolon);
    }
    if consume_terminator {
      self.advance();
    }

    let block = self.ast.push(Node::Block(members.clone()));
    for member in members {
      self.ast.set_parent(member, parent);
    }
    Ok(block)
  }

  /// `{ expr [;] ... }`, as used by function bodies and `if` branches.
  #[instrument(skip_all)]
  pub(crate) fn parse_block(&mut self, what: &str) -> ParseResult<'src, idx::AstNode> {
    self.expect(T::LBrace, &format!("expected '{{' to open {what}"))?;
    let mut exprs = Vec::new();
    while !self.current.is(T::RBrace) {
      if self.current.is(T::Eof) {
        return Err(self.unexpected(&format!("expected '}}' to close {what}")));
      }
      exprs.push(self.parse_expression(1)?);
      self.skip(T::Semicolon);
    }
    self.advance();
    Ok(self.ast.push(Node::Block(exprs)))
  }

  /// Precedence climbing over binary operators. Operators at equal
  /// precedence associate to the left.
  #[instrument(skip_all)]
  pub(crate) fn parse_expression(&mut self, min_prec: u8) -> ParseResult<'src, idx::AstNode> {
    self.nested(|parser| parser.parse_binary(min_prec))
  }

  fn parse_binary(&mut self, min_prec: u8) -> ParseResult<'src, idx::AstNode> {
    if self.current.is(T::Ident) && self.next.is(T::Assign) {
      let target = self.advance();
      self.advance(); // `=`
      let value = self.parse_expression(1)?;
      let target = self.ast.intern(target.lexeme);
      return Ok(self.ast.push(Node::AssignExpr(AssignExpr { target, value })));
    }

    let mut left = self.parse_primary()?;
    loop {
      let prec = self.current.kind.precedence();
      if prec == 0 || prec < min_prec {
        break;
      }
      let op = self.advance();
      let right = self.parse_expression(prec + 1)?;
      let op = self.ast.intern(op.lexeme);
      left = self.ast.push(Node::BinaryExpr(BinaryExpr { op, left, right }));
    }
    Ok(left)
  }

  #[instrument(skip_all)]
  fn parse_primary(&mut self) -> ParseResult<'src, idx::AstNode> {
    match self.current.kind {
      T::IntLit | T::UnsignedLit | T::FloatLit | T::BoolLit | T::StringLit | T::ByteLit => {
        let token = self.advance();
        let value = self.literal_value(token)?;
        Ok(self.ast.push(Node::Literal(value)))
      }
      T::Ident => {
        let token = self.advance();
        let name = self.ast.intern(token.lexeme);
        Ok(self.ast.push(Node::Identifier(name)))
      }
      T::Return => {
        self.advance();
        let expr = self.parse_expression(1)?;
        Ok(self.ast.push(Node::ReturnExpr(expr)))
      }
      T::LParen => {
        self.advance();
        let expr = self.parse_expression(1)?;
        self.expect(T::RParen, "expected ')' after expression")?;
        Ok(expr)
      }
      T::If => self.parse_if_expr(),
      // local variables belong to no class
      T::Var | T::Const => self.parse_var_decl(None, DeclPrefix::default()),
      _ => Err(self.unexpected("expected an expression")),
    }
  }

  /// Runs `parse` one level deeper, failing at the current token once the
  /// source nests past `MAX_NESTING`.
  pub(crate) fn nested<R>(
    &mut self,
    parse: impl FnOnce(&mut Self) -> ParseResult<'src, R>,
  ) -> ParseResult<'src, R> {
    if self.depth >= MAX_NESTING {
      return Err(CompileError::syntax("expression nested too deeply", self.current));
    }
    self.depth += 1;
    let result = parse(self);
    self.depth -= 1;
    result
  }

  /// Error for the current token. An illegal character is always reported as
  /// a lexical error, whatever the grammar wanted here.
  pub(crate) fn unexpected(&self, expected: &str) -> CompileError<'src> {
    let token = self.current;
    match token.kind {
      T::Illegal => CompileError::lexical(format!("illegal character '{}'", token.lexeme), token),
      T::Eof => CompileError::syntax(format!("{expected}, found end of file"), token),
      _ => CompileError::syntax(format!("{expected}, found '{}'", token.lexeme), token),
    }
  }

  pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<'src, Token<'src>> {
    if self.current.is(kind) {
      Ok(self.advance())
    } else {
      Err(self.unexpected(expected))
    }
  }

  pub(crate) fn skip(&mut self, kind: TokenKind) -> bool {
    if self.current.is(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  /// Shifts the lookahead window by one, returning the token it consumed.
  pub(crate) fn advance(&mut self) -> Token<'src> {
    let consumed = self.current;
    self.current = self.next;
    self.next = Self::pump(&mut self.lexer);
    trace!(kind = ?consumed.kind, lexeme = consumed.lexeme, "advance");
    consumed
  }

  fn pump(lexer: &mut Lexer<'src>) -> Token<'src> {
    loop {
      let token = lexer.next_token();
      if !token.is(T::Comment) {
        return token;
      }
    }
  }
}

#[cfg(test)]
static INIT: Once = Once::new();

#[cfg(test)]
fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}
