use super::{ParseResult, Parser};
use crate::internal::{TokenKind as T, *};

/// Access keyword and modifier read in front of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclPrefix {
  pub access: AccessType,
  pub modifier: ModifierType,
}

impl Default for DeclPrefix {
  fn default() -> Self {
    DeclPrefix {
      access: AccessType::Default,
      modifier: ModifierType::None,
    }
  }
}

impl DeclPrefix {
  /// Class members are private unless marked, everything else is public.
  pub const fn resolve_access(self, parent: Option<idx::AstNode>) -> AccessType {
    match (self.access, parent) {
      (AccessType::Default, Some(_)) => AccessType::Private,
      (AccessType::Default, None) => AccessType::Public,
      (access, _) => access,
    }
  }
}

impl<'src> Parser<'src> {
  /// A declaration starting with an access keyword or a modifier.
  #[instrument(skip_all)]
  pub(super) fn parse_declaration(
    &mut self,
    parent: Option<idx::AstNode>,
  ) -> ParseResult<'src, idx::AstNode> {
    let prefix = self.parse_decl_prefix()?;
    match self.current.kind {
      T::Class if prefix.modifier != ModifierType::None => {
        Err(CompileError::syntax("modifiers are not allowed on classes", self.current))
      }
      T::Class => self.parse_class_decl(parent, prefix),
      T::Var | T::Const => self.parse_var_decl(parent, prefix),
      _ => self.parse_function(parent, prefix),
    }
  }

  /// At most one access keyword, then at most one modifier.
  fn parse_decl_prefix(&mut self) -> ParseResult<'src, DeclPrefix> {
    let mut prefix = DeclPrefix::default();
    if let Some(access) = AccessType::from_keyword(self.current.kind) {
      prefix.access = access;
      self.advance();
    }
    if let Some(modifier) = ModifierType::from_keyword(self.current.kind) {
      prefix.modifier = modifier;
      self.advance();
    }

    if self.current.kind.is_access() {
      if prefix.modifier == ModifierType::None {
        return Err(self.unexpected("only one access specifier is allowed"));
      }
      return Err(self.unexpected("access specifier must come before the modifier"));
    }
    if self.current.kind.is_modifier() {
      return Err(self.unexpected("only one modifier is allowed"));
    }
    trace!(access = %prefix.access, modifier = %prefix.modifier, "decl prefix");
    Ok(prefix)
  }

  /// `name ( params ) [type] { body }`
  #[instrument(skip_all)]
  pub(crate) fn parse_function(
    &mut self,
    parent: Option<idx::AstNode>,
    prefix: DeclPrefix,
  ) -> ParseResult<'src, idx::AstNode> {
    let name = self.expect(T::Ident, "expected function name")?;
    self.expect(T::LParen, "expected '(' after function name")?;
    let params = self.parse_params()?;
    let return_type = if self.current.is(T::LBrace) {
      Type::Void
    } else {
      self.parse_type()?
    };
    let body = self.parse_block("function body")?;

    let name = self.ast.intern(name.lexeme);
    let flags = DeclFlags::decl(prefix.resolve_access(parent), prefix.modifier, false);
    let fn_decl = FnDecl { name, params, return_type, body, flags };
    Ok(self.ast.push(Node::FunctionDecl(fn_decl)))
  }

  /// Parameters after the `(`, through the closing `)`. `Type[a, b]`
  /// declares several parameters of one type.
  fn parse_params(&mut self) -> ParseResult<'src, Vec<Param>> {
    let mut params = Vec::new();
    while !self.current.is(T::RParen) {
      let ty = self.parse_type()?;
      if self.skip(T::LBracket) {
        loop {
          let name = self.expect(T::Ident, "expected parameter name")?;
          params.push(Param { ty, name: self.ast.intern(name.lexeme) });
          if self.skip(T::RBracket) {
            break;
          }
          self.expect(T::Comma, "expected ',' or ']' in parameter group")?;
        }
      } else {
        let name = self.expect(T::Ident, "expected parameter name")?;
        params.push(Param { ty, name: self.ast.intern(name.lexeme) });
      }

      if !self.current.is(T::RParen) {
        self.expect(T::Comma, "expected ',' or ')' after parameter")?;
      }
    }
    self.advance();
    Ok(params)
  }

  /// `var|const name : type [= expr]`
  #[instrument(skip_all)]
  pub(crate) fn parse_var_decl(
    &mut self,
    parent: Option<idx::AstNode>,
    prefix: DeclPrefix,
  ) -> ParseResult<'src, idx::AstNode> {
    let is_const = match self.current.kind {
      T::Var => false,
      T::Const => true,
      _ => return Err(self.unexpected("expected 'var' or 'const'")),
    };
    self.advance();
    let name = self.expect(T::Ident, "expected variable name")?;
    self.expect(T::Colon, "expected ':' after variable name")?;
    let var_type = self.parse_type()?;
    let value = if self.skip(T::Assign) {
      Some(self.parse_expression(1)?)
    } else {
      None
    };

    let name = self.ast.intern(name.lexeme);
    let flags = DeclFlags::decl(prefix.resolve_access(parent), prefix.modifier, is_const);
    let var_decl = VarDecl { name, var_type, value, flags };
    Ok(self.ast.push(Node::VarDecl(var_decl)))
  }

  /// `class name { members }`. The class node is reserved first so its
  /// members can point back at it.
  #[instrument(skip_all)]
  pub(crate) fn parse_class_decl(
    &mut self,
    parent: Option<idx::AstNode>,
    prefix: DeclPrefix,
  ) -> ParseResult<'src, idx::AstNode> {
    self.expect(T::Class, "expected 'class'")?;
    let name = self.expect(T::Ident, "expected class name")?;
    self.expect(T::LBrace, "expected '{' after class name")?;

    let class = self.ast.reserve();
    let body = self.nested(|parser| parser.parse_body(T::RBrace, Some(class), true))?;
    let name = self.ast.intern(name.lexeme);
    let flags = DeclFlags::decl(prefix.resolve_access(parent), ModifierType::None, false);
    self.ast.fill(class, Node::ClassDecl(ClassDecl { name, body, flags }));
    Ok(class)
  }

  /// `if cond { ... } [else if ... | else { ... }]`. An `else if` chain is
  /// read in a loop, then linked from its last `if` back to the first.
  #[instrument(skip_all)]
  pub(crate) fn parse_if_expr(&mut self) -> ParseResult<'src, idx::AstNode> {
    let (cond, then_branch) = self.parse_if_arm()?;
    let mut chain = Vec::new();
    let mut else_branch = None;
    while self.skip(T::Else) {
      if self.current.is(T::If) {
        chain.push(self.parse_if_arm()?);
      } else {
        else_branch = Some(self.parse_block("else branch")?);
        break;
      }
    }
    trace!(links = chain.len() + 1, "if chain");

    for (cond, then_branch) in chain.into_iter().rev() {
      let if_expr = IfExpr { cond, then_branch, else_branch };
      else_branch = Some(self.ast.push(Node::IfExpr(if_expr)));
    }
    let if_expr = IfExpr { cond, then_branch, else_branch };
    Ok(self.ast.push(Node::IfExpr(if_expr)))
  }

  fn parse_if_arm(&mut self) -> ParseResult<'src, (idx::AstNode, idx::AstNode)> {
    self.expect(T::If, "expected 'if'")?;
    let cond = self.parse_expression(1)?;
    let then_branch = self.parse_block("if branch")?;
    Ok((cond, then_branch))
  }

  pub(crate) fn parse_type(&mut self) -> ParseResult<'src, Type> {
    match Type::from_keyword(self.current.kind) {
      Some(ty) => {
        self.advance();
        Ok(ty)
      }
      None => Err(self.unexpected("expected a type")),
    }
  }
}
