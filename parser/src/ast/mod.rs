mod data;
mod flags;
pub use data::{Ancestors, Ast, NodeData};
pub use flags::DeclFlags;

use crate::internal::{TokenKind as T, *};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
  Void,
  Boolean,
  Byte,
  String,
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
}

impl Type {
  pub const fn from_keyword(kind: TokenKind) -> Option<Type> {
    let ty = match kind {
      T::Void => Type::Void,
      T::Boolean => Type::Boolean,
      T::Byte => Type::Byte,
      T::String => Type::String,
      T::Int8 => Type::Int8,
      T::Int16 => Type::Int16,
      T::Int32 => Type::Int32,
      T::Int64 => Type::Int64,
      T::UInt8 => Type::UInt8,
      T::UInt16 => Type::UInt16,
      T::UInt32 => Type::UInt32,
      T::UInt64 => Type::UInt64,
      T::Float32 => Type::Float32,
      T::Float64 => Type::Float64,
      _ => return None,
    };
    Some(ty)
  }

  pub const fn name(self) -> &'static str {
    match self {
      Type::Void => "void",
      Type::Boolean => "boolean",
      Type::Byte => "byte",
      Type::String => "string",
      Type::Int8 => "int8",
      Type::Int16 => "int16",
      Type::Int32 => "int32",
      Type::Int64 => "int64",
      Type::UInt8 => "uint8",
      Type::UInt16 => "uint16",
      Type::UInt32 => "uint32",
      Type::UInt64 => "uint64",
      Type::Float32 => "float32",
      Type::Float64 => "float64",
    }
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// `Default` only exists while parsing; every declaration in a finished
/// tree is `Public` or `Private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessType {
  Default = 0,
  Public = 1,
  Private = 2,
}

impl AccessType {
  pub const fn from_keyword(kind: TokenKind) -> Option<AccessType> {
    match kind {
      T::Public => Some(AccessType::Public),
      T::Private => Some(AccessType::Private),
      _ => None,
    }
  }
}

impl fmt::Display for AccessType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      AccessType::Default => "Default",
      AccessType::Public => "Public",
      AccessType::Private => "Private",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierType {
  None = 0,
  Static = 1,
  Virtual = 2,
  Override = 3,
}

impl ModifierType {
  pub const fn from_keyword(kind: TokenKind) -> Option<ModifierType> {
    match kind {
      T::Static => Some(ModifierType::Static),
      T::Virtual => Some(ModifierType::Virtual),
      T::Override => Some(ModifierType::Override),
      _ => None,
    }
  }
}

impl fmt::Display for ModifierType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ModifierType::None => "None",
      ModifierType::Static => "Static",
      ModifierType::Virtual => "Virtual",
      ModifierType::Override => "Override",
    };
    f.write_str(name)
  }
}

/// A literal's type is always the type of its active variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
  Int8(i8),
  Int16(i16),
  Int32(i32),
  Int64(i64),
  UInt8(u8),
  UInt16(u16),
  UInt32(u32),
  UInt64(u64),
  Float32(f32),
  Float64(f64),
  Boolean(bool),
  Byte(u8),
  String(idx::StrPool),
}

impl LiteralValue {
  pub const fn ty(&self) -> Type {
    match self {
      LiteralValue::Int8(_) => Type::Int8,
      LiteralValue::Int16(_) => Type::Int16,
      LiteralValue::Int32(_) => Type::Int32,
      LiteralValue::Int64(_) => Type::Int64,
      LiteralValue::UInt8(_) => Type::UInt8,
      LiteralValue::UInt16(_) => Type::UInt16,
      LiteralValue::UInt32(_) => Type::UInt32,
      LiteralValue::UInt64(_) => Type::UInt64,
      LiteralValue::Float32(_) => Type::Float32,
      LiteralValue::Float64(_) => Type::Float64,
      LiteralValue::Boolean(_) => Type::Boolean,
      LiteralValue::Byte(_) => Type::Byte,
      LiteralValue::String(_) => Type::String,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
  pub ty: Type,
  pub name: idx::StrPool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryExpr {
  pub op: idx::StrPool,
  pub left: idx::AstNode,
  pub right: idx::AstNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
  pub name: idx::StrPool,
  pub params: Vec<Param>,
  pub return_type: Type,
  pub body: idx::AstNode,
  pub flags: DeclFlags,
}

impl FnDecl {
  pub fn access(&self) -> AccessType {
    self.flags.access_type()
  }

  pub fn modifier(&self) -> ModifierType {
    self.flags.modifier_type()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarDecl {
  pub name: idx::StrPool,
  pub var_type: Type,
  pub value: Option<idx::AstNode>,
  pub flags: DeclFlags,
}

impl VarDecl {
  pub fn is_const(&self) -> bool {
    self.flags.is_const()
  }

  pub fn access(&self) -> AccessType {
    self.flags.access_type()
  }

  pub fn modifier(&self) -> ModifierType {
    self.flags.modifier_type()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfExpr {
  pub cond: idx::AstNode,
  pub then_branch: idx::AstNode,
  /// Either another `IfExpr` (for `else if`) or a `Block`.
  pub else_branch: Option<idx::AstNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignExpr {
  pub target: idx::StrPool,
  pub value: idx::AstNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDecl {
  pub name: idx::StrPool,
  pub body: idx::AstNode,
  pub flags: DeclFlags,
}

impl ClassDecl {
  pub fn access(&self) -> AccessType {
    self.flags.access_type()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Block(Vec<idx::AstNode>),
  Literal(LiteralValue),
  Identifier(idx::StrPool),
  BinaryExpr(BinaryExpr),
  FunctionDecl(FnDecl),
  ReturnExpr(idx::AstNode),
  VarDecl(VarDecl),
  IfExpr(IfExpr),
  AssignExpr(AssignExpr),
  ClassDecl(ClassDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  Block,
  Literal,
  Identifier,
  BinaryExpr,
  FunctionDecl,
  ReturnExpr,
  VarDecl,
  IfExpr,
  AssignExpr,
  ClassDecl,
}

impl Node {
  pub const fn kind(&self) -> NodeKind {
    match self {
      Node::Block(_) => NodeKind::Block,
      Node::Literal(_) => NodeKind::Literal,
      Node::Identifier(_) => NodeKind::Identifier,
      Node::BinaryExpr(_) => NodeKind::BinaryExpr,
      Node::FunctionDecl(_) => NodeKind::FunctionDecl,
      Node::ReturnExpr(_) => NodeKind::ReturnExpr,
      Node::VarDecl(_) => NodeKind::VarDecl,
      Node::IfExpr(_) => NodeKind::IfExpr,
      Node::AssignExpr(_) => NodeKind::AssignExpr,
      Node::ClassDecl(_) => NodeKind::ClassDecl,
    }
  }

  /// Direct children in source order.
  pub fn children(&self) -> Vec<idx::AstNode> {
    match self {
      Node::Block(children) => children.clone(),
      Node::Literal(_) | Node::Identifier(_) => vec![],
      Node::BinaryExpr(bin) => vec![bin.left, bin.right],
      Node::FunctionDecl(fn_decl) => vec![fn_decl.body],
      Node::ReturnExpr(expr) => vec![*expr],
      Node::VarDecl(var_decl) => var_decl.value.into_iter().collect(),
      Node::IfExpr(if_expr) => {
        let mut children = vec![if_expr.cond, if_expr.then_branch];
        children.extend(if_expr.else_branch);
        children
      }
      Node::AssignExpr(assign) => vec![assign.value],
      Node::ClassDecl(class) => vec![class.body],
    }
  }

  pub const fn is_decl(&self) -> bool {
    matches!(
      self,
      Node::FunctionDecl(_) | Node::VarDecl(_) | Node::ClassDecl(_)
    )
  }

  /// Resolved access of a declaration, `None` for every other node.
  pub fn access(&self) -> Option<AccessType> {
    match self {
      Node::FunctionDecl(fn_decl) => Some(fn_decl.access()),
      Node::VarDecl(var_decl) => Some(var_decl.access()),
      Node::ClassDecl(class) => Some(class.access()),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literal_type_follows_value() {
    let mut pool = StringPool::new();
    let cases = [
      (LiteralValue::Int64(5), Type::Int64),
      (LiteralValue::UInt64(5), Type::UInt64),
      (LiteralValue::Float64(0.5), Type::Float64),
      (LiteralValue::Boolean(true), Type::Boolean),
      (LiteralValue::Byte(b'a'), Type::Byte),
      (LiteralValue::String(pool.intern("hi")), Type::String),
      (LiteralValue::Int8(-1), Type::Int8),
      (LiteralValue::Float32(1.0), Type::Float32),
    ];
    for (value, ty) in cases {
      assert_eq!(value.ty(), ty);
    }
  }

  #[test]
  fn type_keywords() {
    for (spelling, kind) in KEYWORDS {
      if let Some(ty) = Type::from_keyword(kind) {
        assert_eq!(ty.name(), spelling);
      }
    }
    assert_eq!(Type::from_keyword(T::Class), None);
    assert_eq!(Type::from_keyword(T::Ident), None);
  }

  #[test]
  fn if_children_in_source_order() {
    let (c, t, e) = (idx::AstNode::new(0), idx::AstNode::new(1), idx::AstNode::new(2));
    let node = Node::IfExpr(IfExpr { cond: c, then_branch: t, else_branch: Some(e) });
    assert_eq!(node.children(), vec![c, t, e]);
    assert_eq!(node.kind(), NodeKind::IfExpr);
    assert!(!node.is_decl());
    assert_eq!(node.access(), None);
  }
}
