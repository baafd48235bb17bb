use crate::internal::*;
use std::fmt;

/// Indented, one-node-per-line rendering of a whole tree.
pub fn dump(ast: &Ast) -> String {
  AstDump { ast, root: ast.root() }.to_string()
}

/// Same rendering starting at any node.
pub fn dump_node(ast: &Ast, root: idx::AstNode) -> String {
  AstDump { ast, root }.to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct AstDump<'a> {
  pub ast: &'a Ast,
  pub root: idx::AstNode,
}

/// Pre-order walk with an explicit stack, so long operator chains and deep
/// trees print without deep recursion.
impl fmt::Display for AstDump<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let ast = self.ast;
    let mut stack = vec![(self.root, 0)];
    while let Some((index, indent)) = stack.pop() {
      let pad = " ".repeat(indent);
      let first_child = stack.len();
      match ast.node(index) {
        Node::Block(children) => {
          writeln!(f, "{pad}Block")?;
          stack.extend(children.iter().map(|child| (*child, indent + 2)));
        }
        Node::Literal(value) => {
          write!(f, "{pad}Literal({} ", value.ty())?;
          self.write_literal(f, value)?;
          writeln!(f, ")")?;
        }
        Node::Identifier(name) => writeln!(f, "{pad}Identifier({})", ast.str(*name))?,
        Node::BinaryExpr(bin) => {
          writeln!(f, "{pad}BinaryExpr({})", ast.str(bin.op))?;
          stack.extend([(bin.left, indent + 2), (bin.right, indent + 2)]);
        }
        Node::FunctionDecl(fn_decl) => {
          writeln!(
            f,
            "{pad}FunctionDecl({} {} {}) -> {}",
            fn_decl.access(),
            fn_decl.modifier(),
            ast.str(fn_decl.name),
            fn_decl.return_type
          )?;
          writeln!(f, "{pad}  Params:")?;
          for param in &fn_decl.params {
            writeln!(f, "{pad}    {} {}", param.ty, ast.str(param.name))?;
          }
          writeln!(f, "{pad}  Body:")?;
          stack.push((fn_decl.body, indent + 4));
        }
        Node::ReturnExpr(expr) => {
          writeln!(f, "{pad}ReturnExpr")?;
          stack.push((*expr, indent + 2));
        }
        Node::VarDecl(var_decl) => {
          writeln!(
            f,
            "{pad}VarDecl({} {} {} {}: {})",
            var_decl.access(),
            var_decl.modifier(),
            if var_decl.is_const() { "const" } else { "var" },
            ast.str(var_decl.name),
            var_decl.var_type
          )?;
          stack.extend(var_decl.value.map(|value| (value, indent + 2)));
        }
        Node::IfExpr(if_expr) => {
          writeln!(f, "{pad}IfExpr")?;
          stack.extend([(if_expr.cond, indent + 2), (if_expr.then_branch, indent + 2)]);
          stack.extend(if_expr.else_branch.map(|branch| (branch, indent + 2)));
        }
        Node::AssignExpr(assign) => {
          writeln!(f, "{pad}AssignExpr({})", ast.str(assign.target))?;
          stack.push((assign.value, indent + 2));
        }
        Node::ClassDecl(class) => {
          writeln!(f, "{pad}ClassDecl({} {})", class.access(), ast.str(class.name))?;
          stack.push((class.body, indent + 2));
        }
      }
      // children went on in source order, they must come off that way
      stack[first_child..].reverse();
    }
    Ok(())
  }
}

impl AstDump<'_> {
  fn write_literal(&self, f: &mut fmt::Formatter<'_>, value: &LiteralValue) -> fmt::Result {
    match value {
      LiteralValue::Int8(v) => write!(f, "{v}"),
      LiteralValue::Int16(v) => write!(f, "{v}"),
      LiteralValue::Int32(v) => write!(f, "{v}"),
      LiteralValue::Int64(v) => write!(f, "{v}"),
      LiteralValue::UInt8(v) => write!(f, "{v}"),
      LiteralValue::UInt16(v) => write!(f, "{v}"),
      LiteralValue::UInt32(v) => write!(f, "{v}"),
      LiteralValue::UInt64(v) => write!(f, "{v}"),
      LiteralValue::Float32(v) => write!(f, "{v:?}"),
      LiteralValue::Float64(v) => write!(f, "{v:?}"),
      LiteralValue::Boolean(v) => write!(f, "{v}"),
      LiteralValue::Byte(b) => write!(f, "{:?}", char::from(*b)),
      LiteralValue::String(s) => write!(f, "{:?}", self.ast.str(*s)),
    }
  }
}
