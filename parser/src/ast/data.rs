use super::Node;
use crate::internal::*;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
  pub node: Node,
  /// Non-owning back link, the parent holds this node by index.
  pub parent: Option<idx::AstNode>,
}

/// Arena holding every node of one parsed compilation unit, plus the
/// strings the nodes refer to.
#[derive(Debug, Clone)]
pub struct Ast {
  nodes: Vec<NodeData>,
  strs: StringPool,
  root: idx::AstNode,
}

impl Ast {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      nodes: Vec::with_capacity(capacity),
      strs: StringPool::new(),
      root: idx::AstNode::new(0),
    }
  }

  /// Appends `node`, claiming its children.
  pub(crate) fn push(&mut self, node: Node) -> idx::AstNode {
    let index = self.reserve();
    self.fill(index, node);
    index
  }

  /// Hands out an index before the node's children exist; the slot holds an
  /// empty block until `fill`.
  pub(crate) fn reserve(&mut self) -> idx::AstNode {
    assert!(self.nodes.len() < u32::MAX as usize);
    let index = idx::AstNode::new(self.nodes.len() as u32);
    self.nodes.push(NodeData { node: Node::Block(vec![]), parent: None });
    index
  }

  pub(crate) fn fill(&mut self, index: idx::AstNode, node: Node) {
    for child in node.children() {
      self.set_parent(child, Some(index));
    }
    self.nodes[index.usize()].node = node;
  }

  pub(crate) fn set_parent(&mut self, index: idx::AstNode, parent: Option<idx::AstNode>) {
    self.nodes[index.usize()].parent = parent;
  }

  pub(crate) fn set_root(&mut self, index: idx::AstNode) {
    self.root = index;
  }

  pub(crate) fn intern(&mut self, s: &str) -> idx::StrPool {
    self.strs.intern(s)
  }

  /// The top-level `Block`.
  pub const fn root(&self) -> idx::AstNode {
    self.root
  }

  pub fn node(&self, index: idx::AstNode) -> &Node {
    &self.nodes[index.usize()].node
  }

  pub fn get(&self, index: idx::AstNode) -> Option<&NodeData> {
    self.nodes.get(index.usize())
  }

  pub fn parent(&self, index: idx::AstNode) -> Option<idx::AstNode> {
    self.nodes[index.usize()].parent
  }

  pub fn ancestors(&self, index: idx::AstNode) -> Ancestors<'_> {
    Ancestors { ast: self, next: self.parent(index) }
  }

  pub fn str(&self, index: idx::StrPool) -> &str {
    self.strs.get(index)
  }

  pub fn strings(&self) -> &StringPool {
    &self.strs
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (idx::AstNode, &NodeData)> {
    self
      .nodes
      .iter()
      .enumerate()
      .map(|(i, data)| (idx::AstNode::new(i as u32), data))
  }
}

/// Walks parent links up to a top-level node.
#[derive(Debug)]
pub struct Ancestors<'a> {
  ast: &'a Ast,
  next: Option<idx::AstNode>,
}

impl Iterator for Ancestors<'_> {
  type Item = idx::AstNode;

  fn next(&mut self) -> Option<Self::Item> {
    let current = self.next?;
    self.next = self.ast.parent(current);
    Some(current)
  }
}
