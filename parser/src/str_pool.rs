use crate::idx;
use std::collections::HashMap;

/// Owned storage for every name and string literal in an `Ast`, so the tree
/// outlives the source buffer it was parsed from. Lookups on intern go
/// through a hash index, so interning stays constant time per string.
#[derive(Debug, Clone)]
pub struct StringPool {
  data: String,
  strs: Vec<Interned>,
  lookup: HashMap<Box<str>, idx::StrPool>,
}

#[derive(Debug, Clone)]
struct Interned {
  start: u32,
  len: u32,
}

impl Interned {
  const fn new(start: u32, len: u32) -> Self {
    Self { start, len }
  }

  fn str<'a>(&self, pool: &'a StringPool) -> &'a str {
    let start = self.start as usize;
    &pool.data[start..start + self.len as usize]
  }
}

impl StringPool {
  pub fn new() -> Self {
    let mut pool = Self {
      data: String::with_capacity(1024),
      strs: Vec::with_capacity(64),
      lookup: HashMap::with_capacity(64),
    };
    // special case empty string
    pool.strs.push(Interned::new(0, 0));
    pool
  }

  pub const fn empty(&self) -> idx::StrPool {
    idx::StrPool::new(0)
  }

  pub fn intern(&mut self, s: &str) -> idx::StrPool {
    if s.is_empty() {
      return self.empty();
    };
    if let Some(index) = self.lookup.get(s) {
      return *index;
    }
    assert!(self.strs.len() < u32::MAX as usize);
    let index = idx::StrPool::new(self.strs.len() as u32);
    let start = self.data.len() as u32;
    self.data.push_str(s);
    self.strs.push(Interned::new(start, s.len() as u32));
    self.lookup.insert(s.into(), index);
    index
  }

  pub fn get(&self, index: idx::StrPool) -> &str {
    self.strs[index.usize()].str(self)
  }

  pub fn len(&self) -> usize {
    self.strs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strs.len() == 1
  }
}

impl Default for StringPool {
  fn default() -> Self {
    Self::new()
  }
}
