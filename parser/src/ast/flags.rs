use crate::internal::*;

/// Access, modifier and const-ness of a declaration, packed into one byte.
#[bitsize(8)]
#[derive(FromBits, DebugBits, Clone, Copy, Eq, PartialEq)]
pub struct DeclFlags {
  pub access: u2,
  pub modifier: u2,
  pub is_const: bool,
  pub reserved: u3,
}

impl DeclFlags {
  pub fn decl(access: AccessType, modifier: ModifierType, is_const: bool) -> Self {
    DeclFlags::new(access.bits(), modifier.bits(), is_const)
  }

  pub fn access_type(&self) -> AccessType {
    AccessType::from_bits(self.access())
  }

  pub fn modifier_type(&self) -> ModifierType {
    ModifierType::from_bits(self.modifier())
  }
}

impl AccessType {
  fn bits(self) -> u2 {
    u2::new(self as u8)
  }

  fn from_bits(bits: u2) -> Self {
    match bits.value() {
      1 => AccessType::Public,
      2 => AccessType::Private,
      _ => AccessType::Default,
    }
  }
}

impl ModifierType {
  fn bits(self) -> u2 {
    u2::new(self as u8)
  }

  fn from_bits(bits: u2) -> Self {
    match bits.value() {
      1 => ModifierType::Static,
      2 => ModifierType::Virtual,
      3 => ModifierType::Override,
      _ => ModifierType::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn size() {
    assert_eq!(std::mem::size_of::<DeclFlags>(), 1);
  }

  #[test]
  fn flags_survive_packing() {
    let accesses = [AccessType::Default, AccessType::Public, AccessType::Private];
    let modifiers = [
      ModifierType::None,
      ModifierType::Static,
      ModifierType::Virtual,
      ModifierType::Override,
    ];
    for access in accesses {
      for modifier in modifiers {
        for is_const in [false, true] {
          let flags = DeclFlags::decl(access, modifier, is_const);
          assert_eq!(flags.access_type(), access);
          assert_eq!(flags.modifier_type(), modifier);
          assert_eq!(flags.is_const(), is_const);
        }
      }
    }
  }
}
