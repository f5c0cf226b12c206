//! The operator table (spec.md GLOSSARY: **`Opdecls`**): "mapping from
//! operator spelling to `(precedence, associativity)` used by the Pratt
//! parser."

use rustc_hash::FxHashMap;
use tara_ir::Name;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Assoc {
    Left,
    Right,
    None,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct InfixInfo {
    pub precedence: u8,
    pub assoc: Assoc,
}

#[derive(Default)]
pub struct Opdecls {
    infix: FxHashMap<Name, InfixInfo>,
    prefix: FxHashMap<Name, u8>,
}

impl Opdecls {
    pub fn new() -> Self {
        Opdecls::default()
    }

    pub(crate) fn declare_infix(&mut self, name: Name, precedence: u8, assoc: Assoc) -> bool {
        self.infix
            .insert(name, InfixInfo { precedence, assoc })
            .is_none()
    }

    pub(crate) fn declare_prefix(&mut self, name: Name, precedence: u8) -> bool {
        self.prefix.insert(name, precedence).is_none()
    }

    pub fn infix(&self, name: Name) -> Option<InfixInfo> {
        self.infix.get(&name).copied()
    }

    pub fn prefix(&self, name: Name) -> Option<u8> {
        self.prefix.get(&name).copied()
    }

    pub fn is_operator(&self, name: Name) -> bool {
        self.infix.contains_key(&name) || self.prefix.contains_key(&name)
    }
}
