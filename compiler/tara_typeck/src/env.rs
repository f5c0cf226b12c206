//! Local type environment: the side table the checker threads through a
//! function body (spec.md §4.5: "environments are side tables during type
//! checking, not stored in the `Ast`" — spec.md §9).

use rustc_hash::FxHashMap;
use tara_ir::{Name, TypeId};

#[derive(Copy, Clone, Debug)]
pub struct VarInfo {
    pub ty: TypeId,
    pub mutable: bool,
}

/// A stack of scopes; `Let`/`Mut` push into the innermost scope (spec.md
/// §4.5: "Re-binding shadows"), and a block pops its scope on exit.
pub struct Env {
    scopes: Vec<FxHashMap<Name, VarInfo>>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the outermost scope");
    }

    pub fn declare(&mut self, name: Name, ty: TypeId, mutable: bool) {
        self.scopes
            .last_mut()
            .expect("at least one scope")
            .insert(name, VarInfo { ty, mutable });
    }

    pub fn lookup(&self, name: Name) -> Option<VarInfo> {
        self.scopes.iter().rev().find_map(|s| s.get(&name).copied())
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
