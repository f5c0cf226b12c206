//! Hash-consed type universe (spec.md §4.3).
//!
//! All canonical `Type` nodes live in one append-only arena behind a single
//! `RwLock`, mirroring `tara_ir::Interner`'s sharded-but-append-only
//! discipline — types are interned far less often than identifiers (one
//! `Type` per distinct structural shape in the whole compilation, not one
//! per occurrence), so a single shard is the right tradeoff here.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tara_ir::{Name, Symbols, TypeId};

use crate::type_data::TypeData;

struct Storage {
    types: Vec<TypeData>,
    index: FxHashMap<TypeData, TypeId>,
}

impl Storage {
    fn new() -> Self {
        Storage {
            types: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.index.get(&data) {
            return id;
        }
        let id = TypeId::from_index(self.types.len() as u32);
        self.types.push(data.clone());
        self.index.insert(data, id);
        id
    }
}

/// The canonical pointers to primitive and constructor types, analogous to
/// [`tara_ir::Symbols`] for identifier spellings. Built once per
/// `TypeInterner` from its `Symbols`.
#[derive(Copy, Clone, Debug)]
pub struct WellKnown {
    pub unit: TypeId,
    pub int: TypeId,
    pub bool_: TypeId,
    pub string: TypeId,
    /// `Recall(*)`, used as the `name` child of `Call` when building a
    /// product type (spec.md §3: "products of arity ≥ 2 are represented as
    /// `Call(name = t_star, args = Tuple[...])`").
    pub star: TypeId,
    /// The canonical representation of the divergent type `!` (GLOSSARY:
    /// **Divergent type**). `break`/`return` expressions carry this as
    /// their own `Expr.type` so that the type-assignment-totality
    /// invariant (spec.md §8) holds even for expressions that never
    /// produce a value; `tara_typeck` unifies it with any other type by
    /// taking the other, per the GLOSSARY definition.
    pub never: TypeId,
}

pub struct TypeInterner {
    storage: RwLock<Storage>,
    pub well_known: WellKnown,
}

impl TypeInterner {
    pub fn new(symbols: &Symbols) -> Self {
        let mut storage = Storage::new();
        let unit = storage.intern(TypeData::Tuple(SmallVec::new()));
        let int = storage.intern(TypeData::Recall(symbols.int));
        let bool_ = storage.intern(TypeData::Recall(symbols.bool_));
        let string = storage.intern(TypeData::Recall(symbols.string));
        let star = storage.intern(TypeData::Recall(symbols.star));
        let never = storage.intern(TypeData::Recall(symbols.bang));
        TypeInterner {
            storage: RwLock::new(storage),
            well_known: WellKnown {
                unit,
                int,
                bool_,
                string,
                star,
                never,
            },
        }
    }

    fn intern(&self, data: TypeData) -> TypeId {
        tracing::trace!(?data, "interning type");
        self.storage.write().intern(data)
    }

    pub fn recall(&self, name: Name) -> TypeId {
        self.intern(TypeData::Recall(name))
    }

    pub fn func(&self, args: TypeId, ret: TypeId) -> TypeId {
        self.intern(TypeData::Func { args, ret })
    }

    pub fn call(&self, name: TypeId, args: TypeId) -> TypeId {
        self.intern(TypeData::Call { name, args })
    }

    /// Builds a tuple type from exactly the given elements, in left-to-right
    /// source order. Zero elements yields the unique unit type.
    pub fn tuple(&self, elems: impl IntoIterator<Item = TypeId>) -> TypeId {
        let elems: SmallVec<[TypeId; 2]> = elems.into_iter().collect();
        self.intern(TypeData::Tuple(elems))
    }

    /// `tuple_extend(tail, head)`: spec.md §4.3. Appends `head` to `tail` if
    /// `tail` already denotes a `Tuple`; otherwise builds the two-element
    /// tuple `(tail, head)`. Order is append-to-end (GLOSSARY: **tuple
    /// order**; SPEC_FULL.md §C.1 resolves the upstream ambiguity in favor
    /// of this order).
    pub fn tuple_extend(&self, tail: TypeId, head: TypeId) -> TypeId {
        let tail_elems = {
            let storage = self.storage.read();
            storage
                .types
                .get(tail.index() as usize)
                .and_then(|d| match d {
                    TypeData::Tuple(elems) => Some(elems.clone()),
                    _ => None,
                })
        };
        match tail_elems {
            Some(mut elems) => {
                elems.push(head);
                self.tuple(elems)
            }
            None => self.tuple([tail, head]),
        }
    }

    pub fn get(&self, id: TypeId) -> Arc<TypeData> {
        let storage = self.storage.read();
        Arc::new(
            storage
                .types
                .get(id.index() as usize)
                .unwrap_or_else(|| panic!("{id:?} not found in this type interner"))
                .clone(),
        )
    }

    pub fn is_unit(&self, id: TypeId) -> bool {
        id == self.well_known.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_ir::Interner;

    fn fresh() -> (Interner, Symbols, TypeInterner) {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        (interner, symbols, types)
    }

    #[test]
    fn intern_idempotence_structurally_equal_types_share_id() {
        let (interner, _symbols, types) = fresh();
        let n = interner.intern("Foo");
        let a = types.recall(n);
        let b = types.recall(n);
        assert_eq!(a, b);
    }

    #[test]
    fn tuple_extend_appends_in_source_order() {
        let (_interner, symbols, types) = fresh();
        let pair = types.tuple([types.well_known.int, types.well_known.bool_]);
        let extended = types.tuple_extend(pair, types.well_known.string);
        match &*types.get(extended) {
            TypeData::Tuple(elems) => {
                assert_eq!(
                    elems.as_slice(),
                    &[types.well_known.int, types.well_known.bool_, types.well_known.string]
                );
            }
            other => panic!("expected Tuple, got {other:?}"),
        }
        let _ = symbols;
    }

    #[test]
    fn empty_tuple_is_unique_unit() {
        let (_interner, _symbols, types) = fresh();
        let t = types.tuple(std::iter::empty());
        assert_eq!(t, types.well_known.unit);
        assert!(types.is_unit(t));
    }

    #[test]
    fn tuple_extend_on_non_tuple_builds_pair() {
        let (_interner, _symbols, types) = fresh();
        let extended = types.tuple_extend(types.well_known.int, types.well_known.bool_);
        match &*types.get(extended) {
            TypeData::Tuple(elems) => {
                assert_eq!(elems.as_slice(), &[types.well_known.int, types.well_known.bool_]);
            }
            other => panic!("expected Tuple, got {other:?}"),
        }
    }
}
