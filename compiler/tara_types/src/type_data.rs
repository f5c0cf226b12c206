//! The `Type` tagged variant (spec.md §3 **Type**).

use smallvec::SmallVec;
use tara_ir::{Name, TypeId};

/// spec.md §3: "A `Type` is a tagged variant." Children are always already
/// canonical `TypeId`s — `TypeData` never owns a non-interned child, which
/// is what lets [`crate::TypeInterner::intern`] compare by `TypeId` equality
/// instead of deep structural recursion.
///
/// `Tuple` is a `SmallVec` rather than a bare `Vec`: most tuples in practice
/// are pairs (spec.md §8 scenario 2), so the common case avoids a heap
/// allocation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    /// A named nominal type, e.g. `int`, `bool`, a user type name.
    Recall(Name),
    /// `args -> ret`.
    Func { args: TypeId, ret: TypeId },
    /// Type constructor application, e.g. `*(int, bool)`.
    Call { name: TypeId, args: TypeId },
    /// An anonymous tuple type in left-to-right source order (GLOSSARY:
    /// **tuple order**). The empty tuple is the unique unit type; a
    /// one-element tuple never occurs (spec.md §3 invariant, §8 **tuple
    /// normal form**).
    Tuple(SmallVec<[TypeId; 2]>),
}

impl TypeData {
    pub fn tuple_arity(&self) -> Option<usize> {
        match self {
            TypeData::Tuple(elems) => Some(elems.len()),
            _ => None,
        }
    }
}
