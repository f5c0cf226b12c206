//! Pre-interned spellings used throughout the pipeline.
//!
//! spec.md §4.1 calls for a `well_known() -> Symbols` bootstrapping routine
//! that populates canonical pointers for keywords, primitive type names, and
//! the tuple constructor `*`, so downstream stages can compare against a
//! `Name` constant instead of re-interning and comparing strings.

use crate::interner::Interner;
use crate::name::Name;

/// Every identifier spelling pre-interned before user source is processed.
///
/// Interning the same fixed list in the same order on every `Interner`
/// guarantees these always land in the same shard/local slot, so
/// `Symbols` fields are stable across interners constructed from scratch
/// (no source-dependent shifting of well-known `Name`s).
pub(crate) const PREINTERNED: &[&str] = &[
    "bool", "int", "string", "unit", "*", "func", "let", "mut", "break", "return", "if", "else",
    "loop", "infix", "prefix", "left", "right", "none", "true", "false", "!",
];

pub(crate) fn preintern(interner: &Interner) {
    for s in PREINTERNED {
        interner.intern(s);
    }
}

/// Canonical pointers to the fixed roster of well-known spellings.
///
/// Constructed once per [`Interner`] via [`Symbols::new`]; every later
/// comparison against a keyword or primitive type name compares `Name`s
/// rather than bytes.
#[derive(Copy, Clone, Debug)]
pub struct Symbols {
    pub bool_: Name,
    pub int: Name,
    pub string: Name,
    pub unit: Name,
    pub star: Name,
    pub kw_func: Name,
    pub kw_let: Name,
    pub kw_mut: Name,
    pub kw_break: Name,
    pub kw_return: Name,
    pub kw_if: Name,
    pub kw_else: Name,
    pub kw_loop: Name,
    pub kw_infix: Name,
    pub kw_prefix: Name,
    pub assoc_left: Name,
    pub assoc_right: Name,
    pub assoc_none: Name,
    pub kw_true: Name,
    pub kw_false: Name,
    /// Spelling of the divergent type `!` (GLOSSARY: **Divergent type**),
    /// used nowhere in surface syntax but needed as a `Recall` payload for
    /// `tara_types::TypeInterner::well_known`'s `never` type.
    pub bang: Name,
}

impl Symbols {
    pub fn new(interner: &Interner) -> Self {
        Symbols {
            bool_: interner.intern("bool"),
            int: interner.intern("int"),
            string: interner.intern("string"),
            unit: interner.intern("unit"),
            star: interner.intern("*"),
            kw_func: interner.intern("func"),
            kw_let: interner.intern("let"),
            kw_mut: interner.intern("mut"),
            kw_break: interner.intern("break"),
            kw_return: interner.intern("return"),
            kw_if: interner.intern("if"),
            kw_else: interner.intern("else"),
            kw_loop: interner.intern("loop"),
            kw_infix: interner.intern("infix"),
            kw_prefix: interner.intern("prefix"),
            assoc_left: interner.intern("left"),
            assoc_right: interner.intern("right"),
            assoc_none: interner.intern("none"),
            kw_true: interner.intern("true"),
            kw_false: interner.intern("false"),
            bang: interner.intern("!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_stable_across_fresh_interners() {
        let a = Interner::new();
        let b = Interner::new();
        let sa = Symbols::new(&a);
        let sb = Symbols::new(&b);
        assert_eq!(sa.bool_, sb.bool_);
        assert_eq!(sa.star, sb.star);
        assert_eq!(sa.kw_loop, sb.kw_loop);
    }
}
