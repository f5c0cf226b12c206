//! `Binding_to_type`, from `original_source/src/typer.h`: every binding has a
//! type derivable from its shape alone, independent of type checking an
//! initializer (spec.md §3 **Binding**: "A binding's type is derivable:
//! empty → unit; name → its annotation; tuple → `*`-applied to the product
//! of its children").

use tara_ir::{Ast, Binding, TypeId};

use crate::type_interner::TypeInterner;

pub fn binding_to_type(ast: &Ast, types: &TypeInterner, binding: &Binding) -> TypeId {
    match binding {
        Binding::Empty => types.well_known.unit,
        Binding::Name { annot, .. } => *annot,
        Binding::Tuple(range) => {
            if range.is_empty() {
                return types.well_known.unit;
            }
            let elem_types: Vec<TypeId> = ast
                .binding_range(*range)
                .iter()
                .map(|b| binding_to_type(ast, types, b))
                .collect();
            let product = types.tuple(elem_types);
            types.call(types.well_known.star, product)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_ir::{Interner, Span, Symbols};

    #[test]
    fn empty_binding_is_unit() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let ast = Ast::new();
        assert_eq!(
            binding_to_type(&ast, &types, &Binding::Empty),
            types.well_known.unit
        );
    }

    #[test]
    fn name_binding_is_its_annotation() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let ast = Ast::new();
        let b = Binding::Name {
            name: interner.intern("x"),
            annot: types.well_known.int,
            span: Span::DUMMY,
        };
        assert_eq!(binding_to_type(&ast, &types, &b), types.well_known.int);
    }

    #[test]
    fn tuple_binding_is_star_applied_to_product() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let mut ast = Ast::new();
        let x = Binding::Name {
            name: interner.intern("x"),
            annot: types.well_known.int,
            span: Span::DUMMY,
        };
        let y = Binding::Name {
            name: interner.intern("y"),
            annot: types.well_known.bool_,
            span: Span::DUMMY,
        };
        let range = ast.bindings.alloc_range([x, y]);
        let tup = Binding::Tuple(range);
        let expected_product = types.tuple([types.well_known.int, types.well_known.bool_]);
        let expected = types.call(types.well_known.star, expected_product);
        assert_eq!(binding_to_type(&ast, &types, &tup), expected);
    }
}
