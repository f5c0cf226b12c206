//! The bidirectional type checker / inferencer (spec.md §4.5).

use rustc_hash::FxHashMap;
use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Ast, Binding, BindingId, ExprId, ExprKind, Interner, Name};
use tara_types::{binding_to_type, TypeInterner};

use crate::env::Env;

/// Seeds the global function table with the fixed arithmetic/comparison/
/// logical operator prelude spec.md §8 scenario 6 assumes ("assuming `+` is
/// bound as `Func(Tuple[int,int], int)`"): spec.md leaves how an operator
/// spelling acquires a callable type as an Open Question (§4.2 only records
/// precedence/associativity, never a signature). This implementation
/// resolves that by binding the common arithmetic/comparison/logical
/// spellings to fixed `int`/`bool` signatures up front, exactly like any
/// other pre-declared function — a user `infix`/`prefix` declaration only
/// ever affects parsing precedence, never typing.
fn builtin_operators(interner: &Interner, types: &TypeInterner) -> FxHashMap<Name, tara_ir::TypeId> {
    let int = types.well_known.int;
    let bool_ = types.well_known.bool_;
    let int_pair = types.tuple([int, int]);
    let bool_pair = types.tuple([bool_, bool_]);
    let arith = types.func(int_pair, int);
    let compare = types.func(int_pair, bool_);
    let logic = types.func(bool_pair, bool_);

    let mut out = FxHashMap::default();
    for spelling in ["+", "-", "*", "/", "%"] {
        out.insert(interner.intern(spelling), arith);
    }
    for spelling in ["==", "!=", "<", "<=", ">", ">="] {
        out.insert(interner.intern(spelling), compare);
    }
    for spelling in ["&&", "||"] {
        out.insert(interner.intern(spelling), logic);
    }
    out
}

/// Type checks every function in `ast`, writing each reachable `Expr`'s
/// canonical type into `Expr.ty` in place (spec.md §8 **type assignment
/// totality**).
///
/// Per spec.md §7: an error within one function aborts checking of that
/// function only (recorded via the diagnostic already pushed to `diags`);
/// checking continues with the next function. The pass as a whole reports
/// failure — aborting the pipeline before conversion, per §7 — iff any
/// diagnostic was recorded across every function.
pub fn typecheck(
    ast: &mut Ast,
    types: &TypeInterner,
    interner: &Interner,
    diags: &mut Queue,
) -> Result<(), ErrorGuaranteed> {
    let mut functions = builtin_operators(interner, types);
    for f in &ast.functions {
        let params_ty = binding_to_type(ast, types, ast.binding(f.args));
        functions.insert(f.name, types.func(params_ty, f.ret));
    }

    let specs: Vec<(BindingId, tara_ir::TypeId, ExprId)> =
        ast.functions.iter().map(|f| (f.args, f.ret, f.body)).collect();

    for (args, ret, body) in specs {
        tracing::debug!(?ret, "typechecking function");
        let mut checker = Checker {
            ast: &mut *ast,
            types,
            interner,
            functions: &functions,
            env: Env::new(),
            loop_stack: Vec::new(),
            ret_ty: ret,
            diags: &mut *diags,
        };
        bind_params(&mut checker, args);
        match checker.check_expr(body) {
            Ok(body_ty) if body_ty == ret || body_ty == types.well_known.never => {}
            Ok(body_ty) => {
                let span = ast.expr(body).span;
                diags.error(Diagnostic::type_mismatch(
                    tara_fmt::print_type(ret, types, interner),
                    tara_fmt::print_type(body_ty, types, interner),
                    span,
                ));
            }
            Err(_already_reported) => {}
        }
    }

    diags.check()
}

fn bind_params(checker: &mut Checker<'_>, args: BindingId) {
    bind_names_into_env(checker.ast, checker.types, checker.ast.binding(args), false, &mut checker.env);
}

fn bind_names_into_env(
    ast: &Ast,
    types: &TypeInterner,
    binding: &Binding,
    mutable: bool,
    env: &mut Env,
) {
    match binding {
        Binding::Empty => {}
        Binding::Name { name, annot, .. } => env.declare(*name, *annot, mutable),
        Binding::Tuple(range) => {
            for child in ast.binding_range(*range) {
                bind_names_into_env(ast, types, child, mutable, env);
            }
        }
    }
}

struct Checker<'a> {
    ast: &'a mut Ast,
    types: &'a TypeInterner,
    interner: &'a Interner,
    functions: &'a FxHashMap<Name, tara_ir::TypeId>,
    env: Env,
    /// One entry per enclosing `loop`; `None` until a `break` inside
    /// supplies a value type (spec.md §4.5 **Loop**).
    loop_stack: Vec<Option<tara_ir::TypeId>>,
    ret_ty: tara_ir::TypeId,
    diags: &'a mut Queue,
}

impl Checker<'_> {
    fn resolve(&self, name: Name) -> Option<(tara_ir::TypeId, bool)> {
        if let Some(info) = self.env.lookup(name) {
            return Some((info.ty, info.mutable));
        }
        self.functions.get(&name).map(|ty| (*ty, false))
    }

    /// Unifies two branch types under the divergent-type rule (GLOSSARY:
    /// "unifies with any other type by taking the other").
    fn unify_branch(
        &self,
        a: tara_ir::TypeId,
        b: tara_ir::TypeId,
    ) -> Option<tara_ir::TypeId> {
        let never = self.types.well_known.never;
        if a == never {
            Some(b)
        } else if b == never {
            Some(a)
        } else if a == b {
            Some(a)
        } else {
            None
        }
    }

    /// Renders a `TypeId` for a diagnostic message as surface `type`
    /// syntax (spec.md §7: "both as printable canonical types"), via
    /// `tara_fmt`'s printer rather than the raw `TypeId` debug form.
    fn render(&self, ty: tara_ir::TypeId) -> String {
        tara_fmt::print_type(ty, self.types, self.interner)
    }

    /// Grows the stack before recursing (`crate::stack::ensure_sufficient_stack`)
    /// since a deeply nested expression tree recurses once per `Expr`.
    fn check_expr(&mut self, id: ExprId) -> Result<tara_ir::TypeId, ErrorGuaranteed> {
        crate::stack::ensure_sufficient_stack(|| self.check_expr_inner(id))
    }

    fn check_expr_inner(&mut self, id: ExprId) -> Result<tara_ir::TypeId, ErrorGuaranteed> {
        let kind = self.ast.expr(id).kind.clone();
        let span = self.ast.expr(id).span;
        let ty = match kind {
            ExprKind::Unit => self.types.well_known.unit,
            ExprKind::NumberLit(_) => self.types.well_known.int,
            ExprKind::StringLit(_) => self.types.well_known.string,
            ExprKind::BoolLit(_) => self.types.well_known.bool_,
            ExprKind::Recall(name) => match self.resolve(name) {
                Some((ty, _mutable)) => ty,
                None => {
                    return Err(self.diags.error(Diagnostic::unbound(self.name_text(name), span)));
                }
            },
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_ty = self.check_expr(cond)?;
                if cond_ty != self.types.well_known.bool_ {
                    let cond_span = self.ast.expr(cond).span;
                    return Err(self.diags.error(Diagnostic::type_mismatch(
                        self.render(self.types.well_known.bool_),
                        self.render(cond_ty),
                        cond_span,
                    )));
                }
                let then_ty = self.check_expr(then_branch)?;
                let else_ty = self.check_expr(else_branch)?;
                match self.unify_branch(then_ty, else_ty) {
                    Some(ty) => ty,
                    None => {
                        return Err(self.diags.error(Diagnostic::type_mismatch(
                            self.render(then_ty),
                            self.render(else_ty),
                            span,
                        )));
                    }
                }
            }
            ExprKind::Loop { body } => {
                self.loop_stack.push(None);
                let body_result = self.check_expr(body);
                let frame = self.loop_stack.pop().expect("pushed above");
                let body_ty = body_result?;
                match frame {
                    Some(break_ty) => break_ty,
                    None => {
                        if body_ty != self.types.well_known.unit {
                            let body_span = self.ast.expr(body).span;
                            return Err(self.diags.error(Diagnostic::type_mismatch(
                                self.render(self.types.well_known.unit),
                                self.render(body_ty),
                                body_span,
                            )));
                        }
                        self.types.well_known.unit
                    }
                }
            }
            ExprKind::Bareblock(range) => {
                self.env.push_scope();
                let result = self.check_block(range);
                self.env.pop_scope();
                result?
            }
            ExprKind::Call { callee, args } => {
                let callee_ty = self.check_expr(callee)?;
                let args_ty = self.check_expr(args)?;
                let callee_span = self.ast.expr(callee).span;
                match &*self.types.get(callee_ty) {
                    tara_types::TypeData::Func { args: expected, ret } => {
                        let (expected, ret) = (*expected, *ret);
                        if args_ty != expected {
                            return Err(self.diags.error(Diagnostic::type_mismatch(
                                self.render(expected),
                                self.render(args_ty),
                                self.ast.expr(args).span,
                            )));
                        }
                        ret
                    }
                    _ => {
                        return Err(self
                            .diags
                            .error(Diagnostic::not_a_function(self.render(callee_ty), callee_span)));
                    }
                }
            }
            ExprKind::Tuple(range) => {
                let mut elem_types = Vec::with_capacity(range.len());
                for child in range.iter() {
                    elem_types.push(self.check_expr(child)?);
                }
                let product = self.types.tuple(elem_types);
                self.types.call(self.types.well_known.star, product)
            }
            ExprKind::Let { bind, init } => {
                self.check_binding_stmt(bind, init, false)?;
                self.types.well_known.unit
            }
            ExprKind::Mut { bind, init } => {
                self.check_binding_stmt(bind, init, true)?;
                self.types.well_known.unit
            }
            ExprKind::Break { value } => {
                let value_ty = self.check_expr(value)?;
                if self.loop_stack.is_empty() {
                    return Err(self.diags.error(Diagnostic::break_outside_loop(span)));
                }
                let top = self.loop_stack.last().copied().flatten();
                let merged = match top {
                    None => Some(value_ty),
                    Some(prev) => self.unify_branch(prev, value_ty),
                };
                match merged {
                    Some(ty) => {
                        *self.loop_stack.last_mut().expect("checked above") = Some(ty);
                    }
                    None => {
                        return Err(self.diags.error(Diagnostic::type_mismatch(
                            self.render(top.expect("prev must be Some when merge fails")),
                            self.render(value_ty),
                            span,
                        )));
                    }
                }
                self.types.well_known.never
            }
            ExprKind::Return { value } => {
                let value_ty = self.check_expr(value)?;
                if value_ty != self.ret_ty && value_ty != self.types.well_known.never {
                    return Err(self.diags.error(Diagnostic::type_mismatch(
                        self.render(self.ret_ty),
                        self.render(value_ty),
                        span,
                    )));
                }
                self.types.well_known.never
            }
            ExprKind::Assign { name, value } => {
                let value_ty = self.check_expr(value)?;
                match self.resolve(name) {
                    None => {
                        return Err(self.diags.error(Diagnostic::unbound(self.name_text(name), span)));
                    }
                    Some((target_ty, mutable)) => {
                        if !mutable {
                            return Err(self
                                .diags
                                .error(Diagnostic::not_mutable(self.name_text(name), span)));
                        }
                        if target_ty != value_ty {
                            return Err(self.diags.error(Diagnostic::type_mismatch(
                                self.render(target_ty),
                                self.render(value_ty),
                                span,
                            )));
                        }
                    }
                }
                self.types.well_known.unit
            }
            ExprKind::Const { expr } => {
                self.check_expr(expr)?;
                self.types.well_known.unit
            }
        };
        self.ast.expr_mut(id).ty = ty;
        Ok(ty)
    }

    fn check_block(&mut self, range: tara_ir::ExprRange) -> Result<tara_ir::TypeId, ErrorGuaranteed> {
        let mut last_ty = self.types.well_known.unit;
        let mut last_is_value = false;
        for (i, child) in range.iter().enumerate() {
            let ty = self.check_expr(child)?;
            let is_trailing_value = i == range.len() - 1 && is_value_position(&self.ast.expr(child).kind);
            last_ty = ty;
            last_is_value = is_trailing_value;
        }
        if range.is_empty() || !last_is_value {
            Ok(self.types.well_known.unit)
        } else {
            Ok(last_ty)
        }
    }

    fn check_binding_stmt(
        &mut self,
        bind: BindingId,
        init: ExprId,
        mutable: bool,
    ) -> Result<(), ErrorGuaranteed> {
        let init_ty = self.check_expr(init)?;
        let bind_ty = binding_to_type(self.ast, self.types, self.ast.binding(bind));
        if init_ty != bind_ty && init_ty != self.types.well_known.never {
            let span = self.ast.expr(init).span;
            return Err(self.diags.error(Diagnostic::type_mismatch(
                self.render(bind_ty),
                self.render(init_ty),
                span,
            )));
        }
        let binding = self.ast.binding(bind).clone();
        bind_names_into_env(self.ast, self.types, &binding, mutable, &mut self.env);
        Ok(())
    }

    fn name_text(&self, name: Name) -> String {
        self.interner.resolve(name).to_string()
    }
}

/// A statement-positioned `ExprKind` never contributes a value to its
/// enclosing block (spec.md §4.4: "a trailing non-terminated expression is
/// the block's value (otherwise the block yields unit)"). Every one of
/// these variants is always parsed with a mandatory trailing `;`
/// (`tara_parse::expr::parse_stmt`), so their presence in the trailing
/// position always means the block yields unit.
fn is_value_position(kind: &ExprKind) -> bool {
    !matches!(
        kind,
        ExprKind::Let { .. }
            | ExprKind::Mut { .. }
            | ExprKind::Break { .. }
            | ExprKind::Return { .. }
            | ExprKind::Assign { .. }
            | ExprKind::Const { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Queue;
    use tara_ir::{Interner, Symbols};
    use tara_types::TypeInterner;

    fn check(src: &str) -> (Ast, TypeInterner, Queue) {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let mut diags = Queue::new();
        let tokens = tara_lexer::lex(src, &interner, &mut diags).unwrap();
        let (tokens, ops) = tara_parse::scan(&tokens, &interner, &symbols, &mut diags).unwrap();
        let mut ast = tara_parse::parse_ast(&tokens, &interner, &types, &symbols, &ops, &mut diags)
            .unwrap();
        let _ = typecheck(&mut ast, &types, &interner, &mut diags);
        (ast, types, diags)
    }

    #[test]
    fn identity_function_assigns_int_to_recall() {
        let (ast, types, diags) = check("func id(x: int): int x");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.int);
    }

    #[test]
    fn tuple_product_assigns_star_call_type() {
        let (ast, types, diags) = check("func pair(x: int, y: bool): *(int, bool) (x, y)");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        let expected_product = types.tuple([types.well_known.int, types.well_known.bool_]);
        let expected = types.call(types.well_known.star, expected_product);
        assert_eq!(ast.expr(f.body).ty, expected);
    }

    #[test]
    fn if_with_divergent_return_branch_takes_else_type() {
        let (ast, types, diags) =
            check("func f(x: int): int if true { return 1 } else { x }");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.int);
    }

    #[test]
    fn loop_with_value_break_has_break_value_type() {
        let (ast, types, diags) = check("func f(): int loop { break 7 }");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.int);
    }

    #[test]
    fn loop_with_no_break_checks_body_against_unit() {
        let (_ast, _types, diags) = check("func f(): unit loop { 5 }");
        assert!(diags.has_errors(), "expected a TypeMismatch for a non-unit loop body with no break");
        assert_eq!(diags.iter().next().unwrap().code, tara_diagnostic::Code::TypeMismatch);
    }

    #[test]
    fn loop_with_no_break_and_unit_body_is_well_typed() {
        let (ast, types, diags) = check("func f(): unit loop { let x: int = 1; }");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.unit);
    }

    #[test]
    fn type_mismatch_is_reported() {
        let (_ast, _types, diags) = check("func f(): int true");
        assert!(diags.has_errors());
        assert_eq!(diags.iter().next().unwrap().code, tara_diagnostic::Code::TypeMismatch);
    }

    #[test]
    fn user_operator_resolves_through_builtin_prelude() {
        let (ast, types, diags) = check("infix 6 left + func g(x: int): int x + x");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.int);
    }

    #[test]
    fn break_outside_loop_is_an_error() {
        let (_ast, _types, diags) = check("func f(): int { break 1; 0 }");
        assert!(diags.has_errors());
    }

    #[test]
    fn assigning_to_immutable_binding_is_an_error() {
        let (_ast, _types, diags) =
            check("func f(): int { let x: int = 1; x = 2; x }");
        assert!(diags.has_errors());
        assert_eq!(diags.iter().next().unwrap().code, tara_diagnostic::Code::NotMutable);
    }

    #[test]
    fn assigning_to_mutable_binding_is_well_typed() {
        let (ast, types, diags) = check("func f(): int { mut x: int = 1; x = 2; x }");
        assert!(diags.is_empty(), "unexpected diagnostics");
        let f = &ast.functions[0];
        assert_eq!(ast.expr(f.body).ty, types.well_known.int);
    }

    #[test]
    fn unbound_identifier_is_reported() {
        let (_ast, _types, diags) = check("func f(): int y");
        assert!(diags.has_errors());
        assert_eq!(diags.iter().next().unwrap().code, tara_diagnostic::Code::Unbound);
    }
}
