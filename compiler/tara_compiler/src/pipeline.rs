//! Core compilation pipeline: lex → scan → parse → typecheck → convert
//! (spec.md §2's "Pipeline (leaves-first dependency order)").
//!
//! Portable (no filesystem IO, no incremental state, spec.md §1's
//! non-goals): source comes in as `&str`, results come out as a
//! [`CompileOutput`].

use tara_diagnostic::Queue;
use tara_ir::{Interner, Symbols};
use tara_types::TypeInterner;

use crate::config::CompileConfig;
use crate::output::{Artifacts, CompileOutput, ErrorPhase};

/// Runs the full pipeline over `source`, stopping at the first stage that
/// aborts (spec.md §7: "`Lex`/`Parse`/`OpDecl` abort their stage") or, for
/// type checking, after every function has been checked (§7: "Type errors
/// are collected per function; the pass completes all functions before
/// reporting").
pub fn compile(source: &str, config: &CompileConfig) -> CompileOutput {
    let interner = Interner::new();
    let symbols = Symbols::new(&interner);
    let types = TypeInterner::new(&symbols);
    let mut diags = Queue::new();

    tracing::debug!(file = %config.file_path, "lexing");
    let tokens = match tara_lexer::lex(source, &interner, &mut diags) {
        Ok(tokens) => tokens,
        Err(_) => return failure(diags, ErrorPhase::Lex),
    };

    tracing::debug!("scanning operator declarations");
    let (tokens, ops) = match tara_parse::scan(&tokens, &interner, &symbols, &mut diags) {
        Ok(out) => out,
        Err(_) => return failure(diags, ErrorPhase::OpDecl),
    };

    tracing::debug!("parsing");
    let mut ast = match tara_parse::parse_ast(&tokens, &interner, &types, &symbols, &ops, &mut diags)
    {
        Ok(ast) => ast,
        Err(_) => return failure(diags, ErrorPhase::Parse),
    };

    tracing::debug!(functions = ast.functions.len(), "typechecking");
    if tara_typeck::typecheck(&mut ast, &types, &interner, &mut diags).is_err() {
        return failure(diags, ErrorPhase::Type);
    }

    tracing::debug!("converting to TST");
    let tst = tara_convert::convert(&ast);

    CompileOutput {
        success: true,
        artifacts: Some(Artifacts {
            interner,
            symbols,
            types,
            ast,
            tst,
        }),
        diagnostics: diags.into_vec(),
        error_phase: None,
    }
}

fn failure(diags: Queue, phase: ErrorPhase) -> CompileOutput {
    CompileOutput {
        success: false,
        artifacts: None,
        diagnostics: diags.into_vec(),
        error_phase: Some(phase),
    }
}
