//! Diagnostic rendering: turns structured [`Diagnostic`]s into the
//! "single line per error" text spec.md §7 calls for.
//!
//! `tara_diagnostic` deliberately stops at structure (spec.md §1: rendering
//! is an external concern); this is that external concern, scoped to
//! `tarac`'s terminal output. Line/column are computed on demand from byte
//! offsets rather than carried on `Diagnostic` itself, since most callers
//! (tests, in-process embedding) never render at all.

use std::fmt::Write as _;

use tara_diagnostic::Diagnostic;

use crate::config::ColorMode;

/// Renders every diagnostic in `diagnostics` against `source`, one line
/// each: `file:line:col: severity: message`.
pub fn render_diagnostics(
    source: &str,
    file_path: &str,
    diagnostics: &[Diagnostic],
    color: ColorMode,
) -> String {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let colorize = color.resolve(is_tty);
    let mut out = String::new();
    for diag in diagnostics {
        let (line, col) = line_col(source, diag.primary_span().start);
        if colorize {
            let code = severity_color(diag.severity);
            let _ = writeln!(
                out,
                "{file_path}:{line}:{col}: \x1b[{code}m{sev}\x1b[0m: {msg}",
                sev = diag.severity,
                msg = diag.message,
            );
        } else {
            let _ = writeln!(
                out,
                "{file_path}:{line}:{col}: {sev}: {msg}",
                sev = diag.severity,
                msg = diag.message,
            );
        }
    }
    out
}

fn severity_color(severity: tara_diagnostic::Severity) -> u8 {
    match severity {
        tara_diagnostic::Severity::Error => 31,
        tara_diagnostic::Severity::Warning => 33,
        tara_diagnostic::Severity::Note => 36,
    }
}

/// 1-based line and column for a byte offset into `source`.
fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = offset as usize;
    let mut line = 1usize;
    let mut col = 1usize;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Diagnostic;
    use tara_ir::Span;

    #[test]
    fn renders_one_line_per_diagnostic() {
        let source = "func id(x: int): int\n  y";
        let span_start = source.find('y').unwrap() as u32;
        let diag = Diagnostic::unbound("y", Span::point(span_start));
        let rendered = render_diagnostics(source, "input.tara", &[diag], ColorMode::Never);
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("input.tara:2:3: error:"));
    }

    #[test]
    fn never_mode_never_emits_escape_codes() {
        let diag = Diagnostic::break_outside_loop(Span::DUMMY);
        let rendered = render_diagnostics("break", "input.tara", &[diag], ColorMode::Never);
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn always_mode_wraps_severity_in_escape_codes() {
        let diag = Diagnostic::break_outside_loop(Span::DUMMY);
        let rendered = render_diagnostics("break", "input.tara", &[diag], ColorMode::Always);
        assert!(rendered.contains("\x1b[31m"));
    }
}
