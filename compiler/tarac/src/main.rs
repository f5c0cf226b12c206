//! `tara`: discover sibling `.tara` modules around a source path, compile
//! them as one unit, and emit `out.o` / `out` (spec.md §6).

use std::path::Path;
use std::process::Command;

use tara_compiler::{compile, render_diagnostics, ColorMode, CompileConfig};
use tarac::{discover, enclosing_dir, CodeGen, PlaceholderCodeGen};

fn main() {
    tarac::tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: tara <path-to-source-file>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let dir = enclosing_dir(path);

    let tree = match discover(&dir) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let source = tree.flatten();
    let config = CompileConfig {
        file_path: dir.display().to_string(),
        color: ColorMode::Auto,
        emit_object: true,
    };

    tracing::info!(dir = %config.file_path, "compiling");
    let output = compile(&source, &config);

    if !output.success {
        let rendered = render_diagnostics(&source, &config.file_path, &output.diagnostics, config.color);
        eprint!("{rendered}");
        std::process::exit(1);
    }

    let artifacts = output.artifacts.expect("successful compile carries artifacts");
    if !config.emit_object {
        return;
    }

    let object_bytes = PlaceholderCodeGen.emit(&artifacts.tst, &artifacts.types, &artifacts.interner);
    if let Err(err) = std::fs::write("out.o", &object_bytes) {
        eprintln!("failed to write out.o: {err}");
        std::process::exit(1);
    }

    match Command::new("ld.lld").args(["-o", "out", "out.o"]).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            eprintln!("ld.lld exited with {status}; out.o was written but not linked");
        }
        Err(err) => {
            eprintln!("could not invoke ld.lld ({err}); out.o was written but not linked");
        }
    }
}
