//! The Tara compiler CLI (binary name `tara`): file discovery, the
//! `tara_compiler` pipeline driver, and the `CodeGen` seam, wired together
//! into a single-path-argument command (spec.md §6).

pub mod codegen;
pub mod discover;
pub mod tracing_setup;

pub use codegen::{CodeGen, PlaceholderCodeGen};
pub use discover::{discover, enclosing_dir, ModuleTree};
