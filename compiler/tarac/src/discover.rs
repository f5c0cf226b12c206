//! Filesystem module discovery (spec.md §6 "File discovery", explicitly out
//! of scope for the core — SPEC_FULL.md §C.3 grounds this in
//! `original_source/src/main.c`'s `populate()`).
//!
//! Recursively walks a directory: `.tara` files become leaf modules named
//! after their basename; subdirectories become nested module groups; a
//! directory's own `<dirname>.tara` file (if present as a sibling) provides
//! that group's body, the rest of the directory its children. Hidden
//! entries (`.`-prefixed) are skipped.
//!
//! Unlike `populate()`, entries are sorted by name before recursing — the
//! original's prepend-as-you-go linked list leaves sibling order dependent
//! on `readdir`'s unspecified enumeration order, which would violate
//! spec.md §5's determinism requirement ("identical input bytes ... yields
//! byte-identical TST"). DESIGN.md records this as a deliberate deviation.

use std::path::{Path, PathBuf};

use tara_diagnostic::FatalError;

/// One node of the discovered module tree.
pub struct ModuleTree {
    pub name: String,
    /// Source text, present iff a `.tara` file backs this node directly.
    pub contents: Option<String>,
    pub children: Vec<ModuleTree>,
}

impl ModuleTree {
    fn leaf(name: String, contents: String) -> Self {
        ModuleTree {
            name,
            contents: Some(contents),
            children: Vec::new(),
        }
    }

    fn group(name: String, children: Vec<ModuleTree>) -> Self {
        ModuleTree {
            name,
            contents: None,
            children,
        }
    }

    /// Concatenates every module's contents into one compilation unit, in
    /// deterministic pre-order (SPEC_FULL.md §C.5: "single entry point,
    /// whole-directory compilation unit, no per-file import resolution" —
    /// module names exist for file discovery, not for namespacing the
    /// functions a compiled unit sees).
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        if let Some(contents) = &self.contents {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(contents);
        }
        for child in &self.children {
            child.flatten_into(out);
        }
    }
}

/// Discovers every `.tara` module reachable from `dir_path`, named after
/// `dir_path`'s own basename.
pub fn discover(dir_path: &Path) -> Result<ModuleTree, FatalError> {
    let name = dir_path
        .file_name()
        .map_or_else(|| dir_path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned());
    populate(&name, dir_path)
}

fn populate(dir_name: &str, dir_path: &Path) -> Result<ModuleTree, FatalError> {
    let mut entries: Vec<std::fs::DirEntry> = std::fs::read_dir(dir_path)
        .map_err(|source| FatalError::Io {
            path: dir_path.to_path_buf(),
            source,
        })?
        .collect::<Result<_, _>>()
        .map_err(|source| FatalError::Io {
            path: dir_path.to_path_buf(),
            source,
        })?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut children: Vec<ModuleTree> = Vec::new();
    for entry in entries {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.starts_with('.') {
            continue;
        }
        let path = entry.path();

        let file_type = entry.file_type().map_err(|source| FatalError::Io {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            let child = populate(&file_name, &path)?;
            merge_or_push(&mut children, child);
        } else if let Some(module_name) = file_name.strip_suffix(".tara") {
            let contents = std::fs::read_to_string(&path).map_err(|source| FatalError::Io {
                path: path.clone(),
                source,
            })?;
            merge_or_push(&mut children, ModuleTree::leaf(module_name.to_string(), contents));
        }
    }

    Ok(ModuleTree::group(dir_name.to_string(), children))
}

/// Mirrors `populate()`'s name-collision merge: a `<name>.tara` leaf and a
/// `<name>/` subdirectory with the same basename fold into one entry, the
/// leaf's contents providing that entry's own body.
fn merge_or_push(children: &mut Vec<ModuleTree>, incoming: ModuleTree) {
    if let Some(existing) = children.iter_mut().find(|c| c.name == incoming.name) {
        if existing.contents.is_none() {
            existing.contents = incoming.contents;
        }
        existing.children.extend(incoming.children);
    } else {
        children.push(incoming);
    }
}

/// Resolves the directory to discover from a CLI path argument: `populate`
/// always walks a directory, so a file argument (spec.md §6: "a single path
/// to a source file") resolves to its parent.
pub fn enclosing_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_flat_tara_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.tara"), "func b(): int 2").unwrap();
        fs::write(dir.path().join("a.tara"), "func a(): int 1").unwrap();
        fs::write(dir.path().join(".hidden.tara"), "func hidden(): int 0").unwrap();

        let tree = discover(dir.path()).unwrap();
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name, "a");
        assert_eq!(tree.children[1].name, "b");
    }

    #[test]
    fn flatten_concatenates_every_leaf_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.tara"), "func a(): int 1").unwrap();
        fs::write(dir.path().join("b.tara"), "func b(): int 2").unwrap();

        let tree = discover(dir.path()).unwrap();
        let flat = tree.flatten();
        assert!(flat.contains("func a(): int 1"));
        assert!(flat.contains("func b(): int 2"));
        assert!(flat.find("func a").unwrap() < flat.find("func b").unwrap());
    }

    #[test]
    fn directory_module_file_merges_with_same_named_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("util.tara"), "func helper(): int 0").unwrap();
        fs::create_dir(dir.path().join("util")).unwrap();
        fs::write(dir.path().join("util").join("extra.tara"), "func extra(): int 1").unwrap();

        let tree = discover(dir.path()).unwrap();
        assert_eq!(tree.children.len(), 1);
        let util = &tree.children[0];
        assert_eq!(util.name, "util");
        assert_eq!(util.contents.as_deref(), Some("func helper(): int 0"));
        assert_eq!(util.children.len(), 1);
        assert_eq!(util.children[0].name, "extra");
    }
}
