//! Hygiene: coding standards enforced at test time.
//!
//! Scans the production sources under `src/` for patterns that crash the
//! process or silently drop errors. Each pattern has a budget. Budgets only
//! ever go down; fix an existing hit before adding a new one.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, budget)` pairs checked against every production file.
const BUDGETS: &[(&str, usize)] = &[
    // Panics.
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    // Silent loss.
    ("let _ =", 0),
    (".ok()", 0),
    // Structure.
    ("#[allow(dead_code)]", 0),
];

/// Production `.rs` files under `src/`, sibling `_test.rs` files excluded.
fn production_files() -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn hits(files: &[(PathBuf, String)], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|(path, content)| {
            let count = content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (path.display().to_string(), count))
        })
        .collect()
}

fn check(pattern: &str) {
    let Some(&(_, budget)) = BUDGETS.iter().find(|(p, _)| *p == pattern) else {
        panic!("no budget configured for {pattern}");
    };
    let found = hits(&production_files(), pattern);
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= budget, "{pattern} budget exceeded: found {count}, max {budget}.\n{listing}");
}

#[test]
fn sources_are_found() {
    let files = production_files();
    assert!(files.iter().any(|(p, _)| p.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn unwrap_budget() {
    check(".unwrap()");
}

#[test]
fn expect_budget() {
    check(".expect(");
}

#[test]
fn panic_budget() {
    check("panic!(");
}

#[test]
fn unreachable_budget() {
    check("unreachable!(");
}

#[test]
fn todo_budget() {
    check("todo!(");
}

#[test]
fn unimplemented_budget() {
    check("unimplemented!(");
}

#[test]
fn silent_discard_budget() {
    check("let _ =");
}

#[test]
fn dot_ok_budget() {
    check(".ok()");
}

#[test]
fn allow_dead_code_budget() {
    check("#[allow(dead_code)]");
}
