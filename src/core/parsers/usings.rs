//! Collects the namespaces and aliases visible in a source file.
//!
//! This is a line-based scan of `using`/`Imports` and `namespace` declarations,
//! not a parser: declarations inside comments or strings that do not start a
//! line are ignored, and one scope is built per file.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    core::{dialect::Language, scope::NamespaceScope},
    utils::is_dotted_identifier,
};

static CS_USING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:global\s+)?using\s+(?:global::)?([\w.]+)\s*;").unwrap()
});

static CS_ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:global\s+)?using\s+(\w+)\s*=\s*(?:global::)?([\w.]+)\s*;").unwrap()
});

static CS_NAMESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*namespace\s+([\w.]+)").unwrap());

static VB_IMPORTS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*Imports[ \t]+([^'\r\n]+)").unwrap());

static VB_NAMESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*Namespace[ \t]+([\w.]+)").unwrap());

/// Build the namespace scope of a source file.
///
/// `root_namespace` is the project's default namespace. VB files live inside
/// it implicitly, so their `Namespace` blocks are nested under it.
pub fn collect_scope(content: &str, language: Language, root_namespace: &str) -> NamespaceScope {
    match language {
        Language::CSharp => collect_csharp(content),
        Language::VisualBasic => collect_vb(content, root_namespace),
    }
}

fn collect_csharp(content: &str) -> NamespaceScope {
    let mut scope = NamespaceScope::new();

    for caps in CS_ALIAS_REGEX.captures_iter(content) {
        scope.add_alias(&caps[1], &caps[2]);
    }
    for caps in CS_USING_REGEX.captures_iter(content) {
        scope.add_namespace(&caps[1]);
    }
    for caps in CS_NAMESPACE_REGEX.captures_iter(content) {
        scope.add_enclosing_namespace(&caps[1]);
    }

    scope
}

fn collect_vb(content: &str, root_namespace: &str) -> NamespaceScope {
    let mut scope = NamespaceScope::new();

    for caps in VB_IMPORTS_REGEX.captures_iter(content) {
        for clause in caps[1].split(',').map(str::trim).filter(|c| !c.is_empty()) {
            // XML namespace imports and generic aliases are not namespaces.
            match clause.split_once('=') {
                Some((alias, target)) if is_dotted_identifier(target.trim()) => {
                    scope.add_alias(alias.trim(), target.trim())
                }
                None if is_dotted_identifier(clause) => scope.add_namespace(clause),
                _ => {}
            }
        }
    }

    let root = root_namespace.trim();
    for caps in VB_NAMESPACE_REGEX.captures_iter(content) {
        let declared = &caps[1];
        match declared.strip_prefix("Global.") {
            Some(absolute) => scope.add_enclosing_namespace(absolute),
            None if root.is_empty() => scope.add_enclosing_namespace(declared),
            None => scope.add_enclosing_namespace(&format!("{}.{}", root, declared)),
        }
    }
    if !root.is_empty() {
        scope.add_enclosing_namespace(root);
    }

    scope
}
