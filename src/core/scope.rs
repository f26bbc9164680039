//! Namespaces and aliases visible from a block of code.

use std::collections::HashMap;

use crate::{
    core::{error::ScopeError, resource::qualify, trie::Trie},
    utils::is_dotted_identifier,
};

/// In-scope namespaces and alias table of one source file (or namespace block).
///
/// Built by the caller from `using`/`Imports` declarations, then shared
/// read-only by every scan of that file. The global namespace is always in
/// scope. Entries are validated lazily, when a resolution consults them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceScope {
    namespaces: Vec<String>,
    aliases: HashMap<String, String>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a namespace (`using X;`). Duplicates are ignored.
    pub fn add_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !namespace.is_empty() && !self.namespaces.contains(&namespace) {
            self.namespaces.push(namespace);
        }
    }

    /// Enter a namespace declaration: `A.B.C` brings `A.B.C`, `A.B` and `A` into scope.
    pub fn add_enclosing_namespace(&mut self, namespace: &str) {
        let mut current = namespace;
        loop {
            self.add_namespace(current);
            match current.rfind('.') {
                Some(idx) => current = &current[..idx],
                None => break,
            }
        }
    }

    /// Register `alias` for `target` (`using alias = target;`).
    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Namespace an alias stands for, if `alias` is one.
    pub fn resolve_alias(&self, alias: &str) -> Result<Option<&str>, ScopeError> {
        match self.aliases.get(alias) {
            Some(target) if is_dotted_identifier(target) => Ok(Some(target.as_str())),
            Some(target) => Err(ScopeError::MalformedAlias {
                alias: alias.to_string(),
                target: target.clone(),
            }),
            None => Ok(None),
        }
    }

    /// Find the single in-scope namespace in which `name` is a known resource class.
    ///
    /// `name` may itself be dotted (`Sub.Resources`). Returns `None` when no
    /// namespace or more than one namespace qualifies.
    pub fn resolve_type(&self, name: &str, trie: &Trie) -> Result<Option<String>, ScopeError> {
        let mut found: Option<&str> = None;

        for namespace in std::iter::once("").chain(self.namespaces.iter().map(String::as_str)) {
            if !namespace.is_empty() && !is_dotted_identifier(namespace) {
                return Err(ScopeError::MalformedNamespace(namespace.to_string()));
            }
            if !trie.contains_class(&qualify(namespace, name)) {
                continue;
            }
            match found {
                None => found = Some(namespace),
                Some(previous) if previous != namespace => {
                    tracing::trace!(name, previous, namespace, "ambiguous type in scope");
                    return Ok(None);
                }
                Some(_) => {}
            }
        }

        Ok(found.map(str::to_string))
    }
}
