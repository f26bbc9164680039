//! Picks the resource record a dotted reference points to.
//!
//! A matched token is split into `(prefix, class, key)`. The prefix is tried
//! as an alias, then as a namespace, then as the leading part of a type name;
//! without a prefix the class is looked up through the in-scope namespaces.
//! Anything that does not resolve to exactly one namespace is a non-match:
//! missing a reference is preferred over reporting a wrong one.

use crate::core::{
    error::ScopeError,
    resource::{ReferenceRecord, ResourceOrigin, qualify},
    scope::NamespaceScope,
    trie::Trie,
};

/// A dotted token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DottedReference<'a> {
    /// Everything before the class segment, if any.
    pub prefix: Option<&'a str>,
    pub class: &'a str,
    pub key: &'a str,
}

impl<'a> DottedReference<'a> {
    /// Split `Ns.Class.Key` / `Class.Key`. Returns `None` for fewer than two
    /// segments or empty segments.
    pub fn parse(text: &'a str) -> Option<Self> {
        if text.split('.').any(str::is_empty) {
            return None;
        }

        let (rest, key) = text.rsplit_once('.')?;
        match rest.rsplit_once('.') {
            Some((prefix, class)) => Some(Self {
                prefix: Some(prefix),
                class,
                key,
            }),
            None => Some(Self {
                prefix: None,
                class: rest,
                key,
            }),
        }
    }

    /// The reference as written, without comments or whitespace.
    pub fn original_text(&self) -> String {
        match self.prefix {
            Some(prefix) => format!("{}.{}.{}", prefix, self.class, self.key),
            None => format!("{}.{}", self.class, self.key),
        }
    }
}

/// Read-only inputs shared by every reference resolution of a scan.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub trie: &'a Trie,
    pub scope: &'a NamespaceScope,
    /// Origin that wins ties between same-key candidates, when it is one of them.
    pub preferred_origin: Option<&'a ResourceOrigin>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(trie: &'a Trie, scope: &'a NamespaceScope) -> Self {
        Self {
            trie,
            scope,
            preferred_origin: None,
        }
    }

    pub fn with_preferred_origin(mut self, origin: Option<&'a ResourceOrigin>) -> Self {
        self.preferred_origin = origin;
        self
    }

    /// Resolve `reference` against the candidates of the terminal node it matched.
    pub fn resolve<'r>(
        &self,
        reference: &DottedReference<'_>,
        candidates: &'r [ReferenceRecord],
    ) -> Result<Option<&'r ReferenceRecord>, ScopeError> {
        let Some(prefix) = reference.prefix else {
            return Ok(self
                .scope
                .resolve_type(reference.class, self.trie)?
                .and_then(|namespace| self.pick(candidates, &namespace)));
        };

        if let Some(namespace) = self.scope.resolve_alias(prefix)? {
            return Ok(self.pick(candidates, namespace));
        }

        if let Some(record) = self.pick(candidates, prefix) {
            return Ok(Some(record));
        }

        // The prefix may be the tail of a namespace that is in scope.
        let partial = format!("{}.{}", prefix, reference.class);
        Ok(self
            .scope
            .resolve_type(&partial, self.trie)?
            .and_then(|namespace| self.pick(candidates, &qualify(&namespace, prefix))))
    }

    /// Choose among candidates declared in `namespace`.
    fn pick<'r>(
        &self,
        candidates: &'r [ReferenceRecord],
        namespace: &str,
    ) -> Option<&'r ReferenceRecord> {
        let in_namespace = || candidates.iter().filter(|r| r.origin.namespace == namespace);

        if let Some(preferred) = self.preferred_origin
            && let Some(record) = in_namespace().find(|r| *r.origin == *preferred)
        {
            return Some(record);
        }

        in_namespace()
            .find(|r| !r.origin.is_culture_specific())
            .or_else(|| in_namespace().next())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::resource::ResourceEntry;

    fn entry(ns: &str, class: &str, key: &str, culture: Option<&str>) -> ResourceEntry {
        let path = match culture {
            Some(c) => format!("{}.{}.resx", class, c),
            None => format!("{}.resx", class),
        };
        let origin = Arc::new(ResourceOrigin::new(
            ns,
            class,
            culture.map(str::to_string),
            path,
        ));
        ResourceEntry::new(key, format!("{} ({})", key, culture.unwrap_or("neutral")), origin)
    }

    fn resolve_text<'t>(
        ctx: &ResolveContext<'_>,
        trie: &'t Trie,
        text: &str,
    ) -> Option<&'t ReferenceRecord> {
        let reference = DottedReference::parse(text).unwrap();
        let node = trie.walk(&format!("{}.{}", reference.class, reference.key));
        ctx.resolve(&reference, trie.records(node)).unwrap()
    }

    #[test]
    fn test_split_three_segments() {
        let r = DottedReference::parse("A.B.Class.Key").unwrap();
        assert_eq!(r.prefix, Some("A.B"));
        assert_eq!(r.class, "Class");
        assert_eq!(r.key, "Key");
        assert_eq!(r.original_text(), "A.B.Class.Key");
    }

    #[test]
    fn test_split_two_segments() {
        let r = DottedReference::parse("Class.Key").unwrap();
        assert_eq!(r.prefix, None);
        assert_eq!(r.class, "Class");
        assert_eq!(r.key, "Key");
    }

    #[test]
    fn test_split_rejects_malformed() {
        assert_eq!(DottedReference::parse("Key"), None);
        assert_eq!(DottedReference::parse("A..Key"), None);
        assert_eq!(DottedReference::parse(".Key"), None);
        assert_eq!(DottedReference::parse(""), None);
    }

    #[test]
    fn test_resolve_explicit_namespace() {
        let trie = Trie::build(&[entry("MyNs", "Resources", "Greeting", None)]);
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope);

        let record = resolve_text(&ctx, &trie, "MyNs.Resources.Greeting").unwrap();
        assert_eq!(record.origin.namespace, "MyNs");
        assert_eq!(record.key, "Greeting");
    }

    #[test]
    fn test_resolve_through_using() {
        let trie = Trie::build(&[entry("MyNs", "Resources", "Greeting", None)]);
        let mut scope = NamespaceScope::new();
        scope.add_namespace("MyNs");
        let ctx = ResolveContext::new(&trie, &scope);

        assert!(resolve_text(&ctx, &trie, "Resources.Greeting").is_some());
    }

    #[test]
    fn test_unresolved_without_using() {
        let trie = Trie::build(&[entry("MyNs", "Resources", "Greeting", None)]);
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope);

        assert!(resolve_text(&ctx, &trie, "Resources.Greeting").is_none());
    }

    #[test]
    fn test_resolve_through_alias() {
        let trie = Trie::build(&[entry("MyApp.Properties", "Resources", "Greeting", None)]);
        let mut scope = NamespaceScope::new();
        scope.add_alias("P", "MyApp.Properties");
        let ctx = ResolveContext::new(&trie, &scope);

        let record = resolve_text(&ctx, &trie, "P.Resources.Greeting").unwrap();
        assert_eq!(record.origin.namespace, "MyApp.Properties");
    }

    #[test]
    fn test_alias_to_wrong_namespace_does_not_fall_back() {
        let trie = Trie::build(&[entry("MyNs", "Resources", "Greeting", None)]);
        let mut scope = NamespaceScope::new();
        scope.add_alias("MyNs", "Elsewhere");
        let ctx = ResolveContext::new(&trie, &scope);

        assert!(resolve_text(&ctx, &trie, "MyNs.Resources.Greeting").is_none());
    }

    #[test]
    fn test_resolve_partial_namespace_prefix() {
        let trie = Trie::build(&[entry("MyApp.Properties", "Resources", "Greeting", None)]);
        let mut scope = NamespaceScope::new();
        scope.add_namespace("MyApp");
        let ctx = ResolveContext::new(&trie, &scope);

        let record = resolve_text(&ctx, &trie, "Properties.Resources.Greeting").unwrap();
        assert_eq!(record.origin.namespace, "MyApp.Properties");
    }

    #[test]
    fn test_tie_break_prefers_culture_neutral() {
        let trie = Trie::build(&[
            entry("N", "Res", "K", Some("de-DE")),
            entry("N", "Res", "K", None),
        ]);
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope);

        let record = resolve_text(&ctx, &trie, "N.Res.K").unwrap();
        assert_eq!(record.origin.culture, None);
    }

    #[test]
    fn test_tie_break_with_preferred_origin() {
        let entries = [
            entry("N", "Res", "K", None),
            entry("N", "Res", "K", Some("de-DE")),
        ];
        let trie = Trie::build(&entries);
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope)
            .with_preferred_origin(Some(entries[1].origin.as_ref()));

        let record = resolve_text(&ctx, &trie, "N.Res.K").unwrap();
        assert_eq!(record.origin.culture.as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_preferred_origin_not_among_candidates_is_ignored() {
        let trie = Trie::build(&[
            entry("N", "Res", "K", Some("fr-FR")),
            entry("N", "Res", "K", None),
        ]);
        let unrelated = ResourceOrigin::new("Other", "Res", None, "Other.resx");
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope).with_preferred_origin(Some(&unrelated));

        let record = resolve_text(&ctx, &trie, "N.Res.K").unwrap();
        assert_eq!(record.origin.culture, None);
    }

    #[test]
    fn test_only_culture_specific_candidates() {
        let trie = Trie::build(&[entry("N", "Res", "K", Some("fr-FR"))]);
        let scope = NamespaceScope::new();
        let ctx = ResolveContext::new(&trie, &scope);

        let record = resolve_text(&ctx, &trie, "N.Res.K").unwrap();
        assert_eq!(record.origin.culture.as_deref(), Some("fr-FR"));
    }

    #[test]
    fn test_malformed_scope_propagates() {
        let trie = Trie::build(&[entry("N", "Res", "K", None)]);
        let mut scope = NamespaceScope::new();
        scope.add_alias("N", "");
        let ctx = ResolveContext::new(&trie, &scope);

        let reference = DottedReference::parse("N.Res.K").unwrap();
        let node = trie.walk("Res.K");
        assert!(ctx.resolve(&reference, trie.records(node)).is_err());
    }
}
