//! A source file prepared for scanning.
//!
//! Code files are scanned as one block anchored at the start of the file;
//! markup files contribute one block per embedded code block, each anchored
//! where it sits in the markup so results point into the page itself.

use std::path::Path;

use crate::core::{
    dialect::Language,
    error::ScanError,
    parsers::{
        aspx::{MarkupPage, is_markup_file, parse_markup},
        usings::collect_scope,
    },
    position::Position,
    resolver::ResolveContext,
    resource::ResourceOrigin,
    results::{ItemFlags, LiteralItem, ReferenceItem},
    scanner::{find_literals, find_references},
    scope::NamespaceScope,
    trie::Trie,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceKind {
    Code(Language),
    Markup(MarkupPage),
}

/// A block of code together with where it starts in its file.
#[derive(Debug, Clone, Copy)]
pub struct CodeRegion<'a> {
    pub language: Language,
    pub code: &'a str,
    pub anchor: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    /// Designer or other tool-generated file.
    pub generated: bool,
    kind: SourceKind,
}

impl SourceFile {
    /// Prepare `content` for scanning. Returns `None` when the path is neither
    /// a code file nor a markup file.
    pub fn new(path: impl Into<String>, content: String, generated: bool) -> Option<Self> {
        let path = path.into();
        let kind = match Language::from_path(Path::new(&path)) {
            Some(language) => SourceKind::Code(language),
            None if is_markup_file(Path::new(&path)) => SourceKind::Markup(parse_markup(&content)),
            None => return None,
        };
        Some(Self {
            path,
            content,
            generated,
            kind,
        })
    }

    pub fn language(&self) -> Language {
        match &self.kind {
            SourceKind::Code(language) => *language,
            SourceKind::Markup(page) => page.language,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self.kind, SourceKind::Markup(_))
    }

    /// Code regions in document order.
    pub fn regions(&self) -> Vec<CodeRegion<'_>> {
        match &self.kind {
            SourceKind::Code(language) => vec![CodeRegion {
                language: *language,
                code: &self.content,
                anchor: Position::start(),
            }],
            SourceKind::Markup(page) => page
                .blocks
                .iter()
                .map(|block| CodeRegion {
                    language: page.language,
                    code: &block.code,
                    anchor: block.anchor,
                })
                .collect(),
        }
    }

    /// Namespaces and aliases visible from this file's code.
    pub fn scope(&self, root_namespace: &str) -> NamespaceScope {
        match &self.kind {
            SourceKind::Code(language) => collect_scope(&self.content, *language, root_namespace),
            SourceKind::Markup(page) => {
                let mut scope = NamespaceScope::new();
                for import in &page.imports {
                    scope.add_namespace(import.as_str());
                }
                if !root_namespace.is_empty() {
                    scope.add_enclosing_namespace(root_namespace);
                }
                scope
            }
        }
    }

    fn flags(&self) -> ItemFlags {
        ItemFlags {
            from_generated_source: self.generated,
            ..Default::default()
        }
    }

    /// String literals of every code region, in document order.
    pub fn literals(&self, no_localize_comment: &str) -> Result<Vec<LiteralItem>, ScanError> {
        let mut items = Vec::new();
        for region in self.regions() {
            let dialect = region.language.dialect(Some(no_localize_comment));
            items.extend(find_literals(
                &*dialect,
                region.code,
                region.anchor,
                self.flags(),
            )?);
        }
        Ok(items)
    }

    /// Resource references of every code region, in document order.
    pub fn references(
        &self,
        trie: &Trie,
        root_namespace: &str,
        preferred_origin: Option<&ResourceOrigin>,
    ) -> Result<Vec<ReferenceItem>, ScanError> {
        let scope = self.scope(root_namespace);
        let ctx = ResolveContext::new(trie, &scope).with_preferred_origin(preferred_origin);

        let mut items = Vec::new();
        for region in self.regions() {
            let dialect = region.language.dialect(None);
            items.extend(find_references(
                &*dialect,
                region.code,
                region.anchor,
                &ctx,
                self.flags(),
            )?);
        }
        Ok(items)
    }

    /// Text of a 1-based line, without its line break.
    pub fn line(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|index| self.content.lines().nth(index))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{DEFAULT_NO_LOCALIZE_COMMENT, resource::ResourceEntry};

    fn trie() -> Trie {
        let neutral = Arc::new(ResourceOrigin::new(
            "MyApp.Properties",
            "Resources",
            None,
            "Properties/Resources.resx",
        ));
        let german = Arc::new(ResourceOrigin::new(
            "MyApp.Properties",
            "Resources",
            Some("de".to_string()),
            "Properties/Resources.de.resx",
        ));
        Trie::build(&[
            ResourceEntry::new("Greeting", "Hello", neutral),
            ResourceEntry::new("Greeting", "Hallo", german),
        ])
    }

    #[test]
    fn test_unknown_extension() {
        assert!(SourceFile::new("readme.txt", String::new(), false).is_none());
    }

    #[test]
    fn test_code_file_literals() {
        let file = SourceFile::new(
            "Program.cs",
            "var a = \"One\";\nvar b = /*VL_NO_LOC*/\"Two\";\n".to_string(),
            true,
        )
        .unwrap();

        let items = file.literals(DEFAULT_NO_LOCALIZE_COMMENT).unwrap();
        let values: Vec<_> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["One", "Two"]);
        assert!(items[0].flags.from_generated_source);
        assert!(!items[0].flags.marked_unlocalizable);
        assert!(items[1].flags.marked_unlocalizable);
        assert_eq!(file.line(items[1].span.start.line), "var b = /*VL_NO_LOC*/\"Two\";");
    }

    #[test]
    fn test_markup_literals_point_into_page() {
        let page = "<%@ Page Language=\"VB\" %>\n<h1><%= \"Title\" %></h1>\n";
        let file = SourceFile::new("Default.aspx", page.to_string(), false).unwrap();

        assert!(file.is_markup());
        assert_eq!(file.language(), Language::VisualBasic);
        let items = file.literals(DEFAULT_NO_LOCALIZE_COMMENT).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, "Title");
        assert_eq!(items[0].span.start.line, 2);
        assert_eq!(items[0].span.start.column, 9);
        let start = items[0].offset;
        let text: String = page.chars().skip(start).take(items[0].length).collect();
        assert_eq!(text, "\"Title\"");
    }

    #[test]
    fn test_code_file_references() {
        let code = "using MyApp.Properties;\nclass A { string s = Resources.Greeting; }\n";
        let file = SourceFile::new("A.cs", code.to_string(), false).unwrap();
        let trie = trie();

        let items = file.references(&trie, "", None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, "Hello");
        assert_eq!(items[0].full_text, "MyApp.Properties.Resources.Greeting");
    }

    #[test]
    fn test_references_prefer_origin() {
        let code = "x = MyApp.Properties.Resources.Greeting;";
        let file = SourceFile::new("A.cs", code.to_string(), false).unwrap();
        let trie = trie();
        let german = ResourceOrigin::new(
            "MyApp.Properties",
            "Resources",
            Some("de".to_string()),
            "Properties/Resources.de.resx",
        );

        let items = file.references(&trie, "", Some(&german)).unwrap();
        assert_eq!(items[0].value, "Hallo");
    }

    #[test]
    fn test_markup_references_use_page_imports() {
        let page = "<%@ Import Namespace=\"MyApp.Properties\" %>\n<%: Resources.Greeting %>";
        let file = SourceFile::new("Menu.ascx", page.to_string(), false).unwrap();
        let trie = trie();

        let items = file.references(&trie, "", None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original_text, "Resources.Greeting");
        assert_eq!(items[0].span.start.line, 2);
    }

    #[test]
    fn test_vb_file_uses_root_namespace() {
        let code = "Module M\n    Dim s = Properties.Resources.Greeting\nEnd Module\n";
        let file = SourceFile::new("M.vb", code.to_string(), false).unwrap();
        let trie = trie();

        let items = file.references(&trie, "MyApp", None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original_text, "Properties.Resources.Greeting");
    }

    #[test]
    fn test_line_out_of_range() {
        let file = SourceFile::new("A.cs", "one\ntwo".to_string(), false).unwrap();
        assert_eq!(file.line(2), "two");
        assert_eq!(file.line(0), "");
        assert_eq!(file.line(9), "");
    }
}
