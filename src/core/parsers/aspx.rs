//! Code blocks embedded in web form markup (`.aspx`, `.ascx`, `.master`).
//!
//! Each block is returned with the position of its first character so scan
//! results map straight back into the markup file.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::{dialect::Language, position::Position};

static DIRECTIVE_LANGUAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)^\s*(?:Page|Control|Master)\b.*?\bLanguage\s*=\s*["']?([\w#]+)"#).unwrap()
});

static IMPORT_DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)^\s*Import\b.*?\bNamespace\s*=\s*["']?([\w.]+)"#).unwrap()
});

static RUNAT_SERVER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\brunat\s*=\s*["']?server\b"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// `<% ... %>`
    Statement,
    /// `<%= ... %>`
    Expression,
    /// `<%: ... %>`
    EncodedExpression,
    /// `<%# ... %>`
    DataBinding,
    /// Body of `<script runat="server">`.
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub kind: BlockKind,
    pub code: String,
    /// Position of the first character of `code` in the markup file.
    pub anchor: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPage {
    /// Language from the page directive, C# when not declared.
    pub language: Language,
    /// Namespaces from `<%@ Import Namespace="..." %>` directives.
    pub imports: Vec<String>,
    pub blocks: Vec<CodeBlock>,
}

struct Cursor<'a> {
    chars: &'a [char],
    index: usize,
    pos: Position,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            index: 0,
            pos: Position::start(),
        }
    }

    fn is_done(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn starts_with(&self, pattern: &str, ignore_case: bool) -> bool {
        self.matches_at(self.index, pattern, ignore_case)
    }

    fn matches_at(&self, index: usize, pattern: &str, ignore_case: bool) -> bool {
        let rest = &self.chars[index..];
        pattern.chars().enumerate().all(|(i, p)| {
            rest.get(i).is_some_and(|&c| {
                if ignore_case {
                    c.eq_ignore_ascii_case(&p)
                } else {
                    c == p
                }
            })
        })
    }

    /// Index of the next occurrence of `pattern` at or after the cursor.
    fn find(&self, pattern: &str, ignore_case: bool) -> Option<usize> {
        (self.index..self.chars.len()).find(|&i| self.matches_at(i, pattern, ignore_case))
    }

    fn advance_to(&mut self, index: usize) {
        let end = index.min(self.chars.len());
        while self.index < end {
            self.pos = self.pos.advance(self.chars[self.index]);
            self.index += 1;
        }
    }

    fn text(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }
}

/// Extract the server code blocks of a markup page.
///
/// `<%@ %>` directives and `<%-- --%>` server comments are not code. An
/// unterminated block ends the extraction.
pub fn parse_markup(content: &str) -> MarkupPage {
    let chars: Vec<char> = content.chars().collect();
    let mut cursor = Cursor::new(&chars);
    let mut language = None;
    let mut imports = Vec::new();
    let mut blocks = Vec::new();

    while !cursor.is_done() {
        if cursor.starts_with("<%--", false) {
            let Some(end) = cursor.find("--%>", false) else {
                break;
            };
            cursor.advance_to(end + 4);
        } else if cursor.starts_with("<%@", false) {
            let start = cursor.index + 3;
            let Some(end) = cursor.find("%>", false) else {
                break;
            };
            let directive = cursor.text(start, end);
            if let Some(caps) = IMPORT_DIRECTIVE_REGEX.captures(&directive) {
                imports.push(caps[1].to_string());
            } else if language.is_none()
                && let Some(caps) = DIRECTIVE_LANGUAGE_REGEX.captures(&directive)
            {
                language = Language::from_name(&caps[1]);
            }
            cursor.advance_to(end + 2);
        } else if cursor.starts_with("<%", false) {
            let (kind, marker) = match cursor.chars.get(cursor.index + 2) {
                Some('=') => (BlockKind::Expression, 1),
                Some(':') => (BlockKind::EncodedExpression, 1),
                Some('#') => (BlockKind::DataBinding, 1),
                _ => (BlockKind::Statement, 0),
            };
            cursor.advance_to(cursor.index + 2 + marker);
            let Some(end) = cursor.find("%>", false) else {
                break;
            };
            blocks.push(CodeBlock {
                kind,
                code: cursor.text(cursor.index, end),
                anchor: cursor.pos,
            });
            cursor.advance_to(end + 2);
        } else if cursor.starts_with("<script", true) {
            let Some(tag_end) = cursor.find(">", false) else {
                break;
            };
            let tag = cursor.text(cursor.index, tag_end);
            cursor.advance_to(tag_end + 1);
            if !RUNAT_SERVER_REGEX.is_match(&tag) || tag.ends_with('/') {
                continue;
            }
            let Some(end) = cursor.find("</script", true) else {
                break;
            };
            blocks.push(CodeBlock {
                kind: BlockKind::Script,
                code: cursor.text(cursor.index, end),
                anchor: cursor.pos,
            });
            cursor.advance_to(end);
        } else {
            cursor.advance_to(cursor.index + 1);
        }
    }

    MarkupPage {
        language: language.unwrap_or(Language::CSharp),
        imports,
        blocks,
    }
}

/// Whether a path is a markup file with embedded code.
pub fn is_markup_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ["aspx", "ascx", "master"]
                .iter()
                .any(|m| ext.eq_ignore_ascii_case(m))
        })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_blocks_with_anchors() {
        let page = "<%@ Page Language=\"C#\" %>\n<p><%= \"Hi\" %></p>\n<% var x = 1; %>";
        let parsed = parse_markup(page);

        assert_eq!(parsed.language, Language::CSharp);
        assert_eq!(parsed.blocks.len(), 2);
        assert_eq!(parsed.blocks[0].kind, BlockKind::Expression);
        assert_eq!(parsed.blocks[0].code, " \"Hi\" ");
        assert_eq!(parsed.blocks[0].anchor, Position::new(2, 7, 32));
        assert_eq!(parsed.blocks[1].kind, BlockKind::Statement);
        assert_eq!(parsed.blocks[1].anchor.line, 3);
    }

    #[test]
    fn test_vb_directive() {
        let parsed = parse_markup("<%@ Control Language=\"VB\" AutoEventWireup=\"false\" %>");
        assert_eq!(parsed.language, Language::VisualBasic);
        assert!(parsed.blocks.is_empty());
    }

    #[test]
    fn test_other_directives_do_not_set_language() {
        let parsed = parse_markup("<%@ Import Namespace=\"System\" %><%@ Page Language=\"VB\" %>");
        assert_eq!(parsed.language, Language::VisualBasic);
    }

    #[test]
    fn test_import_directives() {
        let page = "<%@ Page Language=\"C#\" %>\n<%@ Import Namespace=\"MyApp.Properties\" %>\n\
                    <%@ import namespace='System.Text' %>";
        let parsed = parse_markup(page);
        assert_eq!(parsed.imports, ["MyApp.Properties", "System.Text"]);
    }

    #[test]
    fn test_server_comments_are_skipped() {
        let parsed = parse_markup("<%-- <% \"no\" %> --%><%: \"yes\" %><%# Eval(\"x\") %>");
        let kinds: Vec<_> = parsed.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, [BlockKind::EncodedExpression, BlockKind::DataBinding]);
        assert_eq!(parsed.blocks[0].code, " \"yes\" ");
    }

    #[test]
    fn test_server_script() {
        let page = "<script type=\"text/javascript\">var a = \"client\";</script>\n\
                    <SCRIPT runat=\"server\">\nvoid F() { var s = \"server\"; }\n</SCRIPT>";
        let parsed = parse_markup(page);
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].kind, BlockKind::Script);
        assert_eq!(parsed.blocks[0].code, "\nvoid F() { var s = \"server\"; }\n");
        assert_eq!(parsed.blocks[0].anchor.line, 2);
    }

    #[test]
    fn test_unterminated_block_stops() {
        let parsed = parse_markup("<%= \"a\" %><% \"never closed");
        assert_eq!(parsed.blocks.len(), 1);
    }

    #[test]
    fn test_is_markup_file() {
        assert!(is_markup_file(Path::new("Default.aspx")));
        assert!(is_markup_file(Path::new("Site.Master")));
        assert!(is_markup_file(Path::new("Menu.ascx")));
        assert!(!is_markup_file(Path::new("Default.aspx.cs")));
    }
}
