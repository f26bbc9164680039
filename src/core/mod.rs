//! Scanning engine and the project plumbing around it.
//!
//! The engine proper (`dialect`, `scanner`, `trie`, `scope`, `resolver`) works
//! on in-memory text and never touches the filesystem. `parsers`,
//! `file_scanner`, `source_file` and `context` feed it from a project on disk.

pub mod context;
pub mod dialect;
pub mod error;
pub mod file_scanner;
pub mod parsers;
pub mod position;
pub mod resolver;
pub mod resource;
pub mod results;
pub mod scanner;
pub mod scope;
pub mod source_file;
pub mod trie;

pub use context::{ResourceSet, ScanContext};
pub use dialect::{CSharp, DEFAULT_NO_LOCALIZE_COMMENT, Dialect, Language, VisualBasic};
pub use error::{ScanError, ScopeError};
pub use position::{Position, Span};
pub use resolver::{DottedReference, ResolveContext};
pub use resource::{ReferenceRecord, ResourceEntry, ResourceOrigin};
pub use results::{ItemFlags, LiteralItem, ReferenceItem, ResultItem};
pub use scanner::{find_literals, find_references};
pub use scope::NamespaceScope;
pub use source_file::SourceFile;
pub use trie::{NodeId, Trie};
