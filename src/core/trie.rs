//! Prefix tree over dotted resource paths.
//!
//! Every resource entry is inserted twice: as `Class.Key` and as
//! `Namespace.Class.Key`. Terminal nodes keep every record that ends there,
//! in insertion order and without deduplication; picking one of them is the
//! resolver's job.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. The trie is
//! immutable after [`Trie::build`] and can be shared between threads.

use std::collections::{HashMap, HashSet};

use crate::core::resource::{ReferenceRecord, ResourceEntry};

/// Handle of a node inside a [`Trie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, NodeId>,
    records: Vec<ReferenceRecord>,
}

#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    /// Fully qualified names of all resource classes (`Namespace.Class`).
    classes: HashSet<String>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            classes: HashSet::new(),
        }
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from resource entries.
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a ResourceEntry>) -> Self {
        let mut trie = Self::new();
        for entry in entries {
            trie.insert(entry);
        }
        tracing::debug!(
            nodes = trie.nodes.len(),
            classes = trie.classes.len(),
            "built reference trie"
        );
        trie
    }

    /// Insert one entry under both its class-relative and fully qualified path.
    pub fn insert(&mut self, entry: &ResourceEntry) {
        let record = ReferenceRecord::from(entry);
        self.insert_path(&entry.class_path(), record.clone());
        if !entry.origin.namespace.is_empty() {
            self.insert_path(&entry.full_path(), record);
        }
        self.classes.insert(entry.origin.qualified_class());
    }

    fn insert_path(&mut self, path: &str, record: ReferenceRecord) {
        let mut node = NodeId::ROOT;
        for ch in path.chars() {
            node = match self.nodes[node.index()].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(TrieNode::default());
                    self.nodes[node.index()].children.insert(ch, child);
                    child
                }
            };
        }
        self.nodes[node.index()].records.push(record);
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Follow the transition for `ch`; any character without one leads back to the root.
    ///
    /// Total: unknown node ids are treated like the root.
    pub fn step(&self, node: NodeId, ch: char) -> NodeId {
        self.nodes
            .get(node.index())
            .and_then(|n| n.children.get(&ch))
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.index())
            .is_some_and(|n| !n.records.is_empty())
    }

    /// Records ending at `node`, empty for non-terminal nodes.
    pub fn records(&self, node: NodeId) -> &[ReferenceRecord] {
        self.nodes
            .get(node.index())
            .map(|n| n.records.as_slice())
            .unwrap_or(&[])
    }

    /// Walk a whole path from the root. Used by tests and diagnostics.
    pub fn walk(&self, path: &str) -> NodeId {
        path.chars().fold(NodeId::ROOT, |node, ch| self.step(node, ch))
    }

    /// Whether `qualified` (`Namespace.Class`) names a resource class.
    pub fn contains_class(&self, qualified: &str) -> bool {
        self.classes.contains(qualified)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
