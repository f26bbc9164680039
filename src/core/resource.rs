use std::{fmt, sync::Arc};

use serde::Serialize;

use crate::utils::to_identifier;

/// A resource container, e.g. `Properties/Resources.de-DE.resx`.
///
/// Culture-neutral and culture-specific containers share namespace, class
/// and keys; they only differ in `culture`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceOrigin {
    /// Namespace of the generated resource class (e.g. `MyApp.Properties`).
    pub namespace: String,
    /// Name of the generated resource class (e.g. `Resources`).
    pub class: String,
    /// Culture name (e.g. `de-DE`), `None` for the culture-neutral container.
    pub culture: Option<String>,
    /// Path of the container file.
    pub path: String,
}

impl ResourceOrigin {
    pub fn new(
        namespace: impl Into<String>,
        class: impl Into<String>,
        culture: Option<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            class: class.into(),
            culture,
            path: path.into(),
        }
    }

    pub fn is_culture_specific(&self) -> bool {
        self.culture.is_some()
    }

    /// Fully qualified resource class name (`Namespace.Class`).
    pub fn qualified_class(&self) -> String {
        qualify(&self.namespace, &self.class)
    }
}

impl fmt::Display for ResourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.culture {
            Some(culture) => write!(f, "{} [{}]", self.qualified_class(), culture),
            None => write!(f, "{}", self.qualified_class()),
        }
    }
}

/// One key/value pair of a resource container, as supplied to
/// [`Trie::build`](crate::core::Trie::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub key: String,
    pub value: String,
    pub origin: Arc<ResourceOrigin>,
}

impl ResourceEntry {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        origin: Arc<ResourceOrigin>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            origin,
        }
    }

    /// Name of the generated property for this key (`Button.Text` -> `Button_Text`).
    pub fn property_name(&self) -> String {
        to_identifier(&self.key)
    }

    /// Dotted path relative to the class: `Class.Key`.
    pub fn class_path(&self) -> String {
        format!("{}.{}", self.origin.class, self.property_name())
    }

    /// Fully qualified dotted path: `Namespace.Class.Key`.
    pub fn full_path(&self) -> String {
        format!("{}.{}", self.origin.qualified_class(), self.property_name())
    }
}

/// Candidate stored on a terminal trie node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub key: String,
    pub value: String,
    pub origin: Arc<ResourceOrigin>,
}

impl From<&ResourceEntry> for ReferenceRecord {
    fn from(entry: &ResourceEntry) -> Self {
        Self {
            key: entry.key.clone(),
            value: entry.value.clone(),
            origin: Arc::clone(&entry.origin),
        }
    }
}

/// Join a namespace and a name, tolerating the global (empty) namespace.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
