//! `.resx` resource container loading.
//!
//! Only string entries are loaded: `<data>` elements carrying a `type` or
//! `mimetype` attribute hold images, files or serialized objects and are skipped.

use std::{
    fs,
    path::{Component, Path, PathBuf},
    sync::{Arc, LazyLock},
};

use quick_xml::{Reader, events::Event};
use rayon::prelude::*;
use regex::Regex;
use thiserror::Error;

use crate::{
    core::resource::{ResourceEntry, ResourceOrigin},
    utils::to_identifier,
};

/// Culture names such as `de`, `de-DE`, `zh-Hans`, `sr-Latn-RS`.
static CULTURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").unwrap());

#[derive(Debug, Error)]
pub enum ResxError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed resource file {} at byte {position}: {message}", .path.display())]
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },
}

/// A resource file that could not be loaded.
#[derive(Debug, Clone)]
pub struct ResourceLoadWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct LoadResourcesResult {
    pub entries: Vec<ResourceEntry>,
    pub warnings: Vec<ResourceLoadWarning>,
}

/// Derive namespace, class and culture of a resource file from its location.
///
/// `Properties/Strings.de-DE.resx` under root namespace `MyApp` becomes
/// class `Strings` in `MyApp.Properties` with culture `de-DE`.
pub fn resource_origin(
    path: &Path,
    source_root: &Path,
    root_namespace: &str,
) -> Option<ResourceOrigin> {
    let stem = path.file_stem()?.to_str()?;
    let (class, culture) = match stem.rsplit_once('.') {
        Some((class, culture)) if !class.is_empty() && CULTURE_REGEX.is_match(culture) => {
            (class, Some(culture.to_string()))
        }
        _ => (stem, None),
    };

    let mut segments: Vec<String> = root_namespace
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(dir) = path.parent().and_then(|p| p.strip_prefix(source_root).ok()) {
        segments.extend(dir.components().filter_map(|c| match c {
            Component::Normal(name) => Some(to_identifier(&name.to_string_lossy())),
            _ => None,
        }));
    }

    Some(ResourceOrigin::new(
        segments.join("."),
        to_identifier(class),
        culture,
        path.to_string_lossy(),
    ))
}

/// Parse the string entries of a resource file's content.
pub fn parse_resx(
    content: &str,
    origin: Arc<ResourceOrigin>,
) -> Result<Vec<ResourceEntry>, ResxError> {
    let xml_error = |position: u64, message: String| ResxError::Xml {
        path: PathBuf::from(&origin.path),
        position,
        message,
    };

    let mut reader = Reader::from_str(content);
    let mut entries = Vec::new();
    // Name of the open <data> element, `None` inside non-string entries.
    let mut data: Option<Option<String>> = None;
    let mut in_value = false;
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"data" => {
                    let mut name = None;
                    let mut is_string = true;
                    for attr in e.attributes() {
                        let attr = attr
                            .map_err(|err| xml_error(reader.buffer_position(), err.to_string()))?;
                        match attr.key.as_ref() {
                            b"name" => {
                                let unescaped = attr.unescape_value().map_err(|err| {
                                    xml_error(reader.buffer_position(), err.to_string())
                                })?;
                                name = Some(unescaped.into_owned());
                            }
                            b"type" | b"mimetype" => is_string = false,
                            _ => {}
                        }
                    }
                    data = Some(name.filter(|_| is_string));
                    value.clear();
                }
                b"value" if data.is_some() => {
                    in_value = true;
                    value.clear();
                }
                _ => {}
            },
            Ok(Event::Text(text)) if in_value => {
                let text = text
                    .unescape()
                    .map_err(|err| xml_error(reader.buffer_position(), err.to_string()))?;
                value.push_str(&text);
            }
            Ok(Event::CData(text)) if in_value => {
                value.push_str(&String::from_utf8_lossy(&text));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"value" => in_value = false,
                b"data" => {
                    if let Some(Some(key)) = data.take() {
                        let origin = Arc::clone(&origin);
                        entries.push(ResourceEntry::new(key, value.as_str(), origin));
                    }
                    in_value = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(reader.error_position(), err.to_string())),
            _ => {}
        }
    }

    Ok(entries)
}

/// Read and parse one resource file.
pub fn load_resx(
    path: &Path,
    source_root: &Path,
    root_namespace: &str,
) -> Result<Vec<ResourceEntry>, ResxError> {
    let content = fs::read_to_string(path).map_err(|source| ResxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(origin) = resource_origin(path, source_root, root_namespace) else {
        return Ok(Vec::new());
    };
    parse_resx(&content, Arc::new(origin))
}

/// Load every resource file in parallel. Unreadable files become warnings.
pub fn load_resource_files(
    files: &[PathBuf],
    source_root: &Path,
    root_namespace: &str,
) -> LoadResourcesResult {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, load_resx(path, source_root, root_namespace)))
        .collect();

    let mut loaded = LoadResourcesResult::default();
    for (path, result) in results {
        match result {
            Ok(entries) => loaded.entries.extend(entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping resource file");
                loaded.warnings.push(ResourceLoadWarning {
                    file_path: path.to_string_lossy().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        files = files.len(),
        entries = loaded.entries.len(),
        "loaded resource entries"
    );
    loaded
}
