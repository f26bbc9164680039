use std::{
    cell::OnceCell,
    collections::{BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::scan_files,
        error::ScanError,
        parsers::resx::load_resource_files,
        position::Position,
        resource::{ResourceEntry, ResourceOrigin},
        source_file::SourceFile,
        trie::Trie,
    },
    issues::{
        Finding, LocalizableLiteralFinding, ParseErrorFinding, ResourceReferenceFinding,
        SourceContext,
    },
};

/// Resource entries of the project and the trie built from them.
pub struct ResourceSet {
    pub entries: Vec<ResourceEntry>,
    pub trie: Trie,
    /// Resource files that could not be loaded.
    pub errors: Vec<ParseErrorFinding>,
}

impl ResourceSet {
    /// Origin of the resource file at `path`, matched by path suffix.
    pub fn origin_for(&self, path: &Path) -> Option<&ResourceOrigin> {
        self.entries
            .iter()
            .map(|entry| entry.origin.as_ref())
            .find(|origin| Path::new(&origin.path).ends_with(path))
    }

    /// Number of distinct resource files that contributed entries.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.origin.path.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Everything a scan command needs about the project.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--root-namespace`)
/// 2. `.locscanrc.json`
/// 3. Built-in defaults
///
/// Source contents and the resource trie are loaded on first use, so a
/// `strings` run never touches resource files.
pub struct ScanContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Source root directory.
    pub root_dir: PathBuf,

    /// Code and markup files to scan.
    pub files: BTreeSet<String>,

    /// Resource files found under the source root.
    pub resource_files: BTreeSet<String>,

    /// Literal values never reported (from config `ignoreTexts`).
    pub ignore_texts: HashSet<String>,

    pub verbose: bool,

    generated_patterns: Vec<Pattern>,
    resource_filter: Vec<Pattern>,

    sources: OnceCell<Vec<SourceFile>>,
    source_errors: OnceCell<Vec<ParseErrorFinding>>,
    resources: OnceCell<ResourceSet>,
}

impl ScanContext {
    /// Create a context from command line arguments.
    ///
    /// Loads the configuration, applies CLI overrides and discovers source
    /// and resource files.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let start_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        if !start_dir.is_dir() {
            return Err(anyhow!("Source root is not a directory: {:?}", start_dir));
        }

        let config_result = load_config(&start_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if let Some(ref root_namespace) = common_args.root_namespace {
            config.root_namespace = root_namespace.clone();
        }
        config.validate()?;

        // The CLI root locates the config; the config's source root is relative to it.
        let root_dir = match config.source_root.as_str() {
            "" | "." | "./" => start_dir,
            relative => start_dir.join(relative),
        };

        let scan_result = scan_files(&root_dir, &config.includes, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let generated_patterns = config.generated_patterns();
        let ignore_texts = config.ignore_texts.iter().cloned().collect();

        Ok(Self {
            config,
            root_dir,
            files: scan_result.sources,
            resource_files: scan_result.resources,
            ignore_texts,
            verbose,
            generated_patterns,
            resource_filter: Vec::new(),
            sources: OnceCell::new(),
            source_errors: OnceCell::new(),
            resources: OnceCell::new(),
        })
    }

    /// Only load resource files matching one of `patterns`.
    ///
    /// Has no effect once the resources have been loaded.
    pub fn with_resource_filter(mut self, patterns: &[String]) -> Result<Self> {
        self.resource_filter = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).with_context(|| format!("Invalid resource pattern: \"{}\"", p))
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Read every source file (lazy, parallel).
    ///
    /// Generated files are skipped when `ignoreGeneratedFiles` is set.
    /// Unreadable files are collected by [`ScanContext::source_errors`].
    pub fn sources(&self) -> &[SourceFile] {
        self.sources.get_or_init(|| {
            let skip_generated = self.config.ignore_generated_files;
            let generated_patterns = &self.generated_patterns;
            let results: Vec<_> = self
                .files
                .par_iter()
                .filter_map(|path| {
                    let generated = generated_patterns.iter().any(|p| p.matches(path));
                    if generated && skip_generated {
                        return None;
                    }
                    let result = fs::read_to_string(path)
                        .map(|content| SourceFile::new(path.as_str(), content, generated));
                    Some((path, result))
                })
                .collect();

            let mut sources = Vec::new();
            let mut errors = Vec::new();
            for (path, result) in results {
                match result {
                    Ok(Some(source)) => sources.push(source),
                    Ok(None) => {}
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} {} - {}", "warning:".bold().yellow(), path, e);
                        }
                        errors.push(ParseErrorFinding {
                            file_path: path.clone(),
                            error: format!("Failed to read file: {}", e),
                        });
                    }
                }
            }

            tracing::debug!(files = sources.len(), errors = errors.len(), "read sources");
            let _ = self.source_errors.set(errors);
            sources
        })
    }

    /// Source files that could not be read. Populated by [`ScanContext::sources`].
    pub fn source_errors(&self) -> &[ParseErrorFinding] {
        self.sources();
        self.source_errors.get_or_init(Vec::new)
    }

    /// Load resource files and build the trie (lazy).
    pub fn resources(&self) -> &ResourceSet {
        self.resources.get_or_init(|| {
            let files: Vec<PathBuf> = self
                .resource_files
                .iter()
                .filter(|path| {
                    self.resource_filter.is_empty()
                        || self.resource_filter.iter().any(|p| p.matches(path))
                })
                .map(PathBuf::from)
                .collect();

            let loaded = load_resource_files(&files, &self.root_dir, &self.config.root_namespace);
            let errors = loaded
                .warnings
                .into_iter()
                .map(|warning| ParseErrorFinding {
                    file_path: warning.file_path,
                    error: warning.error,
                })
                .collect();
            let trie = Trie::build(&loaded.entries);

            ResourceSet {
                entries: loaded.entries,
                trie,
                errors,
            }
        })
    }

    /// Scan every source for string literals.
    ///
    /// Literals whose value is in `ignoreTexts` are dropped, and so are
    /// unlocalizable ones unless `include_unlocalizable` is set.
    pub fn literal_findings(&self, include_unlocalizable: bool) -> Vec<Finding> {
        let marker = self.config.no_localize_comment.as_str();
        let ignore_texts = &self.ignore_texts;

        self.sources()
            .par_iter()
            .flat_map_iter(|source| {
                let findings: Vec<Finding> = match source.literals(marker) {
                    Ok(items) => items
                        .into_iter()
                        .filter(|item| include_unlocalizable || !item.flags.is_unlocalizable())
                        .filter(|item| !ignore_texts.contains(&item.value))
                        .map(|literal| {
                            let context = source_context(source, literal.span.start);
                            Finding::LocalizableLiteral(LocalizableLiteralFinding {
                                context,
                                literal,
                            })
                        })
                        .collect(),
                    Err(e) => vec![scan_error(source, e)],
                };
                tracing::debug!(path = %source.path, findings = findings.len(), "scanned literals");
                findings
            })
            .collect()
    }

    /// Scan every source for references to the loaded resources.
    ///
    /// `prefer` names a resource file whose entries win ties between
    /// same-key candidates.
    pub fn reference_findings(&self, prefer: Option<&Path>) -> Result<Vec<Finding>> {
        let resources = self.resources();
        let preferred = match prefer {
            Some(path) => Some(Arc::new(
                resources
                    .origin_for(path)
                    .cloned()
                    .with_context(|| format!("No loaded resource file matches {:?}", path))?,
            )),
            None => None,
        };
        let root_namespace = self.config.root_namespace.as_str();

        Ok(self
            .sources()
            .par_iter()
            .flat_map_iter(|source| {
                let findings: Vec<Finding> =
                    match source.references(&resources.trie, root_namespace, preferred.as_deref()) {
                        Ok(items) => items
                            .into_iter()
                            .map(|reference| {
                                let context = source_context(source, reference.span.start);
                                Finding::ResourceReference(ResourceReferenceFinding {
                                    context,
                                    reference,
                                })
                            })
                            .collect(),
                        Err(e) => vec![scan_error(source, e)],
                    };
                tracing::debug!(
                    path = %source.path,
                    findings = findings.len(),
                    "scanned references"
                );
                findings
            })
            .collect())
    }
}

fn source_context(source: &SourceFile, start: Position) -> SourceContext {
    SourceContext::new(
        source.path.as_str(),
        start.line,
        start.column,
        source.line(start.line),
    )
}

fn scan_error(source: &SourceFile, error: ScanError) -> Finding {
    tracing::warn!(path = %source.path, %error, "scan failed");
    Finding::ParseError(ParseErrorFinding {
        file_path: source.path.clone(),
        error: error.to_string(),
    })
}
