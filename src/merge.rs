//! Document merging
//!
//! Folds every discovered Swagger document into a single accumulator,
//! strictly in sorted path order, then renders the result with stable
//! formatting. Path templates and definition keys collide across documents;
//! the later-sorting document wins, and the sorted fold order is what makes
//! that outcome reproducible.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::discover::{discover_documents, SortedDocumentPaths};
use crate::error::{MergeError, Result};
use crate::package::PackageName;
use crate::rewrite::{rename_definition, rewrite_refs};

/// Swagger version emitted in the merged document.
const SWAGGER_VERSION: &str = "2.0";

/// Content type declared for all requests and responses.
const CONTENT_TYPE: &str = "application/json";

/// Boundary options for a merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Title recorded in the merged document's `info` block.
    pub title: String,
    /// Version recorded in the merged document's `info` block.
    pub version: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            title: "Platform APIs".to_string(),
            version: "v1.0".to_string(),
        }
    }
}

/// The single in-progress merged document.
///
/// serde_json's default `Map` keeps keys sorted, so rendering the
/// accumulator yields lexicographically ordered keys at every depth.
#[derive(Debug, Serialize)]
pub struct MergedDocument {
    swagger: String,
    info: DocumentInfo,
    consumes: Vec<String>,
    produces: Vec<String>,
    paths: Map<String, Value>,
    definitions: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct DocumentInfo {
    title: String,
    version: String,
}

impl MergedDocument {
    /// Fresh accumulator with boilerplate fields and empty mappings.
    pub fn new(options: &MergeOptions) -> Self {
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info: DocumentInfo {
                title: options.title.clone(),
                version: options.version.clone(),
            },
            consumes: vec![CONTENT_TYPE.to_string()],
            produces: vec![CONTENT_TYPE.to_string()],
            paths: Map::new(),
            definitions: Map::new(),
        }
    }

    /// Load one document and fold its paths and definitions in.
    ///
    /// If a companion proto declares a package, all references and
    /// definition keys are qualified with it first; otherwise the document
    /// merges verbatim.
    pub fn fold_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .map_err(|source| MergeError::io(path, source))?;
        let mut document: Value = serde_json::from_str(&text).map_err(|source| {
            MergeError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let package = PackageName::extract_for(path)?;
        if let Some(ref package) = package {
            rewrite_refs(&mut document, package);
        }

        if let Some(Value::Object(paths)) = document.get_mut("paths").map(Value::take) {
            for (template, item) in paths {
                if self.paths.contains_key(&template) {
                    warn!(
                        document = %path.display(),
                        template = %template,
                        "overwriting colliding path template"
                    );
                }
                self.paths.insert(template, item);
            }
        }

        if let Some(Value::Object(definitions)) = document.get_mut("definitions").map(Value::take)
        {
            for (name, schema) in definitions {
                let destination = rename_definition(&name, package.as_ref());
                if self.definitions.contains_key(&destination) {
                    warn!(
                        document = %path.display(),
                        definition = %destination,
                        "overwriting colliding definition"
                    );
                }
                self.definitions.insert(destination, schema);
            }
        }

        Ok(())
    }

    /// Fold every document, strictly in discovery order.
    pub fn fold_all(&mut self, documents: &SortedDocumentPaths) -> Result<()> {
        for path in documents.iter() {
            debug!(document = %path.display(), "merging");
            self.fold_file(path)?;
        }
        Ok(())
    }

    /// Render the accumulator as pretty-printed JSON with sorted keys.
    pub fn render(&self) -> Result<String> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

/// Discover, fold, and render in one call.
pub fn merge(
    roots: impl IntoIterator<Item = impl AsRef<Path>>,
    options: &MergeOptions,
) -> Result<String> {
    let documents = discover_documents(roots)?;
    info!(documents = documents.len(), "merging swagger documents");

    let mut merged = MergedDocument::new(options);
    merged.fold_all(&documents)?;
    merged.render()
}
