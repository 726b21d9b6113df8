//! Protobuf package extraction
//!
//! A Swagger document may sit next to the `.proto` file it was generated
//! from. The package declared there becomes the namespace used to
//! disambiguate the document's schema names. Only the `package` statement is
//! parsed; no other proto syntax is understood, and the rule lives entirely
//! behind this module so it could be swapped for a real proto parser.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::discover::SWAGGER_SUFFIX;
use crate::error::{MergeError, Result};

/// Suffix of the companion protobuf definition file.
pub const PROTO_SUFFIX: &str = ".proto";

/// The `package` statement: keyword, whitespace (declarations may wrap
/// across lines), dotted identifier, semicolon.
fn package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"package[ \r\n\t]+((?:[A-Za-z0-9-]+\.)*)([A-Za-z0-9-]+);")
            .expect("package pattern is valid")
    })
}

/// A dotted protobuf package name, e.g. `foo.bar.v1`.
///
/// Always holds at least one segment. The last segment is the innermost
/// scope; the generator flattens a service's own top-level message names
/// onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    segments: Vec<String>,
}

impl PackageName {
    /// Build a package name from a dotted identifier.
    ///
    /// Returns `None` for the empty string or any empty segment (leading,
    /// trailing, or doubled dots).
    pub fn from_dotted(name: &str) -> Option<Self> {
        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// Scan proto source text for its package declaration.
    ///
    /// The first match in the text is authoritative; `None` means no
    /// recognizable statement exists.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = package_pattern().captures(text)?;
        let mut segments: Vec<String> = captures[1]
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        segments.push(captures[2].to_string());
        Some(Self { segments })
    }

    /// Extract the package for a Swagger document from its companion proto
    /// file.
    ///
    /// A missing companion is not an error: the document simply has no
    /// namespace and merges verbatim. A companion that exists but declares
    /// no package is fatal.
    pub fn extract_for(document_path: &Path) -> Result<Option<Self>> {
        let Some(proto_path) = companion_proto_path(document_path) else {
            return Ok(None);
        };

        let text = match fs::read_to_string(&proto_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(MergeError::io(proto_path, source)),
        };

        match Self::parse(&text) {
            Some(package) => {
                debug!(package = %package, proto = %proto_path.display(), "extracted package");
                Ok(Some(package))
            }
            None => Err(MergeError::MissingPackage { path: proto_path }),
        }
    }

    /// The last segment, e.g. `v1` for `foo.bar.v1`.
    pub fn innermost_scope(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// All segments joined by dots, including the innermost scope.
    pub fn full_name(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Companion `.proto` path for a document carrying the recognized suffix.
fn companion_proto_path(document_path: &Path) -> Option<PathBuf> {
    let file_name = document_path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(SWAGGER_SUFFIX)?;
    Some(document_path.with_file_name(format!("{stem}{PROTO_SUFFIX}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_simple_proto() {
        let proto = r#"syntax = "proto3"
package shop-platform.catalog.v1;

message Product {
}

service CatalogService {
    rpc GetProduct(GetProductRequest) returns (GetProductResponse) {
        option (google.api.http) = {
            get: "/v1/catalog/products/{uuid}"
        };
    }
}
"#;
        let package = PackageName::parse(proto).unwrap();
        assert_eq!(package.full_name(), "shop-platform.catalog.v1");
        assert_eq!(package.innermost_scope(), "v1");
    }

    #[test]
    fn test_matches_wrapped_package() {
        let proto = "syntax = \"proto3\"\npackage\n  shop-platform.catalog.v1;\n";
        let package = PackageName::parse(proto).unwrap();
        assert_eq!(package.full_name(), "shop-platform.catalog.v1");
        assert_eq!(package.innermost_scope(), "v1");
    }

    #[test]
    fn test_first_match_wins() {
        let proto = "package first.v1;\npackage second.v2;\n";
        let package = PackageName::parse(proto).unwrap();
        assert_eq!(package.full_name(), "first.v1");
    }

    #[test]
    fn test_single_segment_package() {
        let package = PackageName::parse("package catalog;").unwrap();
        assert_eq!(package.full_name(), "catalog");
        assert_eq!(package.innermost_scope(), "catalog");
    }

    #[test]
    fn test_no_statement() {
        assert!(PackageName::parse("syntax = \"proto3\"\n").is_none());
        assert!(PackageName::parse("").is_none());
    }

    #[test]
    fn test_full_name_reconstructs_declaration() {
        let package = PackageName::parse("package a.b-c.d9.v2;").unwrap();
        assert_eq!(package.full_name(), "a.b-c.d9.v2");
        assert!(!package.innermost_scope().contains('.'));
        assert!(package.full_name().ends_with(package.innermost_scope()));
    }

    #[test]
    fn test_from_dotted() {
        let package = PackageName::from_dotted("foo.bar.v1").unwrap();
        assert_eq!(package.innermost_scope(), "v1");
        assert!(PackageName::from_dotted("").is_none());
        assert!(PackageName::from_dotted(".foo").is_none());
        assert!(PackageName::from_dotted("foo..bar").is_none());
    }

    #[test]
    fn test_companion_path() {
        let path = Path::new("roots/api/catalog/v1/service.swagger.json");
        let proto = companion_proto_path(path).unwrap();
        assert_eq!(proto, Path::new("roots/api/catalog/v1/service.proto"));

        // Unrecognized suffix has no companion.
        assert!(companion_proto_path(Path::new("service.json")).is_none());
    }

    #[test]
    fn test_extract_missing_companion() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("service.swagger.json");
        fs::write(&doc, "{}").unwrap();
        assert!(PackageName::extract_for(&doc).unwrap().is_none());
    }

    #[test]
    fn test_extract_reads_companion() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("service.swagger.json");
        fs::write(&doc, "{}").unwrap();
        fs::write(dir.path().join("service.proto"), "package foo.bar.v1;\n").unwrap();

        let package = PackageName::extract_for(&doc).unwrap().unwrap();
        assert_eq!(package.full_name(), "foo.bar.v1");
    }

    #[test]
    fn test_extract_companion_without_package_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("service.swagger.json");
        fs::write(&doc, "{}").unwrap();
        fs::write(dir.path().join("service.proto"), "syntax = \"proto3\";\n").unwrap();

        let err = PackageName::extract_for(&doc).unwrap_err();
        assert!(matches!(err, MergeError::MissingPackage { .. }));
    }
}
