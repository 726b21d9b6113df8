//! Reference rewriting and definition renaming
//!
//! Generated Swagger documents name their schemas in a flat, per-service
//! namespace: a service's own top-level messages come out prefixed with the
//! innermost scope of the protobuf package (`v1Widget`), while nested
//! messages keep their bare generated name. Both kinds collide across
//! services, so every name is qualified with the full package before
//! merging. References and top-level definition keys share one rule so they
//! stay consistent.

use serde_json::Value;

use crate::package::PackageName;

/// Schema names present in every generated document. They denote shared
/// infrastructure types and are never qualified.
pub const RESERVED_NAMES: &[&str] = &["protobufAny", "runtimeError"];

/// Splits a reference head from the schema name it targets. Only the text
/// after the last occurrence is rewritten.
const DEFINITIONS_MARKER: &str = "definitions/";

/// Qualify a bare schema name with a package.
///
/// Reserved names pass through. A name carrying the innermost-scope prefix
/// is a top-level message: the prefix is replaced by the full package. Any
/// other name is a nested message and keeps its name under the package.
fn qualify(name: &str, package: &PackageName) -> String {
    if RESERVED_NAMES.contains(&name) {
        return name.to_string();
    }
    match name.strip_prefix(package.innermost_scope()) {
        Some(rest) => format!("{}.{}", package.full_name(), rest),
        None => format!("{}.{}", package.full_name(), name),
    }
}

/// Rewrite every `$ref` in a document tree, in place.
///
/// Visits all objects and arrays; an object carrying a `$ref` string of the
/// shape `<head>definitions/<name>` gets its `<name>` qualified. Recursion
/// continues into every child either way, since further `$ref` sites may
/// nest below.
pub fn rewrite_refs(value: &mut Value, package: &PackageName) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get_mut("$ref") {
                if let Some(idx) = reference.rfind(DEFINITIONS_MARKER) {
                    let name_start = idx + DEFINITIONS_MARKER.len();
                    let qualified = qualify(&reference[name_start..], package);
                    reference.replace_range(name_start.., &qualified);
                }
            }
            for (_, child) in map.iter_mut() {
                rewrite_refs(child, package);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                rewrite_refs(item, package);
            }
        }
        _ => {}
    }
}

/// Destination key for a top-level definition.
///
/// The same qualification rule as [`rewrite_refs`], applied to the bare
/// name. Without a package the key is the original name.
pub fn rename_definition(name: &str, package: Option<&PackageName>) -> String {
    match package {
        Some(package) => qualify(name, package),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn package() -> PackageName {
        PackageName::from_dotted("foo.bar.v1").unwrap()
    }

    #[test]
    fn test_rewrites_own_top_level_type() {
        let mut doc = json!({ "$ref": "#/definitions/v1Widget" });
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc["$ref"], "#/definitions/foo.bar.v1.Widget");
    }

    #[test]
    fn test_qualifies_nested_type() {
        let mut doc = json!({ "$ref": "#/definitions/WidgetPart" });
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc["$ref"], "#/definitions/foo.bar.v1.WidgetPart");
    }

    #[test]
    fn test_reserved_names_untouched() {
        for reserved in RESERVED_NAMES {
            let mut doc = json!({ "$ref": format!("#/definitions/{reserved}") });
            rewrite_refs(&mut doc, &package());
            assert_eq!(doc["$ref"], format!("#/definitions/{reserved}"));
            assert_eq!(rename_definition(reserved, Some(&package())), *reserved);
        }
    }

    #[test]
    fn test_head_is_preserved() {
        let mut doc = json!({ "$ref": "service.swagger.json#/definitions/v1Widget" });
        rewrite_refs(&mut doc, &package());
        assert_eq!(
            doc["$ref"],
            "service.swagger.json#/definitions/foo.bar.v1.Widget"
        );
    }

    #[test]
    fn test_splits_at_last_definitions_marker() {
        let mut doc = json!({ "$ref": "#/definitions/outer/definitions/v1Widget" });
        rewrite_refs(&mut doc, &package());
        assert_eq!(
            doc["$ref"],
            "#/definitions/outer/definitions/foo.bar.v1.Widget"
        );
    }

    #[test]
    fn test_ref_without_marker_untouched() {
        let mut doc = json!({ "$ref": "#/parameters/limit" });
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc["$ref"], "#/parameters/limit");
    }

    #[test]
    fn test_traverses_siblings_and_arrays() {
        let mut doc = json!({
            "$ref": "#/definitions/v1Widget",
            "properties": {
                "parts": {
                    "items": { "$ref": "#/definitions/WidgetPart" }
                }
            },
            "allOf": [
                { "$ref": "#/definitions/v1Base" },
                { "type": "string" }
            ]
        });
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc["$ref"], "#/definitions/foo.bar.v1.Widget");
        assert_eq!(
            doc["properties"]["parts"]["items"]["$ref"],
            "#/definitions/foo.bar.v1.WidgetPart"
        );
        assert_eq!(doc["allOf"][0]["$ref"], "#/definitions/foo.bar.v1.Base");
        assert_eq!(doc["allOf"][1]["type"], "string");
    }

    #[test]
    fn test_non_string_ref_untouched() {
        let mut doc = json!({ "$ref": 42 });
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc["$ref"], 42);
    }

    #[test]
    fn test_scalars_untouched() {
        let mut doc = json!("plain string");
        rewrite_refs(&mut doc, &package());
        assert_eq!(doc, "plain string");
    }

    #[test]
    fn test_rename_definition_with_package() {
        let package = package();
        assert_eq!(
            rename_definition("v1Widget", Some(&package)),
            "foo.bar.v1.Widget"
        );
        assert_eq!(
            rename_definition("WidgetPart", Some(&package)),
            "foo.bar.v1.WidgetPart"
        );
    }

    #[test]
    fn test_rename_definition_without_package() {
        assert_eq!(rename_definition("v1Widget", None), "v1Widget");
        assert_eq!(rename_definition("protobufAny", None), "protobufAny");
    }
}
