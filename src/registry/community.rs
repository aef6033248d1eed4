//! Community template registry.
//!
//! The registry is a YAML document listing templates maintained outside this
//! tool:
//!
//! ```yaml
//! templates:
//!   - name: Dashboard starter
//!     source: acme/dashboard-template#v2
//!     description: Widgets and charts
//!     maintainer: { name: Jane, url: "https://example.com/jane" }
//!     organisation: { name: Acme }
//! ```
//!
//! Validation stops at the first violation in document order and reports the
//! offending field as an indexed path such as `templates[2].source`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{CreateError, Result};

/// Registry document bundled with the binary.
pub const BUNDLED_REGISTRY: &str = include_str!("../../community-templates.yaml");

/// Label used in messages for the bundled registry.
pub const BUNDLED_REGISTRY_LABEL: &str = "<bundled>/community-templates.yaml";

/// Attribution for a maintainer or organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A validated registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityTemplateEntry {
    /// Human-readable template name.
    pub name: String,
    /// Template specifier; unique across the registry.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<Attribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation: Option<Attribution>,
    /// `name` followed by any attribution, e.g. `Foo (by Jane, org: Acme)`.
    pub display_name: String,
}

/// The loaded set of community templates.
#[derive(Debug, Clone, Default)]
pub struct CommunityRegistry {
    entries: Vec<CommunityTemplateEntry>,
}

impl CommunityRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and validate a registry document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CreateError::RegistryRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&content, path)
    }

    /// Load the registry bundled with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_REGISTRY, Path::new(BUNDLED_REGISTRY_LABEL))
    }

    /// Parse and validate a registry document.
    ///
    /// `label` is only used in error messages.
    pub fn from_yaml(content: &str, label: &Path) -> Result<Self> {
        let document: Value =
            serde_yaml::from_str(content).map_err(|e| CreateError::RegistryParse {
                path: label.to_path_buf(),
                message: e.to_string(),
            })?;

        let validator = Validator { path: label };
        let entries = validator.document(&document)?;

        tracing::debug!(
            "Loaded {} community template(s) from {}",
            entries.len(),
            label.display()
        );

        Ok(Self { entries })
    }

    /// All entries, in document order.
    pub fn entries(&self) -> &[CommunityTemplateEntry] {
        &self.entries
    }

    /// All template sources, in document order.
    pub fn sources(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.source.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Validator<'a> {
    path: &'a Path,
}

impl Validator<'_> {
    fn document(&self, document: &Value) -> Result<Vec<CommunityTemplateEntry>> {
        let templates = document
            .get("templates")
            .and_then(Value::as_sequence)
            .ok_or_else(|| self.violation("templates", "must be an array."))?;

        let mut known_sources = HashSet::new();
        let mut entries = Vec::with_capacity(templates.len());

        for (index, template) in templates.iter().enumerate() {
            let prefix = format!("templates[{}]", index);
            let template = template
                .as_mapping()
                .ok_or_else(|| self.violation(&prefix, "must be an object."))?;

            let name = self.required_string(template, &prefix, "name")?;
            let source = self.required_string(template, &prefix, "source")?;

            if !known_sources.insert(source.clone()) {
                return Err(self.violation(
                    &format!("{}.source", prefix),
                    &format!("duplicates template source \"{}\".", source),
                ));
            }

            let description = self.optional_string(template, &prefix, "description")?;
            let maintainer = self.attribution(template, &prefix, "maintainer")?;
            let organisation = self.attribution(template, &prefix, "organisation")?;
            let display_name = display_name(&name, maintainer.as_ref(), organisation.as_ref());

            entries.push(CommunityTemplateEntry {
                name,
                source,
                description,
                maintainer,
                organisation,
                display_name,
            });
        }

        Ok(entries)
    }

    fn required_string(&self, map: &Mapping, prefix: &str, key: &str) -> Result<String> {
        match map.get(key).and_then(Value::as_str).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(self.violation(
                &format!("{}.{}", prefix, key),
                "must be a non-empty string.",
            )),
        }
    }

    fn optional_string(&self, map: &Mapping, prefix: &str, key: &str) -> Result<Option<String>> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) if !value.trim().is_empty() => {
                Ok(Some(value.trim().to_string()))
            }
            Some(_) => Err(self.violation(
                &format!("{}.{}", prefix, key),
                "must be a non-empty string when provided.",
            )),
        }
    }

    fn attribution(&self, map: &Mapping, prefix: &str, key: &str) -> Result<Option<Attribution>> {
        let field = format!("{}.{}", prefix, key);
        let value = match map.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Mapping(value)) => value,
            Some(_) => return Err(self.violation(&field, "must be an object when provided.")),
        };

        let name = self.optional_string(value, &field, "name")?;
        let url = self.optional_string(value, &field, "url")?;

        if name.is_none() && url.is_none() {
            return Ok(None);
        }
        Ok(Some(Attribution { name, url }))
    }

    fn violation(&self, field: &str, message: &str) -> CreateError {
        CreateError::RegistryValidation {
            path: self.path.to_path_buf(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn display_name(
    name: &str,
    maintainer: Option<&Attribution>,
    organisation: Option<&Attribution>,
) -> String {
    let mut parts = Vec::new();
    if let Some(maintainer) = maintainer.and_then(|m| m.name.as_deref()) {
        parts.push(format!("by {}", maintainer));
    }
    if let Some(organisation) = organisation.and_then(|o| o.name.as_deref()) {
        parts.push(format!("org: {}", organisation));
    }

    if parts.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, parts.join(", "))
    }
}

/// Where the community registry document comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegistryLocation {
    /// The document bundled with the binary.
    #[default]
    Bundled,
    /// A document on disk.
    File(PathBuf),
}

impl RegistryLocation {
    /// Load the registry from this location.
    pub fn load(&self) -> Result<CommunityRegistry> {
        match self {
            Self::Bundled => CommunityRegistry::bundled(),
            Self::File(path) => CommunityRegistry::load(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(yaml: &str) -> Result<CommunityRegistry> {
        CommunityRegistry::from_yaml(yaml, Path::new("test.yaml"))
    }

    fn field_of(err: CreateError) -> String {
        match err {
            CreateError::RegistryValidation { field, .. } => field,
            other => panic!("Expected RegistryValidation, got {other:?}"),
        }
    }

    #[test]
    fn bundled_registry_is_valid() {
        CommunityRegistry::bundled().unwrap();
    }

    #[test]
    fn loads_minimal_entry() {
        let registry = parse(
            r#"
templates:
  - name: Starter
    source: acme/starter
"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        let entry = &registry.entries()[0];
        assert_eq!(entry.name, "Starter");
        assert_eq!(entry.source, "acme/starter");
        assert_eq!(entry.description, None);
        assert_eq!(entry.display_name, "Starter");
    }

    #[test]
    fn trims_required_and_optional_strings() {
        let registry = parse(
            r#"
templates:
  - name: "  Starter  "
    source: " acme/starter#v1 "
    description: "  A starter  "
"#,
        )
        .unwrap();

        let entry = &registry.entries()[0];
        assert_eq!(entry.name, "Starter");
        assert_eq!(entry.source, "acme/starter#v1");
        assert_eq!(entry.description.as_deref(), Some("A starter"));
    }

    #[test]
    fn display_name_orders_maintainer_before_organisation() {
        let registry = parse(
            r#"
templates:
  - name: Dash
    source: acme/dash
    organisation: { name: Acme }
    maintainer: { name: Jane, url: "https://example.com/jane" }
  - name: Org only
    source: acme/org-only
    organisation: { name: Acme }
  - name: Url only
    source: acme/url-only
    maintainer: { url: "https://example.com" }
"#,
        )
        .unwrap();

        let names: Vec<&str> = registry
            .entries()
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Dash (by Jane, org: Acme)", "Org only (org: Acme)", "Url only"]
        );
        assert_eq!(
            registry.entries()[2].maintainer,
            Some(Attribution {
                name: None,
                url: Some("https://example.com".to_string())
            })
        );
    }

    #[test]
    fn empty_attribution_collapses_to_absent() {
        let registry = parse(
            r#"
templates:
  - name: Starter
    source: acme/starter
    maintainer: {}
    organisation: { name: ~, url: ~ }
"#,
        )
        .unwrap();

        let entry = &registry.entries()[0];
        assert_eq!(entry.maintainer, None);
        assert_eq!(entry.organisation, None);
        assert_eq!(entry.display_name, "Starter");
    }

    #[test]
    fn missing_templates_array_is_rejected() {
        assert_eq!(field_of(parse("other: 1").unwrap_err()), "templates");
        assert_eq!(field_of(parse("templates: nope").unwrap_err()), "templates");
        assert_eq!(field_of(parse("").unwrap_err()), "templates");
    }

    #[test]
    fn non_mapping_entry_is_rejected() {
        let err = parse("templates:\n  - just-a-string\n").unwrap_err();
        assert_eq!(field_of(err), "templates[0]");
    }

    #[test]
    fn missing_name_reports_indexed_path() {
        let err = parse(
            r#"
templates:
  - name: A
    source: a/a
  - source: b/b
"#,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("\"templates[1].name\" must be a non-empty string."));
    }

    #[test]
    fn blank_or_non_string_source_is_rejected() {
        let blank = parse("templates:\n  - { name: A, source: '   ' }\n").unwrap_err();
        assert_eq!(field_of(blank), "templates[0].source");

        let number = parse("templates:\n  - { name: A, source: 42 }\n").unwrap_err();
        assert_eq!(field_of(number), "templates[0].source");
    }

    #[test]
    fn first_violation_in_document_order_wins() {
        let err = parse(
            r#"
templates:
  - name: A
    source: a/a
    description: ""
  - name: ~
    source: ~
"#,
        )
        .unwrap_err();

        assert_eq!(field_of(err), "templates[0].description");
    }

    #[test]
    fn duplicate_source_names_second_index() {
        let err = parse(
            r#"
templates:
  - name: A
    source: acme/shared
  - name: B
    source: other/repo
  - name: C
    source: "acme/shared"
"#,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("acme/shared"));
        assert_eq!(field_of(err), "templates[2].source");
    }

    #[test]
    fn duplicate_detection_uses_trimmed_source() {
        let err = parse(
            r#"
templates:
  - { name: A, source: acme/x }
  - { name: B, source: "  acme/x  " }
"#,
        )
        .unwrap_err();

        assert_eq!(field_of(err), "templates[1].source");
    }

    #[test]
    fn attribution_must_be_object() {
        let err = parse("templates:\n  - { name: A, source: a/a, maintainer: Jane }\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("templates[0].maintainer"));
        assert!(msg.contains("must be an object when provided."));
    }

    #[test]
    fn attribution_fields_must_be_strings() {
        let err =
            parse("templates:\n  - { name: A, source: a/a, organisation: { name: 3 } }\n")
                .unwrap_err();
        assert_eq!(field_of(err), "templates[0].organisation.name");
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse("templates: [unclosed").unwrap_err();
        assert!(matches!(err, CreateError::RegistryParse { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to parse community template registry"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = CommunityRegistry::load(&temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CreateError::RegistryRead { .. }));
    }

    #[test]
    fn loads_from_file_location() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.yaml");
        fs::write(&path, "templates:\n  - { name: A, source: a/a }\n").unwrap();

        let registry = RegistryLocation::File(path).load().unwrap();
        assert_eq!(registry.sources(), vec!["a/a"]);
        assert_eq!(registry.entries()[0].name, "A");
    }
}
