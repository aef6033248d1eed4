//! Template source classification.
//!
//! Decides where a raw template source comes from before anything is
//! fetched. Classification never fails; invalid external sources are only
//! detected later by the specifier parser or the fetcher.

use serde::Serialize;

use super::community::CommunityTemplateEntry;

/// Where a template comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Shipped with the tool.
    Builtin,
    /// Listed in the community registry.
    Community,
    /// Anything else; treated as a git specifier.
    External,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in"),
            Self::Community => write!(f, "community"),
            Self::External => write!(f, "external"),
        }
    }
}

/// A classified template source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTemplateSource {
    pub kind: SourceKind,
    /// Registry name for community templates, key for built-ins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The trimmed source.
    pub source: String,
}

impl ResolvedTemplateSource {
    /// A built-in template selected by `key`.
    pub fn builtin(key: &str) -> Self {
        Self {
            kind: SourceKind::Builtin,
            name: Some(key.to_string()),
            source: key.to_string(),
        }
    }
}

/// Classify `input` against the community registry entries.
///
/// Matching is exact string equality on the trimmed input; the first match
/// wins.
pub fn classify(input: &str, entries: &[CommunityTemplateEntry]) -> ResolvedTemplateSource {
    let source = input.trim();

    match entries.iter().find(|entry| entry.source == source) {
        Some(entry) => ResolvedTemplateSource {
            kind: SourceKind::Community,
            name: Some(entry.name.clone()),
            source: entry.source.clone(),
        },
        None => ResolvedTemplateSource {
            kind: SourceKind::External,
            name: None,
            source: source.to_string(),
        },
    }
}
