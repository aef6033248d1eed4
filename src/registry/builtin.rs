//! Built-in templates shipped with the tool.
//!
//! Built-in templates are plain directories under a configurable root; the
//! table below maps the user-facing key to the directory name.

use std::path::PathBuf;

/// Built-in template keys and their directory names, in display order.
pub const BUILTIN_TEMPLATES: [(&str, &str); 2] = [
    ("basic", "template-ts-dataelements"),
    ("react-router", "template-ts-dataelements-react-router"),
];

/// Lookup table for built-in templates rooted at a directory.
#[derive(Debug, Clone)]
pub struct BuiltinTemplates {
    root: PathBuf,
}

impl BuiltinTemplates {
    /// Create a table whose template directories live under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the template for `key`, if `key` is a built-in.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        BUILTIN_TEMPLATES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, dir)| self.root.join(dir))
    }

    /// Check if `key` names a built-in template.
    pub fn has(&self, key: &str) -> bool {
        BUILTIN_TEMPLATES.iter().any(|(name, _)| *name == key)
    }

    /// All built-in keys, in display order.
    pub fn keys(&self) -> Vec<&'static str> {
        BUILTIN_TEMPLATES.iter().map(|(name, _)| *name).collect()
    }
}
