//! Template directory validation.
//!
//! The single gate every resolved template passes through, whether it is a
//! built-in directory or a fresh clone.

use std::path::Path;

use crate::error::{CreateError, Result};

/// File that must exist at the root of every template.
pub const TEMPLATE_MANIFEST: &str = "package.json";

/// Check that `path` is a directory containing [`TEMPLATE_MANIFEST`].
///
/// `source` is the template source the path was resolved from; it only
/// appears in the error message.
pub fn validate_template_directory(path: &Path, source: &str) -> Result<()> {
    let failure = |reason: String| CreateError::InvalidTemplateDirectory {
        path: path.to_path_buf(),
        input: source.to_string(),
        reason,
    };

    if !path.exists() {
        return Err(failure("does not exist.".to_string()));
    }
    if !path.is_dir() {
        return Err(failure("is not a directory.".to_string()));
    }
    if !path.join(TEMPLATE_MANIFEST).is_file() {
        return Err(failure(format!("is missing \"{}\".", TEMPLATE_MANIFEST)));
    }

    Ok(())
}
