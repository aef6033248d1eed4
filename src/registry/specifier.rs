//! GitHub template specifiers.
//!
//! Accepted forms:
//!
//! - `owner/repo`
//! - `owner/repo#ref`
//! - `https://github.com/owner/repo`
//! - `https://github.com/owner/repo.git#ref`
//!
//! Subdirectory addressing inside the ref (`owner/repo#ref:path`) is not
//! supported and is rejected with a dedicated message.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::{CreateError, Result};

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// `owner/repo` shorthand, owner restricted to a conservative charset.
static SHORTHAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([^\s/]+)$").expect("SHORTHAND_REGEX must compile")
});

/// A parsed reference to a template repository on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSpecifier {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name, without a `.git` suffix.
    pub repo: String,
    /// Branch or tag to clone instead of the default branch.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Normalized HTTPS clone URL.
    pub repo_url: String,
    /// The trimmed input this specifier was parsed from.
    pub raw: String,
}

impl TemplateSpecifier {
    /// Parse a raw template source.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(invalid(raw, "Template source cannot be empty."));
        }

        let mut parts = raw.split('#');
        let source = parts.next().unwrap_or_default();
        let git_ref = parts.next();
        if parts.next().is_some() {
            return Err(invalid(raw, "Use at most one \"#\" to specify a ref."));
        }

        let git_ref = match git_ref {
            None => None,
            Some("") => return Err(invalid(raw, "Ref cannot be empty after \"#\".")),
            Some(r) if r.contains(':') => {
                return Err(invalid(
                    raw,
                    "Subdirectory addressing (\"#ref:path\") is not supported. Use \"owner/repo\" or \"owner/repo#ref\".",
                ))
            }
            Some(r) => Some(r.to_string()),
        };

        let (owner, repo) = if source.starts_with("https://") {
            parse_url(raw, source)?
        } else {
            let captures = SHORTHAND_REGEX.captures(source).ok_or_else(|| {
                invalid(raw, "Use \"owner/repo\" or \"owner/repo#ref\".")
            })?;
            (captures[1].to_string(), captures[2].to_string())
        };

        let repo = repo.strip_suffix(".git").unwrap_or(&repo).to_string();
        if owner.is_empty() || repo.is_empty() {
            return Err(invalid(raw, "Missing GitHub owner or repository name."));
        }

        Ok(Self {
            repo_url: format!("https://github.com/{}/{}.git", owner, repo),
            owner,
            repo,
            git_ref,
            raw: raw.to_string(),
        })
    }

    /// Whether `input` parses as a specifier.
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }
}

/// Cheap shape check used before any I/O.
///
/// True for any `https://` input and for `owner/repo` with an optional
/// `#...` suffix. Git-looking but malformed input passes so that
/// [`TemplateSpecifier::parse`] can report the precise problem.
pub fn looks_like_git_source(input: &str) -> bool {
    let raw = input.trim();
    if raw.is_empty() {
        return false;
    }
    if raw.starts_with("https://") {
        return true;
    }

    let source = raw.split('#').next().unwrap_or_default();
    SHORTHAND_REGEX.is_match(source)
}

fn parse_url(raw: &str, source: &str) -> Result<(String, String)> {
    let url = Url::parse(source).map_err(|_| CreateError::InvalidSpecifier {
        input: raw.to_string(),
        reason: format!(
            "\"{}\" is not a valid URL. Use a valid GitHub repository URL.",
            source
        ),
    })?;

    // Host as written, including a non-default port.
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    if !GITHUB_HOSTS.contains(&host.as_str()) {
        return Err(CreateError::UnsupportedHost {
            input: raw.to_string(),
            host,
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).take(2).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, repo] => Ok((owner.to_string(), repo.to_string())),
        _ => Err(invalid(
            raw,
            "The GitHub URL must include a repository path. Use \"owner/repo\".",
        )),
    }
}

fn invalid(raw: &str, reason: &str) -> CreateError {
    CreateError::InvalidSpecifier {
        input: raw.to_string(),
        reason: reason.to_string(),
    }
}
