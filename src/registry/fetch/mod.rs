//! Template fetching from remote sources.

pub mod git;

pub use git::{clone_args, FetchedTemplate, GitFetcher, CLONE_DIR, TEMP_DIR_PREFIX};
