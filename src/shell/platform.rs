//! Execution environment detection.

/// Environment variables set by common CI providers.
const CI_VARIABLES: [&str; 6] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    CI_VARIABLES.iter().any(|var| std::env::var(var).is_ok())
}
