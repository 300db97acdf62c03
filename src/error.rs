//! Error types reported while resolving modules against the build configuration.

use std::path::PathBuf;

/// Errors produced by classification, chunk assignment and alias resolution.
///
/// Every variant carries the offending path or specifier. Resolution is
/// deterministic, so none of these are retryable without a configuration
/// change; callers should abort processing the affected module.
#[derive(Debug)]
pub enum ResolveError {
    /// No rule pattern matched the file and no fallback rule is configured.
    NoMatchingRule {
        /// Path of the file that could not be classified.
        path: String,
    },
    /// Alias rewriting and extension inference exhausted every candidate.
    UnresolvedImport {
        /// Import specifier as written in the source module.
        specifier: String,
        /// Candidate paths probed, in the order they were tried.
        tried: Vec<PathBuf>,
    },
    /// More than one chunk group predicate matched at the same priority.
    AmbiguousChunkAssignment {
        /// Path of the module with conflicting assignments.
        path: String,
        /// Priority level at which the conflict occurred.
        priority: i32,
        /// Names of the groups that matched.
        groups: Vec<String>,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatchingRule { path } => {
                write!(f, "no rule matches {path} and no fallback rule is configured")
            }
            Self::UnresolvedImport { specifier, tried } => {
                write!(f, "unresolved import {specifier}: tried ")?;
                let mut first = true;
                for candidate in tried {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", candidate.display())?;
                    first = false;
                }
                Ok(())
            }
            Self::AmbiguousChunkAssignment {
                path,
                priority,
                groups,
            } => {
                write!(
                    f,
                    "ambiguous chunk assignment for {path}: groups [{}] all match at priority {priority}",
                    groups.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::ResolveError;
    use std::path::PathBuf;

    #[test]
    fn unresolved_import_lists_candidates_in_order() {
        let err = ResolveError::UnresolvedImport {
            specifier: "component/button".into(),
            tried: vec![
                PathBuf::from("src/component/button.js"),
                PathBuf::from("src/component/button.jsx"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("component/button"));
        assert!(
            message.find("button.js").unwrap() < message.find("button.jsx").unwrap(),
            "candidates should be reported in probe order"
        );
    }

    #[test]
    fn ambiguous_assignment_names_all_groups() {
        let err = ResolveError::AmbiguousChunkAssignment {
            path: "src/shared.js".into(),
            priority: 10,
            groups: vec!["vendor".into(), "utils".into()],
        };

        assert_eq!(
            err.to_string(),
            "ambiguous chunk assignment for src/shared.js: groups [vendor, utils] all match at priority 10"
        );
    }
}
