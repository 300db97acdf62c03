use std::path::{Path, PathBuf};

/// Extensions probed for specifiers written without one, in the order tried.
pub const EXTENSION_PROBE_ORDER: [&str; 6] = ["js", "jsx", "json", "css", "scss", "less"];

/// All candidate paths for an extensionless specifier, in probe order.
pub(super) fn candidates(base: &Path) -> Vec<PathBuf> {
    EXTENSION_PROBE_ORDER
        .iter()
        .map(|extension| base.with_extension(extension))
        .collect()
}

/// Return the first candidate that exists as a file, if any.
pub(super) fn infer(base: &Path) -> Option<PathBuf> {
    candidates(base)
        .into_iter()
        .find(|candidate| candidate.is_file())
}
