//! The inline-or-copy emission decision for image assets.
//!
//! Small images are embedded into the referencing module as base64 data URIs
//! so they cost no extra request; everything at or above the threshold is
//! copied verbatim and referenced by path. The byte comparison is strict:
//! an asset of exactly the threshold size is copied.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};

/// How an image asset should be emitted by the external emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEmission {
    /// Embed the asset as a data URI in the referencing module.
    Inline {
        /// Complete `data:` URI carrying the base64-encoded contents.
        data_uri: String,
    },
    /// Copy the asset into the output directory and reference it by path.
    Copy {
        /// Emitted reference path, rooted at the configured output directory.
        reference: String,
    },
}

/// Decide how to emit an image of `size_bytes` under the given threshold.
pub fn decide(size_bytes: u64, threshold_bytes: u64) -> EmissionKind {
    if size_bytes < threshold_bytes {
        EmissionKind::Inline
    } else {
        EmissionKind::Copy
    }
}

/// Size-only classification, usable before the asset's bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionKind {
    /// The asset is small enough to inline.
    Inline,
    /// The asset is copied to the output directory.
    Copy,
}

/// Produce the full emission for an image asset.
pub fn emit(
    source_path: &str,
    contents: &[u8],
    threshold_bytes: u64,
    output_dir: &str,
) -> ImageEmission {
    match decide(contents.len() as u64, threshold_bytes) {
        EmissionKind::Inline => ImageEmission::Inline {
            data_uri: data_uri(source_path, contents),
        },
        EmissionKind::Copy => {
            let file_name = Path::new(source_path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| source_path.to_string());
            ImageEmission::Copy {
                reference: format!("{}{}", output_dir, file_name),
            }
        }
    }
}

/// Render a `data:` URI for the asset, inferring the MIME type from its
/// extension.
pub fn data_uri(source_path: &str, contents: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(contents);
    format!("data:{};base64,{}", mime_for(source_path), encoded)
}

fn mime_for(source_path: &str) -> &'static str {
    let extension = Path::new(source_path)
        .extension()
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
