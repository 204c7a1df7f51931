//! Product/version banner shown above the dump

use tracing::warn;

use crate::VERSION_KEY;
use crate::error::DumpError;

/// Build `"<product> (Version <version>[-<patchlevel>])"`
///
/// A missing version is rendered as the literal `null`. The patch level is
/// only appended when present and non-empty.
pub fn build_header(product: &str, version: Option<&str>, patchlevel: Option<&str>) -> String {
    let version = version.unwrap_or_else(|| {
        warn!("{} not set, rendering version as null", VERSION_KEY);
        "null"
    });

    match patchlevel.filter(|p| !p.is_empty()) {
        Some(patch) => format!("{} (Version {}-{})", product, version, patch),
        None => format!("{} (Version {})", product, version),
    }
}

/// Like [`build_header`] but fails when the version is absent
pub fn build_header_strict(
    product: &str,
    version: Option<&str>,
    patchlevel: Option<&str>,
) -> Result<String, DumpError> {
    let version = version.ok_or_else(|| DumpError::MissingKey {
        key: VERSION_KEY.to_string(),
    })?;
    Ok(build_header(product, Some(version), patchlevel))
}
