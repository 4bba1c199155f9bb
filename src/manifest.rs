use std::fs;
use std::path::Path;

use regex::{Captures, Regex};

use crate::error::{ReleaseError, Result};

/// Version reported when the manifest is absent or carries no version line.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Reads the current version from the manifest file.
///
/// Scans for the first line of the form `version = '<value>'`, tolerating a
/// `:` separator, no separator, double quotes, and leading whitespace. The
/// quoted value is returned verbatim, suffix included.
///
/// A missing manifest or a manifest without a matching line yields
/// [DEFAULT_VERSION] rather than an error, so a fresh repository without the
/// field can still be bumped.
pub fn read_version(path: &Path) -> Result<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(DEFAULT_VERSION.to_string())
        }
        Err(e) => return Err(e.into()),
    };

    let re = Regex::new(r#"(?m)^\s*version\s*[:=]?\s*['"]([^'"]+)['"]"#)?;
    Ok(re
        .captures(&content)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_VERSION.to_string()))
}

/// Rewrites the manifest's version declaration in place.
///
/// Only the quoted value of the first pattern occurrence changes; the key
/// token, separator, quote characters, and every other byte of the file are
/// preserved. Unlike [read_version], a missing manifest here is fatal: there
/// must be a real file to persist the bump into.
pub fn write_version(path: &Path, new_version: &str) -> Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReleaseError::manifest(format!(
                "{} not found",
                path.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let re = Regex::new(r#"(version\s*[:=]?\s*['"])[^'"]*(['"])"#)?;
    // Regex::replace substitutes the first match only
    let updated = re.replace(&content, |caps: &Captures| {
        format!("{}{}{}", &caps[1], new_version, &caps[2])
    });

    fs::write(path, updated.as_bytes())?;
    Ok(())
}
