use std::path::{Path, PathBuf};

use crate::error::{PublishError, Result};

const KNOWN_CONTENT_TYPES: &[(&str, &str)] = &[
    ("gz", "application/gzip"),
    ("xz", "application/x-xz"),
    ("asc", "text/plain"),
];

/// A file ready to be attached to a release under a platform-unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub path: PathBuf,
    pub name: String,
    pub content_type: &'static str,
}

impl AssetUpload {
    pub fn prepare(path: &Path, version: &str) -> Result<Self> {
        let name = asset_name(path, version);
        let content_type = content_type_for(&name)?;
        Ok(Self {
            path: path.to_path_buf(),
            name,
            content_type,
        })
    }
}

/// Builds for different operating systems share a base name, so the architecture
/// goes in right after the version: `tool-2.0.0.tar.gz` -> `tool-2.0.0_linux_amd64.tar.gz`.
/// Every occurrence of the version in the file name is tagged.
pub fn asset_name(path: &Path, version: &str) -> String {
    let arch = if path.to_string_lossy().contains("darwin") {
        "darwin_amd64"
    } else {
        "linux_amd64"
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    filename.replace(version, &format!("{version}_{arch}"))
}

pub fn content_type_for(filename: &str) -> Result<&'static str> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    KNOWN_CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, content_type)| *content_type)
        .ok_or_else(|| PublishError::UnknownContentType {
            filename: filename.to_string(),
        })
}
