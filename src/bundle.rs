use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{PublishError, Result};
use crate::release::Version;

/// Where the VERSION and ChangeLog documents are packaged. Normally this is the running
/// executable with a zip archive appended, but a plain directory works too.
#[derive(Debug, Clone)]
pub enum Bundle {
    Archive(PathBuf),
    Directory(PathBuf),
}

impl Bundle {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Bundle::Directory(path)
        } else {
            Bundle::Archive(path)
        }
    }

    /// The bundle identified by the running program's own path.
    pub fn current_exe() -> Result<Self> {
        Ok(Bundle::open(std::env::current_exe()?))
    }

    pub fn read_to_string(&self, name: &str) -> Result<String> {
        match self {
            Bundle::Directory(dir) => {
                let path = dir.join(name);
                debug!("Reading {} from directory bundle", path.display());
                std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => PublishError::BundleEntry {
                        name: name.to_string(),
                    },
                    _ => e.into(),
                })
            }
            Bundle::Archive(path) => read_archive_entry(path, name),
        }
    }

    pub fn read_version(&self, name: &str) -> Result<Version> {
        let contents = self.read_to_string(name)?;
        let raw = contents.trim();
        if raw.is_empty() {
            return Err(PublishError::EmptyVersion);
        }
        Ok(Version::new(raw))
    }
}

fn read_archive_entry(path: &Path, name: &str) -> Result<String> {
    debug!("Reading {} from {}", name, path.display());
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(PublishError::BundleEntry {
                name: name.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}
