use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::error::{PublishError, Result};

/// Produces a detached signature for an artifact at a given path.
pub trait Signer {
    async fn sign(&self, artifact: &Path, signature: &Path) -> Result<()>;
}

/// Detached ASCII-armored signatures live next to the artifact.
pub fn signature_path(artifact: &Path) -> PathBuf {
    let mut path = OsString::from(artifact.as_os_str());
    path.push(".asc");
    PathBuf::from(path)
}

/// Runs an external signer as `<binary> -o <signature> -i <artifact>`.
/// Key material comes from the signer's own environment.
#[derive(Debug, Clone, Default)]
pub struct ExternalSigner {
    binary: Option<PathBuf>,
}

impl ExternalSigner {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }
}

impl Signer for ExternalSigner {
    async fn sign(&self, artifact: &Path, signature: &Path) -> Result<()> {
        let binary = self.binary.as_ref().ok_or(PublishError::MissingSigner)?;
        debug!(signer = %binary.display(), artifact = %artifact.display(), "Running signer");
        let status = Command::new(binary)
            .arg("-o")
            .arg(signature)
            .arg("-i")
            .arg(artifact)
            .status()
            .await?;
        if !status.success() {
            return Err(PublishError::SigningFailed {
                artifact: artifact.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}
