use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::assets::AssetUpload;
use super::changelog::{extract_notes, ReleaseNotes};
use super::signer::{signature_path, Signer};
use super::version::Version;
use crate::error::Result;
use crate::github::types::{CreatedRelease, ReleaseRecord};

/// The remote side of a release: where tags are looked up, releases created and assets attached.
pub trait ReleaseHost {
    /// True when no release exists yet for `tag`.
    async fn needs_release(&self, tag: &str) -> Result<bool>;
    async fn create_release(&self, record: &ReleaseRecord) -> Result<CreatedRelease>;
    async fn upload_asset(&self, release: &CreatedRelease, asset: &AssetUpload) -> Result<()>;
}

/// What is being released, gathered before any remote call is made.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub version: Version,
    pub product: String,
    pub changelog: String,
    pub target_commitish: Option<String>,
}

impl ReleaseRequest {
    /// Stable releases start as drafts; pre-releases go out immediately.
    pub fn record(&self, notes: &ReleaseNotes) -> ReleaseRecord {
        let prerelease = self.version.is_prerelease();
        ReleaseRecord {
            tag_name: self.version.tag(),
            target_commitish: self.target_commitish.clone(),
            name: format!("{} v{}", self.product, self.version),
            body: notes.body(),
            prerelease,
            draft: !prerelease,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AlreadyReleased,
    DryRun,
    Published { release_id: u64, assets: usize },
}

pub struct ReleasePublisher<H, S> {
    host: H,
    signer: S,
    dry_run: bool,
}

impl<H: ReleaseHost, S: Signer> ReleasePublisher<H, S> {
    pub fn new(host: H, signer: S, dry_run: bool) -> Self {
        Self {
            host,
            signer,
            dry_run,
        }
    }

    /// Check, sign, create, upload. Each step only runs if the previous one succeeded and
    /// the first failure ends the run. A dry run performs the tag check and notes
    /// extraction for real and only logs the rest.
    pub async fn publish(&self, request: &ReleaseRequest, artifacts: &[PathBuf]) -> Result<Outcome> {
        let version = &request.version;
        if !self.host.needs_release(&version.tag()).await? {
            info!("Current version has already been released, nothing to be done!");
            return Ok(Outcome::AlreadyReleased);
        }

        let notes = extract_notes(&request.changelog, version, &request.product)?;
        debug!("Extracted {} lines of release notes", notes.lines().len());

        // Sign everything before the release exists so a signing failure leaves nothing behind.
        let mut signatures = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            signatures.push(self.sign(artifact).await?);
        }

        let record = request.record(&notes);
        let release = self.create(&record).await?;

        for (artifact, signature) in artifacts.iter().zip(&signatures) {
            self.upload(release.as_ref(), artifact, version).await?;
            self.upload(release.as_ref(), signature, version).await?;
        }

        Ok(match release {
            Some(release) => Outcome::Published {
                release_id: release.id,
                assets: artifacts.len() + signatures.len(),
            },
            None => Outcome::DryRun,
        })
    }

    async fn sign(&self, artifact: &Path) -> Result<PathBuf> {
        let signature = signature_path(artifact);
        if self.dry_run {
            info!("Would sign {} into {}", artifact.display(), signature.display());
        } else {
            self.signer.sign(artifact, &signature).await?;
        }
        Ok(signature)
    }

    async fn create(&self, record: &ReleaseRecord) -> Result<Option<CreatedRelease>> {
        let rendered =
            serde_json::to_string_pretty(record).unwrap_or_else(|_| format!("{record:?}"));
        if self.dry_run {
            info!("Would post the following to GitHub: {}", rendered);
            return Ok(None);
        }
        info!("Creating release: {}", rendered);
        Ok(Some(self.host.create_release(record).await?))
    }

    async fn upload(
        &self,
        release: Option<&CreatedRelease>,
        path: &Path,
        version: &Version,
    ) -> Result<()> {
        let asset = AssetUpload::prepare(path, version.as_str())?;
        match release {
            Some(release) => self.host.upload_asset(release, &asset).await,
            None => {
                info!("Would upload {} as {}", asset.name, asset.content_type);
                Ok(())
            }
        }
    }
}
