use octocrab::Octocrab;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::info;

use super::types::{CreatedRelease, ReleaseRecord};
use crate::config::GithubConfig;
use crate::error::{PublishError, Result};
use crate::release::assets::AssetUpload;
use crate::release::ReleaseHost;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Talks to one repository's releases. Headers are set on each request rather than on
/// shared client state, so calls carry everything they depend on.
pub struct GitHubClient {
    client: Octocrab,
    http: reqwest::Client,
    token: Option<String>,
    api_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Without a token the client can only perform read-only calls; that is what dry runs use.
    pub async fn new(github: &GithubConfig, token: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().base_uri(github.api_url.as_str())?;
        if let Some(token) = &token {
            builder = builder.personal_token(token.clone());
        }
        let client = builder.build()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            http,
            token,
            api_url: github.api_url.trim_end_matches('/').to_string(),
            owner: github.owner.clone(),
            repo: github.repo.clone(),
        })
    }

    fn releases_route(&self) -> String {
        format!("/repos/{}/{}/releases", self.owner, self.repo)
    }

    pub fn releases_url(&self) -> String {
        format!("{}{}", self.api_url, self.releases_route())
    }
}

impl ReleaseHost for GitHubClient {
    async fn needs_release(&self, tag: &str) -> Result<bool> {
        let route = format!("{}/tags/{}", self.releases_route(), tag);
        info!("Checking {}{} for release...", self.api_url, route);
        let response = self.client._get(route.as_str()).await?;
        let status = response.status().as_u16();
        match status {
            404 => Ok(true),
            200..=299 => Ok(false),
            _ => Err(PublishError::RemoteStatus { status, route }),
        }
    }

    async fn create_release(&self, record: &ReleaseRecord) -> Result<CreatedRelease> {
        let release: CreatedRelease = self
            .client
            .post(self.releases_route(), Some(record))
            .await?;
        match &release.html_url {
            Some(url) => info!("Release id {} created at {}", release.id, url),
            None => info!("Release id {} created", release.id),
        }
        Ok(release)
    }

    async fn upload_asset(&self, release: &CreatedRelease, asset: &AssetUpload) -> Result<()> {
        let url = release.asset_endpoint();
        info!(
            "Uploading {} to {}?name={} as {}",
            asset.name, url, asset.name, asset.content_type
        );
        let payload = tokio::fs::read(&asset.path).await?;
        let mut request = self
            .http
            .post(url)
            .query(&[("name", asset.name.as_str())])
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(CONTENT_TYPE, asset.content_type)
            .body(payload);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }
        request.send().await?.error_for_status()?;
        info!("{} uploaded", asset.name);
        Ok(())
    }
}
