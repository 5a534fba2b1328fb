use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub product: ProductConfig,
    pub sources: SourcesConfig,
    pub signer: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub owner: String,
    pub repo: String,
    pub api_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Name used in "This is <name> v<version>" and the release title. Defaults to the repo name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub version_file: String,
    pub changelog_file: String,
    /// Environment variable holding the commit the release tag should point at.
    pub commit_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            owner: String::new(),
            repo: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            version_file: "VERSION".to_string(),
            changelog_file: "ChangeLog".to_string(),
            commit_env: "CIRCLE_SHA1".to_string(),
        }
    }
}

impl Config {
    pub fn product_name(&self) -> &str {
        self.product.name.as_deref().unwrap_or(&self.github.repo)
    }
}
