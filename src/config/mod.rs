mod types;

pub use types::{Config, GithubConfig};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PublishError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "release.toml";

/// Values given on the command line; each one that is set wins over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub repository: Option<String>,
    pub product: Option<String>,
    pub signer: Option<PathBuf>,
}

impl Config {
    /// Reads `path` if given, else `release.toml` when it exists, else starts from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };
        debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        Config::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(repository) = overrides.repository {
            let (owner, repo) = repository.split_once('/').ok_or_else(|| {
                PublishError::config(format!("repository must be owner/name, got {repository}"))
            })?;
            self.github.owner = owner.to_string();
            self.github.repo = repo.to_string();
        }
        if overrides.product.is_some() {
            self.product.name = overrides.product;
        }
        if overrides.signer.is_some() {
            self.signer = overrides.signer;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.github.owner.is_empty() || self.github.repo.is_empty() {
            return Err(PublishError::config(
                "no GitHub repository configured (pass --repository owner/name)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.sources.version_file, "VERSION");
        assert_eq!(config.sources.changelog_file, "ChangeLog");
        assert_eq!(config.sources.commit_env, "CIRCLE_SHA1");
        assert!(config.signer.is_none());
    }

    #[test]
    fn test_parse_file() {
        let config = Config::parse(
            r#"
            signer = "/usr/local/bin/release_signer"

            [github]
            owner = "acme"
            repo = "widget"

            [product]
            name = "Widget"

            [sources]
            commit_env = "GITHUB_SHA"
            "#,
        )
        .unwrap()
        .apply(Overrides::default())
        .unwrap();
        assert_eq!(config.github.owner, "acme");
        assert_eq!(config.product_name(), "Widget");
        assert_eq!(config.sources.commit_env, "GITHUB_SHA");
        assert_eq!(config.sources.version_file, "VERSION");
        assert_eq!(
            config.signer,
            Some(PathBuf::from("/usr/local/bin/release_signer"))
        );
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::parse("[github]\nowner = \"acme\"\nrepo = \"widget\"\n")
            .unwrap()
            .apply(Overrides {
                repository: Some("other/gadget".to_string()),
                product: None,
                signer: Some(PathBuf::from("signer")),
            })
            .unwrap();
        assert_eq!(config.github.owner, "other");
        assert_eq!(config.github.repo, "gadget");
        assert_eq!(config.product_name(), "gadget");
        assert_eq!(config.signer, Some(PathBuf::from("signer")));
    }

    #[test]
    fn test_missing_repository() {
        let err = Config::default().apply(Overrides::default()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_malformed_repository() {
        let err = Config::default()
            .apply(Overrides {
                repository: Some("widget".to_string()),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, PublishError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[github\nowner ="),
            Err(PublishError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release.toml");
        std::fs::write(&path, "[product]\nname = \"Widget\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.product.name.as_deref(), Some("Widget"));
    }
}
