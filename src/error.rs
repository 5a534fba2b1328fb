use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Every way a publish run can fail. All of them abort the run; nothing is retried.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Couldn't find release notes for Version {version}")]
    NotesNotFound { version: String },

    #[error("No known content type for artifact {filename}")]
    UnknownContentType { filename: String },

    #[error("Signing {} failed: {status}", .artifact.display())]
    SigningFailed { artifact: PathBuf, status: ExitStatus },

    #[error("No signer binary configured (pass --signer or set `signer` in the config file)")]
    MissingSigner,

    #[error("GitHub API request failed: {0}")]
    Remote(#[from] octocrab::Error),

    #[error("GitHub API returned {status} for {route}")]
    RemoteStatus { status: u16, route: String },

    #[error("Asset upload failed: {0}")]
    Upload(#[from] reqwest::Error),

    #[error("Could not read release bundle: {0}")]
    Bundle(#[from] zip::result::ZipError),

    #[error("Release bundle has no {name} entry")]
    BundleEntry { name: String },

    #[error("Version file is empty")]
    EmptyVersion,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// True for failures that need an operator to fix something before rerunning,
    /// as opposed to ones a plain rerun might get past.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PublishError::NotesNotFound { .. }
                | PublishError::UnknownContentType { .. }
                | PublishError::MissingSigner
                | PublishError::BundleEntry { .. }
                | PublishError::EmptyVersion
                | PublishError::Config(_)
                | PublishError::ConfigParse(_)
        )
    }
}
