use std::fmt;

/// Decides whether a version string denotes a pre-release.
pub trait VersionClassifier {
    fn is_prerelease(&self, version: &str) -> bool;
}

/// Pre-releases carry a letter suffix (`1.2.0a1`, `13.0.0b`): any 'a' or 'b' in the
/// string marks one. This is lexical only, so a stable `1.0.0-banana` is misclassified.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterSuffix;

impl VersionClassifier for LetterSuffix {
    fn is_prerelease(&self, version: &str) -> bool {
        version.contains('a') || version.contains('b')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    prerelease: bool,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        Self::classify(raw, &LetterSuffix)
    }

    pub fn classify(raw: impl Into<String>, classifier: &impl VersionClassifier) -> Self {
        let raw = raw.into();
        let prerelease = classifier.is_prerelease(&raw);
        Self { raw, prerelease }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease
    }

    /// Tag used both to detect an existing release and to create a new one.
    pub fn tag(&self) -> String {
        format!("v{}", self.raw)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
