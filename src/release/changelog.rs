use std::borrow::Cow;
use std::iter::Fuse;
use tracing::warn;

use super::version::Version;
use crate::error::{PublishError, Result};

const HEADER_PREFIX: &str = "Version ";
const BODY_INDENT: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    NotFound,
    InSection,
    Done,
}

/// Lazily yields the notes for one version out of a changelog laid out as
///
/// ```text
/// Version 2.0.0
/// -------------
///    Fixed a bug.
/// ```
///
/// The first item is a synthetic introduction line, followed by the section body with
/// its three-space indent removed and separator lines dropped. The scan ends at the
/// next header for a different version or at end of input. Another header matching the
/// target repeats the introduction line and the scan carries on.
pub struct SectionLines<I> {
    lines: Fuse<I>,
    header: String,
    intro: String,
    state: ScanState,
}

pub fn section_lines<'a>(
    changelog: &'a str,
    version: &str,
    product: &str,
) -> SectionLines<std::str::Lines<'a>> {
    SectionLines::new(changelog.lines(), version, product)
}

impl<'a, I: Iterator<Item = &'a str>> SectionLines<I> {
    pub fn new(lines: I, version: &str, product: &str) -> Self {
        Self {
            lines: lines.fuse(),
            header: format!("{HEADER_PREFIX}{version}"),
            intro: format!("This is {product} v{version}"),
            state: ScanState::NotFound,
        }
    }

    /// Whether the target header has been seen so far.
    pub fn found(&self) -> bool {
        self.state != ScanState::NotFound
    }
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for SectionLines<I> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == ScanState::Done {
                return None;
            }
            let line = self.lines.next()?;
            match self.state {
                ScanState::NotFound => {
                    if line.starts_with(&self.header) {
                        self.state = ScanState::InSection;
                        return Some(Cow::Owned(self.intro.clone()));
                    }
                }
                ScanState::InSection => {
                    if line.starts_with(&self.header) {
                        return Some(Cow::Owned(self.intro.clone()));
                    }
                    if line.starts_with(HEADER_PREFIX) {
                        self.state = ScanState::Done;
                        return None;
                    }
                    if is_separator(line) {
                        continue;
                    }
                    return Some(Cow::Borrowed(line.strip_prefix(BODY_INDENT).unwrap_or(line)));
                }
                ScanState::Done => return None,
            }
        }
    }
}

fn is_separator(line: &str) -> bool {
    line.len() >= 2 && line.chars().all(|c| c == '-')
}

/// Notes for a single release, ready to be joined into the release body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    lines: Vec<String>,
}

impl ReleaseNotes {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn prerelease_message(product: &str) -> String {
    format!(
        "This is a prerelease version of {product}. Bugs and partially-finished features may abound.\n\nCaveat usor!"
    )
}

/// Pulls the notes for `version` out of `changelog`.
///
/// A stable version with no section is an error. A pre-release with no section gets a
/// placeholder disclaimer instead.
pub fn extract_notes(changelog: &str, version: &Version, product: &str) -> Result<ReleaseNotes> {
    let mut section = section_lines(changelog, version.as_str(), product);
    let lines: Vec<String> = section.by_ref().map(Cow::into_owned).collect();
    if section.found() {
        return Ok(ReleaseNotes { lines });
    }

    if version.is_prerelease() {
        warn!(%version, "No release notes found, continuing anyway since it's a prerelease");
        return Ok(ReleaseNotes {
            lines: vec![prerelease_message(product)],
        });
    }

    Err(PublishError::NotesNotFound {
        version: version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHANGELOG: &str = "\
Version 2.0.0
--------------
   Fixed a bug.
   Added a feature.
Version 1.0.0
--------------
   Initial release.
";

    #[test]
    fn test_extracts_target_section() {
        let notes = extract_notes(CHANGELOG, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(
            notes.lines(),
            &["This is Widget v2.0.0", "Fixed a bug.", "Added a feature."]
        );
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let notes = extract_notes(CHANGELOG, &Version::new("1.0.0"), "Widget").unwrap();
        assert_eq!(notes.lines(), &["This is Widget v1.0.0", "Initial release."]);
    }

    #[test]
    fn test_body_joins_with_newlines() {
        let notes = extract_notes(CHANGELOG, &Version::new("1.0.0"), "Widget").unwrap();
        assert_eq!(notes.body(), "This is Widget v1.0.0\nInitial release.");
    }

    #[test]
    fn test_missing_stable_version_fails() {
        let err = extract_notes(CHANGELOG, &Version::new("9.9.9"), "Widget").unwrap_err();
        match err {
            PublishError::NotesNotFound { version } => assert_eq!(version, "9.9.9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_prerelease_gets_disclaimer() {
        let notes = extract_notes(CHANGELOG, &Version::new("9.9.9a1"), "Widget").unwrap();
        assert_eq!(notes.lines(), &[prerelease_message("Widget")]);
    }

    #[test]
    fn test_present_prerelease_uses_its_section() {
        let changelog = "Version 3.0.0b1\n---\n   Beta.\n";
        let notes = extract_notes(changelog, &Version::new("3.0.0b1"), "Widget").unwrap();
        assert_eq!(notes.lines(), &["This is Widget v3.0.0b1", "Beta."]);
    }

    #[test]
    fn test_empty_section_before_next_header() {
        let changelog = "Version 2.0.0\nVersion 1.0.0\n   Initial release.\n";
        let notes = extract_notes(changelog, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(notes.lines(), &["This is Widget v2.0.0"]);
    }

    #[test]
    fn test_repeated_header_continues_section() {
        let changelog = "Version 2.0.0\n   One.\nVersion 2.0.0\n   Two.\n";
        let notes = extract_notes(changelog, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(
            notes.lines(),
            &["This is Widget v2.0.0", "One.", "This is Widget v2.0.0", "Two."]
        );
    }

    #[test]
    fn test_header_with_target_prefix_continues_section() {
        let changelog = "\
Version 2.0.0
   Final.
Version 2.0.0a1
   Alpha.
Version 1.0.0
   Initial release.
";
        let notes = extract_notes(changelog, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(
            notes.lines(),
            &["This is Widget v2.0.0", "Final.", "This is Widget v2.0.0", "Alpha."]
        );
    }

    #[test]
    fn test_only_three_spaces_are_stripped() {
        let changelog = "Version 2.0.0\n     * nested\nunindented\n\n";
        let notes = extract_notes(changelog, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(
            notes.lines(),
            &["This is Widget v2.0.0", "  * nested", "unindented", ""]
        );
    }

    #[test]
    fn test_lines_before_target_are_skipped() {
        let changelog = "Preamble\n\nVersion 2.0.0\n   Body.\n";
        let notes = extract_notes(changelog, &Version::new("2.0.0"), "Widget").unwrap();
        assert_eq!(notes.lines(), &["This is Widget v2.0.0", "Body."]);
    }

    #[test]
    fn test_section_lines_is_lazy() {
        let mut lines = section_lines(CHANGELOG, "2.0.0", "Widget");
        assert!(!lines.found());
        assert_eq!(lines.next().as_deref(), Some("This is Widget v2.0.0"));
        assert!(lines.found());
        assert_eq!(lines.next().as_deref(), Some("Fixed a bug."));
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator("------"));
        assert!(is_separator("--"));
        assert!(!is_separator("-"));
        assert!(!is_separator("--- x"));
        assert!(!is_separator(""));
    }
}
