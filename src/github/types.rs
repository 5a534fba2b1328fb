use serde::{Deserialize, Serialize};

/// Body of `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    pub name: String,
    pub body: String,
    pub prerelease: bool,
    pub draft: bool,
}

/// The parts of GitHub's release response needed to attach assets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRelease {
    pub id: u64,
    pub upload_url: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl CreatedRelease {
    /// `upload_url` arrives as a URI template (`.../assets{?name,label}`); drop the template part.
    pub fn asset_endpoint(&self) -> &str {
        match self.upload_url.find('{') {
            Some(idx) => &self.upload_url[..idx],
            None => &self.upload_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_omits_missing_commit() {
        let record = ReleaseRecord {
            tag_name: "v2.0.0".to_string(),
            target_commitish: None,
            name: "Widget v2.0.0".to_string(),
            body: "notes".to_string(),
            prerelease: false,
            draft: true,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "tag_name": "v2.0.0",
                "name": "Widget v2.0.0",
                "body": "notes",
                "prerelease": false,
                "draft": true,
            })
        );
    }

    #[test]
    fn test_asset_endpoint_strips_template() {
        let release: CreatedRelease = serde_json::from_value(json!({
            "id": 7,
            "upload_url": "https://uploads.github.com/repos/o/r/releases/7/assets{?name,label}",
            "tag_name": "v2.0.0",
        }))
        .unwrap();
        assert_eq!(
            release.asset_endpoint(),
            "https://uploads.github.com/repos/o/r/releases/7/assets"
        );
        assert_eq!(release.html_url, None);
    }
}
