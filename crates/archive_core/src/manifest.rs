use serde::Deserialize;

/// One row of `posts-metadata.json`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "originalUrl", default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ManifestEntry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// Parse the manifest: a top-level JSON array of entries.
pub fn parse_manifest(json: &str) -> Result<Vec<ManifestEntry>, serde_json::Error> {
    serde_json::from_str(json)
}
