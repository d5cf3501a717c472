//! JSON shapes returned by the hosting API

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A published release
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Release {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: Version,
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

/// A downloadable file attached to a release
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(
        rename = "browser_download_url",
        default,
        deserialize_with = "null_as_default"
    )]
    pub download_url: String,
}

/// Version string as it appears in a release name
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How qualifying versions are ranked before truncation
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    /// Plain string comparison, so "1.9.0" ranks above "1.10.0"
    #[default]
    Lexical,
    /// Dotted integer tuples, so "1.10.0" ranks above "1.9.0"
    Numeric,
}

impl VersionOrdering {
    /// Ascending comparison of two dotted-numeric version strings
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexical => a.cmp(b),
            VersionOrdering::Numeric => numeric_key(a)
                .cmp(&numeric_key(b))
                .then_with(|| a.cmp(b)),
        }
    }
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrdering::Lexical => write!(f, "lexical"),
            VersionOrdering::Numeric => write!(f, "numeric"),
        }
    }
}

/// Integer groups of the trailing dotted-numeric part of a version
fn numeric_key(version: &str) -> Vec<u64> {
    let start = version
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    version[start..]
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().unwrap_or(u64::MAX))
        .collect()
}

/// Entry of the commit listing; only the root tree URL is read
#[derive(Deserialize, Debug)]
pub(crate) struct CommitEntry {
    pub commit: Commit,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Commit {
    pub tree: TreeRef,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TreeRef {
    pub url: String,
}

/// One level of a repository tree. Nodes keep every field the API sends.
#[derive(Deserialize, Debug)]
pub(crate) struct TreeListing {
    pub tree: Vec<serde_json::Map<String, serde_json::Value>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_deserialization() {
        let json = r#"{
            "id": 42,
            "tag_name": "v1.2.3",
            "name": "v1.2.3",
            "draft": false,
            "prerelease": false,
            "assets": [
                {
                    "name": "osm-v1.2.3-linux-amd64.tar.gz",
                    "state": "uploaded",
                    "browser_download_url": "https://example.com/osm.tar.gz",
                    "size": 1024
                }
            ]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.id, 42);
        assert_eq!(release.tag_name, "v1.2.3");
        assert_eq!(release.name.as_str(), "v1.2.3");
        assert!(!release.draft);
        assert_eq!(release.assets.len(), 1);
        assert_eq!(
            release.assets[0].download_url,
            "https://example.com/osm.tar.gz"
        );
    }

    #[test]
    fn test_release_null_fields() {
        let json = r#"{"id": 7, "tag_name": "v0.1.0", "name": null, "assets": null}"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.name, Version::default());
        assert!(release.assets.is_empty());
    }

    #[test]
    fn test_lexical_ordering() {
        let ordering = VersionOrdering::Lexical;
        assert_eq!(ordering.compare("1.9.0", "1.10.0"), Ordering::Greater);
        assert_eq!(ordering.compare("2.0.0", "1.2.3"), Ordering::Greater);
    }

    #[test]
    fn test_numeric_ordering() {
        let ordering = VersionOrdering::Numeric;
        assert_eq!(ordering.compare("1.9.0", "1.10.0"), Ordering::Less);
        assert_eq!(ordering.compare("v1.2.3", "1.2.3"), Ordering::Greater);
        assert_eq!(ordering.compare("1.2.3.1", "1.2.3"), Ordering::Greater);
    }

    #[test]
    fn test_numeric_key() {
        assert_eq!(numeric_key("v1.10.2"), vec![1, 10, 2]);
        assert_eq!(numeric_key("OSM 0.9.1"), vec![0, 9, 1]);
    }

    #[test]
    fn test_ordering_from_toml_value() {
        #[derive(Deserialize)]
        struct Holder {
            ordering: VersionOrdering,
        }
        let holder: Holder = toml::from_str(r#"ordering = "numeric""#).unwrap();
        assert_eq!(holder.ordering, VersionOrdering::Numeric);
    }
}
