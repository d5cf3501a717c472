//! Resolve a directory in a repository tree and list its entries

use serde_json::{Map, Value};

use super::client::ApiClient;
use super::types::{CommitEntry, TreeListing};
use crate::error::{Result, TreeError};

type TreeNode = Map<String, Value>;

/// Walks the tree of the latest commit of a repository
#[derive(Clone, Debug)]
pub struct TreePathResolver {
    client: ApiClient,
}

impl TreePathResolver {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Names of the entries directly under `path` in the repository at
    /// `repo_url` (an API root such as `https://api.github.com/repos/o/r`),
    /// in the order the API lists them.
    #[tracing::instrument(skip(self))]
    pub fn file_names(&self, repo_url: &str, path: &str) -> Result<Vec<String>> {
        let tree_url = self.root_tree_url(repo_url)?;
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        Ok(self.walk(&tree_url, &segments, "")?)
    }

    fn root_tree_url(&self, repo_url: &str) -> std::result::Result<String, TreeError> {
        let url = format!("{}/commits", repo_url.trim_end_matches('/'));
        let body = self.client.get_bytes(&url, &[])?;

        let commits: Vec<CommitEntry> =
            serde_json::from_slice(&body).map_err(|e| TreeError::Lookup {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let first = commits.into_iter().next().ok_or_else(|| TreeError::Lookup {
            url: url.clone(),
            reason: "no commits returned".to_string(),
        })?;

        Ok(first.commit.tree.url)
    }

    fn walk(
        &self,
        tree_url: &str,
        segments: &[&str],
        parent: &str,
    ) -> std::result::Result<Vec<String>, TreeError> {
        let listing: TreeListing = self.client.get_json(tree_url, &[])?;

        let Some((dir_name, rest)) = segments.split_first() else {
            return listing
                .tree
                .iter()
                .map(|node| string_field(node, "path").map(str::to_string))
                .collect();
        };

        for node in &listing.tree {
            let path = optional_string_field(node, "path")?;
            let url = optional_string_field(node, "url")?;
            if path == Some(*dir_name) {
                let url = url.ok_or(TreeError::Schema { field: "url" })?;
                let child = if parent.is_empty() {
                    dir_name.to_string()
                } else {
                    format!("{}/{}", parent, dir_name)
                };
                return self.walk(url, rest, &child);
            }
        }

        Err(TreeError::NotFound {
            segment: dir_name.to_string(),
            parent: if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            },
        })
    }
}

fn string_field<'a>(
    node: &'a TreeNode,
    field: &'static str,
) -> std::result::Result<&'a str, TreeError> {
    node.get(field)
        .and_then(Value::as_str)
        .ok_or(TreeError::Schema { field })
}

/// Like [`string_field`], but an absent field is not an error
fn optional_string_field<'a>(
    node: &'a TreeNode,
    field: &'static str,
) -> std::result::Result<Option<&'a str>, TreeError> {
    match node.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or(TreeError::Schema { field }),
    }
}
