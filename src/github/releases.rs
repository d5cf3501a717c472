//! Release listing and qualifying version selection

use regex::Regex;

use super::client::ApiClient;
use super::types::{Release, Version, VersionOrdering};
use crate::error::Result;

/// Page size used when selecting the latest version names
pub const RELEASE_PAGE_SIZE: u32 = 30;

/// Release names ending in at least three dot-separated ASCII digit groups
pub const VERSION_PATTERN: &str = r"[0-9]+(\.[0-9]+){2,}$";

/// Lists releases of one repository
#[derive(Clone, Debug)]
pub struct ReleaseLister {
    client: ApiClient,
    api_url: String,
    owner: String,
    repo: String,
    page_size: u32,
    ordering: VersionOrdering,
}

impl ReleaseLister {
    pub fn new(
        client: ApiClient,
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            page_size: RELEASE_PAGE_SIZE,
            ordering: VersionOrdering::default(),
        }
    }

    /// Page size fetched by [`ReleaseLister::latest_release_names`]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.owner, self.repo
        )
    }

    /// Fetch up to `count` releases in the order the API returns them
    #[tracing::instrument(skip(self), fields(repo = %self.repo))]
    pub fn latest_releases(&self, count: u32) -> Result<Vec<Release>> {
        let releases = self
            .client
            .get_json(&self.releases_url(), &[("per_page", count.to_string())])?;
        Ok(releases)
    }

    /// Names of the newest `limit` releases that look like plain versions
    #[tracing::instrument(skip(self), fields(repo = %self.repo))]
    pub fn latest_release_names(&self, limit: usize) -> Result<Vec<Version>> {
        let releases = self.latest_releases(self.page_size)?;
        let names = select_versions(&releases, self.ordering, limit)?;

        tracing::debug!(
            "Selected {} of {} releases using {} ordering",
            names.len(),
            releases.len(),
            self.ordering
        );

        Ok(names)
    }
}

/// Keep releases whose name matches [`VERSION_PATTERN`], sort descending
/// under `ordering` and keep at most `limit` of them.
pub fn select_versions(
    releases: &[Release],
    ordering: VersionOrdering,
    limit: usize,
) -> std::result::Result<Vec<Version>, regex::Error> {
    let pattern = Regex::new(VERSION_PATTERN)?;

    let mut names: Vec<Version> = releases
        .iter()
        .filter(|release| pattern.is_match(release.name.as_str()))
        .map(|release| release.name.clone())
        .collect();

    names.sort_by(|a, b| ordering.compare(b.as_str(), a.as_str()));
    names.truncate(limit);

    Ok(names)
}
