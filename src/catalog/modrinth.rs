//! Modrinth v2 REST client.
use serde::Deserialize;

use super::http::{self, Fetched};
use super::{Catalog, Project, Release, SearchHit, VersionFilter};
use crate::error::CatalogError;

/// Public Modrinth API endpoint.
pub const API_BASE: &str = "https://api.modrinth.com/v2";

/// [`Catalog`] backed by the Modrinth API.
#[derive(Debug)]
pub struct ModrinthClient {
    agent: ureq::Agent,
    base: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

impl ModrinthClient {
    /// Client for the public API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(API_BASE)
    }

    /// Client for an alternative endpoint (staging or a mirror).
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        Self {
            agent: http::agent(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn project_url(&self, slug: &str) -> String {
        format!("{}/project/{slug}", self.base)
    }
}

impl Default for ModrinthClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for a release listing.
fn version_query(filter: &VersionFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(loader) = filter.loader {
        query.push(("loaders", http::json_array(loader.as_str())));
    }
    if let Some(version) = &filter.game_version {
        query.push(("game_versions", http::json_array(version)));
    }
    query
}

impl Catalog for ModrinthClient {
    fn project(&self, slug: &str) -> Result<Option<Project>, CatalogError> {
        match http::get_json(&self.agent, &self.project_url(slug), &[])? {
            Fetched::Found(project) => Ok(Some(project)),
            Fetched::NotFound => Ok(None),
        }
    }

    fn versions(&self, slug: &str, filter: &VersionFilter) -> Result<Vec<Release>, CatalogError> {
        let url = format!("{}/version", self.project_url(slug));
        match http::get_json(&self.agent, &url, &version_query(filter))? {
            Fetched::Found(releases) => Ok(releases),
            Fetched::NotFound => Ok(Vec::new()),
        }
    }

    fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let url = format!("{}/search", self.base);
        let params = [("index", "relevance".to_string()), ("query", query.to_string())];
        let response: SearchResponse = match http::get_json(&self.agent, &url, &params)? {
            Fetched::Found(response) => response,
            Fetched::NotFound => return Ok(Vec::new()),
        };
        Ok(mods_only(response.hits))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        http::get_bytes(&self.agent, url)
    }
}

fn mods_only(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.into_iter().filter(|h| h.project_type == "mod").collect()
}
