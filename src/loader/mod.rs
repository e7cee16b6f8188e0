mod xml;

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::record::{ProjectDate, ProjectRecord, TagCategory};
use crate::utils;

use xml::Element;

/// Where the project data file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    FilePath(String),
    Url(String),
    Inline(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::FilePath(trimmed.to_string())
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::FilePath(path) => path.clone(),
            DataSource::Url(url) => url.clone(),
            DataSource::Inline(_) => "<inline>".to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Url(_))
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read data file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch data: {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed project data: {message}")]
    Xml { message: String },

    #[error("malformed project data: element <{name}> is never closed")]
    UnclosedElement { name: String },
}

pub fn build_client(timeout_seconds: u64) -> Result<reqwest::Client, LoaderError> {
    let mut builder = reqwest::Client::builder();
    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_seconds));
    }
    builder
        .build()
        .map_err(|source| LoaderError::HttpClientBuild { source })
}

pub async fn fetch_source(
    source: &DataSource,
    client: &reqwest::Client,
) -> Result<String, LoaderError> {
    match source {
        DataSource::Inline(text) => Ok(text.clone()),
        DataSource::FilePath(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoaderError::FileRead {
                    path: path.clone(),
                    source,
                })
        }
        DataSource::Url(url) => {
            let response = client
                .get(url.as_str())
                .send()
                .await
                .map_err(|source| LoaderError::Fetch {
                    url: url.clone(),
                    source,
                })?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoaderError::HttpStatus {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(|source| LoaderError::Fetch {
                url: url.clone(),
                source,
            })
        }
    }
}

pub async fn try_load_projects(
    source: &DataSource,
    client: &reqwest::Client,
) -> Result<Vec<ProjectRecord>, LoaderError> {
    let text = fetch_source(source, client).await?;
    parse_projects(&text)
}

/// Load and parse the data file. Any failure is logged and yields an empty
/// list; callers show a "could not load" state for an empty result.
pub async fn load_projects(source: &DataSource, client: &reqwest::Client) -> Vec<ProjectRecord> {
    match try_load_projects(source, client).await {
        Ok(records) => {
            tracing::info!(
                source = %source.describe(),
                count = records.len(),
                "loaded project data"
            );
            records
        }
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "failed to load or parse project data");
            Vec::new()
        }
    }
}

/// Parse every `<project>` element in the document, wherever it sits.
pub fn parse_projects(input: &str) -> Result<Vec<ProjectRecord>, LoaderError> {
    let root = xml::parse_document(input)?;
    Ok(root
        .find_all("project")
        .into_iter()
        .enumerate()
        .map(|(index, node)| extract_record(index, node))
        .collect())
}

fn text_of(node: &Element, name: &str) -> Option<String> {
    node.find(name)
        .and_then(|el| utils::non_blank(&el.text_content()))
}

fn required_text(index: usize, node: &Element, name: &str) -> String {
    match text_of(node, name) {
        Some(value) => value,
        None => {
            tracing::warn!(project = index, field = name, "project is missing a required field");
            String::new()
        }
    }
}

fn list_of(node: &Element, path: &[&str]) -> Vec<String> {
    node.select(path)
        .into_iter()
        .filter_map(|el| utils::non_blank(&el.text_content()))
        .collect()
}

fn extract_record(index: usize, node: &Element) -> ProjectRecord {
    let mut tags = BTreeMap::new();
    for category in TagCategory::ALL {
        let values = list_of(node, &["tags", category.element_name(), "tag"]);
        if !values.is_empty() {
            tags.insert(category, values);
        }
    }

    ProjectRecord {
        title: required_text(index, node, "title"),
        description: required_text(index, node, "description"),
        thumbnail: text_of(node, "thumbnail"),
        trailer: text_of(node, "trailer"),
        store_link: text_of(node, "storeLink"),
        website: text_of(node, "website"),
        category: required_text(index, node, "projectCategory"),
        project_type: required_text(index, node, "projectType"),
        collaboration: required_text(index, node, "collaborationType"),
        engines: list_of(node, &["engines", "engine"]),
        platforms: list_of(node, &["platforms", "platform"]),
        languages: list_of(node, &["languages", "language"]),
        tags,
        start_date: ProjectDate::parse(&text_of(node, "startDate").unwrap_or_default()),
        end_date: ProjectDate::parse(&text_of(node, "endDate").unwrap_or_default()),
    }
}
