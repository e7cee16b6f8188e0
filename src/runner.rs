use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::config;
use crate::filter::{query, FilterEvent};
use crate::gallery::{Gallery, HistoryMode};
use crate::loader::{self, DataSource, LoaderError};

#[derive(Clone, Debug)]
pub struct Options {
    pub data: DataSource,
    pub page_path: String,
    pub history: HistoryMode,
    /// Deep-link query string (or full URL) restored before `events`.
    pub query: Option<String>,
    /// Filter changes applied after the deep link, in order.
    pub events: Vec<FilterEvent>,
    pub timeout_seconds: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data: DataSource::FilePath(config::DEFAULT_DATA.to_string()),
            page_path: config::DEFAULT_PAGE_PATH.to_string(),
            history: HistoryMode::Replace,
            query: None,
            events: Vec::new(),
            timeout_seconds: config::DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no data location provided")]
    NoData,

    #[error("invalid page path '{path}': must start with '/' and carry no query")]
    InvalidPagePath { path: String },

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error("failed to write output file: {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct RunResult {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub gallery: Gallery,
}

impl RunResult {
    /// False when the data file could not be loaded or held no projects.
    pub fn has_data(&self) -> bool {
        !self.gallery.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        let location_empty = match &options.data {
            DataSource::FilePath(p) | DataSource::Url(p) => p.trim().is_empty(),
            DataSource::Inline(_) => false,
        };
        if location_empty {
            return Err(RunnerError::NoData);
        }
        if !options.page_path.starts_with('/') || options.page_path.contains('?') {
            return Err(RunnerError::InvalidPagePath {
                path: options.page_path.clone(),
            });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn run(&self) -> Result<RunResult, RunnerError> {
        let started_at = Instant::now();

        let client = loader::build_client(self.options.timeout_seconds)?;
        let records = loader::load_projects(&self.options.data, &client).await;
        if records.is_empty() {
            tracing::warn!(
                source = %self.options.data.describe(),
                "no project data loaded"
            );
        }

        let mut gallery = Gallery::new(records, &self.options.page_path, self.options.history);
        if let Some(link) = self.options.query.as_deref() {
            gallery.restore(query::extract_query(link));
        }
        for event in self.options.events.iter().cloned() {
            gallery.dispatch(event);
        }

        Ok(RunResult {
            started_at,
            elapsed: started_at.elapsed(),
            gallery,
        })
    }
}

pub async fn write_output(path: &str, rendered: &[u8]) -> Result<(), RunnerError> {
    tokio::fs::write(path, rendered)
        .await
        .map_err(|source| RunnerError::OutputWrite {
            path: path.to_string(),
            source,
        })
}
