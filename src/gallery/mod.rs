use serde::Serialize;

use crate::filter::{self, query, Facet, FacetVocabulary, FilterEvent, FilterOutcome, FilterState};
use crate::record::ProjectRecord;

/// How a state change is recorded in the page history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    #[default]
    Replace,
    Push,
}

impl HistoryMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "replace" => Some(Self::Replace),
            "push" => Some(Self::Push),
            _ => None,
        }
    }
}

/// Locations the page has been at, newest last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct History {
    mode: HistoryMode,
    entries: Vec<String>,
}

impl History {
    pub fn new(mode: HistoryMode, initial: String) -> Self {
        Self {
            mode,
            entries: vec![initial],
        }
    }

    pub fn record(&mut self, location: String) {
        match self.mode {
            HistoryMode::Replace => self.replace(location),
            HistoryMode::Push => {
                if self.current() != Some(location.as_str()) {
                    self.entries.push(location);
                }
            }
        }
    }

    pub fn replace(&mut self, location: String) {
        match self.entries.last_mut() {
            Some(last) => *last = location,
            None => self.entries.push(location),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Result of one recomputation, ready for a renderer.
#[derive(Clone, Debug, Serialize)]
pub struct GalleryView<'a> {
    #[serde(flatten)]
    pub outcome: FilterOutcome<'a>,
    pub count_label: String,
    pub location: String,
}

/// One page session: the loaded records, their facet options and the
/// current filter state. Every event replaces the state with a new
/// snapshot and recomputes the view synchronously.
#[derive(Clone, Debug)]
pub struct Gallery {
    records: Vec<ProjectRecord>,
    vocabulary: FacetVocabulary,
    state: FilterState,
    page_path: String,
    history: History,
}

impl Gallery {
    pub fn new(mut records: Vec<ProjectRecord>, page_path: &str, mode: HistoryMode) -> Self {
        filter::sort_records(&mut records);
        let vocabulary = filter::build_vocabulary(&records);
        Self {
            records,
            vocabulary,
            state: FilterState::default(),
            page_path: page_path.to_string(),
            history: History::new(mode, page_path.to_string()),
        }
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn vocabulary(&self) -> &FacetVocabulary {
        &self.vocabulary
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn location(&self) -> String {
        query::location(&self.page_path, &self.state)
    }

    /// Startup step: adopt the filters from a deep link without adding a
    /// history entry.
    pub fn restore(&mut self, query_string: &str) -> GalleryView<'_> {
        self.state = query::merge(self.state.clone(), query_string);
        self.history.replace(self.location());
        self.view()
    }

    pub fn dispatch(&mut self, event: FilterEvent) -> GalleryView<'_> {
        tracing::debug!(?event, "filter event");
        self.state = self.state.clone().apply(event);
        self.history.record(self.location());
        self.view()
    }

    /// Selected facet values that no loaded record offers as an option.
    pub fn unknown_selections(&self) -> Vec<(Facet, String)> {
        Facet::ALL
            .into_iter()
            .filter_map(|facet| {
                let value = self.state.facet(facet)?;
                if self.vocabulary.contains(facet, value) {
                    None
                } else {
                    Some((facet, value.to_string()))
                }
            })
            .collect()
    }

    pub fn view(&self) -> GalleryView<'_> {
        let outcome = filter::filter(&self.records, &self.state);
        GalleryView {
            count_label: outcome.count_label(),
            location: self.location(),
            outcome,
        }
    }
}
