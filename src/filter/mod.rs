pub mod query;
pub mod vocabulary;

use std::fmt;

use serde::Serialize;

use crate::record::{ProjectRecord, TagCategory, GAME_PROJECT_TYPE};
use crate::utils;

pub use vocabulary::{build_vocabulary, FacetVocabulary, CATEGORY_ORDER};

/// Selection value that means "no constraint" wherever a facet is set from text.
pub const ALL_TOKEN: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    ProjectType,
    Category,
    Collaboration,
    Language,
    Platform,
    Engine,
    Technology,
}

impl Facet {
    pub const ALL: [Facet; 7] = [
        Facet::ProjectType,
        Facet::Category,
        Facet::Collaboration,
        Facet::Language,
        Facet::Platform,
        Facet::Engine,
        Facet::Technology,
    ];

    /// Query-string key used for deep links.
    pub fn param_key(self) -> &'static str {
        match self {
            Facet::ProjectType => "type",
            Facet::Category => "category",
            Facet::Collaboration => "team",
            Facet::Language => "lang",
            Facet::Platform => "platform",
            Facet::Engine => "engine",
            Facet::Technology => "tech",
        }
    }

    pub fn from_param_key(key: &str) -> Option<Self> {
        Facet::ALL.into_iter().find(|f| f.param_key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::ProjectType => "Project Type",
            Facet::Category => "Category",
            Facet::Collaboration => "Team",
            Facet::Language => "Language",
            Facet::Platform => "Platform",
            Facet::Engine => "Engine",
            Facet::Technology => "Technology",
        }
    }

    /// Facets that only describe games; setting one locks the result to games.
    pub fn is_game_only(self) -> bool {
        matches!(self, Facet::Platform | Facet::Engine | Facet::Technology)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_key())
    }
}

/// Turn raw control input into a selection: blank text and `all` mean unconstrained.
pub fn normalize_selection(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TOKEN) {
        None
    } else {
        Some(value.to_string())
    }
}

/// User interactions on the gallery controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterEvent {
    Query(String),
    Select(Facet, Option<String>),
    Reset,
}

/// Current free-text query and facet selections. Updated by value: every
/// change produces a new snapshot. Selections are only set through
/// [`FilterState::with_facet`], so a stored value is never `all` or blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub query: String,
    project_type: Option<String>,
    category: Option<String>,
    collaboration: Option<String>,
    language: Option<String>,
    platform: Option<String>,
    engine: Option<String>,
    technology: Option<String>,
}

impl FilterState {
    pub fn facet(&self, facet: Facet) -> Option<&str> {
        self.slot(facet).as_deref()
    }

    fn slot(&self, facet: Facet) -> &Option<String> {
        match facet {
            Facet::ProjectType => &self.project_type,
            Facet::Category => &self.category,
            Facet::Collaboration => &self.collaboration,
            Facet::Language => &self.language,
            Facet::Platform => &self.platform,
            Facet::Engine => &self.engine,
            Facet::Technology => &self.technology,
        }
    }

    fn slot_mut(&mut self, facet: Facet) -> &mut Option<String> {
        match facet {
            Facet::ProjectType => &mut self.project_type,
            Facet::Category => &mut self.category,
            Facet::Collaboration => &mut self.collaboration,
            Facet::Language => &mut self.language,
            Facet::Platform => &mut self.platform,
            Facet::Engine => &mut self.engine,
            Facet::Technology => &mut self.technology,
        }
    }

    pub fn with_facet(mut self, facet: Facet, value: Option<String>) -> Self {
        *self.slot_mut(facet) = value.as_deref().and_then(normalize_selection);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn apply(self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::Query(query) => self.with_query(query),
            FilterEvent::Select(facet, value) => self.with_facet(facet, value),
            FilterEvent::Reset => FilterState::default(),
        }
    }

    /// Lower-cased query, or `None` when the query is blank.
    pub fn active_query(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.to_lowercase())
        }
    }

    /// True when any game-only facet is constrained.
    pub fn game_lock_active(&self) -> bool {
        Facet::ALL
            .into_iter()
            .filter(|f| f.is_game_only())
            .any(|f| self.facet(f).is_some())
    }

    /// Whether the game-only facet controls are worth showing.
    pub fn show_game_facets(&self) -> bool {
        match self.facet(Facet::ProjectType) {
            None => true,
            Some(t) => t == GAME_PROJECT_TYPE,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_query().is_none() && Facet::ALL.into_iter().all(|f| self.facet(f).is_none())
    }
}

fn exact(selection: Option<&str>, value: &str) -> bool {
    selection.map_or(true, |s| s == value)
}

fn member(selection: Option<&str>, values: &[String]) -> bool {
    selection.map_or(true, |s| values.iter().any(|v| v == s))
}

fn technology_match(selection: Option<&str>, record: &ProjectRecord) -> bool {
    selection.map_or(true, |s| {
        [
            TagCategory::Mechanics,
            TagCategory::Software,
            TagCategory::Skills,
        ]
        .into_iter()
        .any(|c| record.tags_in(c).iter().any(|t| t == s))
    })
}

// Platform options are truncated to their first word, so match by containment.
fn platform_match(selection: Option<&str>, platforms: &[String]) -> bool {
    selection.map_or(true, |s| platforms.iter().any(|p| p.contains(s)))
}

fn query_match(query_lower: Option<&str>, record: &ProjectRecord) -> bool {
    let Some(q) = query_lower else {
        return true;
    };
    utils::contains_lowered(&record.title, q)
        || utils::contains_lowered(&record.description, q)
        || utils::contains_lowered(&record.project_type, q)
        || record.all_tags().any(|t| utils::contains_lowered(t, q))
}

fn record_matches(
    record: &ProjectRecord,
    state: &FilterState,
    game_lock: bool,
    query_lower: Option<&str>,
) -> bool {
    if game_lock && !record.is_game() {
        return false;
    }
    exact(state.facet(Facet::ProjectType), &record.project_type)
        && exact(state.facet(Facet::Category), &record.category)
        && exact(state.facet(Facet::Collaboration), &record.collaboration)
        && member(state.facet(Facet::Language), &record.languages)
        && platform_match(state.facet(Facet::Platform), &record.platforms)
        && member(state.facet(Facet::Engine), &record.engines)
        && technology_match(state.facet(Facet::Technology), record)
        && query_match(query_lower, record)
}

/// Newest first. Stable, so equal dates keep their input order.
pub fn sort_records(records: &mut [ProjectRecord]) {
    records.sort_by(|a, b| a.cmp_recency(b));
}

/// Records satisfying every predicate in `state`, newest first.
pub fn apply_filters<'a>(records: &'a [ProjectRecord], state: &FilterState) -> Vec<&'a ProjectRecord> {
    let game_lock = state.game_lock_active();
    let query = state.active_query();
    let mut out: Vec<&ProjectRecord> = records
        .iter()
        .filter(|r| record_matches(r, state, game_lock, query.as_deref()))
        .collect();
    out.sort_by(|a, b| a.cmp_recency(b));
    out
}

/// Everything a renderer needs after one recomputation.
#[derive(Clone, Debug, Serialize)]
pub struct FilterOutcome<'a> {
    pub matches: Vec<&'a ProjectRecord>,
    pub total: usize,
    pub show_game_facets: bool,
}

impl FilterOutcome<'_> {
    pub fn count_label(&self) -> String {
        format!(
            "Showing {} of {} projects",
            self.matches.len(),
            self.total
        )
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

pub fn filter<'a>(records: &'a [ProjectRecord], state: &FilterState) -> FilterOutcome<'a> {
    let matches = apply_filters(records, state);
    tracing::debug!(
        matched = matches.len(),
        total = records.len(),
        game_lock = state.game_lock_active(),
        "filters applied"
    );
    FilterOutcome {
        matches,
        total: records.len(),
        show_game_facets: state.show_game_facets(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProjectDate;
    use std::collections::BTreeMap;

    fn game(title: &str) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            description: "A small game".to_string(),
            category: "Personal".to_string(),
            project_type: "Game".to_string(),
            collaboration: "Solo".to_string(),
            engines: vec!["Unity".to_string()],
            platforms: vec!["PC".to_string(), "VR (Meta Quest)".to_string()],
            languages: vec!["C#".to_string()],
            tags: BTreeMap::from([
                (TagCategory::Mechanics, vec!["Physics".to_string()]),
                (TagCategory::Software, vec!["Blender".to_string()]),
            ]),
            start_date: ProjectDate::parse("2022-01-01"),
            end_date: ProjectDate::parse("present"),
            ..ProjectRecord::default()
        }
    }

    fn app(title: &str) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            description: "Business tooling".to_string(),
            category: "Professional".to_string(),
            project_type: "App".to_string(),
            collaboration: "Team".to_string(),
            engines: vec!["Unity".to_string()],
            platforms: vec!["PC".to_string()],
            languages: vec!["C#".to_string(), "Python".to_string()],
            tags: BTreeMap::from([(TagCategory::Skills, vec!["Physics".to_string()])]),
            start_date: ProjectDate::parse("2020-01-01"),
            end_date: ProjectDate::parse("2021-01-01"),
            ..ProjectRecord::default()
        }
    }

    #[test]
    fn normalize_selection_treats_all_and_blank_as_none() {
        assert_eq!(normalize_selection("all"), None);
        assert_eq!(normalize_selection("ALL"), None);
        assert_eq!(normalize_selection("  "), None);
        assert_eq!(normalize_selection("Game"), Some("Game".to_string()));
    }

    #[test]
    fn facet_keys_round_trip() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_param_key(facet.param_key()), Some(facet));
        }
        assert_eq!(Facet::from_param_key("search"), None);
    }

    #[test]
    fn game_only_facets_lock_out_non_games() {
        let records = vec![game("Orbit"), app("Ledger")];
        for facet in [Facet::Engine, Facet::Platform, Facet::Technology] {
            let value = match facet {
                Facet::Engine => "Unity",
                Facet::Platform => "PC",
                _ => "Physics",
            };
            let state = FilterState::default().with_facet(facet, Some(value.to_string()));
            let titles: Vec<&str> = apply_filters(&records, &state)
                .iter()
                .map(|r| r.title.as_str())
                .collect();
            assert_eq!(titles, vec!["Orbit"], "facet {facet}");
        }
    }

    #[test]
    fn language_and_category_apply_to_every_type() {
        let records = vec![game("Orbit"), app("Ledger")];
        let state = FilterState::default().with_facet(Facet::Language, Some("Python".to_string()));
        assert_eq!(apply_filters(&records, &state)[0].title, "Ledger");
        let state =
            FilterState::default().with_facet(Facet::Category, Some("Professional".to_string()));
        assert_eq!(apply_filters(&records, &state).len(), 1);
    }

    #[test]
    fn platform_matches_by_substring() {
        let records = vec![game("Orbit")];
        let state = FilterState::default().with_facet(Facet::Platform, Some("VR".to_string()));
        assert_eq!(apply_filters(&records, &state).len(), 1);
        let state = FilterState::default().with_facet(Facet::Platform, Some("Switch".to_string()));
        assert!(apply_filters(&records, &state).is_empty());
    }

    #[test]
    fn query_searches_title_description_type_and_tags_only() {
        let records = vec![game("Orbit")];
        let hit = |q: &str| !apply_filters(&records, &FilterState::default().with_query(q)).is_empty();
        assert!(hit("ORB"));
        assert!(hit("small game"));
        assert!(hit("game"));
        assert!(hit("blender"));
        assert!(!hit("unity"));
        assert!(!hit("quest"));
        assert!(!hit("c#"));
    }

    #[test]
    fn blank_query_matches_everything() {
        let records = vec![game("Orbit"), app("Ledger")];
        let state = FilterState::default().with_query("   ");
        assert_eq!(apply_filters(&records, &state).len(), 2);
        assert!(state.is_unconstrained());
    }

    #[test]
    fn show_game_facets_only_for_unset_or_game_type() {
        assert!(FilterState::default().show_game_facets());
        let game_state =
            FilterState::default().with_facet(Facet::ProjectType, Some("Game".to_string()));
        assert!(game_state.show_game_facets());
        let app_state =
            FilterState::default().with_facet(Facet::ProjectType, Some("App".to_string()));
        assert!(!app_state.show_game_facets());
    }

    #[test]
    fn events_produce_new_snapshots() {
        let start = FilterState::default();
        let next = start
            .clone()
            .apply(FilterEvent::Select(Facet::Engine, Some("Godot".to_string())))
            .apply(FilterEvent::Query("space".to_string()));
        assert_eq!(next.facet(Facet::Engine), Some("Godot"));
        assert_eq!(next.query, "space");
        assert_eq!(start, FilterState::default());

        let cleared = next
            .clone()
            .apply(FilterEvent::Select(Facet::Engine, Some("all".to_string())));
        assert_eq!(cleared.facet(Facet::Engine), None);
        assert_eq!(next.apply(FilterEvent::Reset), FilterState::default());
    }

    #[test]
    fn outcome_counts_matches_against_total() {
        let records = vec![game("Orbit"), app("Ledger")];
        let state = FilterState::default().with_facet(Facet::ProjectType, Some("App".to_string()));
        let outcome = filter(&records, &state);
        assert_eq!(outcome.count_label(), "Showing 1 of 2 projects");
        assert!(!outcome.show_game_facets);
    }

    #[test]
    fn sort_records_orders_newest_first() {
        let mut records = vec![app("Ledger"), game("Orbit")];
        sort_records(&mut records);
        assert_eq!(records[0].title, "Orbit");
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let mut records = vec![game("Zephyr"), game("Atlas"), game("Mosaic"), app("Ledger")];
        sort_records(&mut records);
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Zephyr", "Atlas", "Mosaic", "Ledger"]);

        let unsorted = vec![app("Ledger"), game("Zephyr"), game("Atlas"), game("Mosaic")];
        let filtered = apply_filters(&unsorted, &FilterState::default());
        let titles: Vec<&str> = filtered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Zephyr", "Atlas", "Mosaic", "Ledger"]);
    }

    #[test]
    fn reserved_selections_are_never_stored() {
        let records = vec![game("Orbit"), app("Ledger")];
        for raw in ["all", "ALL", "", "  "] {
            let state = FilterState::default().with_facet(Facet::ProjectType, Some(raw.to_string()));
            assert_eq!(state.facet(Facet::ProjectType), None);
            let restored = query::deserialize(&query::serialize(&state));
            assert_eq!(restored, state);
            assert_eq!(
                apply_filters(&records, &restored).len(),
                apply_filters(&records, &state).len()
            );
            assert_eq!(apply_filters(&records, &state).len(), 2);
        }
    }
}
