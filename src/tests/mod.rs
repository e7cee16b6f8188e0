use crate::filter::{self, query, Facet, FilterEvent, FilterState};
use crate::gallery::{Gallery, HistoryMode};
use crate::loader;
use crate::output;
use crate::record::ProjectRecord;

const DEMO_DATA: &str = include_str!("../../demos/projects-data.xml");

const ORBIT_AND_TOOL: &str = r#"<projects>
  <project>
    <title>Orbit</title>
    <description>A puzzle game.</description>
    <projectCategory>Personal</projectCategory>
    <projectType>Game</projectType>
    <collaborationType>Solo</collaborationType>
    <platforms><platform>VR (Meta Quest)</platform></platforms>
    <startDate>2023-01-01</startDate>
    <endDate>present</endDate>
  </project>
  <project>
    <title>Tool</title>
    <description>Internal tooling.</description>
    <projectCategory>Professional</projectCategory>
    <projectType>App</projectType>
    <collaborationType>Team</collaborationType>
    <startDate>2021-01-01</startDate>
    <endDate>2022-01-01</endDate>
  </project>
</projects>"#;

fn records(input: &str) -> Vec<ProjectRecord> {
    loader::parse_projects(input).unwrap()
}

fn titles(matches: &[&ProjectRecord]) -> Vec<String> {
    matches.iter().map(|r| r.title.clone()).collect()
}

fn state_with(pairs: &[(Facet, &str)]) -> FilterState {
    pairs.iter().fold(FilterState::default(), |state, (facet, value)| {
        state.with_facet(*facet, Some(value.to_string()))
    })
}

#[test]
fn platform_substring_keeps_the_vr_game() {
    let recs = records(ORBIT_AND_TOOL);
    let vr = state_with(&[(Facet::Platform, "VR")]);
    assert_eq!(titles(&filter::apply_filters(&recs, &vr)), vec!["Orbit"]);

    let app_vr = state_with(&[(Facet::ProjectType, "App"), (Facet::Platform, "VR")]);
    assert!(filter::apply_filters(&recs, &app_vr).is_empty());
}

#[test]
fn free_text_ignores_platform_engine_and_language() {
    let recs = records(ORBIT_AND_TOOL);
    let state = FilterState::default().with_query("vr");
    assert!(filter::apply_filters(&recs, &state).is_empty());

    let demo = records(DEMO_DATA);
    assert_eq!(
        titles(&filter::apply_filters(&demo, &state)),
        vec!["Shader Sketchbook"]
    );
}

#[test]
fn unconstrained_state_returns_everything_newest_first() {
    let demo = records(DEMO_DATA);
    let all = filter::apply_filters(&demo, &FilterState::default());
    assert_eq!(
        titles(&all),
        vec![
            "Orbit",
            "Ironclad Arena",
            "Inventory Service",
            "Shader Sketchbook"
        ]
    );
}

#[test]
fn specialised_facets_never_match_non_games() {
    let demo = records(DEMO_DATA);
    // Shader Sketchbook lists Godot but is a Tool.
    let godot = state_with(&[(Facet::Engine, "Godot")]);
    assert!(filter::apply_filters(&demo, &godot).is_empty());
    let web = state_with(&[(Facet::Platform, "Web")]);
    assert!(filter::apply_filters(&demo, &web).is_empty());
}

#[test]
fn game_only_vocabulary_ignores_non_games() {
    let demo = records(DEMO_DATA);
    let vocab = filter::build_vocabulary(&demo);
    assert_eq!(vocab.engines, vec!["Unity", "Unreal Engine 5"]);
    assert_eq!(vocab.platforms, vec!["PC", "VR"]);
    assert!(!vocab.technologies.iter().any(|t| t == "API Design"));
    assert!(vocab.technologies.iter().any(|t| t == "Networking"));
    assert!(vocab.languages.iter().any(|l| l == "Rust"));
    assert_eq!(vocab.categories, vec!["Professional", "Personal", "Academic"]);
}

#[test]
fn deep_link_round_trip_filters_the_same() {
    let demo = records(DEMO_DATA);
    let states = [
        state_with(&[(Facet::Language, "C++"), (Facet::Collaboration, "Team Project")]),
        state_with(&[(Facet::Technology, "Shaders")]).with_query("moons"),
        state_with(&[(Facet::Category, "Personal"), (Facet::ProjectType, "Tool")]),
    ];
    for state in states {
        let restored = query::deserialize(&query::serialize(&state));
        assert_eq!(
            titles(&filter::apply_filters(&demo, &restored)),
            titles(&filter::apply_filters(&demo, &state))
        );
    }
}

#[test]
fn gallery_session_tracks_history_and_counts() {
    let mut gallery = Gallery::new(records(DEMO_DATA), "/projects.html", HistoryMode::Push);
    gallery.restore("type=Game&utm_source=mail");
    assert_eq!(gallery.view().count_label, "Showing 2 of 4 projects");

    gallery.dispatch(FilterEvent::Select(Facet::Platform, Some("VR".to_string())));
    gallery.dispatch(FilterEvent::Select(Facet::Platform, Some("VR".to_string())));
    gallery.dispatch(FilterEvent::Reset);

    assert_eq!(
        gallery.history().entries(),
        [
            "/projects.html?type=Game".to_string(),
            "/projects.html?type=Game&platform=VR".to_string(),
            "/projects.html".to_string(),
        ]
    );
    assert_eq!(gallery.view().outcome.matches.len(), 4);
}

#[test]
fn xml_output_feeds_back_into_the_loader() {
    let mut gallery = Gallery::new(records(DEMO_DATA), "/projects.html", HistoryMode::Replace);
    gallery.dispatch(FilterEvent::Select(Facet::ProjectType, Some("Game".to_string())));
    let report = output::build_report(&gallery);
    let xml = output::render_xml(&report);
    let reloaded = records(&String::from_utf8(xml).unwrap());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].title, "Orbit");
    assert_eq!(reloaded[0].tags, report.records[0].record.tags);
    assert!(reloaded[1].end_date.bound > reloaded[1].start_date.bound);
}
