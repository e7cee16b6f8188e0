use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;

use super::Facet;
use crate::record::ProjectRecord;
use crate::utils;

/// Fixed display priority for the category facet.
pub const CATEGORY_ORDER: [&str; 3] = ["Professional", "Personal", "Academic"];

/// Distinct option values per facet, derived once from the loaded records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetVocabulary {
    pub project_types: Vec<String>,
    pub categories: Vec<String>,
    pub collaborations: Vec<String>,
    pub languages: Vec<String>,
    pub platforms: Vec<String>,
    pub engines: Vec<String>,
    pub technologies: Vec<String>,
}

impl FacetVocabulary {
    pub fn options(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::ProjectType => &self.project_types,
            Facet::Category => &self.categories,
            Facet::Collaboration => &self.collaborations,
            Facet::Language => &self.languages,
            Facet::Platform => &self.platforms,
            Facet::Engine => &self.engines,
            Facet::Technology => &self.technologies,
        }
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.options(facet).iter().any(|v| v == value)
    }
}

fn category_rank(value: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|c| *c == value)
        .unwrap_or(CATEGORY_ORDER.len())
}

fn sorted_alpha(values: HashSet<String>) -> Vec<String> {
    values
        .into_iter()
        .sorted_by(|a, b| utils::cmp_alpha(a, b))
        .collect()
}

fn sorted_categories(values: HashSet<String>) -> Vec<String> {
    values
        .into_iter()
        .sorted_by(|a, b| {
            category_rank(a)
                .cmp(&category_rank(b))
                .then_with(|| utils::cmp_alpha(a, b))
        })
        .collect()
}

/// One pass over the records. Type, category, team and language options
/// come from every record; platform, engine and technology options only
/// from games, with platforms cut down to their leading word.
pub fn build_vocabulary(records: &[ProjectRecord]) -> FacetVocabulary {
    let mut types = HashSet::new();
    let mut categories = HashSet::new();
    let mut collaborations = HashSet::new();
    let mut languages = HashSet::new();
    let mut platforms = HashSet::new();
    let mut engines = HashSet::new();
    let mut technologies = HashSet::new();

    for record in records {
        if !record.project_type.is_empty() {
            types.insert(record.project_type.clone());
        }
        if !record.category.is_empty() {
            categories.insert(record.category.clone());
        }
        if !record.collaboration.is_empty() {
            collaborations.insert(record.collaboration.clone());
        }
        languages.extend(record.languages.iter().cloned());

        if record.is_game() {
            engines.extend(record.engines.iter().cloned());
            platforms.extend(
                record
                    .platforms
                    .iter()
                    .filter_map(|p| utils::leading_token(p))
                    .map(str::to_string),
            );
            technologies.extend(record.all_tags().cloned());
        }
    }

    let vocabulary = FacetVocabulary {
        project_types: sorted_alpha(types),
        categories: sorted_categories(categories),
        collaborations: sorted_alpha(collaborations),
        languages: sorted_alpha(languages),
        platforms: sorted_alpha(platforms),
        engines: sorted_alpha(engines),
        technologies: sorted_alpha(technologies),
    };
    tracing::debug!(
        types = vocabulary.project_types.len(),
        languages = vocabulary.languages.len(),
        platforms = vocabulary.platforms.len(),
        engines = vocabulary.engines.len(),
        technologies = vocabulary.technologies.len(),
        "facet vocabulary built"
    );
    vocabulary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TagCategory;
    use std::collections::BTreeMap;

    fn record(project_type: &str, category: &str) -> ProjectRecord {
        ProjectRecord {
            title: format!("{project_type} project"),
            project_type: project_type.to_string(),
            category: category.to_string(),
            collaboration: "Solo".to_string(),
            ..ProjectRecord::default()
        }
    }

    #[test]
    fn game_only_facets_ignore_non_games() {
        let mut game = record("Game", "Personal");
        game.engines = vec!["Godot".to_string()];
        game.platforms = vec!["VR (Meta Quest)".to_string(), "PC".to_string()];
        game.tags = BTreeMap::from([(TagCategory::Skills, vec!["Shaders".to_string()])]);

        let mut tool = record("App", "Professional");
        tool.engines = vec!["Unreal".to_string()];
        tool.platforms = vec!["Web".to_string()];
        tool.languages = vec!["Rust".to_string()];
        tool.tags = BTreeMap::from([(TagCategory::Software, vec!["Figma".to_string()])]);

        let vocab = build_vocabulary(&[game, tool]);
        assert_eq!(vocab.engines, vec!["Godot"]);
        assert_eq!(vocab.platforms, vec!["PC", "VR"]);
        assert_eq!(vocab.technologies, vec!["Shaders"]);
        assert_eq!(vocab.languages, vec!["Rust"]);
        assert_eq!(vocab.project_types, vec!["App", "Game"]);
    }

    #[test]
    fn categories_follow_priority_order_then_unknowns() {
        let records = vec![
            record("App", "Academic"),
            record("App", "Hackathon"),
            record("App", "Professional"),
            record("App", "Personal"),
            record("App", "Academic"),
        ];
        let vocab = build_vocabulary(&records);
        assert_eq!(
            vocab.categories,
            vec!["Professional", "Personal", "Academic", "Hackathon"]
        );
    }

    #[test]
    fn empty_input_gives_empty_vocabulary() {
        assert_eq!(build_vocabulary(&[]), FacetVocabulary::default());
    }
}
