pub mod report;

use serde::Serialize;

use crate::embed::{self, CardAction};
use crate::filter::{FacetVocabulary, FilterState};
use crate::gallery::Gallery;
use crate::record::{ProjectRecord, TagCategory};

pub const NO_RESULTS_MESSAGE: &str =
    "No projects match the selected filters. Try clearing some filters!";
pub const LOAD_ERROR_MESSAGE: &str = "Error: Could not load project data.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Xml,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".xml") {
        return Some(OutputFormat::Xml);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// A matching record plus the footer actions its card shows.
#[derive(Clone, Debug, Serialize)]
pub struct CardRecord {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub actions: Vec<CardAction>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GalleryReport {
    pub count_label: String,
    pub matched: usize,
    pub total: usize,
    pub show_game_facets: bool,
    pub location: String,
    pub state: FilterState,
    pub vocabulary: FacetVocabulary,
    pub records: Vec<CardRecord>,
}

pub fn build_report(gallery: &Gallery) -> GalleryReport {
    let view = gallery.view();
    let records = view
        .outcome
        .matches
        .iter()
        .map(|r| CardRecord {
            record: (*r).clone(),
            actions: embed::card_actions(r),
        })
        .collect::<Vec<_>>();
    GalleryReport {
        count_label: view.count_label.clone(),
        matched: records.len(),
        total: view.outcome.total,
        show_game_facets: view.outcome.show_game_facets,
        location: view.location.clone(),
        state: gallery.state().clone(),
        vocabulary: gallery.vocabulary().clone(),
        records,
    }
}

pub fn render(format: OutputFormat, report: &GalleryReport) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
        OutputFormat::Xml => render_xml(report),
        OutputFormat::Html => report::render_html(report),
    }
}

/// What to show when the data file could not be loaded at all.
pub fn render_load_error(format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => format!("{LOAD_ERROR_MESSAGE}\n").into_bytes(),
        OutputFormat::Json => {
            serde_json::to_vec_pretty(&serde_json::json!({ "error": LOAD_ERROR_MESSAGE }))
                .unwrap_or_else(|_| b"{}\n".to_vec())
        }
        OutputFormat::Xml => format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<projects error=\"{}\"/>\n",
            escape_xml(LOAD_ERROR_MESSAGE)
        )
        .into_bytes(),
        OutputFormat::Html => report::render_error_page(LOAD_ERROR_MESSAGE),
    }
}

pub fn date_range(record: &ProjectRecord) -> String {
    format!("{} \u{2013} {}", record.start_date, record.end_date)
}

pub fn render_text(report: &GalleryReport) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&report.count_label);
    out.push('\n');
    if report.records.is_empty() {
        out.push('\n');
        out.push_str(NO_RESULTS_MESSAGE);
        out.push('\n');
        return out.into_bytes();
    }
    for card in &report.records {
        let r = &card.record;
        out.push('\n');
        out.push_str(&format!(
            "{}  [{} \u{b7} {}]\n",
            r.title, r.category, r.collaboration
        ));
        out.push_str(&format!("  {}\n", date_range(r)));
        if !r.languages.is_empty() {
            out.push_str(&format!("  Languages: {}\n", r.languages.join(", ")));
        }
        if !r.description.is_empty() {
            out.push_str(&format!("  {}\n", r.description));
        }
        for (category, tags) in &r.tags {
            out.push_str(&format!("  {}: {}\n", category.heading(), tags.join(", ")));
        }
        for action in &card.actions {
            out.push_str(&format!("  {}: {}\n", action.label(), action.href()));
        }
    }
    out.into_bytes()
}

pub fn render_json(report: &GalleryReport) -> Vec<u8> {
    serde_json::to_vec_pretty(report).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn push_element(out: &mut String, indent: &str, name: &str, value: &str) {
    out.push_str(&format!("{indent}<{name}>{}</{name}>\n", escape_xml(value)));
}

fn push_list(out: &mut String, outer: &str, inner: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    out.push_str(&format!("    <{outer}>\n"));
    for v in values {
        push_element(out, "      ", inner, v);
    }
    out.push_str(&format!("    </{outer}>\n"));
}

/// Matching records in the same schema the loader reads, so a filtered
/// subset can be fed back in as a data file.
pub fn render_xml(report: &GalleryReport) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str("<projects>\n");
    for card in &report.records {
        let r = &card.record;
        out.push_str("  <project>\n");
        push_element(&mut out, "    ", "title", &r.title);
        push_element(&mut out, "    ", "description", &r.description);
        let optional = [
            ("thumbnail", &r.thumbnail),
            ("trailer", &r.trailer),
            ("storeLink", &r.store_link),
            ("website", &r.website),
        ];
        for (name, value) in optional {
            if let Some(v) = value {
                push_element(&mut out, "    ", name, v);
            }
        }
        push_element(&mut out, "    ", "projectCategory", &r.category);
        push_element(&mut out, "    ", "projectType", &r.project_type);
        push_element(&mut out, "    ", "collaborationType", &r.collaboration);
        push_list(&mut out, "engines", "engine", &r.engines);
        push_list(&mut out, "platforms", "platform", &r.platforms);
        push_list(&mut out, "languages", "language", &r.languages);
        if !r.tags.is_empty() {
            out.push_str("    <tags>\n");
            for category in TagCategory::ALL {
                let tags = r.tags_in(category);
                if tags.is_empty() {
                    continue;
                }
                out.push_str(&format!("      <{}>\n", category.element_name()));
                for t in tags {
                    push_element(&mut out, "        ", "tag", t);
                }
                out.push_str(&format!("      </{}>\n", category.element_name()));
            }
            out.push_str("    </tags>\n");
        }
        push_element(&mut out, "    ", "startDate", &r.start_date.raw);
        push_element(&mut out, "    ", "endDate", &r.end_date.raw);
        out.push_str("  </project>\n");
    }
    out.push_str("</projects>\n");
    out.into_bytes()
}
