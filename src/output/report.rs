use super::{date_range, CardRecord, GalleryReport, NO_RESULTS_MESSAGE};
use crate::embed::{CardAction, WebsiteLink};
use crate::record::ProjectRecord;

const TRAILER_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor"><path d="M7 4V20L20 12L7 4Z"></path></svg>"#;
const STORE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor"><path d="M12.0006 18.26L4.94715 22.2082L6.52248 14.2799L0.587891 8.7918L8.61483 7.84006L12.0006 0.5L15.3864 7.84006L23.4133 8.7918L17.4787 14.2799L19.054 22.2082L12.0006 18.26Z"></path></svg>"#;
const DOCUMENT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor"><path d="M14 2H6c-1.1 0-1.99.9-1.99 2L4 20c0 1.1.89 2 1.99 2H18c1.1 0 2-.9 2-2V8l-6-6zM16 18H8v-2h8v2zm0-4H8v-2h8v2zm-3-5V3.5L18.5 9H13z"></path></svg>"#;
const EXTERNAL_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor"><path d="M19 19H5V5h7V3H5c-1.11 0-2 .9-2 2v14c0 1.1.89 2 2 2h14c1.1 0 2-.9 2-2v-7h-2v7zM14 3v2h3.59l-9.83 9.83 1.41 1.41L19 6.41V10h2V3h-7z"></path></svg>"#;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// CSS class for a language pill, e.g. "C++" -> "lang-cpp".
pub fn language_class(language: &str) -> String {
    let lower = language.to_lowercase().replacen("c++", "cpp", 1).replacen("c#", "csharp", 1);
    format!("lang-{}", lower.replace(' ', "-"))
}

fn category_class(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}

fn render_action(action: &CardAction) -> String {
    match action {
        CardAction::Trailer { url, embed } => {
            let src = embed.as_deref().unwrap_or(url);
            format!(
                r##"<a href="#" class="action-button trailer-button" data-trailer-url="{}">{TRAILER_ICON} Watch Trailer</a>"##,
                escape_html(src)
            )
        }
        CardAction::Store { url } => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="action-button store-button">{STORE_ICON} Store Page</a>"#,
            escape_html(url)
        ),
        CardAction::Website {
            link: WebsiteLink::Document(target),
        } => {
            let target = escape_html(target);
            format!(
                r#"<a href="{target}" class="action-button website-button pdf-link" data-pdf-src="{target}">{DOCUMENT_ICON} View Document</a>"#
            )
        }
        CardAction::Website {
            link: WebsiteLink::External(target),
        } => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="action-button website-button">{EXTERNAL_ICON} View Website</a>"#,
            escape_html(target)
        ),
    }
}

fn render_tag_sections(record: &ProjectRecord) -> String {
    let mut out = String::new();
    for (category, tags) in &record.tags {
        let pills: String = tags
            .iter()
            .map(|t| {
                format!(
                    r#"<span class="tag-pill {}">{}</span>"#,
                    category.css_class(),
                    escape_html(t)
                )
            })
            .collect();
        out.push_str(&format!(
            r#"<div class="project-details-section"><h6>{}</h6><div class="project-tags">{pills}</div></div>"#,
            escape_html(category.heading())
        ));
    }
    out
}

pub fn render_card(card: &CardRecord) -> String {
    let r = &card.record;
    let thumbnail = r
        .thumbnail
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" class="project-thumbnail">"#,
                escape_html(src),
                escape_html(&r.title)
            )
        })
        .unwrap_or_default();

    let languages: String = r
        .languages
        .iter()
        .map(|l| {
            format!(
                r#"<span class="language-pill {}">{}</span>"#,
                escape_html(&language_class(l)),
                escape_html(l)
            )
        })
        .collect();
    let language_section = if languages.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="project-languages">{languages}</div>"#)
    };

    let buttons: String = card.actions.iter().map(render_action).collect();
    let footer = if buttons.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="project-card-footer">{buttons}</div>"#)
    };

    let date_class = if r.end_date.is_ongoing() {
        "project-date ongoing"
    } else {
        "project-date"
    };

    format!(
        r#"<div class="project-card"><div class="project-card-header">{thumbnail}<div class="{date_class}">{dates}</div></div><div class="project-info"><div class="project-types"><span class="type-pill {category_class}">{category}</span><span class="type-pill">{collaboration}</span></div><h3 class="project-title">{title}</h3>{language_section}<p class="project-description">{description}</p>{tags}</div>{footer}</div>"#,
        dates = escape_html(&date_range(r)),
        category_class = escape_html(&category_class(&r.category)),
        category = escape_html(&r.category),
        collaboration = escape_html(&r.collaboration),
        title = escape_html(&r.title),
        description = escape_html(&r.description),
        tags = render_tag_sections(r),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <style>
    body {{ font-family: 'Inter', sans-serif; margin: 0; background: #0f172a; color: #e2e8f0; }}
    main {{ max-width: 1440px; margin: 0 auto; padding: 2.5rem 2rem; }}
    #project-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 1.5rem; }}
    .project-card {{ background: #1e293b; border-radius: 0.75rem; overflow: hidden; display: flex; flex-direction: column; }}
    .project-thumbnail {{ width: 100%; aspect-ratio: 16 / 9; object-fit: cover; }}
    .project-info {{ padding: 1rem; flex: 1; }}
    .project-date {{ padding: 0.5rem 1rem; font-size: 0.85rem; opacity: 0.8; }}
    .project-date.ongoing {{ opacity: 1; font-weight: 600; }}
    .type-pill, .language-pill, .tag-pill {{ display: inline-block; padding: 0.15rem 0.6rem; margin: 0 0.25rem 0.25rem 0; border-radius: 9999px; background: #334155; font-size: 0.75rem; }}
    .project-card-footer {{ display: flex; gap: 0.5rem; padding: 1rem; border-top: 1px solid #334155; }}
    .action-button {{ display: inline-flex; align-items: center; gap: 0.35rem; color: inherit; text-decoration: none; }}
    .action-button svg {{ width: 1rem; height: 1rem; }}
    .no-results {{ opacity: 0.8; }}
  </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

pub fn render_html(report: &GalleryReport) -> Vec<u8> {
    let json = serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string());
    let json = json_for_script_tag(&json);

    let grid = if report.records.is_empty() {
        format!(r#"<p class="no-results">{}</p>"#, escape_html(NO_RESULTS_MESSAGE))
    } else {
        report.records.iter().map(render_card).collect::<Vec<_>>().join("\n")
    };

    let body = format!(
        r#"  <script type="application/json" id="gallery-data">{json}</script>
  <main>
    <p id="project-count">{count}</p>
    <div id="project-grid">
{grid}
    </div>
  </main>"#,
        count = escape_html(&report.count_label),
    );
    page("Projects", &body).into_bytes()
}

pub fn render_error_page(message: &str) -> Vec<u8> {
    let body = format!(
        r#"  <main>
    <div id="project-grid"><p class="no-results">{}</p></div>
  </main>"#,
        escape_html(message)
    );
    page("Projects", &body).into_bytes()
}
