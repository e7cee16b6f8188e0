use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::record::ProjectRecord;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Rewrite a trailer link into something an embedded player can load.
///
/// Embed links pass through, playlist links become a `videoseries` embed,
/// short `youtu.be` links become a single-video embed, and any other URL is
/// used as-is. Returns `None` when a known shape is missing its id.
pub fn embed_url(trailer: &str) -> Option<String> {
    let trailer = trailer.trim();
    if trailer.contains("youtube.com/embed/") {
        return Some(trailer.to_string());
    }
    if trailer.contains("youtube.com/playlist") {
        let parsed = Url::parse(trailer).ok()?;
        let list = parsed
            .query_pairs()
            .find(|(k, _)| k == "list")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())?;
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("list", &list)
            .finish();
        return Some(format!("{EMBED_BASE}videoseries?{query}"));
    }
    if let Some((_, rest)) = trailer.split_once("youtu.be/") {
        let id = rest.split('?').next().unwrap_or_default();
        if id.is_empty() {
            return None;
        }
        return Some(format!("{EMBED_BASE}{id}"));
    }
    Some(trailer.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum WebsiteLink {
    /// Opened in the in-page document viewer.
    Document(String),
    External(String),
}

impl WebsiteLink {
    pub fn classify(target: &str) -> Self {
        let target = target.trim().to_string();
        if target.to_ascii_lowercase().ends_with(".pdf") {
            WebsiteLink::Document(target)
        } else {
            WebsiteLink::External(target)
        }
    }

    pub fn target(&self) -> &str {
        match self {
            WebsiteLink::Document(t) | WebsiteLink::External(t) => t,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WebsiteLink::Document(_) => "View Document",
            WebsiteLink::External(_) => "View Website",
        }
    }
}

/// Footer action of a project card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CardAction {
    Trailer { url: String, embed: Option<String> },
    Store { url: String },
    Website { link: WebsiteLink },
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Trailer { .. } => "Watch Trailer",
            CardAction::Store { .. } => "Store Page",
            CardAction::Website { link } => link.label(),
        }
    }

    pub fn href(&self) -> &str {
        match self {
            CardAction::Trailer { url, .. } | CardAction::Store { url } => url,
            CardAction::Website { link } => link.target(),
        }
    }
}

/// Trailer, store and website actions, in that order, for whichever are present.
pub fn card_actions(record: &ProjectRecord) -> Vec<CardAction> {
    let mut out = Vec::new();
    if let Some(url) = record.trailer.as_deref() {
        out.push(CardAction::Trailer {
            url: url.to_string(),
            embed: embed_url(url),
        });
    }
    if let Some(url) = record.store_link.as_deref() {
        out.push(CardAction::Store {
            url: url.to_string(),
        });
    }
    if let Some(target) = record.website.as_deref() {
        out.push(CardAction::Website {
            link: WebsiteLink::classify(target),
        });
    }
    out
}
