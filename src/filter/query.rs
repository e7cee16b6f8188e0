//! Deep-link encoding of a [`FilterState`] as URL query parameters.
//!
//! Only constrained facets and a non-blank search are written, so the
//! default state serialises to an empty string. Reading is lenient:
//! unknown keys are ignored and values are taken verbatim, so a value
//! outside the vocabulary simply matches nothing.

use std::collections::HashSet;

use url::form_urlencoded;

use super::{normalize_selection, Facet, FilterState};

pub const SEARCH_KEY: &str = "search";

pub fn serialize(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    if !state.query.trim().is_empty() {
        out.append_pair(SEARCH_KEY, &state.query);
    }
    for facet in Facet::ALL {
        if let Some(value) = state.facet(facet) {
            out.append_pair(facet.param_key(), value);
        }
    }
    out.finish()
}

/// Overlay the parameters present in `query` onto `base`. The first
/// occurrence of a repeated key wins.
pub fn merge(base: FilterState, query: &str) -> FilterState {
    let query = query.trim().trim_start_matches('?');
    let mut state = base;
    let mut seen: HashSet<String> = HashSet::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !seen.insert(key.to_string()) {
            continue;
        }
        if key == SEARCH_KEY {
            state = state.with_query(value.into_owned());
        } else if let Some(facet) = Facet::from_param_key(&key) {
            state = state.with_facet(facet, normalize_selection(&value));
        }
    }
    state
}

pub fn deserialize(query: &str) -> FilterState {
    merge(FilterState::default(), query)
}

/// Page location for a state: the bare path when nothing is constrained.
pub fn location(page_path: &str, state: &FilterState) -> String {
    let query = serialize(state);
    if query.is_empty() {
        page_path.to_string()
    } else {
        format!("{page_path}?{query}")
    }
}

/// Query part of a full URL or location; input without a `?` is taken to
/// be a bare query string already.
pub fn extract_query(input: &str) -> &str {
    let input = input.trim();
    let without_fragment = input.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    }
}
