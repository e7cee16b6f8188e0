use std::cmp::Ordering;

/// First whitespace-delimited token, e.g. "VR (Meta Quest)" -> "VR".
pub fn leading_token(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

/// `haystack` contains `needle_lower`, ignoring case. The needle must already be lower-cased.
pub fn contains_lowered(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Trimmed text, or `None` when nothing is left.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Alphabetical order for option lists: case-insensitive, byte order as tie-break.
pub fn cmp_alpha(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
