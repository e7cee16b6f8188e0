use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub const GAME_PROJECT_TYPE: &str = "Game";

// Variant order is the order tag groups are shown on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TagCategory {
    Mechanics,
    Skills,
    Software,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [
        TagCategory::Mechanics,
        TagCategory::Skills,
        TagCategory::Software,
    ];

    /// Element name used for this category in the data file.
    pub fn element_name(self) -> &'static str {
        match self {
            TagCategory::Mechanics => "Mechanics",
            TagCategory::Skills => "Skills",
            TagCategory::Software => "Software",
        }
    }

    /// Heading used when the category is rendered as a card section.
    pub fn heading(self) -> &'static str {
        match self {
            TagCategory::Mechanics => "Key Features & Mechanics",
            TagCategory::Skills => "Skills",
            TagCategory::Software => "Development Software",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TagCategory::Mechanics => "tag-mechanic",
            TagCategory::Skills => "tag-skill",
            TagCategory::Software => "tag-software",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Parsed position of a project date on the timeline.
///
/// The variant order is the sort order: an unreadable date is older than
/// any real date, and an ongoing project is newer than all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum DateBound {
    Unknown,
    Date(NaiveDate),
    Ongoing,
}

const DAY_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
const MONTH_FORMATS: [&str; 4] = ["%Y-%m", "%Y/%m", "%B %Y", "%b %Y"];

impl DateBound {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return DateBound::Unknown;
        }
        if trimmed.eq_ignore_ascii_case("present") {
            return DateBound::Ongoing;
        }
        for fmt in DAY_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return DateBound::Date(date);
            }
        }
        // chrono refuses a date without a day, so pin month-only values to the 1st.
        for fmt in MONTH_FORMATS {
            let padded = format!("{trimmed} 1");
            if let Ok(date) = NaiveDate::parse_from_str(&padded, &format!("{fmt} %d")) {
                return DateBound::Date(date);
            }
        }
        if trimmed.len() == 4 {
            if let Ok(year) = trimmed.parse::<i32>() {
                if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1) {
                    return DateBound::Date(date);
                }
            }
        }
        DateBound::Unknown
    }
}

/// A date as written in the data file, plus where it sits on the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectDate {
    pub raw: String,
    pub bound: DateBound,
}

impl ProjectDate {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            bound: DateBound::parse(raw),
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.bound == DateBound::Ongoing
    }
}

impl Default for ProjectDate {
    fn default() -> Self {
        Self {
            raw: String::new(),
            bound: DateBound::Unknown,
        }
    }
}

impl fmt::Display for ProjectDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One portfolio entry. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub trailer: Option<String>,
    pub store_link: Option<String>,
    pub website: Option<String>,
    pub category: String,
    pub project_type: String,
    pub collaboration: String,
    pub engines: Vec<String>,
    pub platforms: Vec<String>,
    pub languages: Vec<String>,
    pub tags: BTreeMap<TagCategory, Vec<String>>,
    pub start_date: ProjectDate,
    pub end_date: ProjectDate,
}

impl ProjectRecord {
    pub fn is_game(&self) -> bool {
        self.project_type == GAME_PROJECT_TYPE
    }

    pub fn tags_in(&self, category: TagCategory) -> &[String] {
        self.tags.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every tag across all present categories, in card order.
    pub fn all_tags(&self) -> impl Iterator<Item = &String> {
        self.tags.values().flatten()
    }

    /// Newest first: end date, then start date, both descending.
    pub fn cmp_recency(&self, other: &Self) -> Ordering {
        other
            .end_date
            .bound
            .cmp(&self.end_date.bound)
            .then_with(|| other.start_date.bound.cmp(&self.start_date.bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateBound {
        DateBound::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn present_is_ongoing_in_any_case() {
        assert_eq!(DateBound::parse("present"), DateBound::Ongoing);
        assert_eq!(DateBound::parse(" Present "), DateBound::Ongoing);
        assert_eq!(DateBound::parse("PRESENT"), DateBound::Ongoing);
    }

    #[test]
    fn parses_common_date_shapes() {
        assert_eq!(DateBound::parse("2022-01-15"), ymd(2022, 1, 15));
        assert_eq!(DateBound::parse("2022/03/04"), ymd(2022, 3, 4));
        assert_eq!(DateBound::parse("2021-06"), ymd(2021, 6, 1));
        assert_eq!(DateBound::parse("March 2020"), ymd(2020, 3, 1));
        assert_eq!(DateBound::parse("Sep 2019"), ymd(2019, 9, 1));
        assert_eq!(DateBound::parse("2018"), ymd(2018, 1, 1));
    }

    #[test]
    fn unreadable_dates_are_unknown() {
        assert_eq!(DateBound::parse(""), DateBound::Unknown);
        assert_eq!(DateBound::parse("someday"), DateBound::Unknown);
    }

    #[test]
    fn ongoing_outranks_every_date_and_unknown_is_lowest() {
        assert!(DateBound::Ongoing > ymd(9999, 12, 31));
        assert!(DateBound::Unknown < ymd(1970, 1, 1));
    }

    #[test]
    fn recency_breaks_end_date_ties_on_start_date() {
        let older = ProjectRecord {
            start_date: ProjectDate::parse("2020-01-01"),
            end_date: ProjectDate::parse("2022-01-01"),
            ..ProjectRecord::default()
        };
        let newer = ProjectRecord {
            start_date: ProjectDate::parse("2021-01-01"),
            end_date: ProjectDate::parse("2022-01-01"),
            ..ProjectRecord::default()
        };
        assert_eq!(newer.cmp_recency(&older), Ordering::Less);
        assert_eq!(older.cmp_recency(&newer), Ordering::Greater);
    }

    #[test]
    fn missing_tag_category_reads_as_empty() {
        let record = ProjectRecord::default();
        assert!(record.tags_in(TagCategory::Skills).is_empty());
        assert_eq!(record.all_tags().count(), 0);
    }
}
