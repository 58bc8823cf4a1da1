use std::collections::HashSet;

use strum::{Display, EnumString};

use crate::models::NewsRecord;

/// The active tab. Unknown strings parse to [`ViewMode::All`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Recommended,
    Bookmarks,
    Subscribe,
    Deep,
}

impl ViewMode {
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct FilterQuery<'a> {
    pub mode: ViewMode,
    pub bookmarks: &'a HashSet<String>,
    /// Case-insensitive substring match on title and summary.
    pub search: Option<&'a str>,
    /// Exact keyword match.
    pub keyword: Option<&'a str>,
}

/// Pure view filter: the mode predicate first, then the optional search and
/// keyword narrowing. Recomputed on every state change, so it never mutates
/// its inputs.
pub fn filter_records(records: &[NewsRecord], query: &FilterQuery) -> Vec<NewsRecord> {
    records
        .iter()
        .filter(|r| matches_mode(r, query) && matches_search(r, query.search) && matches_keyword(r, query.keyword))
        .cloned()
        .collect()
}

fn matches_mode(record: &NewsRecord, query: &FilterQuery) -> bool {
    match query.mode {
        ViewMode::All => true,
        ViewMode::Recommended => record.is_recommended(),
        ViewMode::Bookmarks => query.bookmarks.contains(&record.id),
        ViewMode::Subscribe => record.has_recommender_profile(),
        ViewMode::Deep => record.has_deep_content(),
    }
}

fn matches_search(record: &NewsRecord, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(&term) || record.summary.to_lowercase().contains(&term)
}

fn matches_keyword(record: &NewsRecord, keyword: Option<&str>) -> bool {
    keyword.map_or(true, |kw| record.keyword == kw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> NewsRecord {
        NewsRecord {
            id: id.to_string(),
            title: title.to_string(),
            date: "2025-08-01".to_string(),
            time: "00:00".to_string(),
            ..NewsRecord::default()
        }
    }

    fn sample() -> Vec<NewsRecord> {
        let mut tagged = record("a", "반도체 수출 증가");
        tagged.tags = "추천".to_string();
        tagged.keyword = "반도체".to_string();
        let mut plain = record("b", "Cloud outage postmortem");
        plain.summary = "A major Provider incident".to_string();
        plain.keyword = "클라우드".to_string();
        vec![tagged, plain]
    }

    #[test]
    fn unknown_mode_string_behaves_as_all() {
        assert_eq!(ViewMode::parse_or_default("management"), ViewMode::All);
        assert_eq!(ViewMode::parse_or_default("bookmarks"), ViewMode::Bookmarks);
    }

    #[test]
    fn bookmarks_mode_keeps_exactly_the_bookmarked_ids() {
        let records = sample();
        let bookmarks: HashSet<String> = ["a".to_string()].into();
        let query = FilterQuery {
            mode: ViewMode::Bookmarks,
            bookmarks: &bookmarks,
            search: None,
            keyword: None,
        };
        let out = filter_records(&records, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let bookmarks = HashSet::new();
        let query = FilterQuery {
            mode: ViewMode::Recommended,
            bookmarks: &bookmarks,
            search: None,
            keyword: None,
        };
        let once = filter_records(&records, &query);
        let twice = filter_records(&once, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_summary() {
        let records = sample();
        let bookmarks = HashSet::new();
        let query = FilterQuery {
            mode: ViewMode::All,
            bookmarks: &bookmarks,
            search: Some("provider"),
            keyword: None,
        };
        let out = filter_records(&records, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "b");
    }

    #[test]
    fn blank_search_term_matches_everything() {
        let records = sample();
        let bookmarks = HashSet::new();
        let query = FilterQuery {
            mode: ViewMode::All,
            bookmarks: &bookmarks,
            search: Some("   "),
            keyword: None,
        };
        assert_eq!(filter_records(&records, &query).len(), records.len());
    }

    #[test]
    fn keyword_filter_is_exact() {
        let records = sample();
        let bookmarks = HashSet::new();
        let query = FilterQuery {
            mode: ViewMode::All,
            bookmarks: &bookmarks,
            search: None,
            keyword: Some("반도체"),
        };
        let out = filter_records(&records, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }
}
