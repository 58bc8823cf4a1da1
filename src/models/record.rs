use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Substring in `tags` marking a record for the recommended view.
pub const RECOMMENDED_MARKER: &str = "추천";

/// Shown when a record carries no image or its image fails to load.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/96x80/E2E8F0/64748B?text=No+Image";

/// Number of ordered long-form paragraph columns in the deep sheet.
pub const MAX_LONG_FORM_PARAGRAPHS: usize = 5;

/// One parsed news row. Immutable for the lifetime of a fetch cycle; the
/// whole set is replaced wholesale on every fetch.
///
/// `id` is the join key for bookmarks, votes and comments, derived
/// deterministically from title + date so that side-channel data keyed by it
/// survives a re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub id: String,
    pub title: String,
    pub keyword: String,
    pub source: String,
    pub tags: String,
    pub url: String,
    /// Calendar date, `YYYY-MM-DD`. Blank source cells default to the parse
    /// date, so this is only empty for hand-built records.
    pub date: String,
    /// `HH:MM`, defaulting to `"00:00"`.
    pub time: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub nickname: String,
    pub company_name: String,
    pub job_title: String,
    pub recommendation_strength: u8,
    pub recommendation_reason: String,
    pub likes: u32,
    /// Short excerpt shown in the deep view.
    #[serde(default)]
    pub news_content: String,
    /// Up to five ordered long-form paragraphs; trailing empties are trimmed.
    #[serde(default)]
    pub long_form: Vec<String>,
}

impl NewsRecord {
    pub fn is_recommended(&self) -> bool {
        self.tags.contains(RECOMMENDED_MARKER)
    }

    /// Recommender profile fields are all-or-nothing for the subscribe view.
    pub fn has_recommender_profile(&self) -> bool {
        !self.nickname.is_empty()
            && !self.company_name.is_empty()
            && !self.job_title.is_empty()
            && !self.recommendation_reason.is_empty()
            && self.recommendation_strength > 0
    }

    /// Deep-view eligibility: a title, the excerpt, at least one non-empty
    /// long-form paragraph, and an image.
    pub fn has_deep_content(&self) -> bool {
        !self.title.is_empty()
            && !self.news_content.is_empty()
            && !self.image_url.is_empty()
            && self.long_form.iter().any(|p| !p.trim().is_empty())
    }

    /// Combined date + time for ordering. `None` when either part is
    /// unparsable, which excludes the record from "last updated" selection.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        let combined = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }

    pub fn display_image_url(&self) -> &str {
        if self.image_url.is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.image_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NewsRecord {
        NewsRecord {
            title: "제목".to_string(),
            date: "2025-08-01".to_string(),
            time: "13:45".to_string(),
            ..NewsRecord::default()
        }
    }

    #[test]
    fn recommended_marker_is_substring_match() {
        let mut r = record();
        r.tags = "IT,추천,AI".to_string();
        assert!(r.is_recommended());
        r.tags = "IT,AI".to_string();
        assert!(!r.is_recommended());
    }

    #[test]
    fn recommender_profile_is_all_or_nothing() {
        let mut r = record();
        r.nickname = "nick".to_string();
        r.company_name = "acme".to_string();
        r.job_title = "cto".to_string();
        r.recommendation_reason = "good".to_string();
        r.recommendation_strength = 0;
        assert!(!r.has_recommender_profile());
        r.recommendation_strength = 3;
        assert!(r.has_recommender_profile());
        r.job_title.clear();
        assert!(!r.has_recommender_profile());
    }

    #[test]
    fn deep_content_requires_excerpt_paragraph_and_image() {
        let mut r = record();
        r.news_content = "excerpt".to_string();
        r.image_url = "https://example.com/img.png".to_string();
        r.long_form = vec![String::new(), "본문 단락".to_string()];
        assert!(r.has_deep_content());
        r.long_form = vec![String::new(), "   ".to_string()];
        assert!(!r.has_deep_content());
        r.long_form = vec!["본문 단락".to_string()];
        r.image_url.clear();
        assert!(!r.has_deep_content());
    }

    #[test]
    fn sort_key_parses_combined_date_time() {
        let r = record();
        assert_eq!(
            r.sort_key().unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2025-08-01 13:45"
        );
        let mut bad = record();
        bad.date = "not a date".to_string();
        assert!(bad.sort_key().is_none());
    }

    #[test]
    fn placeholder_image_for_blank_url() {
        let r = record();
        assert_eq!(r.display_image_url(), PLACEHOLDER_IMAGE_URL);
    }
}
