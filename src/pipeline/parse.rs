use chrono::NaiveDate;

use crate::models::{NewsRecord, MAX_LONG_FORM_PARAGRAPHS};

/// Field-name → column-index mapping for one sheet shape. The standard and
/// deep sheets differ, so each fetch supplies its own map.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub title: usize,
    pub keyword: usize,
    pub source: usize,
    pub tags: usize,
    pub url: usize,
    /// Composite cell: either `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
    pub date_time: usize,
    pub summary: usize,
    pub content: usize,
    pub image_url: usize,
    pub nickname: Option<usize>,
    pub company_name: Option<usize>,
    pub job_title: Option<usize>,
    pub recommendation_strength: Option<usize>,
    pub recommendation_reason: Option<usize>,
    pub likes: Option<usize>,
    pub news_content: Option<usize>,
    pub long_form: [Option<usize>; MAX_LONG_FORM_PARAGRAPHS],
}

impl ColumnMap {
    /// Shape of the standard news tab, columns 0..=14.
    pub fn standard() -> Self {
        Self {
            title: 0,
            keyword: 1,
            source: 2,
            tags: 3,
            url: 4,
            date_time: 5,
            summary: 6,
            content: 7,
            image_url: 8,
            nickname: Some(9),
            company_name: Some(10),
            job_title: Some(11),
            recommendation_strength: Some(12),
            recommendation_reason: Some(13),
            likes: Some(14),
            news_content: None,
            long_form: [None; MAX_LONG_FORM_PARAGRAPHS],
        }
    }

    /// Shape of the long-form tab: the shared columns up to the image, then
    /// the excerpt and five ordered paragraph columns.
    pub fn deep() -> Self {
        Self {
            title: 0,
            keyword: 1,
            source: 2,
            tags: 3,
            url: 4,
            date_time: 5,
            summary: 6,
            content: 7,
            image_url: 8,
            nickname: None,
            company_name: None,
            job_title: None,
            recommendation_strength: None,
            recommendation_reason: None,
            likes: None,
            news_content: Some(9),
            long_form: [Some(10), Some(11), Some(12), Some(13), Some(14)],
        }
    }
}

/// Converts raw sheet rows into records. The first row is the header and is
/// discarded; callers decide whether an empty payload is fatal.
///
/// The only hard validity rule is a non-empty title. Absent cells become
/// empty strings, integers fall back to `0`, and a blank date cell defaults
/// to `today`.
pub fn parse_rows(rows: &[Vec<String>], map: &ColumnMap, today: NaiveDate) -> Vec<NewsRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|row| parse_row(row, map, today))
        .collect()
}

fn parse_row(row: &[String], map: &ColumnMap, today: NaiveDate) -> Option<NewsRecord> {
    let title = cell(row, map.title);
    if title.is_empty() {
        return None;
    }

    let (date, time) = split_date_time(cell(row, map.date_time), today);

    let mut long_form: Vec<String> = map
        .long_form
        .iter()
        .map(|idx| opt_cell(row, *idx))
        .collect();
    while long_form.last().is_some_and(|p| p.is_empty()) {
        long_form.pop();
    }

    Some(NewsRecord {
        id: String::new(),
        title,
        keyword: cell(row, map.keyword),
        source: cell(row, map.source),
        tags: cell(row, map.tags),
        url: cell(row, map.url),
        date,
        time,
        summary: cell(row, map.summary),
        content: cell(row, map.content),
        image_url: cell(row, map.image_url),
        nickname: opt_cell(row, map.nickname),
        company_name: opt_cell(row, map.company_name),
        job_title: opt_cell(row, map.job_title),
        recommendation_strength: int_cell(row, map.recommendation_strength).min(5) as u8,
        recommendation_reason: opt_cell(row, map.recommendation_reason),
        likes: int_cell(row, map.likes),
        news_content: opt_cell(row, map.news_content),
        long_form,
    })
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

fn opt_cell(row: &[String], idx: Option<usize>) -> String {
    idx.map(|i| cell(row, i)).unwrap_or_default()
}

fn int_cell(row: &[String], idx: Option<usize>) -> u32 {
    idx.and_then(|i| row.get(i))
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

/// A composite `date time` cell splits on the first space; a blank cell
/// defaults to `today` at `00:00`.
fn split_date_time(raw: String, today: NaiveDate) -> (String, String) {
    if raw.is_empty() {
        return (today.format("%Y-%m-%d").to_string(), "00:00".to_string());
    }
    match raw.split_once(' ') {
        Some((date, time)) if !time.is_empty() => (date.to_string(), time.to_string()),
        Some((date, _)) => (date.to_string(), "00:00".to_string()),
        None => (raw, "00:00".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&["title", "keyword", "source"])
    }

    #[test]
    fn header_row_is_discarded() {
        let rows = vec![header()];
        assert!(parse_rows(&rows, &ColumnMap::standard(), today()).is_empty());
    }

    #[test]
    fn empty_title_drops_the_record() {
        let rows = vec![
            header(),
            row(&["", "Kw", "Src", "", "", "2025-08-01", "Sum"]),
            row(&["살아남은 기사", "Kw", "Src", "", "", "2025-08-01", "Sum"]),
        ];
        let records = parse_rows(&rows, &ColumnMap::standard(), today());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "살아남은 기사");
    }

    #[test]
    fn missing_cells_become_empty_strings_and_zeroes() {
        let rows = vec![header(), row(&["짧은 행"])];
        let records = parse_rows(&rows, &ColumnMap::standard(), today());
        let r = &records[0];
        assert_eq!(r.keyword, "");
        assert_eq!(r.summary, "");
        assert_eq!(r.recommendation_strength, 0);
        assert_eq!(r.likes, 0);
        // Blank date cell defaults to the parse date.
        assert_eq!(r.date, "2025-08-15");
        assert_eq!(r.time, "00:00");
    }

    #[test]
    fn composite_date_time_splits_on_first_space() {
        let rows = vec![
            header(),
            row(&["A", "", "", "", "", "2025-08-01 09:30", "", "", ""]),
            row(&["B", "", "", "", "", "2025-08-02", "", "", ""]),
        ];
        let records = parse_rows(&rows, &ColumnMap::standard(), today());
        assert_eq!(records[0].date, "2025-08-01");
        assert_eq!(records[0].time, "09:30");
        assert_eq!(records[1].date, "2025-08-02");
        assert_eq!(records[1].time, "00:00");
    }

    #[test]
    fn unparsable_integers_fall_back_to_zero() {
        let mut cells = vec![String::new(); 15];
        cells[0] = "기사".to_string();
        cells[12] = "많이".to_string();
        cells[14] = "-3x".to_string();
        let records = parse_rows(&vec![header(), cells], &ColumnMap::standard(), today());
        assert_eq!(records[0].recommendation_strength, 0);
        assert_eq!(records[0].likes, 0);
    }

    #[test]
    fn recommendation_strength_clamps_to_five() {
        let mut cells = vec![String::new(); 15];
        cells[0] = "기사".to_string();
        cells[12] = "9".to_string();
        let records = parse_rows(&vec![header(), cells], &ColumnMap::standard(), today());
        assert_eq!(records[0].recommendation_strength, 5);
    }

    #[test]
    fn deep_map_collects_ordered_paragraphs_and_trims_trailing_empties() {
        let mut cells = vec![String::new(); 15];
        cells[0] = "심층 기사".to_string();
        cells[5] = "2025-08-01 10:00".to_string();
        cells[8] = "https://example.com/img.png".to_string();
        cells[9] = "발췌".to_string();
        cells[10] = "첫 단락".to_string();
        cells[12] = "셋째 단락".to_string();
        let records = parse_rows(&vec![header(), cells], &ColumnMap::deep(), today());
        let r = &records[0];
        assert_eq!(r.news_content, "발췌");
        assert_eq!(r.long_form, vec!["첫 단락", "", "셋째 단락"]);
        assert!(r.has_deep_content());
    }
}
