use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use strum::{Display, EnumString};

use crate::models::NewsRecord;

/// Bucket label for records without a parsable calendar date; always last.
pub const NO_DATE_KEY: &str = "날짜 없음";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Granularity {
    #[default]
    Date,
    DateHour,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsGroup {
    pub key: String,
    pub records: Vec<NewsRecord>,
}

/// Buckets records by calendar date or date+hour and orders buckets most
/// recent first. In-bucket order is the original fetch order.
pub fn group_records(records: &[NewsRecord], granularity: Granularity) -> Vec<NewsGroup> {
    let mut groups: Vec<NewsGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = bucket_key(record, granularity);
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(NewsGroup {
                    key,
                    records: vec![record.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| {
        match (bucket_sort_key(&a.key), bucket_sort_key(&b.key)) {
            (Some(ka), Some(kb)) => kb.cmp(&ka),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    groups
}

fn bucket_key(record: &NewsRecord, granularity: Granularity) -> String {
    if record.date.is_empty() {
        return NO_DATE_KEY.to_string();
    }
    match granularity {
        Granularity::Date => record.date.clone(),
        Granularity::DateHour => {
            let hour: u32 = record
                .time
                .split(':')
                .next()
                .and_then(|h| h.parse().ok())
                .unwrap_or(0);
            format!("{} {hour:02}시", record.date)
        }
    }
}

fn bucket_sort_key(key: &str) -> Option<NaiveDateTime> {
    if key == NO_DATE_KEY {
        return None;
    }
    match key.split_once(' ') {
        Some((date, hour_part)) => {
            let hour: u32 = hour_part.trim_end_matches('시').parse().ok()?;
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(hour, 0, 0)
        }
        None => NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0),
    }
}

/// Renders an hour bucket key as 12-hour civil time with a morning/afternoon
/// marker; date keys and the no-date key pass through unchanged.
pub fn format_group_header(key: &str) -> String {
    let Some((date, hour_part)) = key.split_once(' ') else {
        return key.to_string();
    };
    let Ok(hour24) = hour_part.trim_end_matches('시').parse::<u32>() else {
        return key.to_string();
    };
    let meridiem = if hour24 >= 12 { "오후" } else { "오전" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{date} {meridiem} {hour12}시")
}

/// The single most recent record by combined date + time, used for the
/// "last updated" display.
pub fn latest_record(records: &[NewsRecord]) -> Option<&NewsRecord> {
    records
        .iter()
        .filter_map(|r| r.sort_key().map(|key| (key, r)))
        .max_by_key(|(key, _)| *key)
        .map(|(_, r)| r)
}

pub fn latest_date(records: &[NewsRecord]) -> Option<String> {
    latest_record(records).map(|r| r.date.clone())
}
