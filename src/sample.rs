//! Built-in fallback dataset installed when a fetch cycle is fatal, so the
//! view stays populated alongside the error message.

use crate::models::NewsRecord;
use crate::pipeline::ident;

struct Seed {
    title: &'static str,
    keyword: &'static str,
    source: &'static str,
    tags: &'static str,
    date: &'static str,
    time: &'static str,
    summary: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "AI 반도체 투자 확대, 국내 파운드리 수혜 전망",
        keyword: "반도체",
        source: "샘플 데이터",
        tags: "추천",
        date: "2025-08-01",
        time: "09:00",
        summary: "글로벌 AI 수요 증가로 반도체 설비 투자가 확대되고 있습니다.",
    },
    Seed {
        title: "클라우드 대규모 장애, 복구까지 세 시간",
        keyword: "클라우드",
        source: "샘플 데이터",
        tags: "",
        date: "2025-08-01",
        time: "14:30",
        summary: "주요 리전 장애로 다수 서비스가 영향을 받았습니다.",
    },
    Seed {
        title: "오픈소스 LLM 라이선스 논쟁 재점화",
        keyword: "AI",
        source: "샘플 데이터",
        tags: "",
        date: "2025-07-31",
        time: "11:15",
        summary: "상업적 이용 조건을 둘러싼 논쟁이 다시 불붙었습니다.",
    },
];

pub fn fallback_records() -> Vec<NewsRecord> {
    let mut records: Vec<NewsRecord> = SEEDS
        .iter()
        .map(|seed| NewsRecord {
            title: seed.title.to_string(),
            keyword: seed.keyword.to_string(),
            source: seed.source.to_string(),
            tags: seed.tags.to_string(),
            date: seed.date.to_string(),
            time: seed.time.to_string(),
            summary: seed.summary.to_string(),
            ..NewsRecord::default()
        })
        .collect();
    ident::assign_ids(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::group::{group_records, Granularity};

    #[test]
    fn fallback_records_have_ids_and_span_two_dates() {
        let records = fallback_records();
        assert!(records.len() >= 3);
        assert!(records.iter().all(|r| !r.id.is_empty()));
        assert!(records.iter().any(|r| r.is_recommended()));
        assert_eq!(group_records(&records, Granularity::Date).len(), 2);
    }
}
