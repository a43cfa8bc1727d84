//! 解析結果一覧
//!
//! 一覧APIを取得し、analysis_date の新しい順に並べる（日時なしは最古扱い）。
//! 取得に失敗した場合は空状態として扱う。

use crate::platform::Transport;
use crate::route::USER_ANALYSES_ENDPOINT;
use crate::types::{non_empty, AnalysisRecord, ListResponse};
use crate::view::parse_timestamp;
use serde::Serialize;

/// 一覧の取得結果
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    Loaded(Vec<AnalysisRecord>),
    Empty,
}

/// 一覧の集計
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ListingStats {
    pub total: usize,
    pub lame: usize,
    pub healthy: usize,
    pub mean_probability: f64,
}

impl ListingStats {
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let lame = records.iter().filter(|r| r.is_lame()).count();
        let sum: f64 = records.iter().map(|r| r.probability()).sum();

        Self {
            total: records.len(),
            lame,
            healthy: records.len() - lame,
            mean_probability: sum / records.len() as f64,
        }
    }
}

fn sort_key(record: &AnalysisRecord) -> Option<i64> {
    non_empty(&record.analysis_date)
        .and_then(parse_timestamp)
        .map(|dt| dt.timestamp_millis())
}

/// 新しい順に並べる（安定ソート）
pub fn sort_newest_first(records: &mut [AnalysisRecord]) {
    records.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

/// 一覧を取得する
pub async fn load_listing<T: Transport>(transport: &T) -> ListingOutcome {
    tracing::debug!("GET {}", USER_ANALYSES_ENDPOINT);
    let reply = match transport.get(USER_ANALYSES_ENDPOINT).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("listing request failed: {}", e);
            return ListingOutcome::Empty;
        }
    };

    match serde_json::from_str::<ListResponse>(&reply.body) {
        Ok(response) if response.success => {
            let mut analyses = response.analyses;
            sort_newest_first(&mut analyses);
            ListingOutcome::Loaded(analyses)
        }
        Ok(_) => ListingOutcome::Empty,
        Err(e) => {
            tracing::warn!("listing response unreadable: {}", e);
            ListingOutcome::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::platform::HttpReply;
    use crate::types::IdValue;
    use futures::executor::block_on;

    fn record(id: i64, date: Option<&str>) -> AnalysisRecord {
        AnalysisRecord {
            analysis_id: Some(IdValue::Number(id)),
            analysis_date: date.map(str::to_string),
            ..Default::default()
        }
    }

    fn ids(records: &[AnalysisRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.analysis_id.as_ref().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_sort_newest_first_with_missing_dates_last() {
        let mut records = vec![
            record(1, Some("2025-01-01T10:00:00+00:00")),
            record(2, None),
            record(3, Some("2025-03-01T10:00:00+00:00")),
            record(4, Some("2025-02-01T10:00:00")),
        ];
        sort_newest_first(&mut records);
        assert_eq!(ids(&records), ["3", "4", "1", "2"]);
    }

    #[test]
    fn test_load_listing_sorts() {
        let body = r#"{"success": true, "analyses": [
            {"analysis_id": 1, "analysis_date": "2024-05-01T00:00:00+00:00"},
            {"analysis_id": 2, "analysis_date": "2025-05-01T00:00:00+00:00"}
        ]}"#;
        let transport =
            MockTransport::new().reply(USER_ANALYSES_ENDPOINT, HttpReply::new(200, body));

        match block_on(load_listing(&transport)) {
            ListingOutcome::Loaded(records) => assert_eq!(ids(&records), ["2", "1"]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_load_listing_failures_are_empty() {
        let transport = MockTransport::new()
            .reply(USER_ANALYSES_ENDPOINT, HttpReply::new(200, r#"{"success": false}"#));
        assert_eq!(block_on(load_listing(&transport)), ListingOutcome::Empty);

        let transport = MockTransport::new().fail(USER_ANALYSES_ENDPOINT, "offline");
        assert_eq!(block_on(load_listing(&transport)), ListingOutcome::Empty);

        let transport =
            MockTransport::new().reply(USER_ANALYSES_ENDPOINT, HttpReply::new(500, "oops"));
        assert_eq!(block_on(load_listing(&transport)), ListingOutcome::Empty);
    }

    #[test]
    fn test_stats() {
        let records = vec![
            AnalysisRecord {
                is_lame: Some(true),
                lameness_probability: Some(80.0),
                ..Default::default()
            },
            AnalysisRecord {
                is_lame: Some(false),
                lameness_probability: Some(20.0),
                ..Default::default()
            },
        ];
        let stats = ListingStats::from_records(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.lame, 1);
        assert_eq!(stats.healthy, 1);
        assert_eq!(stats.mean_probability, 50.0);

        assert_eq!(ListingStats::from_records(&[]), ListingStats::default());
    }
}
