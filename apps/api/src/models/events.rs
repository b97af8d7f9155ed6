use serde::{Deserialize, Serialize};

use crate::models::score::ScoreResult;

/// Terminal status of one candidate within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Complete,
    Failed,
}

/// One event on a batch progress stream.
///
/// `current` never decreases across the stream seen by one sink: `Progress`
/// carries the number of completions so far, `Result` carries a strictly
/// increasing 1..N completion counter, and exactly one `Done` closes the
/// stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatchProgressEvent {
    Progress {
        current: usize,
        total: usize,
        candidate: String,
    },
    Result {
        current: usize,
        total: usize,
        candidate: String,
        status: CandidateStatus,
        data: ScoreResult,
    },
    Done {
        total: usize,
        results: Vec<ScoreResult>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_json_shape() {
        let ev = BatchProgressEvent::Progress {
            current: 3,
            total: 10,
            candidate: "Ada Lovelace".to_string(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "progress");
        assert_eq!(json["current"], 3);
        assert_eq!(json["total"], 10);
        assert_eq!(json["candidate"], "Ada Lovelace");
    }

    #[test]
    fn test_result_event_json_shape() {
        let ev = BatchProgressEvent::Result {
            current: 1,
            total: 2,
            candidate: "Grace Hopper".to_string(),
            status: CandidateStatus::Complete,
            data: ScoreResult::failed("x"),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "result");
        assert_eq!(json["status"], "complete");
        assert_eq!(json["data"]["engine"], "failed");
    }

    #[test]
    fn test_done_event_json_shape() {
        let ev = BatchProgressEvent::Done {
            total: 2,
            results: vec![],
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "done");
        assert_eq!(json["total"], 2);
        assert!(json["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_failed_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CandidateStatus::Failed).unwrap(),
            r#""failed""#
        );
    }
}
