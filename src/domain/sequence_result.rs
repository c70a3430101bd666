use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One computed sequence value as reported by the service.
///
/// `value` is kept as text because it can run to tens of thousands of digits.
/// `digit_count` is the service's own figure and is not re-derived from `value`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResult {
    #[serde(alias = "n")]
    pub index: u64,
    pub value: String,
    #[serde(alias = "digits")]
    pub digit_count: usize,
    #[serde(alias = "calculationTimeMs", alias = "calculationTime")]
    /// Server-side timing, may be fractional
    pub compute_time_ms: f64,
    pub from_cache: bool,
}

impl SequenceResult {
    pub fn new(index: u64, value: impl Into<String>, compute_time_ms: f64, from_cache: bool) -> Self {
        let value = value.into();
        Self {
            index,
            digit_count: value.len(),
            value,
            compute_time_ms,
            from_cache,
        }
    }
}

/// A result as the client observed it, stamped with when it arrived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub result: SequenceResult,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(result: SequenceResult, recorded_at: DateTime<Utc>) -> Self {
        Self {
            result,
            recorded_at,
        }
    }

    #[inline]
    pub fn index(&self) -> u64 {
        self.result.index
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.result.value
    }

    #[inline]
    pub fn digit_count(&self) -> usize {
        self.result.digit_count
    }
}

impl std::fmt::Display for SequenceResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let head: String = self.value.chars().take(50).collect();
        write!(
            f,
            "LabSeq({}) = {}{} ({} digits, {}ms, cached: {})",
            self.index,
            head,
            if self.value.len() > 50 { "..." } else { "" },
            self.digit_count,
            self.compute_time_ms,
            self.from_cache
        )
    }
}
