//! Optional terrain height histogram.
//!
//! The terrain pass records each sampled height rounded to one decimal
//! when the caller hands it a histogram. Nothing is collected otherwise.

/// Heights 0.0, 0.1, ..., 1.0
pub const BUCKETS: usize = 11;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightHistogram {
    counts: [u64; BUCKETS],
    total: u64,
}

impl HeightHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one height sample
    #[inline]
    pub fn record(&mut self, h: f32) {
        let bucket = (h.clamp(0.0, 1.0) * 10.0).round() as usize;
        self.counts[bucket.min(BUCKETS - 1)] += 1;
        self.total += 1;
    }

    pub fn count(&self, bucket: usize) -> u64 {
        self.counts.get(bucket).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// (rounded height, count) for every non-empty bucket
    pub fn nonzero(&self) -> Vec<(f32, u64)> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(i, &n)| (i as f32 / 10.0, n))
            .collect()
    }

    /// `{"heights": [[h, count], ...], "total": n}` over non-empty buckets
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "heights": self.nonzero(),
            "total": self.total,
        })
        .to_string()
    }
}
