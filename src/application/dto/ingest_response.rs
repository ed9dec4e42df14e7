/// IngestResponse - Counts of what the last ingestion stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestResponse {
    pub benchmark_count: usize,
    pub rule_count: usize,
}

impl IngestResponse {
    pub fn new(benchmark_count: usize, rule_count: usize) -> Self {
        Self {
            benchmark_count,
            rule_count,
        }
    }
}
