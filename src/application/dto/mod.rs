/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the CLI and the use cases,
/// keeping the domain layer isolated.
mod ingest_request;
mod ingest_response;
mod output_format;
mod query_requests;

pub use ingest_request::IngestRequest;
pub use ingest_response::IngestResponse;
pub use output_format::OutputFormat;
pub use query_requests::{
    BenchmarkSelector, GetBenchmarkRequest, GetRuleRequest, GetRulesRequest, RuleSelector,
};
