use crate::application::dto::{GetBenchmarkRequest, GetRuleRequest, GetRulesRequest};
use crate::shared::Result;
use crate::stig_catalog::domain::{Benchmark, Rule};

/// CatalogQueryPort - Inbound port for read-only catalog lookups
///
/// Every operation fails with `StoreNotInitialized` when no ingestion has
/// produced a snapshot yet. Selector validation happens before the store is
/// touched, so a malformed request is reported as `InvalidArgument` even
/// against an empty location.
pub trait CatalogQueryPort {
    /// All benchmarks in insertion order
    fn list_benchmarks(&self) -> Result<Vec<Benchmark>>;

    /// One benchmark by title or by index
    ///
    /// # Errors
    /// - `InvalidArgument` unless exactly one selector is given
    /// - `NotFound` if no benchmark matches
    fn get_benchmark(&self, request: &GetBenchmarkRequest) -> Result<Benchmark>;

    /// Rules of one benchmark, optionally filtered by severity
    ///
    /// # Errors
    /// - `InvalidArgument` unless exactly one benchmark selector is given
    /// - `NotFound` if the benchmark does not exist
    fn get_rules(&self, request: &GetRulesRequest) -> Result<Vec<Rule>>;

    /// One rule by STIG ID or rule ID
    ///
    /// # Errors
    /// - `InvalidArgument` unless exactly one selector is given
    /// - `NotFound` if no rule matches
    fn get_rule(&self, request: &GetRuleRequest) -> Result<Rule>;
}
