//! stig-catalog - Normalize XCCDF STIG benchmarks into a queryable catalog
//!
//! This library ingests a directory of benchmark XML documents, reconciles
//! their inconsistent structures into a canonical Benchmark/Rule model,
//! persists the result as a single JSON snapshot and answers lookups by
//! benchmark, rule identity and severity.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`stig_catalog`): Domain model, indexed catalog and the
//!   pure decoding/normalization services
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, result alias and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use stig_catalog::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let data_dir = PathBuf::from(".stig");
//!
//! // Build the catalog
//! let ingest = IngestBenchmarksUseCase::new(
//!     FileSystemSourceReader::new(data_dir.join("benchmarks")),
//!     JsonSnapshotStore::new(data_dir.clone()),
//!     StderrProgressReporter::new(),
//! );
//! ingest.execute(IngestRequest::default())?;
//!
//! // Query it
//! let query = QueryCatalogUseCase::new(JsonSnapshotStore::new(data_dir));
//! let high = query.get_rules(
//!     &GetRulesRequest::by_benchmark_index(1).with_severities(vec![Severity::High]),
//! )?;
//! let output = JsonFormatter::new().format_rules(&high)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod stig_catalog;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemSourceReader, FileSystemWriter, JsonSnapshotStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::application::dto::{
        GetBenchmarkRequest, GetRuleRequest, GetRulesRequest, IngestRequest, IngestResponse,
        OutputFormat,
    };
    pub use crate::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
    pub use crate::application::read_models::RuleDetailView;
    pub use crate::application::use_cases::{IngestBenchmarksUseCase, QueryCatalogUseCase};
    pub use crate::ports::inbound::CatalogQueryPort;
    pub use crate::ports::outbound::{
        BenchmarkSource, CatalogFormatter, OutputPresenter, ProgressReporter, SnapshotRepository,
    };
    pub use crate::shared::error::{ExitCode, StigError};
    pub use crate::shared::Result;
    pub use crate::stig_catalog::domain::{
        Benchmark, BenchmarkIndex, Catalog, Rule, Severity, Snapshot,
    };
    pub use crate::stig_catalog::services::{BenchmarkNormalizer, RuleNormalizer, VulnDiscussion};
}
