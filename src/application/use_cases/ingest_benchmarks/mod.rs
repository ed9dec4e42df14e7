use crate::application::dto::{IngestRequest, IngestResponse};
use crate::ports::outbound::{BenchmarkSource, ProgressReporter, SnapshotRepository};
use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::{BenchmarkDraft, Catalog, RuleDraft};
use crate::stig_catalog::services::{decode, BenchmarkNormalizer, RuleNormalizer};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// Interval at which the coordinating thread refreshes progress
const PROGRESS_POLL_MS: u64 = 50;

/// One source file after decoding and normalization, before insertion
#[derive(Debug)]
struct NormalizedSource {
    name: String,
    benchmark: BenchmarkDraft,
    rules: Vec<RuleDraft>,
}

/// IngestBenchmarksUseCase - Rebuilds the catalog from all benchmark sources
///
/// Decoding and normalization run on a rayon pool, one source per task.
/// Results come back in source order and are inserted by a single writer,
/// so identities and uniqueness checks are deterministic.
/// The run is all-or-nothing: the snapshot is only written once every
/// source has been normalized and inserted.
///
/// # Type Parameters
/// * `S` - BenchmarkSource implementation
/// * `R` - SnapshotRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct IngestBenchmarksUseCase<S, R, PR> {
    source: S,
    repository: R,
    progress_reporter: PR,
}

impl<S, R, PR> IngestBenchmarksUseCase<S, R, PR>
where
    S: BenchmarkSource + Sync,
    R: SnapshotRepository,
    PR: ProgressReporter,
{
    /// Creates a new IngestBenchmarksUseCase with injected dependencies
    pub fn new(source: S, repository: R, progress_reporter: PR) -> Self {
        Self {
            source,
            repository,
            progress_reporter,
        }
    }

    /// Executes a full ingestion run
    ///
    /// # Errors
    /// - `Parse` if there are no sources or any source fails to normalize
    ///   (prefixed with the source name)
    /// - `DuplicateTitle` / `DuplicateRuleId` on uniqueness violations
    /// - `Io` / `Security` from the source or the snapshot repository
    ///
    /// The previously persisted snapshot is untouched on any error.
    pub fn execute(&self, request: IngestRequest) -> Result<IngestResponse> {
        self.run(request).inspect_err(|_| {
            self.progress_reporter
                .report_error("❌ Ingestion failed; the existing catalog was left unchanged");
        })
    }

    fn run(&self, request: IngestRequest) -> Result<IngestResponse> {
        // Step 1: Discover sources
        let names = self.discover_sources()?;

        // Step 2: Decode and normalize in parallel, reassembled in source order
        let workers = request.worker_count(names.len());
        let normalized = self.normalize_sources(&names, workers)?;

        // Step 3: Serial insertion with identity assignment and uniqueness checks
        let catalog = self.build_catalog(normalized)?;

        // Step 4: Persist the full snapshot
        self.progress_reporter.report(&format!(
            "💾 Writing catalog to: {}",
            self.repository.location().display()
        ));
        self.repository.save(&catalog.to_snapshot())?;
        tracing::info!(
            benchmarks = catalog.benchmark_count(),
            rules = catalog.rule_count(),
            location = %self.repository.location().display(),
            "snapshot written"
        );

        self.progress_reporter.report_completion(&format!(
            "✅ Ingested {} benchmark(s) with {} rule(s)",
            catalog.benchmark_count(),
            catalog.rule_count()
        ));

        Ok(IngestResponse::new(
            catalog.benchmark_count(),
            catalog.rule_count(),
        ))
    }

    fn discover_sources(&self) -> Result<Vec<String>> {
        self.progress_reporter.report(&format!(
            "📖 Loading benchmark sources from: {}",
            self.source.location().display()
        ));

        let names = self.source.list_sources()?;
        if names.is_empty() {
            return Err(StigError::parse(format!(
                "no benchmark sources found in {}",
                self.source.location().display()
            )));
        }

        self.progress_reporter
            .report(&format!("✅ Found {} benchmark source(s)", names.len()));
        Ok(names)
    }

    /// Decodes and normalizes every source on a pool of `workers` threads
    ///
    /// The parallel map keeps source order, so the first failure in source
    /// order is the one returned.
    fn normalize_sources(&self, names: &[String], workers: usize) -> Result<Vec<NormalizedSource>> {
        tracing::debug!(sources = names.len(), workers, "normalizing benchmark sources");

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| StigError::io("<worker pool>", e))?;

        let completed = AtomicUsize::new(0);
        let counter = &completed;
        let total = names.len();
        let source = &self.source;
        let (sender, receiver) = mpsc::channel();

        let outcome = pool.in_place_scope(|scope| {
            scope.spawn(move |_| {
                let results: Vec<Result<NormalizedSource>> = names
                    .par_iter()
                    .map(|name| {
                        let result = Self::normalize_source(source, name);
                        counter.fetch_add(1, Ordering::Relaxed);
                        result
                    })
                    .collect();
                let _ = sender.send(results);
            });

            // Poll for updates until the pool hands back every result
            loop {
                match receiver.recv_timeout(Duration::from_millis(PROGRESS_POLL_MS)) {
                    Ok(results) => break Some(results),
                    Err(RecvTimeoutError::Timeout) => self.progress_reporter.report_progress(
                        completed.load(Ordering::Relaxed),
                        total,
                        Some("Normalizing benchmarks..."),
                    ),
                    Err(RecvTimeoutError::Disconnected) => break None,
                }
            }
        });
        let results = outcome
            .ok_or_else(|| StigError::parse("benchmark normalization stopped before finishing"))?;

        self.progress_reporter
            .report_progress(completed.load(Ordering::Relaxed), total, None);

        results.into_iter().collect()
    }

    /// Decode, then benchmark metadata, then every Group
    fn normalize_source(source: &S, name: &str) -> Result<NormalizedSource> {
        let bytes = source.read_source(name)?;
        let document = decode(&bytes).map_err(|e| e.in_source(name))?;
        let root = BenchmarkNormalizer::benchmark_root(document).map_err(|e| e.in_source(name))?;
        let normalized = BenchmarkNormalizer::normalize(root).map_err(|e| e.in_source(name))?;

        let rules = normalized
            .groups
            .iter()
            .map(RuleNormalizer::normalize)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_source(name))?;

        tracing::debug!(
            source = name,
            title = %normalized.draft.title,
            rules = rules.len(),
            "source normalized"
        );

        Ok(NormalizedSource {
            name: name.to_string(),
            benchmark: normalized.draft,
            rules,
        })
    }

    fn build_catalog(&self, sources: Vec<NormalizedSource>) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for source in sources {
            let rule_count = source.rules.len();
            let index = catalog.insert_benchmark(source.benchmark)?;
            for rule in source.rules {
                catalog.insert_rule(rule.attach(index))?;
            }
            tracing::info!(
                source = %source.name,
                index = %index,
                rules = rule_count,
                "benchmark inserted"
            );
        }
        Ok(catalog)
    }
}
