mod cli;
mod config;

use anyhow::Result;
use cli::{Args, Command, LsArgs, OutputArgs, ReadArgs, SeverityFilter};
use config::{discover_config, load_config_from_path, Overrides, Settings};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use stig_catalog::prelude::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "STIG_LOG";

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(exit_code(&e).as_i32());
    }
}

/// Diagnostics go to stderr; `--verbose` wins over `STIG_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

/// Maps the root `StigError` to its exit code; anything else is an application error
fn exit_code(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StigError>())
        .map_or(ExitCode::ApplicationError, StigError::exit_code)
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };

    let (source_dir, workers) = match &args.command {
        Command::Init(init) => (init.source_dir.clone(), init.workers),
        _ => (None, None),
    };
    let settings = Settings::resolve(
        config,
        Overrides {
            data_dir: args.data_dir,
            source_dir,
            workers,
        },
    );
    tracing::debug!(?settings, "resolved settings");

    match args.command {
        Command::Init(_) => run_init(&settings),
        Command::Ls(ls) => run_ls(&settings, ls),
        Command::Read(read) => run_read(&settings, read),
    }
}

fn run_init(settings: &Settings) -> Result<()> {
    // Create adapters (Dependency Injection)
    let source = FileSystemSourceReader::new(settings.source_dir.clone());
    let repository = JsonSnapshotStore::new(settings.data_dir.clone());
    let progress_reporter = StderrProgressReporter::new();

    let use_case = IngestBenchmarksUseCase::new(source, repository, progress_reporter);
    let response = use_case.execute(IngestRequest::new(settings.workers))?;
    tracing::info!(
        benchmarks = response.benchmark_count,
        rules = response.rule_count,
        "ingestion complete"
    );
    Ok(())
}

fn run_ls(settings: &Settings, ls: LsArgs) -> Result<()> {
    let query = QueryCatalogUseCase::new(JsonSnapshotStore::new(settings.data_dir.clone()));
    let formatter = create_formatter(settings, &ls.output);

    let content = match ls.benchmark.as_deref() {
        None => {
            if !ls.categories.is_empty() {
                tracing::warn!("severity filter ignored when listing benchmarks");
            }
            formatter.format_benchmarks(&query.list_benchmarks()?)?
        }
        Some(benchmark) => {
            let severities = SeverityFilter::to_severities(&ls.categories);
            let rules = query.get_rules(&cli::rules_request(benchmark, severities))?;
            formatter.format_rules(&rules)?
        }
    };

    present(ls.output, &content)
}

fn run_read(settings: &Settings, read: ReadArgs) -> Result<()> {
    let query = QueryCatalogUseCase::new(JsonSnapshotStore::new(settings.data_dir.clone()));
    let severities = SeverityFilter::to_severities(&read.categories);

    let mut rules = Vec::new();
    if read.benchmarks.is_empty() {
        for stig_id in &read.stig_ids {
            rules.push(query.get_rule(&GetRuleRequest::by_stig_id(stig_id.as_str()))?);
        }
        for rule_id in &read.rule_ids {
            rules.push(query.get_rule(&GetRuleRequest::by_rule_id(rule_id.as_str()))?);
        }
        if let Some(allowed) = &severities {
            rules.retain(|rule| allowed.contains(&rule.severity));
        }
    } else {
        for benchmark in &read.benchmarks {
            rules.extend(query.get_rules(&cli::rules_request(benchmark, severities.clone()))?);
        }
    }

    let details = query.describe_rules(rules)?;
    let formatter = create_formatter(settings, &read.output);
    let content = formatter.format_rule_details(&details)?;
    present(read.output, &content)
}

/// `--json` overrides the configured format; colour only for a table on a terminal
fn create_formatter(settings: &Settings, output: &OutputArgs) -> Box<dyn CatalogFormatter> {
    let format = if output.json {
        OutputFormat::Json
    } else {
        settings.format
    };
    let colored =
        format == OutputFormat::Table && output.output.is_none() && io::stdout().is_terminal();
    FormatterFactory::create(format, colored)
}

fn present(output: OutputArgs, content: &str) -> Result<()> {
    let presenter = PresenterFactory::create(PresenterType::from_output(output.output));
    presenter.present(content)?;
    Ok(())
}
