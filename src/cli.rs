use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use stig_catalog::prelude::{GetRulesRequest, Severity};

/// Normalize STIG benchmark XML files into a local catalog and query it
#[derive(Parser, Debug)]
#[command(name = "stig")]
#[command(version)]
#[command(about = "Normalize STIG benchmark XML files into a local catalog and query it", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./stig.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog snapshot
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the catalog from the benchmark XML files, replacing any previous one
    Init(InitArgs),
    /// List benchmarks, or the rules of one benchmark
    Ls(LsArgs),
    /// Show full rule details
    Read(ReadArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InitArgs {
    /// Directory containing one benchmark XML file per benchmark
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Number of parallel workers (defaults to the number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<NonZeroUsize>,
}

#[derive(ClapArgs, Debug)]
pub struct LsArgs {
    /// Benchmark index or title; lists all benchmarks when omitted
    pub benchmark: Option<String>,

    /// Only list rules of these severities
    /// Can be specified multiple times: -c high -c medium
    #[arg(short = 'c', long = "category", value_enum, value_name = "SEVERITY")]
    pub categories: Vec<SeverityFilter>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .multiple(true)
        .args(["stig_ids", "rule_ids", "benchmarks"])
))]
pub struct ReadArgs {
    /// STIG ID of a rule (e.g. V-68105)
    #[arg(short = 'v', long = "stig-id", value_name = "STIG_ID", conflicts_with = "benchmarks")]
    pub stig_ids: Vec<String>,

    /// Rule ID of a rule (e.g. SV-82595r1_rule)
    #[arg(short = 'r', long = "rule-id", value_name = "RULE_ID", conflicts_with = "benchmarks")]
    pub rule_ids: Vec<String>,

    /// Show every rule of a benchmark (index or title)
    #[arg(short = 'b', long = "benchmark", value_name = "BENCHMARK")]
    pub benchmarks: Vec<String>,

    /// Only show rules of these severities
    #[arg(short = 'c', long = "category", value_enum, value_name = "SEVERITY")]
    pub categories: Vec<SeverityFilter>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
pub struct OutputArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Severity values accepted by `-c`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityFilter {
    High,
    Medium,
    Low,
    All,
}

impl SeverityFilter {
    /// `None` when no filter was given or `all` is among the values
    pub fn to_severities(filters: &[SeverityFilter]) -> Option<Vec<Severity>> {
        if filters.is_empty() || filters.contains(&SeverityFilter::All) {
            return None;
        }
        Some(
            Severity::ALL
                .into_iter()
                .filter(|severity| {
                    filters.iter().any(|filter| match filter {
                        SeverityFilter::High => *severity == Severity::High,
                        SeverityFilter::Medium => *severity == Severity::Medium,
                        SeverityFilter::Low => *severity == Severity::Low,
                        SeverityFilter::All => true,
                    })
                })
                .collect(),
        )
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// A numeric benchmark argument is an index, anything else a title
pub fn rules_request(benchmark: &str, severities: Option<Vec<Severity>>) -> GetRulesRequest {
    let trimmed = benchmark.trim();
    let request = match trimmed.parse::<u32>() {
        Ok(index) => GetRulesRequest::by_benchmark_index(index),
        Err(_) => GetRulesRequest::by_benchmark_title(trimmed),
    };
    GetRulesRequest {
        severities,
        ..request
    }
}
