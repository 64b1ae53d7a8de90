#![warn(missing_docs)]
//! Loopbench CLI Library
//!
//! Command line front end for the loop-style comparison suite. Use
//! `loopbench::run()` (or `loopbench_cli::run()`) in a main function to get
//! the standard suite, or [`run_with`] to register your own cases.
//!
//! # Example
//!
//! ```ignore
//! use loopbench_cli::{Cli, run_with};
//! use loopbench_core::{Case, Operation};
//! use clap::Parser;
//!
//! fn main() -> anyhow::Result<()> {
//!     run_with(Cli::parse(), |runner, _config| {
//!         runner.register(
//!             Case::new("double", Operation::Map, vec![1_i64, 2, 3])
//!                 .iterator(|xs| Ok(xs.iter().map(|x| x * 2).collect::<Vec<_>>())),
//!         )
//!     })
//! }
//! ```

mod config;
mod executor;
mod planner;
mod signal;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, build_report, compute_statistics, execute_verifications,
    format_human_output,
};

use clap::{Parser, Subcommand};
use loopbench_core::{RegistryError, Runner};
use planner::ExecutionPlan;
use loopbench_report::{
    OutputFormat, Report, ReportConfig, generate_json_report, generate_markdown_report,
};
use rayon::ThreadPoolBuilder;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Loopbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "loopbench")]
#[command(
    author,
    version,
    about = "Loopbench - compare indexed loops, iterator loops and iterator chains"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Verify, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter cases by regex pattern (given before any subcommand)
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, markdown
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Timed samples per variant
    #[arg(long, short = 'n', global = true)]
    pub samples: Option<usize>,

    /// Elements per fixture
    #[arg(long, global = true)]
    pub size: Option<usize>,

    /// Seed for the random fixtures
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Per-sample timeout, e.g. "500ms" or "2s"
    #[arg(long, global = true)]
    pub timeout: Option<String>,

    /// Run only the named variant (repeatable)
    #[arg(long = "variant", global = true)]
    pub variants: Vec<String>,

    /// Check output equivalence after measuring
    #[arg(long, global = true)]
    pub verify: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads for fixture generation and statistics
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered cases and their variants
    List,
    /// Run cases (default)
    Run,
    /// Check that every variant of each case agrees, without timing
    Verify,
    /// Print a default loopbench.toml
    Init,
}

/// Run the Loopbench CLI with the standard suite.
/// This is the main entry point for the loopbench binary.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the Loopbench CLI with pre-parsed arguments and the standard suite.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    run_with(cli, |runner, config| {
        loopbench_workloads::register_standard_suite(runner, &config.suite_config())
    })
}

/// Run the Loopbench CLI with a caller-supplied registration step.
///
/// `register` receives an empty runner configured from `loopbench.toml` and
/// the CLI overrides.
pub fn run_with<F>(cli: Cli, register: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut Runner, &LoopbenchConfig) -> Result<(), RegistryError>,
{
    init_tracing(cli.verbose);

    if let Some(Commands::Init) = cli.command {
        print!("{}", LoopbenchConfig::default_toml());
        return Ok(());
    }

    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    // loopbench.toml first, CLI flags override
    let config = apply_overrides(&cli, LoopbenchConfig::discover().unwrap_or_default());

    let mut runner = Runner::with_settings(config.run_settings()?);
    register(&mut runner, &config)?;

    let filter = Regex::new(&cli.filter)
        .map_err(|e| anyhow::anyhow!("Invalid filter '{}': {}", cli.filter, e))?;
    let plan = planner::build_plan(runner.case_names(), Some(&filter));

    match cli.command {
        Some(Commands::List) => list_cases(&runner, &plan.cases),
        Some(Commands::Verify) => verify_cases(&runner, &plan.cases),
        Some(Commands::Run) | None => run_cases(&cli, &config, &runner, &plan),
        Some(Commands::Init) => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "loopbench_core=debug,loopbench_cli=debug,loopbench_workloads=debug"
    } else {
        "loopbench_core=info,loopbench_cli=info,loopbench_workloads=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed by an embedding binary or a test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Layer CLI flags over the file configuration
fn apply_overrides(cli: &Cli, mut config: LoopbenchConfig) -> LoopbenchConfig {
    if let Some(samples) = cli.samples {
        config.runner.samples = samples;
    }
    if let Some(ref timeout) = cli.timeout {
        config.runner.timeout = Some(timeout.clone());
    }
    if cli.verify {
        config.runner.verify = true;
    }
    if let Some(size) = cli.size {
        config.fixture.size = size;
    }
    if let Some(seed) = cli.seed {
        config.fixture.seed = seed;
    }
    if let Some(ref format) = cli.format {
        config.output.format = format.clone();
    }
    if let Some(ref path) = cli.output {
        config.output.path = Some(path.display().to_string());
    }
    config
}

fn list_cases(runner: &Runner, cases: &[&str]) -> anyhow::Result<()> {
    println!("Loopbench Plan:");

    let mut variants = 0;
    for &name in cases {
        let case = runner.case(name)?;
        println!(
            "├── {} ({}, {} elements)",
            name,
            case.operation(),
            case.fixture_len()
        );
        for (variant, strategy) in case.variants() {
            println!("│   ├── {} [{}]", variant, strategy);
            variants += 1;
        }
    }

    println!("{} cases, {} variants found.", cases.len(), variants);
    Ok(())
}

fn verify_cases(runner: &Runner, cases: &[&str]) -> anyhow::Result<()> {
    signal::cancel_on_interrupt(runner.cancellation_token());

    let entries = execute_verifications(runner, cases);
    let failures = entries.iter().filter(|e| !e.passed).count();
    for entry in &entries {
        let icon = if entry.passed { "✓" } else { "✗" };
        println!("{} {} : {}", icon, entry.case, entry.message);
    }
    println!(
        "{} of {} cases verified.",
        entries.len() - failures,
        cases.len()
    );

    if failures > 0 {
        eprintln!("\n{} verification failure(s)", failures);
        std::process::exit(1);
    }
    Ok(())
}

fn run_cases(
    cli: &Cli,
    config: &LoopbenchConfig,
    runner: &Runner,
    plan: &ExecutionPlan<'_>,
) -> anyhow::Result<()> {
    let format: OutputFormat = config
        .output
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    if plan.is_empty() {
        eprintln!("No cases found.");
        return Ok(());
    }
    let cases = plan.cases.as_slice();

    signal::cancel_on_interrupt(runner.cancellation_token());

    let settings = runner.settings();
    eprintln!(
        "Running {} cases, {} samples per variant...\n",
        cases.len(),
        settings.samples
    );

    let start_time = Instant::now();

    let executor = Executor::new(
        runner,
        ExecutionConfig {
            variants: cli.variants.clone(),
            quiet: format != OutputFormat::Human,
        },
    );
    let results = executor.execute(cases)?;
    let stats = compute_statistics(&results);

    let report_config = ReportConfig {
        samples: settings.samples,
        timeout_ns: settings.timeout.map(|t| t.as_nanos() as u64),
        fixture_size: config.fixture.size,
        seed: config.fixture.seed,
    };
    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let mut report = build_report(&results, &stats, report_config, total_duration_ms);

    if config.runner.verify {
        report.verifications = execute_verifications(runner, cases);
        report.summary.verification_failures =
            report.verifications.iter().filter(|v| !v.passed).count();
    }

    write_report(&report, format, config.output.path.as_deref())?;

    if report.has_failures() {
        if report.summary.failed + report.summary.timed_out > 0 {
            eprintln!(
                "\n{} variant(s) failed, {} timed out",
                report.summary.failed, report.summary.timed_out
            );
        }
        if report.summary.verification_failures > 0 {
            eprintln!(
                "\n{} verification failure(s)",
                report.summary.verification_failures
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Markdown => generate_markdown_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}

fn write_report(report: &Report, format: OutputFormat, path: Option<&str>) -> anyhow::Result<()> {
    let output = render(report, format)?;

    if let Some(path) = path {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(&path)?;
        file.write_all(output.as_bytes())?;
        eprintln!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopbench_core::{Case, Operation};
    use loopbench_report::parse_json_report;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("loopbench").chain(args.iter().copied())).unwrap()
    }

    fn doubling(runner: &mut Runner, _config: &LoopbenchConfig) -> Result<(), RegistryError> {
        runner.register(
            Case::new("double", Operation::Map, vec![1_i64, 2, 3])
                .indexed(|xs| {
                    let mut out = Vec::with_capacity(xs.len());
                    for i in 0..xs.len() {
                        out.push(xs[i] * 2);
                    }
                    Ok(out)
                })
                .iterator(|xs| Ok(xs.iter().map(|x| x * 2).collect::<Vec<_>>())),
        )
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, ".*");
        assert!(cli.variants.is_empty());
        assert_eq!(cli.threads, 0);
    }

    #[test]
    fn test_flags_and_subcommand() {
        let cli = parse(&[
            "list",
            "--variant",
            "iterator",
            "--variant",
            "declarative",
            "-n",
            "3",
            "--timeout",
            "250ms",
        ]);
        assert!(matches!(cli.command, Some(Commands::List)));
        assert_eq!(cli.variants, ["iterator", "declarative"]);
        assert_eq!(cli.samples, Some(3));
        assert_eq!(cli.timeout.as_deref(), Some("250ms"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let cli = parse(&[
            "--samples",
            "4",
            "--size",
            "50",
            "--seed",
            "7",
            "--verify",
            "--format",
            "json",
        ]);
        let config = apply_overrides(&cli, LoopbenchConfig::default());
        assert_eq!(config.runner.samples, 4);
        assert!(config.runner.verify);
        assert_eq!(config.fixture.size, 50);
        assert_eq!(config.fixture.seed, 7);
        assert_eq!(config.output.format, "json");
        assert_eq!(config.suite_config().size, 50);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let mut file = LoopbenchConfig::default();
        file.runner.samples = 25;
        file.fixture.size = 1_000;
        let config = apply_overrides(&parse(&[]), file);
        assert_eq!(config.runner.samples, 25);
        assert_eq!(config.fixture.size, 1_000);
    }

    #[test]
    fn test_invalid_filter_is_an_error() {
        let err = run_with(parse(&["(", "list"]), doubling).unwrap_err();
        assert!(err.to_string().contains("Invalid filter"));
    }

    #[test]
    fn test_registration_error_propagates() {
        let err = run_with(parse(&["list"]), |runner, config| {
            doubling(runner, config)?;
            doubling(runner, config)
        })
        .unwrap_err();
        assert!(err.to_string().contains("double"));
    }

    #[test]
    fn test_run_writes_json_report() {
        let path = std::env::temp_dir().join(format!(
            "loopbench-cli-test-{}.json",
            std::process::id()
        ));
        let path_arg = path.display().to_string();
        let cli = parse(&[
            "double",
            "run",
            "--format",
            "json",
            "--samples",
            "2",
            "--verify",
            "-o",
            &path_arg,
        ]);
        run_with(cli, doubling).unwrap();

        let report = parse_json_report(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(report.cases.len(), 1);
        let case = &report.cases[0];
        assert_eq!(case.case, "double");
        assert_eq!(case.variants.len(), 2);
        assert_eq!(report.meta.config.samples, 2);
        assert_eq!(report.verifications.len(), 1);
        assert!(report.verifications[0].passed);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_run_without_matching_cases_is_ok() {
        let path = std::env::temp_dir().join(format!(
            "loopbench-cli-empty-{}.json",
            std::process::id()
        ));
        let path_arg = path.display().to_string();
        let cli = parse(&["^nothing$", "--format", "json", "-o", &path_arg]);
        run_with(cli, doubling).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_variant_selection_fails() {
        let cli = parse(&[
            "double",
            "--format",
            "json",
            "--variant",
            "declarative",
            "-o",
            "/dev/null",
        ]);
        let err = run_with(cli, doubling).unwrap_err();
        assert!(err.to_string().contains("declarative"));
    }
}
