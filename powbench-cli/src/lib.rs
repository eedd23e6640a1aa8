#![warn(missing_docs)]
//! powbench CLI Library
//!
//! Command line, configuration, planning and output for the `powbench`
//! binary. Running with no arguments and no `powbench.toml` reproduces the
//! classic run: base `1.000000001`, exponents `1..=10^9` by decades, one
//! million calls per trial, linear kernel skipped above exponent 2000.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     powbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, build_report, format_block_human, format_header,
    format_summary_human,
};
pub use planner::{
    ExecutionPlan, PlannedBlock, PlannedTrial, Schedule, build_plan, generate_exponents,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use powbench_core::{Clock, MeasureError, registered_kernels};
use powbench_report::{
    CSV_HEADER, OutputFormat, Report, generate_csv_rows, generate_json_report,
};
use regex::Regex;
use std::io::Write;
use std::time::Instant;

/// powbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "powbench")]
#[command(author, version, about = "powbench - time linear, squaring and libm exponentiation")]
pub struct Cli {
    /// Optional subcommand (Run, List, Config); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter kernels by regex on their id
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Timed calls per trial
    #[arg(long, short = 'n')]
    pub iterations: Option<u64>,

    /// Base shared by every trial
    #[arg(long)]
    pub base: Option<f64>,

    /// Largest generated exponent
    #[arg(long)]
    pub max_exponent: Option<u32>,

    /// Exponent growth: decade or alternating
    #[arg(long)]
    pub growth: Option<Growth>,

    /// Skip linear-cost kernels above this exponent
    #[arg(long)]
    pub linear_limit: Option<u32>,

    /// Pin the measuring thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Dry run - show the plan without measuring
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmark (default)
    Run,
    /// List kernels and the planned schedule
    List,
    /// Print the default powbench.toml to stdout
    Config,
}

/// Effective settings after layering defaults, powbench.toml and flags
#[derive(Debug, Clone)]
pub struct Settings {
    /// Execution settings
    pub execution: ExecutionConfig,
    /// Exponent schedule
    pub schedule: Schedule,
    /// Output format
    pub format: OutputFormat,
    /// Kernel filter
    pub filter: Regex,
}

impl Settings {
    /// Layer: config file values, then CLI overrides. Fails fast on anything
    /// that would make a trial invalid.
    pub fn resolve(cli: &Cli, config: &PowConfig) -> anyhow::Result<Self> {
        let iterations = cli.iterations.unwrap_or(config.runner.iterations);
        if iterations == 0 {
            return Err(MeasureError::invalid("iteration count must be greater than zero").into());
        }

        let schedule = Schedule::new(
            cli.base.unwrap_or(config.schedule.base),
            // A generated-schedule flag on the command line wins over a file list
            if cli.max_exponent.is_some() || cli.growth.is_some() {
                None
            } else {
                config.schedule.exponents.as_deref()
            },
            config.schedule.start_exponent,
            cli.max_exponent.unwrap_or(config.schedule.max_exponent),
            cli.growth.unwrap_or(config.schedule.growth),
        )?;

        let format_str = cli.format.as_deref().unwrap_or(&config.output.format);
        let format: OutputFormat = format_str.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        let filter = Regex::new(&cli.filter)
            .with_context(|| format!("invalid kernel filter '{}'", cli.filter))?;

        Ok(Self {
            execution: ExecutionConfig {
                iterations,
                linear_limit: cli.linear_limit.unwrap_or(config.runner.linear_limit),
                pin_cpu: cli.pin_cpu.or(config.runner.pin_cpu),
            },
            schedule,
            format,
            filter,
        })
    }

    /// Build the execution plan from registered kernels
    pub fn plan(&self) -> ExecutionPlan {
        build_plan(
            registered_kernels(),
            Some(&self.filter),
            &self.schedule,
            self.execution.linear_limit,
        )
    }
}

/// Run the powbench CLI with the process arguments.
/// This is the main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the powbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if let Some(Commands::Config) = cli.command {
        print!("{}", PowConfig::default_toml());
        return Ok(());
    }

    let config = PowConfig::discover()?.unwrap_or_default();
    let settings = Settings::resolve(&cli, &config)?;

    match cli.command {
        Some(Commands::List) => list_plan(&settings),
        Some(Commands::Run) => run_and_exit(&settings),
        Some(Commands::Config) => Ok(()),
        None => {
            if cli.dry_run {
                list_plan(&settings)
            } else {
                run_and_exit(&settings)
            }
        }
    }
}

/// Initialize the tracing subscriber; logs go to stderr
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "powbench=debug,powbench_cli=debug,powbench_core=debug"
    } else {
        "powbench=info,powbench_cli=info,powbench_core=info"
    };

    // Tolerate a subscriber installed by an embedding program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_plan(settings: &Settings) -> anyhow::Result<()> {
    let plan = settings.plan();

    println!("powbench Plan:");
    println!("├── kernels:");
    let kernels = plan.blocks.first().map(|b| b.trials.as_slice()).unwrap_or(&[]);
    for trial in kernels {
        println!(
            "│   ├── {} ({}, {})",
            trial.kernel.id,
            trial.kernel.name,
            trial.kernel.complexity.as_str()
        );
    }

    println!("├── base: {}", settings.schedule.base);
    println!("├── exponents:");
    for block in &plan.blocks {
        let skipped: Vec<_> = block
            .trials
            .iter()
            .filter(|t| t.skip_reason.is_some())
            .map(|t| t.kernel.id)
            .collect();
        if skipped.is_empty() {
            println!("│   ├── {}", block.exponent);
        } else {
            println!("│   ├── {} (skip: {})", block.exponent, skipped.join(", "));
        }
    }

    println!(
        "{} trial(s) planned, {} call(s) each.",
        plan.measured_trials(),
        settings.execution.iterations
    );

    Ok(())
}

/// Run the plan, print results, and exit non-zero if any trial failed
fn run_and_exit(settings: &Settings) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let report = run_plan(settings, &mut out)?;

    if report.summary.has_failures() {
        eprintln!("\n{} trial(s) failed", report.summary.failed);
        std::process::exit(1);
    }

    Ok(())
}

/// Execute the plan, streaming output to `out`, and return the final report.
///
/// Human and CSV output are written and flushed block by block; JSON is
/// written once at the end.
pub fn run_plan(settings: &Settings, out: &mut impl Write) -> anyhow::Result<Report> {
    let executor = Executor::new(settings.execution.clone());
    run_plan_with(settings, &executor, out)
}

/// [`run_plan`] with a caller-supplied executor
pub fn run_plan_with<C: Clock>(
    settings: &Settings,
    executor: &Executor<C>,
    out: &mut impl Write,
) -> anyhow::Result<Report> {
    let plan = settings.plan();
    if plan.blocks.iter().all(|b| b.trials.is_empty()) {
        anyhow::bail!("no kernels match filter '{}'", settings.filter.as_str());
    }

    tracing::info!(
        blocks = plan.blocks.len(),
        trials = plan.measured_trials(),
        iterations = settings.execution.iterations,
        "starting run"
    );

    match settings.format {
        OutputFormat::Human => out.write_all(
            format_header(settings.execution.iterations, plan.measured_trials()).as_bytes(),
        )?,
        OutputFormat::Csv => out.write_all(CSV_HEADER.as_bytes())?,
        OutputFormat::Json => {}
    }
    out.flush()?;

    let start_time = Instant::now();
    let blocks = executor.execute(&plan, |block| {
        let text = match settings.format {
            OutputFormat::Human => format_block_human(block),
            OutputFormat::Csv => generate_csv_rows(block),
            OutputFormat::Json => return Ok(()),
        };
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    })?;

    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let report = build_report(blocks, &settings.execution, total_duration_ms);

    match settings.format {
        OutputFormat::Human => out.write_all(format_summary_human(&report.summary).as_bytes())?,
        OutputFormat::Json => {
            out.write_all(generate_json_report(&report)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
        OutputFormat::Csv => {}
    }
    out.flush()?;

    Ok(report)
}
