use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use lfind_simd::harness::bench::{run_benchmarks, run_worst_case, BenchReport, WorstCaseReport};
use lfind_simd::harness::verify::{run_verification, VerifyReport};
use lfind_simd::harness::workload::parse_u32_le;
use lfind_simd::{lfind32, lfind8, lfind8_le, BackendInfo, HarnessConfig, LfindError};
use log::{debug, error, info, warn};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Vectorized linear search: verification, benchmarks and ad-hoc lookups
#[derive(Parser)]
#[command(name = "lfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Harness configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Element width for `find`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Width {
    /// Unsigned bytes
    #[value(name = "8")]
    W8,
    /// Little-endian unsigned 32-bit words
    #[value(name = "32")]
    W32,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the compiled backend and driver strides
    Info,

    /// Check every driver against the scalar reference scans
    Verify,

    /// Time the SIMD drivers against linear scans
    Bench {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Array sizes to measure (comma-separated)
        #[arg(long, value_delimiter = ',', value_name = "N,...")]
        sizes: Vec<usize>,

        /// Search keys per array size
        #[arg(long, value_name = "N")]
        iterations: Option<usize>,
    },

    /// Search a file (or stdin) for a key
    Find {
        /// Key to search for
        #[arg(short, long)]
        key: u32,

        /// Element width of the input
        #[arg(short, long, value_enum, default_value = "8")]
        width: Width,

        /// Match elements less than or equal to the key (width 8 only)
        #[arg(long)]
        le: bool,

        /// Input file (use '-' for stdin)
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: String,
    },
}

/// Exit status when `find` completes without a match.
const EXIT_NOT_FOUND: u8 = 1;

/// Exit status for any error, distinct from "not found".
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity flags
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HarnessConfig::default(),
    };

    match cli.command {
        Commands::Info => info_command(cli.verbose)?,
        Commands::Verify => verify_command(&config, cli.quiet)?,
        Commands::Bench {
            json,
            output,
            sizes,
            iterations,
        } => bench_command(config, json, output.as_deref(), sizes, iterations, cli.quiet)?,
        Commands::Find {
            key,
            width,
            le,
            input,
        } => {
            if !find_command(key, width, le, &input)? {
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Set up logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let log_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logging initialized at {} level", log_level);
}

/// Load a harness configuration file (parsed and validated)
fn load_config(path: &Path) -> Result<HarnessConfig> {
    debug!("Loading configuration from {}", path.display());
    HarnessConfig::from_file(path)
        .map_err(|e| map_lfind_error(e, &format!("Loading {}", path.display())))
}

/// Read input bytes from file or stdin
fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

/// Write a report to a file or stdout
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

/// Execute the info command
fn info_command(verbose: bool) -> Result<()> {
    let info = BackendInfo::current();

    println!("Backend:         {}", info.backend);
    println!("Vector width:    {} bytes", info.vector_bytes);
    println!("lfind8 stride:   {} elements", info.lfind8_stride);
    println!("lfind32 stride:  {} elements", info.lfind32_stride);
    println!("Target features: {}", info.target_features.join(", "));

    if verbose {
        let json = serde_json::to_string_pretty(&info).context("Failed to encode backend info")?;
        println!("{}", json);
    }
    Ok(())
}

/// Execute the verify command
fn verify_command(config: &HarnessConfig, quiet: bool) -> Result<()> {
    info!(
        "Verifying drivers (sweep up to {} elements, sampled arrays of {})",
        config.verify.sweep_len(),
        config.verify.sampled_len
    );

    let progress = create_progress_bar(quiet, "Verifying");
    let start = Instant::now();
    let report = run_verification(&config.verify);
    progress.finish_and_clear();
    let report = report.map_err(|e| map_lfind_error(e, "Verification"))?;

    if !quiet {
        print_verify_report(&report);
    }
    for failure in report.failures().take(20) {
        error!("{}", failure);
    }
    info!("Verification finished in {:.3}s", start.elapsed().as_secs_f64());

    report
        .into_result()
        .map(|_| ())
        .map_err(|e| map_lfind_error(e, "Verification"))
}

fn print_verify_report(report: &VerifyReport) {
    for section in &report.sections {
        let status = if section.failures.is_empty() {
            "PASS"
        } else {
            "FAIL"
        };
        println!(
            "{:<14} {:>10} checks {:>8} failed  {}",
            section.name,
            section.checks,
            section.failures.len(),
            status
        );
    }
    println!(
        "Total: {}/{} passed ({:.2}%)",
        report.passed_checks(),
        report.total_checks(),
        report.success_rate()
    );
}

/// Execute the bench command
fn bench_command(
    mut config: HarnessConfig,
    json: bool,
    output: Option<&Path>,
    sizes: Vec<usize>,
    iterations: Option<usize>,
    quiet: bool,
) -> Result<()> {
    if !sizes.is_empty() {
        config.bench.sizes = sizes;
    }
    if let Some(iterations) = iterations {
        config.bench.iterations = iterations;
    }

    let largest = config.bench.sizes.iter().copied().max().unwrap_or(0);
    if largest >= 10_000_000 {
        warn!(
            "Largest array is {}; generating the data takes a while",
            format_bytes(largest * 4)
        );
    }

    let progress = create_progress_bar(quiet, "Benchmarking");
    let result = run_benchmarks(&config.bench).and_then(|report| {
        progress.set_message("Worst case");
        run_worst_case(&config.bench).map(|worst| (report, worst))
    });
    progress.finish_and_clear();
    let (report, worst) = result.map_err(|e| map_lfind_error(e, "Benchmark"))?;

    let rendered = if json {
        let value = serde_json::json!({ "benchmark": report, "worst_case": worst });
        let mut text = serde_json::to_string_pretty(&value).context("Failed to encode report")?;
        text.push('\n');
        text
    } else {
        render_bench_table(&report, &worst)
    };
    write_output(output, &rendered)?;

    if let Some(path) = output {
        info!("Report written to {}", path.display());
    }
    if !report.all_verified() {
        anyhow::bail!(
            "{} of {} benchmark rows disagreed with the linear scan",
            report.summary.failed,
            report.summary.total
        );
    }
    Ok(())
}

fn render_bench_table(report: &BenchReport, worst: &WorstCaseReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Backend: {} ({} bytes), {} keys per size\n\n",
        report.backend.backend, report.backend.vector_bytes, report.iterations
    ));
    out.push_str(&format!(
        "{:<18} {:>12} {:>12} {:>12} {:>9}  {}\n",
        "Name", "Size", "SIMD ms", "Linear ms", "Speedup", "Check"
    ));
    for r in &report.results {
        out.push_str(&format!(
            "{:<18} {:>12} {:>12.3} {:>12.3} {:>8.2}x  {}\n",
            r.name,
            r.array_size,
            r.simd_ms,
            r.linear_ms,
            r.speedup,
            if r.correctness_verified { "PASS" } else { "FAIL" }
        ));
    }
    out.push_str(&format!(
        "\nPassed {}/{}, average speedup {:.2}x\n",
        report.summary.passed, report.summary.total, report.summary.average_speedup
    ));
    out.push_str(&format!(
        "Worst case: key {} absent from {} elements, {} reps: SIMD {:.3} ms, linear {:.3} ms ({:.2}x)\n",
        worst.key, worst.array_size, worst.reps, worst.simd_ms, worst.linear_ms, worst.speedup
    ));
    out
}

/// Execute the find command; returns whether the key was found
fn find_command(key: u32, width: Width, le: bool, input: &str) -> Result<bool> {
    if le && width != Width::W8 {
        anyhow::bail!("--le is only supported with --width 8");
    }

    let data = read_input(input)?;
    debug!("Read {} from {}", format_bytes(data.len()), input);

    let found = match width {
        Width::W8 => {
            let key = u8::try_from(key)
                .with_context(|| format!("Key {} does not fit in 8 bits", key))?;
            if le {
                lfind8_le(key, &data)
            } else {
                lfind8(key, &data)
            }
        }
        Width::W32 => {
            let words = parse_u32_le(&data).map_err(|e| map_lfind_error(e, "Parsing input"))?;
            lfind32(key, &words)
        }
    };

    println!("{}", if found { "found" } else { "not found" });
    Ok(found)
}

/// Create a progress bar (spinner) for operations
fn create_progress_bar(quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format bytes in human-readable format
fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Map LfindError to anyhow::Error with context
fn map_lfind_error(error: LfindError, context: &str) -> anyhow::Error {
    match error {
        LfindError::InvalidConfig { field, message } => {
            anyhow::anyhow!("{}: invalid configuration field '{}': {}", context, field, message)
        }
        LfindError::MisalignedInput { len, width } => {
            anyhow::anyhow!(
                "{}: input of {} bytes is not a multiple of the {}-byte element width",
                context,
                len,
                width
            )
        }
        LfindError::VerificationFailed { failures, total } => {
            anyhow::anyhow!("{}: {} of {} checks failed", context, failures, total)
        }
        LfindError::JsonError(e) => anyhow::anyhow!("{}: JSON error: {}", context, e),
        LfindError::IoError(e) => anyhow::anyhow!("{}: IO error: {}", context, e),
    }
}
