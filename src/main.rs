/*!
 * Command-line interface for dirdump
 */

use std::backtrace::Backtrace;
use std::fs;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use dirdump::config::{Args, Config};
use dirdump::error::Result;
use dirdump::report::{ReportFormat, Reporter, ScanReport};
use dirdump::scanner::Scanner;
use dirdump::writer::ReportWriter;

fn main() -> ExitCode {
    // Warnings go to stderr so they never mix with the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error during scanning: {}", e);
            eprintln!("{}", Backtrace::force_capture());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    config.validate()?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files ⏱️  {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("🔍 Scanning");

    let scanner = Scanner::new(&config, Arc::new(progress.clone()))?;
    progress.println(format!("🔍 Scanning directory: {}", scanner.root().display()));
    progress.println(format!("💾 Output file: {}", config.output_file.display()));
    progress.println(format!(
        "Found {} gitignore patterns",
        scanner.matcher().patterns().len()
    ));

    let start_time = Instant::now();

    let mut writer = ReportWriter::create(&config.output_file)?;
    let stats = scanner.scan(&mut writer)?;
    writer.finish()?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    let output_size = fs::metadata(&config.output_file).ok().map(|m| m.len());
    let report = ScanReport::from_statistics(
        scanner.root().display().to_string(),
        config.output_file.display().to_string(),
        output_size,
        duration,
        stats,
    );

    let format = if io::stdout().is_terminal() {
        ReportFormat::ConsoleTable
    } else {
        ReportFormat::Plain
    };
    Reporter::new(format).print_report(&report);

    Ok(())
}
