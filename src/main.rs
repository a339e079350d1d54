use clap::Parser;
use rldd::query::ScanQuery;
use rldd::{report, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find the ELF executables under a directory that depend on the given shared libraries
#[derive(Debug, Parser)]
#[command(name = "rldd", version, about = "reverse ldd - find the executables using a shared library")]
struct Cli {
    /// Directory to scan for executables
    directory: PathBuf,

    /// Shared library names to find dependents of (exact match)
    #[arg(required = true)]
    libraries: Vec<String>,

    /// Name of the produced report file
    #[arg(short, long, value_name = "FILE", default_value = "rldd_report.txt")]
    output: PathBuf,

    /// Scan the directory recursively
    #[arg(short, long)]
    recursive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of worker threads (default: deduced from the host)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Also write the findings as JSON to this path
    #[arg(short = 'j', long, value_name = "FILE")]
    json_output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if !cli.directory.exists() {
        eprintln!(
            "Specified directory not found at {}",
            cli.directory.display()
        );
        std::process::exit(1);
    }
    if !cli.directory.is_dir() {
        eprintln!(
            "The specified path is not a directory: {}",
            cli.directory.display()
        );
        std::process::exit(1);
    }

    let mut query = ScanQuery::for_directory(&cli.directory, cli.libraries);
    query.parameters.recursive = cli.recursive;
    query.parameters.max_workers = cli.workers;
    query.validate()?;

    println!("Scanning directory: {}", cli.directory.display());
    println!(
        "Selecting libraries: {}",
        query.target.libraries.join(", ")
    );
    if cli.recursive {
        println!("Scanning recursively");
    }

    let results = scan(&query)?;

    if results.is_empty() {
        println!("No executables found.");
        return Ok(());
    }

    println!("Generating report to {}", cli.output.display());
    report::write_text_report(&results, &cli.output, &cli.directory)?;
    if let Some(json_output) = &cli.json_output {
        report::write_json_report(&results, json_output, &cli.directory)?;
    }
    println!("Report successfully saved to {}", cli.output.display());

    Ok(())
}
