use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use hdrdecl::core::{HeaderScanner, Pipeline, PipelineConfig};
use hdrdecl::formatters::OutputFormat;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "hdrdecl",
    version = "0.1.0",
    author = "hdrdecl developers",
    about = "Declarative description of C/C++ header surfaces for binding generators"
)]
struct Cli {
    /// Header files or directories to process
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving one document per header
    #[arg(short, long, value_name = "DIR", default_value = "out")]
    output_dir: PathBuf,

    /// Output format: yaml, json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Do not follow quoted includes
    #[arg(long)]
    no_follow: bool,

    /// Log extraction details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => OutputFormat::Yaml,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        inputs,
        output_dir,
        format,
        no_follow,
        ..
    } = cli;

    let start_time = Instant::now();

    let config = PipelineConfig::default()
        .with_output_dir(output_dir)
        .with_format(format.into())
        .with_follow_includes(!no_follow);

    println!("HDRDECL - Header Surface Extraction");
    println!("Inputs: {}", inputs.len());
    println!("Output: {}", config.output_dir.display());
    println!("Format: {}", config.format.as_str());

    let headers = HeaderScanner::with_extensions(&config.extensions).collect(&inputs)?;
    println!("Found {} headers", headers.len());

    let pipeline = Pipeline::new(config);
    let summary = pipeline.run(&headers)?;

    println!("Written: {}", summary.written.len());
    if !summary.missing.is_empty() {
        println!("Missing: {}", summary.missing.len());
    }
    if !summary.failed.is_empty() {
        println!("Failed: {}", summary.failed.len());
        for (path, reason) in &summary.failed {
            println!("  {}: {}", path.display(), reason);
        }
    }
    if summary.diagnostics > 0 {
        println!("Diagnostics: {}", summary.diagnostics);
    }

    let total_time = start_time.elapsed();
    println!("Total execution time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
