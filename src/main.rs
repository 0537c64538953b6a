use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sparsecalc::io::{default_output_path, format_dimensions, load_matrix, write_result, WriteMode};
use sparsecalc::{ExecConfig, Operation};

#[derive(Parser)]
#[command(name = "sparsecalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Add, subtract or multiply two sparse integer matrices")]
#[command(
    long_about = "Add, subtract or multiply two sparse integer matrices\n\n\
    Each input file starts with `rows=<n>` and `cols=<n>` lines followed by one\n\
    `(row, col, value)` line per non-zero entry. The result's dimensions are\n\
    written to the output file.\n\n\
    Examples:\n\
      sparsecalc add a.txt b.txt\n\
      sparsecalc multiply a.txt b.txt -o product.txt --entries --print"
)]
struct Cli {
    /// Operation to perform: add, subtract or multiply
    #[arg(value_name = "OPERATION", value_parser = parse_operation)]
    operation: Operation,

    /// Left operand
    #[arg(value_name = "MATRIX_A")]
    a: PathBuf,

    /// Right operand
    #[arg(value_name = "MATRIX_B")]
    b: PathBuf,

    /// Output file (default: <output-dir>/<a>_<b>_results.txt)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory for the default output file
    #[arg(long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// Write every result entry, not just the dimensions
    #[arg(long)]
    entries: bool,

    /// Print the resulting matrix to stdout
    #[arg(long)]
    print: bool,

    /// Worker threads for large operands (default: all cores)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse().map_err(|e: sparsecalc::SparseError| e.to_string())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ExecConfig::default();
    if let Some(n) = cli.threads {
        config = config.with_threads(n);
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.n_threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let a = load_matrix(&cli.a).with_context(|| format!("loading {}", cli.a.display()))?;
    let b = load_matrix(&cli.b).with_context(|| format!("loading {}", cli.b.display()))?;
    info!(
        a = ?a.shape(),
        b = ?b.shape(),
        op = %cli.operation,
        "operands loaded"
    );

    let result = cli
        .operation
        .apply_with(&a, &b, &config)
        .with_context(|| format!("{} failed", cli.operation))?;

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.output_dir, &cli.a, &cli.b));
    let mode = if cli.entries {
        WriteMode::Full
    } else {
        WriteMode::Dimensions
    };
    write_result(&output, &result, mode)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), nnz = result.nnz(), "result written");

    if cli.print {
        println!("Resulting Matrix:");
        print!("{}", result);
    } else {
        println!("{}", format_dimensions(&result));
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
