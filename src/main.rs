use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use photolooks::driver::{self, RunConfig, Schedule};
use photolooks::ParameterTable;

#[derive(Parser)]
#[command(name = "photolooks")]
#[command(version, about = "Render ten creative looks from a single photo", long_about = None)]
struct Cli {
    /// Input image (any format the decoder understands)
    #[arg(long, value_name = "PATH", required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(long, value_name = "DIR", required_unless_present = "list")]
    out: Option<PathBuf>,

    /// Apply the looks one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Number of parallel threads
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print every look with its parameters and exit
    #[arg(long)]
    list: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("photolooks={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_looks() {
    let table = ParameterTable::builtin();
    for (kind, params) in table.iter() {
        println!("{:02}  {:<20} {}", kind.index(), kind.name(), params);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list {
        print_looks();
        return ExitCode::SUCCESS;
    }

    let (Some(input), Some(out_dir)) = (cli.input, cli.out) else {
        eprintln!("Error: --input and --out are required");
        return ExitCode::FAILURE;
    };

    let config = RunConfig {
        input,
        out_dir,
        schedule: if cli.sequential {
            Schedule::Sequential
        } else {
            Schedule::Parallel
        },
        jobs: cli.jobs,
    };

    match driver::run(&config) {
        Ok(summary) => {
            for outcome in summary.failed() {
                if let Err(e) = &outcome.result {
                    tracing::warn!(filter = %outcome.kind, error = %e, "skipped");
                }
            }
            tracing::info!(
                written = summary.succeeded(),
                out = %config.out_dir.display(),
                elapsed_ms = summary.total_elapsed().as_millis() as u64,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(input = %config.input.display(), error = %e, "cannot process input");
            ExitCode::FAILURE
        }
    }
}
