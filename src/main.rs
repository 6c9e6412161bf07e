//! Command-line entry point: plot a FlowJo statistics table to PDF.
//!
//! # Usage
//!
//! ```sh
//! fjstatplot -i stats.txt -o stats.pdf -d 1 \
//!     -l ctrl stim -g donor1 donor2 --excel stats.xlsx
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fjstatplot::logging;
use fjstatplot::pipeline::{self, RunConfig};

/// Plot FlowJo gating statistics as paginated bar and swarm charts
#[derive(Parser, Debug)]
#[command(name = "fjstatplot", version, about)]
struct Args {
    /// Tab-separated table exported from FlowJo
    #[arg(short, long, value_name = "INPUT")]
    input: PathBuf,

    /// PDF file to write the charts to
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Number of parent gates to keep in column names (0 keeps the leaf gate)
    #[arg(short = 'd', long = "gateDepth", value_name = "DEPTH")]
    gate_depth: Option<usize>,

    /// Labels for the samples, repeated end to end across the rows
    #[arg(short, long, num_args = 0.., value_name = "LABEL")]
    labels: Vec<String>,

    /// Groups for the samples, each covering a contiguous block of rows
    #[arg(short, long, num_args = 0.., value_name = "GROUP")]
    groups: Vec<String>,

    /// Also write the final table as a spreadsheet
    #[arg(long, value_name = "FILE")]
    excel: Option<PathBuf>,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> RunConfig {
        let mut config = RunConfig::new(self.input, self.output)
            .with_labels(self.labels)
            .with_groups(self.groups);
        if let Some(depth) = self.gate_depth {
            config = config.with_gate_depth(depth);
        }
        if let Some(excel) = self.excel {
            config = config.with_excel(excel);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Error: {}", e);
    }

    let config = args.into_config();
    match pipeline::run(&config) {
        Ok(summary) => {
            tracing::info!(
                rows = summary.rows,
                columns = summary.columns,
                pages = summary.pages,
                "done"
            );
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
