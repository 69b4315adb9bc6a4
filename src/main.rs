//! Binary entry point for the `brstream` command-line tool.
//!
//! 1. [`CliArgs`] is parsed by clap and the logger installed.
//! 2. [`CliArgs::plan`] resolves inputs and outputs.
//! 3. [`run`] refuses console I/O where it makes no sense and dispatches to
//!    the file compression API.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use brstream::cli::{init_logging, CliArgs, Plan};
use brstream::io::{compress_filename, compress_multiple_filenames, STDIN_MARK, STDOUT_MARK};

fn run(args: &CliArgs) -> anyhow::Result<ExitCode> {
    let prefs = args.io_prefs()?;
    let plan = args.plan()?;
    info!(
        "*** brstream v{} (quality {}, lgwin {}, window {} KiB) ***",
        brstream::VERSION,
        prefs.params.quality,
        prefs.params.lgwin,
        prefs.params.input_block_size() >> 10
    );

    match plan {
        Plan::Single { src, dst } => {
            if src == STDIN_MARK && std::io::stdin().is_terminal() {
                bail!("refusing to read from a console");
            }
            if dst == STDOUT_MARK && !args.stdout && std::io::stdout().is_terminal() {
                bail!("refusing to write to console without -c");
            }
            compress_filename(&src, &dst, &prefs)
                .with_context(|| format!("cannot compress {src}"))?;
            Ok(ExitCode::SUCCESS)
        }
        Plan::Multiple { srcs, suffix } => {
            let srcs: Vec<&str> = srcs.iter().map(String::as_str).collect();
            let missed = compress_multiple_filenames(&srcs, &suffix, &prefs);
            if missed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                log::error!("{missed} of {} files could not be compressed", srcs.len());
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.log_level());

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("brstream: {e:#}");
            ExitCode::FAILURE
        }
    }
}
