//! Command-line arguments of the `brstream` binary.
//!
//! Parsed with `clap`; [`CliArgs::parameters`] layers explicit flags over the
//! environment defaults from [`crate::config`], and [`CliArgs::io_prefs`]
//! builds the file-level preferences.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{EncoderMode, Parameters};
use crate::io::file_io::{STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{IoPrefs, BROTLI_EXTENSION, KB};
use crate::stream::WindowPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Generic,
    Text,
    Font,
}

impl From<ModeArg> for EncoderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Generic => EncoderMode::Generic,
            ModeArg::Text => EncoderMode::Text,
            ModeArg::Font => EncoderMode::Font,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "brstream",
    version,
    about = "Compress files into Brotli streams through a windowing compressor",
    long_about = None
)]
pub struct CliArgs {
    /// Input files; none or "-" reads standard input
    pub files: Vec<String>,

    /// Output file (single input only)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Write to standard output
    #[arg(short = 'c', long)]
    pub stdout: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Remove source files after successful compression
    #[arg(short = 'j', long = "rm")]
    pub remove: bool,

    /// Output suffix
    #[arg(short = 'S', long, default_value = BROTLI_EXTENSION)]
    pub suffix: String,

    /// Compression quality (0-11)
    #[arg(short = 'q', long, value_parser = clap::value_parser!(u32).range(0..=11))]
    pub quality: Option<u32>,

    /// Base-2 logarithm of the sliding window size (10-24)
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(10..=24))]
    pub lgwin: Option<u32>,

    /// Base-2 logarithm of the input block size (0 = automatic, 16-24)
    #[arg(long)]
    pub lgblock: Option<u32>,

    /// Encoder mode hint
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Consume at most one engine window per compress call
    #[arg(long)]
    pub single_window: bool,

    /// Flush the Brotli stream after every read chunk
    #[arg(long)]
    pub flush: bool,

    /// Read chunk size in KiB
    #[arg(long, default_value_t = 4096)]
    pub chunk_kib: usize,

    /// More output (repeat for debug / trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Where one invocation reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Single { src: String, dst: String },
    Multiple { srcs: Vec<String>, suffix: String },
}

impl CliArgs {
    /// Engine parameters: environment defaults with explicit flags on top.
    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        let mut params = Parameters::from_env();
        if let Some(quality) = self.quality {
            params = params.with_quality(quality);
        }
        if let Some(lgwin) = self.lgwin {
            params = params.with_lgwin(lgwin);
        }
        if let Some(lgblock) = self.lgblock {
            params = params.with_lgblock(lgblock);
        }
        if let Some(mode) = self.mode {
            params = params.with_mode(mode.into());
        }
        params.validate().context("invalid compression parameters")?;
        Ok(params)
    }

    pub fn io_prefs(&self) -> anyhow::Result<IoPrefs> {
        let policy = if self.single_window {
            WindowPolicy::SingleWindow
        } else {
            WindowPolicy::DrainAll
        };
        let mut prefs = IoPrefs::default()
            .with_params(self.parameters()?)
            .with_policy(policy)
            .with_overwrite(self.force)
            .with_read_chunk(self.chunk_kib.saturating_mul(KB));
        prefs.remove_src_file = self.remove;
        prefs.flush_each_chunk = self.flush;
        Ok(prefs)
    }

    /// Resolve inputs and outputs.
    pub fn plan(&self) -> anyhow::Result<Plan> {
        let srcs: Vec<String> = self
            .files
            .iter()
            .map(|f| if f == "-" { STDIN_MARK.to_owned() } else { f.clone() })
            .collect();

        if srcs.len() > 1 {
            if self.output.is_some() {
                bail!("-o cannot be used with multiple input files");
            }
            let suffix = if self.stdout {
                STDOUT_MARK.to_owned()
            } else {
                self.suffix.clone()
            };
            return Ok(Plan::Multiple { srcs, suffix });
        }

        let src = srcs.into_iter().next().unwrap_or_else(|| STDIN_MARK.to_owned());
        let dst = match (&self.output, self.stdout) {
            (Some(_), true) => bail!("-o and -c are mutually exclusive"),
            (Some(out), false) => out.clone(),
            (None, true) => STDOUT_MARK.to_owned(),
            (None, false) if src == STDIN_MARK => STDOUT_MARK.to_owned(),
            (None, false) => format!("{src}{}", self.suffix),
        };
        Ok(Plan::Single { src, dst })
    }

    /// `log` level implied by `-v` / `--quiet`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
