//! Logger installation for the binary.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install `env_logger` at `level`. `RUST_LOG`, when set, takes precedence.
pub fn init_logging(level: LevelFilter) {
    let env = Env::default().default_filter_or(level.as_str());
    let _ = Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "brstream: {}", record.args()))
        .try_init();
}
