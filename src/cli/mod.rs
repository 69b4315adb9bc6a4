//! Command-line interface for the `brstream` binary.
//!
//! | Submodule | Responsibility |
//! |-----------|----------------|
//! | [`args`]  | `CliArgs` (clap), parameter layering, input/output planning. |
//! | [`init`]  | `env_logger` installation. |

pub mod args;
pub mod init;

pub use args::{CliArgs, Plan};
pub use init::init_logging;
