//! Command-line handling.
//!
//! The only flag is `--version`/`-V`; everything else starts the TUI. The
//! flag is handled before the terminal is touched:
//!
//! ```ignore
//! use apibench::cli::{parse_args, version_line, CliCommand};
//!
//! if parse_args(std::env::args()) == CliCommand::Version {
//!     println!("{}", version_line());
//!     return Ok(());
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{version_line, VERSION};
