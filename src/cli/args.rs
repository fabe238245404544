//! Command-line argument parsing.

/// What the binary was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the version and exit
    Version,
    /// Run the workbench (default)
    RunTui,
}

/// Parse command-line arguments, program name first.
///
/// Unknown arguments are ignored.
///
/// ```
/// use apibench::cli::{parse_args, CliCommand};
///
/// let args = vec!["apibench".to_string(), "-V".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    if args
        .skip(1)
        .any(|arg| matches!(arg.as_str(), "--version" | "-V"))
    {
        CliCommand::Version
    } else {
        CliCommand::RunTui
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(parse(&["apibench", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["apibench", "-V"]), CliCommand::Version);
        assert_eq!(parse(&["apibench", "--other", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_default_runs_tui() {
        assert_eq!(parse(&["apibench"]), CliCommand::RunTui);
        assert_eq!(parse(&["apibench", "--unknown"]), CliCommand::RunTui);
        // The program name itself is never a flag
        assert_eq!(parse(&["-V"]), CliCommand::RunTui);
    }
}
