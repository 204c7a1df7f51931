//! CLI argument parsing for configdumper

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cfd")]
#[command(author, version, about = "Show a configuration registry sorted by key", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Registry file to read (overrides registry-path from config)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Product name shown in the header
    #[arg(long)]
    pub product: Option<String>,

    /// Fail if version/repository-version is missing
    #[arg(long)]
    pub strict: bool,

    /// Always print to stdout, even on a terminal
    #[arg(long)]
    pub console: bool,

    /// List keys without values
    #[arg(short, long)]
    pub keys_only: bool,

    /// Print shell assignments (version/version: 1.0 → version_version="1.0")
    #[arg(long)]
    pub shell: bool,

    /// Only show keys matching this regex
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["cfd"]).unwrap();
        assert!(cli.file.is_none());
        assert!(!cli.console);
        assert!(!cli.strict);
        assert!(!cli.keys_only);
        assert!(!cli.shell);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "cfd",
            "-f",
            "/tmp/base.conf",
            "--console",
            "--strict",
            "-k",
            "--shell",
            "--filter",
            "^version/",
            "-l",
            "debug",
            "--product",
            "Demo",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("/tmp/base.conf")));
        assert!(cli.console);
        assert!(cli.strict);
        assert!(cli.keys_only);
        assert!(cli.shell);
        assert_eq!(cli.filter.as_deref(), Some("^version/"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.product.as_deref(), Some("Demo"));
    }
}
