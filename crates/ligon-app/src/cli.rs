use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ligon", author, version, about = "Run a Ligon scene script", long_about = None,
    after_help = "Exit codes: 0 ok, 1 parse failure, strict-mode warning or unreadable script, \
                  2 script not found, 3 no rendering backend"
)]
pub struct Cli {
    /// Path to the .ligon file
    pub file: PathBuf,

    /// Run this many ticks without opening a window
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,

    /// Fail on any warning (dropped line, unknown call, bad condition, missing asset)
    #[arg(long)]
    pub strict: bool,

    /// Log filter in env_logger syntax, e.g. "ligon_lang=trace"
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from(["ligon", "game.ligon", "--headless", "30", "--strict", "-v"]);
        assert_eq!(cli.file, PathBuf::from("game.ligon"));
        assert_eq!(cli.headless, Some(30));
        assert!(cli.strict);
        assert!(cli.verbose);
        assert!(cli.log.is_none());
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["ligon"]).is_err());
    }
}
