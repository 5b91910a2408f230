use std::path::PathBuf;

use clap::Parser;

/// Terminal speed reader.
///
/// Flashes a text file chunk by chunk at a fixed pace, highlighting the
/// character the eye should rest on.
#[derive(Parser, Debug)]
#[command(name = "flashread", version, about = "Terminal speed reader")]
pub struct CliArgs {
    /// Plain text file to read
    pub file: PathBuf,

    /// Words per minute (overrides env var and config file)
    #[arg(long)]
    pub wpm: Option<u32>,

    /// Words per frame (overrides env var and config file)
    #[arg(long)]
    pub wpf: Option<u32>,

    /// Path to config file (default: ~/.config/flashread/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Print every chunk with its features as JSON lines and exit
    #[arg(long)]
    pub dump: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = CliArgs::parse_from(["flashread", "book.txt", "--wpm", "450", "--dump"]);
        assert_eq!(args.file, PathBuf::from("book.txt"));
        assert_eq!(args.wpm, Some(450));
        assert_eq!(args.wpf, None);
        assert!(args.dump);
    }

    #[test]
    fn file_is_required() {
        assert!(CliArgs::try_parse_from(["flashread"]).is_err());
    }
}
