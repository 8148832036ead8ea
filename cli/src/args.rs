use std::ops::Range;
use std::path::PathBuf;

use b64convert::plugin::{CommandId, PLUGIN_INFO};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "b64convert")]
#[command(about = PLUGIN_INFO.description)]
#[command(version = PLUGIN_INFO.version, author = PLUGIN_INFO.author)]
pub struct Cli {
    /// Host configuration directory holding the plugin settings
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Wrap encoded lines after COLS characters (0 = no wrapping)
    #[arg(long, global = true, value_name = "COLS")]
    pub wrap: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert plain text to base64
    #[command(alias = "text_to_base64")]
    Encode(Target),

    /// Convert base64 to plain text
    #[command(alias = "base64_to_text")]
    Decode(Target),
}

/// Document a command works on
#[derive(clap::Args, Debug, Clone)]
pub struct Target {
    /// File to convert (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Convert only this byte range of the document
    #[arg(long, value_name = "START:END", value_parser = parse_range)]
    pub selection: Option<Range<usize>>,

    /// Write the result back to FILE instead of stdout
    #[arg(long, requires = "file")]
    pub in_place: bool,
}

impl Cli {
    /// Plugin command run for the chosen subcommand
    pub fn command_id(&self) -> CommandId {
        match self.command {
            Commands::Encode(_) => CommandId::TextToBase64,
            Commands::Decode(_) => CommandId::Base64ToText,
        }
    }

    pub fn target(&self) -> &Target {
        match &self.command {
            Commands::Encode(target) | Commands::Decode(target) => target,
        }
    }
}

fn parse_range(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", value))?;
    let start: usize = start
        .parse()
        .map_err(|_| format!("invalid selection start '{}'", start))?;
    let end: usize = end
        .parse()
        .map_err(|_| format!("invalid selection end '{}'", end))?;
    if start > end {
        return Err(format!("selection start {} is after its end {}", start, end));
    }
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("b64convert").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = parse(&[
            "decode",
            "notes.txt",
            "--selection",
            "4:12",
            "--in-place",
            "--config-dir=/tmp/geany",
            "--wrap=76",
        ])
        .unwrap();

        assert_eq!(cli.command_id(), CommandId::Base64ToText);
        let target = cli.target();
        assert_eq!(target.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(target.selection, Some(4..12));
        assert!(target.in_place);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/geany")));
        assert_eq!(cli.wrap, Some(76));
    }

    #[test]
    fn test_key_names_are_accepted() {
        assert_eq!(parse(&["text_to_base64"]).unwrap().command_id(), CommandId::TextToBase64);
        assert_eq!(parse(&["base64_to_text"]).unwrap().command_id(), CommandId::Base64ToText);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["rot13"]).is_err());
        assert!(parse(&["encode", "--in-place"]).is_err());
        assert!(parse(&["encode", "--selection", "9:2"]).is_err());
        assert!(parse(&["encode", "--selection", "nine"]).is_err());
        assert!(parse(&["encode", "--wrap"]).is_err());
        assert!(parse(&["encode", "--bogus"]).is_err());
        assert!(parse(&["encode", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_version_comes_from_plugin_info() {
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(PLUGIN_INFO.version));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0:0"), Ok(0..0));
        assert_eq!(parse_range("3:10"), Ok(3..10));
        assert!(parse_range("3").is_err());
        assert!(parse_range("-1:4").is_err());
    }
}
