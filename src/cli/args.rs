//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan source and template files and write a translation catalog
//! - `init`: Initialize glean configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, builder::RangedU64ValueParser};

use crate::core::options::FnNames;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Files or directories to scan (default: `includes` from the config file)
    pub paths: Vec<PathBuf>,

    /// Catalog file to write (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Merge into the existing output catalog, keeping its translations
    #[arg(short, long)]
    pub join_existing: bool,

    /// Translation function names, as `gettext,ngettext,pgettext,npgettext`
    #[arg(long, value_name = "NAMES", value_parser = parse_fn_names)]
    pub fn_names: Option<FnNames>,

    /// Marker identifying translator comments (overrides config file)
    #[arg(long, value_name = "PREFIX")]
    pub comment_prefix: Option<String>,

    /// Number of plural forms created for new plural entries
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub plural_forms: Option<usize>,

    /// Project-Id-Version header value
    #[arg(long, value_name = "VERSION")]
    pub project_id_version: Option<String>,

    /// Report-Msgid-Bugs-To header value
    #[arg(long, value_name = "ADDRESS")]
    pub report_bugs_to: Option<String>,

    /// Language header value
    #[arg(long)]
    pub language: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_fn_names(value: &str) -> Result<FnNames, String> {
    FnNames::from_list(value).ok_or_else(|| {
        "expected four comma-separated names: gettext,ngettext,pgettext,npgettext".to_string()
    })
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings into a PO template
    Extract(ExtractCommand),
    /// Initialize a new .gleanrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn extract_args(argv: &[&str]) -> ExtractCommand {
        let args = Arguments::try_parse_from(argv).unwrap();
        match args.command {
            Some(Command::Extract(cmd)) => cmd,
            other => panic!("expected extract, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_defaults() {
        let cmd = extract_args(&["glean", "extract"]);
        assert!(cmd.paths.is_empty());
        assert!(cmd.output.is_none());
        assert!(!cmd.join_existing);
        assert!(!cmd.common.verbose);
    }

    #[test]
    fn test_extract_flags() {
        let cmd = extract_args(&[
            "glean",
            "extract",
            "src",
            "views",
            "-o",
            "po/app.pot",
            "--join-existing",
            "--fn-names",
            "_,n_,p_,np_",
            "--plural-forms",
            "3",
            "-v",
        ]);
        assert_eq!(cmd.paths, vec![PathBuf::from("src"), PathBuf::from("views")]);
        assert_eq!(cmd.output, Some(PathBuf::from("po/app.pot")));
        assert!(cmd.join_existing);
        assert_eq!(cmd.fn_names.unwrap().ngettext, "n_");
        assert_eq!(cmd.plural_forms, Some(3));
        assert!(cmd.common.verbose);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Arguments::try_parse_from(["glean", "extract", "--fn-names", "_,n_"]).is_err());
        assert!(Arguments::try_parse_from(["glean", "extract", "--plural-forms", "0"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let args = Arguments::try_parse_from(["glean", "extract", "--verbose"]).unwrap();
        assert!(args.verbose());
        let args = Arguments::try_parse_from(["glean", "init"]).unwrap();
        assert!(!args.verbose());
    }
}
