//! command line interface

use clap::Parser;
use std::ffi::OsString;

/// program name shown in the version banner
pub const PROGRAM_NAME: &str = "zzdir";

pub const USAGE: &str = "\
zzdir <dir>..
  - prints a content table to stdout; each dir may also be an archive
    (zip, tar, tgz, txz, tzst, 7z).
 A missing name is retried with .zip appended, so the contents of
 'test.zip' can be shown with
     zzdir test
";

/// leading arguments that replace the listing
const HELP_ARG: &str = "--help";
const VERSION_ARG: &str = "--version";

#[derive(Parser, Debug)]
#[command(
    name = "zzdir",
    disable_help_flag = true,
    disable_version_flag = true,
    about = "zzdir: list directories and archives as one content table"
)]
pub struct Cli {
    /// directories or archives to list; `--help` or `--version` when first
    #[arg(value_name = "DIR", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<OsString>,
}

/// what a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    List(Vec<OsString>),
}

impl Cli {
    /// Only the first argument can ask for help or the version; anything
    /// else, options included, is a path to list.
    pub fn invocation(self) -> Invocation {
        match self.args.first() {
            None => Invocation::Help,
            Some(first) if first == HELP_ARG => Invocation::Help,
            Some(first) if first == VERSION_ARG => Invocation::Version,
            Some(_) => Invocation::List(self.args),
        }
    }
}

/// `<program> version <product-name> <product-version>`
pub fn version_banner() -> String {
    format!(
        "{} version {} {}",
        PROGRAM_NAME,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}
