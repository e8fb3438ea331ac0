//! zzdir - content tables for directories and archives

use clap::Parser;
use std::io;
use std::process::ExitCode;
use zzdir::{
    cli::{self, Cli, Invocation},
    list,
};

fn main() -> ExitCode {
    zzdir::logging::init();
    let cli = Cli::parse();

    let code = match cli.invocation() {
        Invocation::Help => {
            print!("{}", cli::USAGE);
            0
        }
        Invocation::Version => {
            println!("{}", cli::version_banner());
            0
        }
        Invocation::List(paths) => {
            let mut out = io::stdout().lock();
            let mut err = io::stderr().lock();
            list::list_paths(&paths, &mut out, &mut err).code()
        }
    };

    ExitCode::from(code)
}
