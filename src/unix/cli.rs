use clap::Parser;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use super::Error;

/// Number of leading argv entries handed to clap: program, interpreter, script.
const PARSED_ARGS: usize = 3;

#[derive(Debug, Parser)]
#[command(
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Interpreter path relative to the script, optionally followed by extra arguments.
    #[arg(allow_hyphen_values = true)]
    pub interpreter: OsString,

    /// Script being run.
    #[arg(allow_hyphen_values = true)]
    pub target: PathBuf,
}

/// A parsed command line. `args` holds everything after the script, untouched by clap.
#[derive(Debug)]
pub struct Invocation {
    pub program: String,
    pub cli: Cli,
    pub args: Vec<OsString>,
}

/// Basename of argv[0], used in diagnostics.
#[must_use]
pub fn program_name(argv0: Option<&OsString>) -> String {
    argv0
        .map(Path::new)
        .and_then(Path::file_name)
        .map_or_else(|| "relexec".to_owned(), |name| name.to_string_lossy().into_owned())
}

/// Parse the process arguments.
///
/// Only the interpreter and script go through clap. Script arguments are split off first so
/// that a leading `--` or `-h` reaches the interpreter instead of being consumed here.
pub fn parse<I>(argv: I) -> Result<Invocation, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let mut argv = argv.into_iter().collect::<Vec<_>>();
    let program = program_name(argv.first());
    if argv.len() < PARSED_ARGS {
        return Err(Error::Usage { program });
    }
    let args = argv.split_off(PARSED_ARGS);

    // A leading `--` keeps clap from reading either positional as its own marker.
    argv.insert(1, OsString::from("--"));
    let cli = Cli::try_parse_from(argv).map_err(|_| Error::Usage {
        program: program.clone(),
    })?;

    Ok(Invocation { program, cli, args })
}
