#![deny(clippy::all, clippy::pedantic)]

#[cfg(unix)]
mod logging;
#[cfg(unix)]
mod unix;

#[cfg(unix)]
fn main() -> std::process::ExitCode {
    use crate::unix::{InterpreterSpec, Launch, cli};
    use std::process::ExitCode;

    logging::init();

    let invocation = match cli::parse(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    let cli::Invocation { program, cli, args } = invocation;

    let launch = InterpreterSpec::parse(&cli.interpreter)
        .and_then(|spec| Launch::new(spec, &cli.target, args));

    // On success exec never returns.
    let err = match launch {
        Ok(launch) => launch.exec(),
        Err(err) => err,
    };

    tracing::debug!(?err, "launch failed");
    eprintln!("{}", err.diagnostic(&program));
    ExitCode::from(err.exit_code())
}

#[cfg(not(unix))]
fn main() {
    compile_error!("This crate is only supported on Unix");
}
