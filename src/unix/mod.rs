use nix::unistd::execv;
use std::{
    ffi::{CString, OsStr, OsString},
    os::unix::ffi::{OsStrExt, OsStringExt},
    path::{Path, PathBuf},
};
use tracing::debug;

pub mod cli;
mod error;

pub use error::Error;

/// Symlink hops followed before giving up, matching Linux `MAXSYMLINKS`.
pub const MAX_SYMLINK_HOPS: usize = 40;

/// Interpreter path plus the extra arguments that followed it on the shebang line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSpec {
    pub program: OsString,
    pub extra_args: Vec<OsString>,
}

impl InterpreterSpec {
    /// Split on ASCII whitespace. There is no quoting, so a path containing a space cannot be
    /// expressed.
    pub fn parse(spec: &OsStr) -> Result<Self, Error> {
        let mut tokens = spec
            .as_bytes()
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty())
            .map(|token| OsStr::from_bytes(token).to_os_string());

        let program = tokens.next().ok_or(Error::EmptyInterpreter)?;
        Ok(Self {
            program,
            extra_args: tokens.collect(),
        })
    }
}

/// Directory containing `path`. Empty for a bare file name, `path` itself for a root.
#[must_use]
pub fn target_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}

/// Follow `target` through any chain of symlinks to the first path that is not one.
///
/// Each link is read relative to the directory of the hop that holds it. A failing readlink
/// ends the walk, so a missing file is reported later by exec.
pub fn resolve_symlinks(target: &Path) -> Result<PathBuf, Error> {
    let mut path = target.to_path_buf();
    let mut hops = 0;

    while let Ok(link) = path.read_link() {
        if hops == MAX_SYMLINK_HOPS {
            return Err(Error::TooManyLinks {
                path: target.to_path_buf(),
            });
        }
        hops += 1;

        let next = target_dir(&path).join(link);
        debug!(from = %path.display(), to = %next.display(), "followed symlink");
        path = next;
    }

    Ok(path)
}

/// Everything needed to replace this process with the interpreter.
#[derive(Debug)]
pub struct Launch {
    pub interpreter: PathBuf,
    pub argv: Vec<OsString>,
}

impl Launch {
    /// Locate the interpreter next to the real script and build its argv.
    ///
    /// The script is forwarded as given, not as resolved.
    pub fn new(spec: InterpreterSpec, target: &Path, args: Vec<OsString>) -> Result<Self, Error> {
        let script = resolve_symlinks(target)?;
        let interpreter = target_dir(&script).join(&spec.program);
        debug!(script = %script.display(), interpreter = %interpreter.display(), "resolved");

        let mut argv = Vec::with_capacity(2 + spec.extra_args.len() + args.len());
        argv.push(interpreter.clone().into_os_string());
        argv.extend(spec.extra_args);
        argv.push(target.as_os_str().to_os_string());
        argv.extend(args);

        Ok(Self { interpreter, argv })
    }

    /// Replace the current process image. Only returns if that failed.
    #[must_use]
    pub fn exec(self) -> Error {
        let path = match to_cstring(self.interpreter.clone().into_os_string()) {
            Ok(path) => path,
            Err(err) => return err,
        };
        let argv = match self
            .argv
            .into_iter()
            .map(to_cstring)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(argv) => argv,
            Err(err) => return err,
        };

        debug!(?argv, "exec");
        let Err(errno) = execv(&path, &argv);
        Error::Exec {
            path: self.interpreter,
            source: errno.into(),
        }
    }
}

fn to_cstring(arg: OsString) -> Result<CString, Error> {
    CString::new(arg.into_vec()).map_err(|err| Error::InvalidArgument {
        arg: OsString::from_vec(err.into_vec()),
    })
}
