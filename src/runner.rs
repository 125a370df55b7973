// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! External command execution.
//!
//! Every system mutation archtune performs goes through one external tool or
//! another: pacman, makepkg, systemctl, reboot. The [`Runner`]
//! trait is the single choke point for spawning those tools, so the rest of
//! the crate never touches [`std::process::Command`] directly, and tests can
//! swap in a fake that records invocations instead of mutating the host.
//!
//! Commands are always built from an argument list, never from a
//! concatenated shell string. User supplied input (usernames, identity
//! fields) therefore never passes through a shell.
//!
//! There is no retry, no timeout, and no output parsing. A non-zero exit
//! status from the child is an error, and the caller decides nothing beyond
//! propagating it.

use std::{
    ffi::OsStr,
    path::Path,
    process::Command,
};
use tracing::debug;

/// Layer of indirection for spawning external commands.
pub trait Runner {
    /// Run command to completion with inherited stdio.
    ///
    /// Blocks the current process so the child can interact with the
    /// terminal directly. Package installs and makepkg runs go through here.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::Spawn`] if the command cannot be spawned.
    /// - Return [`RunnerError::Failed`] if the command exits non-zero.
    fn run_interactive(
        &self,
        program: impl AsRef<OsStr>,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Result<()>;

    /// Run command to completion with inherited stdio from a working
    /// directory.
    ///
    /// Same contract as [`Runner::run_interactive`], but the child starts in
    /// `dir` instead of the current directory. Needed for makepkg, which
    /// only builds from inside a package source tree.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::Spawn`] if the command cannot be spawned.
    /// - Return [`RunnerError::Failed`] if the command exits non-zero.
    fn run_interactive_from(
        &self,
        dir: impl AsRef<Path>,
        program: impl AsRef<OsStr>,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Result<()>;
}

/// Command runner backed by real child processes.
#[derive(Debug, Default)]
pub struct ProcessRunner {
    echo: bool,
}

impl ProcessRunner {
    /// Construct new process runner.
    ///
    /// When `echo` is set, every command line is logged at debug level
    /// before it spawns. The flag is threaded in here from the CLI rather
    /// than read from any process-wide state.
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }

    fn trace(&self, program: &OsStr, args: &[impl AsRef<OsStr>]) {
        if self.echo {
            let rendered = args
                .iter()
                .map(|arg| arg.as_ref().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            debug!("run: {} {rendered}", program.to_string_lossy());
        }
    }
}

impl Runner for ProcessRunner {
    fn run_interactive(
        &self,
        program: impl AsRef<OsStr>,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Result<()> {
        let args = args.into_iter().collect::<Vec<_>>();
        self.trace(program.as_ref(), &args);

        let status = Command::new(program.as_ref()).args(args).spawn()?.wait()?;
        if !status.success() {
            return Err(RunnerError::Failed {
                program: program.as_ref().to_string_lossy().into_owned(),
                message: status.to_string(),
            });
        }

        Ok(())
    }

    fn run_interactive_from(
        &self,
        dir: impl AsRef<Path>,
        program: impl AsRef<OsStr>,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Result<()> {
        let args = args.into_iter().collect::<Vec<_>>();
        self.trace(program.as_ref(), &args);

        let status = Command::new(program.as_ref())
            .args(args)
            .current_dir(dir.as_ref())
            .spawn()?
            .wait()?;
        if !status.success() {
            return Err(RunnerError::Failed {
                program: program.as_ref().to_string_lossy().into_owned(),
                message: status.to_string(),
            });
        }

        Ok(())
    }
}

/// All possible error types for command execution.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Command could not be spawned at all.
    #[error(transparent)]
    Spawn(#[from] std::io::Error),

    /// Command spawned, but exited non-zero.
    #[error("command {program:?} failed: {message}")]
    Failed { program: String, message: String },
}

/// Friendly result alias :3
pub type Result<T, E = RunnerError> = std::result::Result<T, E>;

#[cfg(test)]
pub(crate) mod fake {
    //! Recording runner for tests that must not touch the host system.

    use super::{Result, Runner, RunnerError};
    use std::{cell::RefCell, ffi::OsStr, path::Path};

    /// Runner that records every invocation as one rendered command line.
    #[derive(Debug, Default)]
    pub(crate) struct FakeRunner {
        pub(crate) calls: RefCell<Vec<String>>,
        pub(crate) fail_on: Option<&'static str>,
    }

    impl FakeRunner {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Fail any command whose rendered line contains `needle`.
        pub(crate) fn failing_on(needle: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(needle),
            }
        }

        fn record(
            &self,
            program: impl AsRef<OsStr>,
            args: impl IntoIterator<Item = impl AsRef<OsStr>>,
        ) -> Result<()> {
            let mut line = program.as_ref().to_string_lossy().into_owned();
            for arg in args {
                line.push(' ');
                line.push_str(arg.as_ref().to_string_lossy().as_ref());
            }
            self.calls.borrow_mut().push(line.clone());

            if let Some(needle) = self.fail_on {
                if line.contains(needle) {
                    return Err(RunnerError::Failed {
                        program: line,
                        message: "injected failure".into(),
                    });
                }
            }

            Ok(())
        }
    }

    impl Runner for FakeRunner {
        fn run_interactive(
            &self,
            program: impl AsRef<OsStr>,
            args: impl IntoIterator<Item = impl AsRef<OsStr>>,
        ) -> Result<()> {
            self.record(program, args)
        }

        fn run_interactive_from(
            &self,
            _dir: impl AsRef<Path>,
            program: impl AsRef<OsStr>,
            args: impl IntoIterator<Item = impl AsRef<OsStr>>,
        ) -> Result<()> {
            self.record(program, args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_interactive_succeeds_on_zero_exit() -> anyhow::Result<()> {
        let runner = ProcessRunner::new(false);
        runner.run_interactive("true", Vec::<&str>::new())?;
        Ok(())
    }

    #[test]
    fn run_interactive_propagates_child_failure() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_interactive("false", Vec::<&str>::new());
        assert!(matches!(result, Err(RunnerError::Failed { .. })));
    }

    #[test]
    fn run_interactive_reports_missing_program_as_spawn_error() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_interactive("definitely-not-a-real-program", Vec::<&str>::new());
        assert!(matches!(result, Err(RunnerError::Spawn(_))));
    }

    #[test]
    fn run_interactive_from_respects_working_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let runner = ProcessRunner::new(false);
        runner.run_interactive_from(dir.path(), "test", ["-d", "."])?;
        Ok(())
    }
}
