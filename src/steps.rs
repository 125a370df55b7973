// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Provisioning step sequence.
//!
//! The whole run is one ordered list of [`Step`] descriptors built up front
//! by [`provisioning_steps`], then executed top to bottom by [`run`]. A
//! step either installs packages, writes a configuration file, or prompts
//! the user and then writes. There is no conditional skipping, no rollback,
//! and no re-entrancy guard: running the sequence twice re-clones the
//! helper repository, re-appends run-control lines, and re-writes files.
//!
//! The first failing step aborts everything after it. Partial completion is
//! not recorded anywhere; the failed command's own output plus the
//! preceding log line are the only diagnostics.
//!
//! Steps go through the [`Runner`] seam for every external command, so
//! tests drive the sequence with a recording fake instead of mutating the
//! host.

use crate::{
    aur::{self, BootstrapError},
    installer::{InstallError, PackageInstaller},
    manifest::PackageManifest,
    path,
    prompt::{self, Identity, PromptError},
    runner::{Runner, RunnerError},
    template::{self, Template, TemplateError, WriteMode},
};

use std::path::PathBuf;
use tracing::info;

/// Packages pulled in for the display manager step.
const DISPLAY_MANAGER_PACKAGES: &[&str] = &["sddm"];

/// Service unit enabled for the display manager step.
const DISPLAY_MANAGER_SERVICE: &str = "sddm.service";

/// Packages pulled in for the desktop shell step.
const DESKTOP_SHELL_PACKAGES: &[&str] = &["qtile", "alacritty", "picom", "feh", "dmenu"];

/// One unit of provisioning work.
#[derive(Debug)]
pub struct Step {
    /// Human readable step name for log output.
    pub name: &'static str,

    /// Action the step performs.
    pub action: StepAction,
}

/// Action a provisioning step performs.
#[derive(Debug)]
pub enum StepAction {
    /// Bootstrap the AUR helper via clone and makepkg.
    BootstrapHelper { helper: String, build_dir: PathBuf },

    /// Install every manifest group, one invocation per group.
    InstallGroups {
        program: String,
        manifest: PackageManifest,
    },

    /// Install a fixed package list, then enable a service unit.
    InstallAndEnable {
        program: String,
        packages: Vec<String>,
        service: &'static str,
    },

    /// Install a fixed package list.
    InstallPackages {
        program: String,
        packages: Vec<String>,
    },

    /// Render a template to a target path.
    WriteTemplate {
        template: Template,
        path: PathBuf,
        mode: WriteMode,
    },

    /// Prompt for autologin answers, then write the autologin drop-in.
    PromptAutologin { path: PathBuf },

    /// Prompt for identity answers, then write the global git config.
    PromptIdentity,
}

/// Build the fixed provisioning sequence from a loaded manifest.
///
/// # Errors
///
/// - Return [`StepError::NoWayHome`] if the home directory cannot be
///   determined for the file-writing steps.
pub fn provisioning_steps(manifest: &PackageManifest) -> Result<Vec<Step>> {
    let helper = manifest.helper().to_owned();
    let build_dir = match manifest.build_dir() {
        Some(dir) => dir.to_owned(),
        None => path::default_build_dir()?,
    };

    let steps = vec![
        Step {
            name: "aur helper",
            action: StepAction::BootstrapHelper {
                helper: helper.clone(),
                build_dir,
            },
        },
        Step {
            name: "packages",
            action: StepAction::InstallGroups {
                program: helper.clone(),
                manifest: manifest.clone(),
            },
        },
        Step {
            name: "display manager",
            action: StepAction::InstallAndEnable {
                program: helper.clone(),
                packages: DISPLAY_MANAGER_PACKAGES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                service: DISPLAY_MANAGER_SERVICE,
            },
        },
        Step {
            name: "desktop shell",
            action: StepAction::InstallPackages {
                program: helper,
                packages: DESKTOP_SHELL_PACKAGES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
        },
        Step {
            name: "user directories",
            action: StepAction::WriteTemplate {
                template: template::user_dirs(),
                path: path::user_dirs_config()?,
                mode: WriteMode::Truncate,
            },
        },
        Step {
            name: "shell environment",
            action: StepAction::WriteTemplate {
                template: template::shell_env(),
                path: path::shell_rc()?,
                mode: WriteMode::Append,
            },
        },
        Step {
            name: "autologin",
            action: StepAction::PromptAutologin {
                path: PathBuf::from(path::AUTOLOGIN_CONF),
            },
        },
        Step {
            name: "git identity",
            action: StepAction::PromptIdentity,
        },
    ];

    Ok(steps)
}

/// Execute the step sequence, then optionally reboot.
///
/// Steps run in order, each blocking until its external command or file
/// write completes. The first failure aborts the remaining steps and the
/// reboot. The reboot command is issued exactly once, and only after every
/// step completed successfully.
///
/// # Errors
///
/// - Return [`StepError`] of the first failing step.
pub fn run<R: Runner>(runner: &R, steps: &[Step], reboot: bool) -> Result<()> {
    for step in steps {
        info!("step: {}", step.name);
        apply(runner, &step.action)?;
    }

    info!("installation complete");

    if reboot {
        info!("rebooting...");
        runner.run_interactive("reboot", Vec::<&str>::new())?;
    }

    Ok(())
}

fn apply<R: Runner>(runner: &R, action: &StepAction) -> Result<()> {
    match action {
        StepAction::BootstrapHelper { helper, build_dir } => {
            aur::bootstrap_helper(runner, helper, build_dir)?;
        }
        StepAction::InstallGroups { program, manifest } => {
            PackageInstaller::new(runner, program.as_str()).install_manifest(manifest)?;
        }
        StepAction::InstallAndEnable {
            program,
            packages,
            service,
        } => {
            PackageInstaller::new(runner, program.as_str())
                .install_packages(packages.iter().cloned())?;
            runner.run_interactive("systemctl", ["enable", service])?;
        }
        StepAction::InstallPackages { program, packages } => {
            PackageInstaller::new(runner, program.as_str())
                .install_packages(packages.iter().cloned())?;
        }
        StepAction::WriteTemplate {
            template,
            path,
            mode,
        } => {
            if let Some(parent) = path.parent() {
                mkdirp::mkdirp(parent)?;
            }
            template.write_to(path, *mode)?;
        }
        StepAction::PromptAutologin { path } => {
            let answers = prompt::autologin()?;
            if let Some(parent) = path.parent() {
                mkdirp::mkdirp(parent)?;
            }
            template::autologin(answers.user, answers.session)
                .write_to(path, WriteMode::Truncate)?;
        }
        StepAction::PromptIdentity => {
            let identity = prompt::identity()?;
            set_identity(&identity)?;
        }
    }

    Ok(())
}

/// Write target identity to the global git configuration.
///
/// Goes through libgit2 instead of a shell command, so identity fields
/// never pass through a shell.
///
/// # Errors
///
/// - Return [`StepError::Git2`] if the global configuration cannot be
///   opened or written.
pub fn set_identity(identity: &Identity) -> Result<()> {
    let mut config = git2::Config::open_default()?;
    let mut global = config.open_global()?;
    global.set_str("user.name", &identity.name)?;
    global.set_str("user.email", &identity.email)?;

    Ok(())
}

/// All possible error types for step execution.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// AUR helper bootstrap fails.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// Package installation fails.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// External command fails.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Configuration file write fails.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Interactive prompt fails.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Parent directory creation fails.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Global git configuration write fails.
    #[error(transparent)]
    Git2(#[from] git2::Error),

    /// Home directory cannot be determined.
    #[error(transparent)]
    NoWayHome(#[from] path::NoWayHome),
}

/// Friendly result alias :3
type Result<T, E = StepError> = std::result::Result<T, E>;
