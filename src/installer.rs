// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Package group installation.
//!
//! Applies the package manifest one group at a time, in manifest order.
//! Each group becomes exactly one installer invocation carrying the group's
//! full package list, so the underlying installer sees the whole group in a
//! single transaction. No transactionality exists beyond what the installer
//! itself provides, and a failed group aborts everything after it.

use crate::{
    manifest::{PackageGroup, PackageManifest},
    runner::{Runner, RunnerError},
};

use tracing::{info, instrument};

/// Package installer driving one install program.
#[derive(Debug)]
pub struct PackageInstaller<'a, R: Runner> {
    runner: &'a R,
    program: String,
}

impl<'a, R: Runner> PackageInstaller<'a, R> {
    /// Construct new package installer around target install program.
    ///
    /// The program is normally the bootstrapped AUR helper, which handles
    /// official repository packages and AUR packages alike. Plain pacman
    /// works too when no AUR package is listed.
    pub fn new(runner: &'a R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Install every group of the manifest, in manifest order.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Runner`] on the first group whose install
    ///   command fails. Remaining groups are not attempted.
    #[instrument(skip(self, manifest), level = "debug")]
    pub fn install_manifest(&self, manifest: &PackageManifest) -> Result<()> {
        for group in &manifest.groups {
            self.install_group(group)?;
        }

        Ok(())
    }

    /// Install one group through a single installer invocation.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Runner`] if the install command fails.
    pub fn install_group(&self, group: &PackageGroup) -> Result<()> {
        info!(
            "installing group {:?} ({} packages)",
            group.name,
            group.packages.len()
        );
        self.install_packages(group.packages.iter().map(String::as_str))
    }

    /// Install a bare package list through a single installer invocation.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Runner`] if the install command fails.
    pub fn install_packages(
        &self,
        packages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<()> {
        let mut args: Vec<String> = vec!["-S".into(), "--needed".into(), "--noconfirm".into()];
        args.extend(packages.into_iter().map(Into::into));

        Ok(self.runner.run_interactive(&self.program, args)?)
    }
}

/// Package installation error types.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// Install command fails.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Friendly result alias :3
type Result<T, E = InstallError> = std::result::Result<T, E>;
