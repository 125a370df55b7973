// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! AUR helper bootstrap.
//!
//! A fresh Arch install ships with pacman only, and pacman cannot see the
//! AUR. Before the manifest's package groups can be installed, this module
//! bootstraps an AUR helper the manual way: clone the helper's package
//! repository from the AUR, then build and install it with makepkg.
//!
//! The clone goes through libgit2 with a progress bar, so the longest part
//! of the bootstrap is visible. The AUR serves anonymous HTTPS, so no
//! credential handling is involved. Any previous clone at the build
//! location is removed first, which means rerunning archtune re-clones from
//! scratch.

use crate::runner::{Runner, RunnerError};

use git2::{build::RepoBuilder, FetchOptions, RemoteCallbacks};
use indicatif::{ProgressBar, ProgressStyle};
use std::{fs, path::Path, time};
use tracing::{info, instrument};

/// Base URL of AUR package repositories.
pub const AUR_URL_BASE: &str = "https://aur.archlinux.org";

/// Bootstrap target AUR helper into the system.
///
/// Ensures git and base-devel are present, clones the helper's AUR
/// repository into `build_dir`, then runs `makepkg -si --noconfirm` inside
/// the clone. The build directory is wiped first so a rerun starts from a
/// fresh clone.
///
/// # Errors
///
/// - Return [`BootstrapError::Runner`] if pacman or makepkg fail.
/// - Return [`BootstrapError::Io`] if the build directory cannot be
///   prepared.
/// - Return [`BootstrapError::Git2`] if the clone fails.
#[instrument(skip(runner), level = "debug")]
pub fn bootstrap_helper<R: Runner>(runner: &R, helper: &str, build_dir: &Path) -> Result<()> {
    runner.run_interactive("pacman", ["-S", "--needed", "--noconfirm", "git", "base-devel"])?;

    let clone_dir = build_dir.join(helper);
    if clone_dir.exists() {
        info!("removing previous clone at {:?}", clone_dir.display());
        fs::remove_dir_all(&clone_dir)?;
    }
    mkdirp::mkdirp(build_dir)?;

    let url = format!("{AUR_URL_BASE}/{helper}.git");
    info!("cloning {url}");
    clone_with_progress(&url, &clone_dir)?;

    runner.run_interactive_from(&clone_dir, "makepkg", ["-si", "--noconfirm"])?;

    Ok(())
}

/// Clone target repository while driving a progress bar.
fn clone_with_progress(url: &str, path: &Path) -> Result<()> {
    let bar = ProgressBar::no_length();
    let style = ProgressStyle::with_template(
        "{elapsed_precise:.green}  {msg:<50}  [{wide_bar:.yellow/blue}]",
    )?
    .progress_chars("-Cco.");
    bar.set_style(style);
    bar.set_message(url.to_string());
    bar.enable_steady_tick(time::Duration::from_millis(100));

    let mut throttle = time::Instant::now();
    let mut rc = RemoteCallbacks::new();
    rc.transfer_progress(|progress| {
        let stats = progress.to_owned();
        let bar_size = stats.total_objects() as u64;
        let bar_pos = stats.received_objects() as u64;
        if throttle.elapsed() > time::Duration::from_millis(10) {
            throttle = time::Instant::now();
            bar.set_length(bar_size);
            bar.set_position(bar_pos);
        }
        true
    });

    let mut fo = FetchOptions::new();
    fo.remote_callbacks(rc);
    RepoBuilder::new().fetch_options(fo).clone(url, path)?;
    bar.finish_and_clear();

    Ok(())
}

/// Bootstrap error types.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// External command fails.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Build directory cannot be prepared.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Operations from libgit2 fail.
    #[error(transparent)]
    Git2(#[from] git2::Error),

    /// Style template cannot be set for progress bars.
    #[error(transparent)]
    IndicatifStyleTemplate(#[from] indicatif::style::TemplateError),
}

/// Friendly result alias :3
type Result<T, E = BootstrapError> = std::result::Result<T, E>;
