// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Customize a fresh Arch Linux install into a working desktop.
//!
//! Archtune runs a fixed, linear sequence of provisioning steps: bootstrap
//! an AUR helper, install the package groups listed in a manifest, set up
//! the display manager and desktop shell, write the XDG user-directories
//! and shell environment files, configure display manager autologin, and
//! set the global version-control identity.
//!
//! Every external command goes through the [`runner::Runner`] seam, every
//! file write through [`template::Template`], and the whole run is an
//! ordered list of [`steps::Step`] descriptors executed top to bottom. The
//! first failure aborts the rest of the run.

pub mod aur;
pub mod installer;
pub mod manifest;
pub mod path;
pub mod prompt;
pub mod runner;
pub mod steps;
pub mod template;
