// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine relevent path information for external files that need to be
//! interacted with, or managed in some way.

use std::path::PathBuf;

/// Fixed relative path of the package manifest.
pub const MANIFEST_PATH: &str = "packages.toml";

/// Display manager autologin drop-in path.
pub const AUTOLOGIN_CONF: &str = "/etc/sddm.conf.d/autologin.conf";

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(NoWayHome)
}

/// Determine absolute path to XDG user-directories configuration file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/user-dirs.dirs`. Does not
/// check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn user_dirs_config() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("user-dirs.dirs"))
        .ok_or(NoWayHome)
}

/// Determine absolute path to user's shell run-control file.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn shell_rc() -> Result<PathBuf> {
    home_dir().map(|path| path.join(".bashrc"))
}

/// Determine default absolute path to AUR helper build directory.
///
/// Uses XDG Base Directory path `$XDG_CACHE_HOME/archtune` as the default
/// build location. Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn default_build_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|path| path.join("archtune"))
        .ok_or(NoWayHome)
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("HOME", "/home/blah"), ("XDG_CONFIG_HOME", "/home/blah/.config")])]
    fn user_dirs_config_lands_under_config_home() -> anyhow::Result<()> {
        let result = user_dirs_config()?;
        assert_eq!(result, PathBuf::from("/home/blah/.config/user-dirs.dirs"));
        Ok(())
    }

    #[sealed_test(env = [("HOME", "/home/blah")])]
    fn shell_rc_lands_in_home() -> anyhow::Result<()> {
        let result = shell_rc()?;
        assert_eq!(result, PathBuf::from("/home/blah/.bashrc"));
        Ok(())
    }
}
