// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Package manifest layout.
//!
//! Specify the layout for the manifest file that archtune reads to decide
//! which packages to install. File I/O is left to the caller to figure out.
//!
//! # General Layout
//!
//! A manifest is composed of two basic parts: settings and groups. The
//! settings section tweaks how the run itself behaves, e.g., which AUR
//! helper to bootstrap, and where to build it. The groups section lists
//! named collections of packages. Each group becomes exactly one installer
//! invocation, and groups are processed in the order they appear in the
//! file.
//!
//! ```toml
//! [settings]
//! helper = "yay"
//! build_dir = "~/.cache/archtune"
//!
//! [[group]]
//! name = "editors"
//! packages = ["vim", "nano"]
//! ```
//!
//! Groups are an array of tables instead of one flat table so that the
//! file's ordering survives deserialization.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default AUR helper to bootstrap when the manifest names none.
pub const DEFAULT_HELPER: &str = "yay";

/// Package manifest layout.
///
/// The full set of package groups to install during a run, plus optional
/// settings for the run itself. Loaded once at startup and read-only
/// afterward.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct PackageManifest {
    /// Settings for the run.
    pub settings: Option<ManifestSettings>,

    /// Ordered listing of package groups.
    #[serde(rename = "group")]
    pub groups: Vec<PackageGroup>,
}

impl PackageManifest {
    /// Name of AUR helper to bootstrap and install packages with.
    pub fn helper(&self) -> &str {
        self.settings
            .as_ref()
            .and_then(|settings| settings.helper.as_deref())
            .unwrap_or(DEFAULT_HELPER)
    }

    /// Directory to clone and build the AUR helper in, if the manifest
    /// names one.
    pub fn build_dir(&self) -> Option<&Path> {
        self.settings
            .as_ref()
            .and_then(|settings| settings.build_dir.as_deref())
    }
}

impl FromStr for PackageManifest {
    type Err = ManifestError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut manifest: PackageManifest =
            toml::de::from_str(data).map_err(ManifestError::Deserialize)?;

        // INVARIANT: Perform shell expansion on build directory field.
        if let Some(settings) = manifest.settings.as_mut() {
            if let Some(build_dir) = settings.build_dir.take() {
                settings.build_dir = Some(PathBuf::from(
                    shellexpand::full(build_dir.to_string_lossy().as_ref())
                        .map_err(ManifestError::ShellExpansion)?
                        .into_owned(),
                ));
            }
        }

        Ok(manifest)
    }
}

impl Display for PackageManifest {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ManifestError::Serialize)?
                .as_str(),
        )
    }
}

/// Manifest run settings.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct ManifestSettings {
    /// AUR helper program to bootstrap and install with.
    pub helper: Option<String>,

    /// Directory to clone and build the AUR helper in.
    pub build_dir: Option<PathBuf>,
}

/// Named collection of packages installed in one installer invocation.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct PackageGroup {
    /// Name of the group.
    pub name: String,

    /// Ordered listing of package identifiers.
    pub packages: Vec<String>,
}

/// Manifest error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ManifestError {
    /// Failed to deserialize manifest.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize manifest.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on manifest.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ManifestError> for FmtError {
    fn from(_: ManifestError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ManifestError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("BLAH", "/home/blah/blah")])]
    fn deserialize_package_manifest() -> anyhow::Result<()> {
        let result: PackageManifest = r#"
            [settings]
            helper = "paru"
            build_dir = "$BLAH"

            [[group]]
            name = "editors"
            packages = ["vim", "nano"]

            [[group]]
            name = "terminal"
            packages = ["alacritty"]
        "#
        .parse()?;

        let expect = PackageManifest {
            settings: Some(ManifestSettings {
                helper: Some("paru".into()),
                build_dir: Some(PathBuf::from("/home/blah/blah")),
            }),
            groups: vec![
                PackageGroup {
                    name: "editors".into(),
                    packages: vec!["vim".into(), "nano".into()],
                },
                PackageGroup {
                    name: "terminal".into(),
                    packages: vec!["alacritty".into()],
                },
            ],
        };

        assert_eq!(result, expect);

        Ok(())
    }

    #[test]
    fn serialize_package_manifest() {
        let result = PackageManifest {
            settings: None,
            groups: vec![PackageGroup {
                name: "editors".into(),
                packages: vec!["vim".into(), "nano".into()],
            }],
        }
        .to_string();

        let expect = indoc! {r#"
            [[group]]
            name = "editors"
            packages = [
                "vim",
                "nano",
            ]
        "#};

        assert_eq!(result, expect);
    }

    #[test]
    fn groups_keep_manifest_order() -> anyhow::Result<()> {
        let manifest: PackageManifest = r#"
            [[group]]
            name = "zulu"
            packages = ["z"]

            [[group]]
            name = "alpha"
            packages = ["a"]
        "#
        .parse()?;

        let order = manifest
            .groups
            .iter()
            .map(|group| group.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["zulu", "alpha"]);

        Ok(())
    }

    #[test]
    fn helper_defaults_to_yay() -> anyhow::Result<()> {
        let manifest: PackageManifest = r#"
            [[group]]
            name = "editors"
            packages = ["vim"]
        "#
        .parse()?;

        assert_eq!(manifest.helper(), "yay");
        assert_eq!(manifest.build_dir(), None);

        Ok(())
    }
}
