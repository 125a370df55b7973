// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration file rendering.
//!
//! Every file archtune writes is line-oriented key/value text: the XDG
//! user-directories file, the shell run-control additions, and the display
//! manager's autologin drop-in. A [`Template`] holds the entries in render
//! order and produces the exact same bytes for the same input every time.
//! File I/O goes through [`Template::write_to`], which either truncates or
//! appends per call site. Creating the target's parent directory is the
//! caller's responsibility.
//!
//! # Entry Styles
//!
//! Each target file wants its own flavor of key/value line:
//!
//! - `XDG_DESKTOP_DIR="$HOME/Desktop"` for user-dirs,
//! - `export EDITOR="vim"` for the shell run-control file,
//! - `User=alice` under a `[Autologin]` header for sddm.
//!
//! The style is fixed per template, and an optional section header covers
//! the INI-shaped sddm case.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::OpenOptions,
    io::Write,
    path::Path,
};

/// Ordered key/value set rendered to line-oriented text.
///
/// Each key appears exactly once per render, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    section: Option<String>,
    style: EntryStyle,
    entries: Vec<(String, String)>,
}

impl Template {
    /// Construct new empty template with target entry style.
    pub fn new(style: EntryStyle) -> Self {
        Self {
            section: None,
            style,
            entries: Vec::new(),
        }
    }

    /// Construct new empty template under an INI-type section header.
    pub fn with_section(section: impl Into<String>, style: EntryStyle) -> Self {
        Self {
            section: Some(section.into()),
            style,
            entries: Vec::new(),
        }
    }

    /// Append one key/value entry.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Number of key/value entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if template holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render template, and write it to target path.
    ///
    /// [`WriteMode::Truncate`] replaces the file's contents in full, while
    /// [`WriteMode::Append`] adds the rendered lines to whatever is already
    /// there. Repeated appends repeat the lines; nothing merges with
    /// pre-existing content.
    ///
    /// # Errors
    ///
    /// - Return [`TemplateError::Write`] if the target cannot be opened or
    ///   written.
    pub fn write_to(&self, path: impl AsRef<Path>, mode: WriteMode) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(matches!(mode, WriteMode::Truncate))
            .append(matches!(mode, WriteMode::Append))
            .open(path.as_ref())?;
        file.write_all(self.to_string().as_bytes())?;

        Ok(())
    }
}

impl Display for Template {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        if let Some(section) = &self.section {
            writeln!(fmt, "[{section}]")?;
        }

        for (key, value) in &self.entries {
            match self.style {
                EntryStyle::ShellQuoted => writeln!(fmt, "{key}=\"{value}\"")?,
                EntryStyle::Export => writeln!(fmt, "export {key}=\"{value}\"")?,
                EntryStyle::Plain => writeln!(fmt, "{key}={value}")?,
            }
        }

        Ok(())
    }
}

/// Flavor of key/value line a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// `KEY="value"`
    ShellQuoted,

    /// `export KEY="value"`
    Export,

    /// `Key=value`
    Plain,
}

/// How [`Template::write_to`] treats pre-existing file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace file contents in full.
    Truncate,

    /// Add rendered lines after existing contents.
    Append,
}

/// XDG user-directories template.
///
/// Renders the eight well-known XDG directory keys, each value prefixed
/// with the literal `$HOME` variable so the file stays valid if the user
/// moves their home directory.
pub fn user_dirs() -> Template {
    Template::new(EntryStyle::ShellQuoted)
        .entry("XDG_DESKTOP_DIR", "$HOME/Desktop")
        .entry("XDG_DOWNLOAD_DIR", "$HOME/Downloads")
        .entry("XDG_TEMPLATES_DIR", "$HOME/Templates")
        .entry("XDG_PUBLICSHARE_DIR", "$HOME/Public")
        .entry("XDG_DOCUMENTS_DIR", "$HOME/Documents")
        .entry("XDG_MUSIC_DIR", "$HOME/Music")
        .entry("XDG_PICTURES_DIR", "$HOME/Pictures")
        .entry("XDG_VIDEOS_DIR", "$HOME/Videos")
}

/// Shell environment template appended to the user's run-control file.
pub fn shell_env() -> Template {
    Template::new(EntryStyle::Export)
        .entry("EDITOR", "vim")
        .entry("VISUAL", "vim")
        .entry("TERMINAL", "alacritty")
        .entry("BROWSER", "firefox")
}

/// Display manager autologin drop-in template.
pub fn autologin(user: impl Into<String>, session: impl Into<String>) -> Template {
    Template::with_section("Autologin", EntryStyle::Plain)
        .entry("User", user)
        .entry("Session", session)
}

/// Template error types.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Failed to open or write target file.
    #[error(transparent)]
    Write(#[from] std::io::Error),
}

/// Friendly result alias :3
type Result<T, E = TemplateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    #[test_case(EntryStyle::ShellQuoted, "GREETING=\"hello\"\n"; "shell quoted")]
    #[test_case(EntryStyle::Export, "export GREETING=\"hello\"\n"; "export")]
    #[test_case(EntryStyle::Plain, "GREETING=hello\n"; "plain")]
    #[test]
    fn render_styles(style: EntryStyle, expect: &str) {
        let result = Template::new(style).entry("GREETING", "hello").to_string();
        pretty_assertions::assert_eq!(result, expect);
    }

    #[test]
    fn render_one_line_per_entry() {
        let template = Template::new(EntryStyle::Plain)
            .entry("ONE", "1")
            .entry("TWO", "2")
            .entry("THREE", "3");

        let rendered = template.to_string();
        assert_eq!(rendered.lines().count(), template.len());
        for (key, value) in [("ONE", "1"), ("TWO", "2"), ("THREE", "3")] {
            assert!(rendered.contains(key));
            assert!(rendered.contains(value));
        }
    }

    #[test]
    fn render_is_deterministic() {
        let make = || {
            Template::new(EntryStyle::ShellQuoted)
                .entry("A", "1")
                .entry("B", "2")
        };
        assert_eq!(make().to_string(), make().to_string());
    }

    #[test]
    fn user_dirs_renders_eight_home_prefixed_lines() {
        let rendered = user_dirs().to_string();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 8);
        for line in lines {
            assert!(line.starts_with("XDG_"));
            assert!(line.contains("\"$HOME/"));
        }
    }

    #[test]
    fn autologin_renders_section_header_first() {
        let result = autologin("alice", "plasma").to_string();

        let expect = indoc! {r#"
            [Autologin]
            User=alice
            Session=plasma
        "#};

        assert_eq!(result, expect);
    }

    #[test]
    fn write_truncate_replaces_contents() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("out.conf");

        std::fs::write(&target, "stale contents\n")?;
        Template::new(EntryStyle::Plain)
            .entry("Fresh", "yes")
            .write_to(&target, WriteMode::Truncate)?;

        assert_eq!(std::fs::read_to_string(&target)?, "Fresh=yes\n");
        Ok(())
    }

    #[test]
    fn write_append_repeats_lines_on_rerun() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("rc");
        let template = Template::new(EntryStyle::Export).entry("EDITOR", "vim");

        template.write_to(&target, WriteMode::Append)?;
        template.write_to(&target, WriteMode::Append)?;

        let contents = std::fs::read_to_string(&target)?;
        assert_eq!(contents.matches("export EDITOR=\"vim\"").count(), 2);
        Ok(())
    }
}
