// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Interactive prompts.
//!
//! Two steps of the provisioning sequence need answers only the user has:
//! the global version-control identity, and which account the display
//! manager should log in automatically. Both are free-text prompts read
//! from standard input mid-run. Answers are returned to the caller as
//! plain strings; nothing here touches the system.

use inquire::Text;

/// Version-control identity answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Autologin answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autologin {
    pub user: String,
    pub session: String,
}

/// Prompt for the global version-control identity.
///
/// # Errors
///
/// - Return [`PromptError`] if standard input is closed or the prompt is
///   interrupted.
pub fn identity() -> Result<Identity> {
    let name = Text::new("git user.name").prompt()?;
    let email = Text::new("git user.email").prompt()?;

    Ok(Identity { name, email })
}

/// Prompt for the display manager autologin account and session.
///
/// # Errors
///
/// - Return [`PromptError`] if standard input is closed or the prompt is
///   interrupted.
pub fn autologin() -> Result<Autologin> {
    let user = Text::new("autologin user").prompt()?;
    let session = Text::new("autologin session").prompt()?;

    Ok(Autologin { user, session })
}

/// Prompt error types.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Prompt interaction fails.
    #[error(transparent)]
    Inquire(#[from] inquire::InquireError),
}

/// Friendly result alias :3
type Result<T, E = PromptError> = std::result::Result<T, E>;
