//! Registered email templates and `{{placeholder}}` rendering.
//!
//! Each [`EmailTemplate`] pairs a static subject with an HTML body file in the
//! templates directory. Bodies are read from disk on every render; there is no
//! cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::MailError;

/// Matches `{{name}}` where `name` contains no braces.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("valid regex"));

/// Placeholder values keyed by placeholder name.
pub type Payload = HashMap<String, String>;

/// Every transactional email the application sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailTemplate {
    Welcome,
    ResetPassword,
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 2] = [EmailTemplate::Welcome, EmailTemplate::ResetPassword];

    /// Name callers use to select the template.
    pub fn key(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::ResetPassword => "resetPassword",
        }
    }

    pub fn subject(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to Acme",
            Self::ResetPassword => "Reset your password",
        }
    }

    /// Body file name inside the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Welcome => "welcome.html",
            Self::ResetPassword => "reset-password.html",
        }
    }

    pub fn path_in(self, templates_dir: &Path) -> PathBuf {
        templates_dir.join(self.file_name())
    }

    /// Read the body file and substitute `payload` into it.
    pub async fn render(self, templates_dir: &Path, payload: &Payload) -> Result<String, MailError> {
        let path = self.path_in(templates_dir);
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| MailError::TemplateRenderIo { path, source })?;
        Ok(render_placeholders(&source, payload))
    }
}

impl std::fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EmailTemplate {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| MailError::TemplateNotFound(s.to_string()))
    }
}

/// Replace every `{{key}}` whose key is in `payload` with its value.
///
/// Markers without a matching key are kept verbatim, braces included.
/// Substitution is a single pass: values containing `{{...}}` are inserted
/// literally and not rescanned.
pub fn render_placeholders(source: &str, payload: &Payload) -> String {
    PLACEHOLDER_RE
        .replace_all(source, |caps: &Captures| match payload.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
