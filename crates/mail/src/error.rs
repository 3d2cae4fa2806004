//! Error types for template mail delivery.

use std::path::PathBuf;

/// Failure talking to the hosted email provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status (bad domain, auth, quota).
    #[error("Email provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Error returned by [`Mailer::send_email`](crate::Mailer::send_email).
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The template name is not registered.
    #[error("Email template not found: {0}")]
    TemplateNotFound(String),

    /// The template body could not be read from disk.
    #[error("Could not read email template {path}: {source}")]
    TemplateRenderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Invalid or missing mail configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
