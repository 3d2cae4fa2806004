//! Mail configuration loaded from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default Resend API base URL.
pub const DEFAULT_API_URL: &str = "https://api.resend.com";

/// Sender identity used for every outgoing message.
pub const DEFAULT_FROM_ADDRESS: &str = "Zoomies <support@zoomies.dev>";

/// Directory holding `<template>.html` files, relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "emails";

/// Per-request timeout for provider calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the template mailer and its Resend client.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Resend API key (bearer token).
    pub api_key: String,
    /// Resend API base URL.
    pub api_url: String,
    /// RFC 5322 "From" value.
    pub from_address: String,
    pub templates_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                    | Required | Default                         |
    /// |-----------------------------|----------|---------------------------------|
    /// | `RESEND_API_KEY`            | yes      | (none)                          |
    /// | `RESEND_API_URL`            | no       | `https://api.resend.com`        |
    /// | `MAIL_FROM`                 | no       | `Zoomies <support@zoomies.dev>` |
    /// | `MAIL_TEMPLATES_DIR`        | no       | `emails`                        |
    /// | `MAIL_REQUEST_TIMEOUT_SECS` | no       | `10`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RESEND_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("RESEND_API_KEY"))?;

        let request_timeout_secs = match lookup("MAIL_REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "MAIL_REQUEST_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_url: lookup("RESEND_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            from_address: lookup("MAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            templates_dir: lookup("MAIL_TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
            request_timeout_secs,
        })
    }
}
