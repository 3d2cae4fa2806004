//! Transactional email for the Zoomies backend.
//!
//! - [`Mailer`]: renders a registered [`EmailTemplate`] and submits it
//!   through an [`EmailProvider`]; also exposes a provider health check.
//! - [`ResendClient`]: the production [`EmailProvider`], talking to the
//!   Resend REST API.
//! - [`MailConfig`]: environment-driven configuration.

pub mod config;
pub mod error;
pub mod mailer;
pub mod provider;
pub mod resend;
pub mod template;

pub use config::MailConfig;
pub use error::{ConfigError, MailError, ProviderError};
pub use mailer::Mailer;
pub use provider::{Domain, EmailProvider, OutboundEmail, SentEmail};
pub use resend::ResendClient;
pub use template::{render_placeholders, EmailTemplate, Payload};
