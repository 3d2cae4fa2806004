//! Template mailer: resolve, render, submit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::MailConfig;
use crate::error::MailError;
use crate::provider::{EmailProvider, OutboundEmail, SentEmail};
use crate::resend::ResendClient;
use crate::template::{EmailTemplate, Payload};

/// Sends templated transactional email through an [`EmailProvider`].
///
/// Holds no mutable state; share one instance (e.g. behind an `Arc`) across
/// request handlers.
#[derive(Clone)]
pub struct Mailer {
    provider: Arc<dyn EmailProvider>,
    from_address: String,
    templates_dir: PathBuf,
}

impl Mailer {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        from_address: impl Into<String>,
        templates_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            from_address: from_address.into(),
            templates_dir: templates_dir.into(),
        }
    }

    /// Build a mailer backed by Resend from configuration.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let client = ResendClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(client),
            config.from_address.clone(),
            config.templates_dir.clone(),
        ))
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Send the template registered under `template_name` to `to`.
    ///
    /// Unknown names fail with [`MailError::TemplateNotFound`] before any
    /// provider call. Every failure is logged and then returned; there is no
    /// retry.
    pub async fn send_email(
        &self,
        to: &str,
        template_name: &str,
        payload: &Payload,
    ) -> Result<SentEmail, MailError> {
        let template = match template_name.parse::<EmailTemplate>() {
            Ok(template) => template,
            Err(e) => {
                tracing::error!(to, template = template_name, error = %e, "Failed to send email");
                return Err(e);
            }
        };
        self.send_template(to, template, payload).await
    }

    /// Same as [`send_email`](Self::send_email) with an already resolved template.
    pub async fn send_template(
        &self,
        to: &str,
        template: EmailTemplate,
        payload: &Payload,
    ) -> Result<SentEmail, MailError> {
        match self.deliver(to, template, payload).await {
            Ok(sent) => {
                tracing::info!(to, template = %template, id = %sent.id, "Email sent");
                Ok(sent)
            }
            Err(e) => {
                tracing::error!(to, template = %template, error = %e, "Failed to send email");
                Err(e)
            }
        }
    }

    /// Whether the provider reports at least one sending domain.
    ///
    /// Never fails: provider errors are logged and reported as unhealthy.
    pub async fn check_email_health(&self) -> bool {
        match self.provider.list_domains().await {
            Ok(domains) => {
                tracing::debug!(domains = domains.len(), "Email provider health check");
                !domains.is_empty()
            }
            Err(e) => {
                tracing::error!(error = %e, "Email provider health check failed");
                false
            }
        }
    }

    async fn deliver(
        &self,
        to: &str,
        template: EmailTemplate,
        payload: &Payload,
    ) -> Result<SentEmail, MailError> {
        let html = template.render(&self.templates_dir, payload).await?;
        let email = OutboundEmail {
            from: self.from_address.clone(),
            to: vec![to.to_string()],
            subject: template.subject().to_string(),
            html,
        };
        Ok(self.provider.send(&email).await?)
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("from_address", &self.from_address)
            .field("templates_dir", &self.templates_dir)
            .finish_non_exhaustive()
    }
}
