//! The seam between the mailer and a hosted email service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A fully rendered message ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

/// A sending domain configured with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Operations the mailer needs from an email service.
///
/// Implementations hold only immutable configuration and are shared across
/// concurrent sends.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Submit one message.
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError>;

    /// List the sending domains configured for this account.
    async fn list_domains(&self) -> Result<Vec<Domain>, ProviderError>;
}
