//! Integration tests for the template mailer against an in-memory provider.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use zoomies_mail::{
    Domain, EmailProvider, EmailTemplate, MailConfig, MailError, Mailer, OutboundEmail,
    Payload, ProviderError, ResendClient, SentEmail,
};

const FROM: &str = "Zoomies <support@zoomies.dev>";

// ---------------------------------------------------------------------------
// Recording provider
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingProvider {
    sent: Mutex<Vec<OutboundEmail>>,
    domain_calls: AtomicUsize,
    domains: Vec<Domain>,
    fail_with_status: Option<u16>,
}

impl RecordingProvider {
    fn with_domains(names: &[&str]) -> Self {
        Self {
            domains: names
                .iter()
                .enumerate()
                .map(|(i, name)| Domain {
                    id: format!("dom_{i}"),
                    name: name.to_string(),
                    status: Some("verified".to_string()),
                })
                .collect(),
            ..Self::default()
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        if let Some(status) = self.fail_with_status {
            return Err(ProviderError::Api {
                status,
                body: "rejected".to_string(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(SentEmail {
            id: format!("msg_{}", sent.len()),
        })
    }

    async fn list_domains(&self) -> Result<Vec<Domain>, ProviderError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with_status {
            return Err(ProviderError::Api {
                status,
                body: "unauthorized".to_string(),
            });
        }
        Ok(self.domains.clone())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bundled_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("emails")
}

fn templates_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        std::fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

fn payload(pairs: &[(&str, &str)]) -> Payload {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn mailer(provider: Arc<RecordingProvider>, dir: &Path) -> Mailer {
    Mailer::new(provider, FROM, dir)
}

// ---------------------------------------------------------------------------
// send_email
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sends_rendered_welcome_email() {
    let dir = templates_dir(&[("welcome.html", "<h1>Hi {{name}}, visit {{unknown}}</h1>")]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = mailer(provider.clone(), dir.path());

    let sent = mailer
        .send_email("ada@example.com", "welcome", &payload(&[("name", "Ada")]))
        .await
        .unwrap();

    assert_eq!(sent.id, "msg_1");
    assert_eq!(
        provider.sent(),
        vec![OutboundEmail {
            from: FROM.to_string(),
            to: vec!["ada@example.com".to_string()],
            subject: "Welcome to Acme".to_string(),
            html: "<h1>Hi Ada, visit {{unknown}}</h1>".to_string(),
        }]
    );
}

#[tokio::test]
async fn reset_password_uses_its_own_file_and_subject() {
    let dir = templates_dir(&[
        ("welcome.html", "welcome body"),
        ("reset-password.html", "reset: {{resetUrl}}"),
    ]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = mailer(provider.clone(), dir.path());

    mailer
        .send_email(
            "ada@example.com",
            "resetPassword",
            &payload(&[("resetUrl", "https://zoomies.dev/r/abc")]),
        )
        .await
        .unwrap();

    let sent = provider.sent();
    assert_eq!(sent[0].subject, "Reset your password");
    assert_eq!(sent[0].html, "reset: https://zoomies.dev/r/abc");
}

#[tokio::test]
async fn unknown_template_fails_without_provider_call() {
    let dir = templates_dir(&[]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = mailer(provider.clone(), dir.path());

    let err = mailer
        .send_email("ada@example.com", "doesNotExist", &Payload::new())
        .await
        .unwrap_err();

    assert_matches!(err, MailError::TemplateNotFound(name) if name == "doesNotExist");
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn missing_template_file_is_a_render_error() {
    let dir = templates_dir(&[]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = mailer(provider.clone(), dir.path());

    let err = mailer
        .send_email("ada@example.com", "welcome", &Payload::new())
        .await
        .unwrap_err();

    assert_matches!(err, MailError::TemplateRenderIo { path, .. } if path.ends_with("welcome.html"));
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn provider_rejection_is_returned() {
    let dir = templates_dir(&[("welcome.html", "body")]);
    let provider = Arc::new(RecordingProvider::failing(422));
    let mailer = mailer(provider, dir.path());

    let err = mailer
        .send_email("ada@example.com", "welcome", &Payload::new())
        .await
        .unwrap_err();

    assert_matches!(err, MailError::Provider(ProviderError::Api { status: 422, .. }));
}

#[tokio::test]
async fn template_is_reread_on_every_send() {
    let dir = templates_dir(&[("welcome.html", "first")]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = mailer(provider.clone(), dir.path());

    mailer
        .send_template("a@example.com", EmailTemplate::Welcome, &Payload::new())
        .await
        .unwrap();
    std::fs::write(dir.path().join("welcome.html"), "second").unwrap();
    mailer
        .send_template("a@example.com", EmailTemplate::Welcome, &Payload::new())
        .await
        .unwrap();

    let bodies: Vec<String> = provider.sent().into_iter().map(|e| e.html).collect();
    assert_eq!(bodies, vec!["first", "second"]);
}

#[tokio::test]
async fn concurrent_sends_share_one_mailer() {
    let dir = templates_dir(&[("welcome.html", "Hi {{name}}")]);
    let provider = Arc::new(RecordingProvider::default());
    let mailer = Arc::new(mailer(provider.clone(), dir.path()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let mailer = mailer.clone();
        handles.push(tokio::spawn(async move {
            let to = format!("user{i}@example.com");
            mailer
                .send_email(&to, "welcome", &payload(&[("name", "Pet owner")]))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let sent = provider.sent();
    assert_eq!(sent.len(), 8);
    assert!(sent.iter().all(|e| e.html == "Hi Pet owner" && e.to.len() == 1));
}

// ---------------------------------------------------------------------------
// Bundled templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bundled_templates_render_unchanged_with_empty_payload() {
    let dir = bundled_templates_dir();
    for template in EmailTemplate::ALL {
        let source = std::fs::read_to_string(template.path_in(&dir)).unwrap();
        assert!(source.contains("{{"), "{template} has no placeholders");
        let rendered = template.render(&dir, &Payload::new()).await.unwrap();
        assert_eq!(rendered, source, "{template} changed with an empty payload");
    }
}

#[tokio::test]
async fn bundled_templates_fill_in_name() {
    let dir = bundled_templates_dir();
    let rendered = EmailTemplate::ResetPassword
        .render(
            &dir,
            &payload(&[("name", "Ada"), ("resetUrl", "https://zoomies.dev/r/1")]),
        )
        .await
        .unwrap();
    assert!(rendered.contains("Hi Ada,"));
    assert!(rendered.contains("href=\"https://zoomies.dev/r/1\""));
    assert!(!rendered.contains("{{"));
}

// ---------------------------------------------------------------------------
// check_email_health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn healthy_when_domains_exist() {
    let provider = Arc::new(RecordingProvider::with_domains(&["zoomies.dev"]));
    let mailer = mailer(provider.clone(), Path::new("unused"));
    assert!(mailer.check_email_health().await);
    assert_eq!(provider.domain_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unhealthy_when_no_domains() {
    let provider = Arc::new(RecordingProvider::with_domains(&[]));
    let mailer = mailer(provider, Path::new("unused"));
    assert!(!mailer.check_email_health().await);
}

#[tokio::test]
async fn unhealthy_when_provider_errors() {
    let provider = Arc::new(RecordingProvider::failing(401));
    let mailer = mailer(provider, Path::new("unused"));
    assert!(!mailer.check_email_health().await);
}

#[tokio::test]
async fn unhealthy_when_provider_unreachable() {
    let client = ResendClient::new(
        "http://127.0.0.1:9".to_string(),
        "re_test".to_string(),
        Duration::from_secs(2),
    )
    .unwrap();
    let mailer = Mailer::new(Arc::new(client), FROM, "unused");
    assert!(!mailer.check_email_health().await);
}

// ---------------------------------------------------------------------------
// Configuration wiring
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mailer_from_config_uses_resend_settings() {
    let dir = templates_dir(&[("welcome.html", "Hi {{name}}")]);
    let templates = dir.path().to_str().unwrap().to_string();
    let vars = [
        ("RESEND_API_KEY", "re_test".to_string()),
        ("RESEND_API_URL", "http://127.0.0.1:9/".to_string()),
        ("MAIL_FROM", "Ops <ops@zoomies.dev>".to_string()),
        ("MAIL_TEMPLATES_DIR", templates),
        ("MAIL_REQUEST_TIMEOUT_SECS", "2".to_string()),
    ];
    let config = MailConfig::from_lookup(|var| {
        vars.iter()
            .find(|(name, _)| *name == var)
            .map(|(_, value)| value.clone())
    })
    .unwrap();

    let mailer = Mailer::from_config(&config).unwrap();
    assert_eq!(mailer.from_address(), "Ops <ops@zoomies.dev>");
    assert_eq!(mailer.templates_dir(), dir.path());

    // The template renders locally, then the unreachable Resend URL fails.
    let err = mailer
        .send_email("ada@example.com", "welcome", &payload(&[("name", "Ada")]))
        .await
        .unwrap_err();
    assert_matches!(err, MailError::Provider(ProviderError::Request(_)));
    assert!(!mailer.check_email_health().await);
}
