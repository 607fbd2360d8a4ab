use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::config::MailerConfig;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    pub queued: bool,
    pub id: Option<Uuid>,
}

#[derive(Serialize)]
struct WelcomeRequest {
    name: String,
    email: String,
}

/// Fire-and-forget welcome emails through the mail backend.
#[derive(Clone)]
pub struct Mailer {
    http_client: reqwest::Client,
    backend_url: Option<String>,
}

impl Mailer {
    pub fn new(http_client: reqwest::Client, config: &MailerConfig) -> Self {
        let backend_url = config
            .backend_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Self {
            http_client,
            backend_url,
        }
    }

    pub fn enabled(&self) -> bool {
        self.backend_url.is_some()
    }

    /// Queues a welcome email and returns at once. The outcome is only
    /// logged.
    pub fn dispatch_welcome(&self, name: &str, email: &str) -> Dispatch {
        let Some(backend_url) = &self.backend_url else {
            tracing::debug!("mail backend not configured, skipping welcome email");
            return Dispatch {
                queued: false,
                id: None,
            };
        };

        let id = Uuid::new_v4();
        let request = self
            .http_client
            .post(format!("{backend_url}/api/send-welcome"))
            .json(&WelcomeRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
            });

        tokio::spawn(
            async move {
                match request.send().await.and_then(|res| res.error_for_status()) {
                    Ok(res) => tracing::info!(status = res.status().as_u16(), "welcome email sent"),
                    Err(e) => tracing::warn!(error = %e, "welcome email failed"),
                }
            }
            .instrument(tracing::info_span!("welcome_email", %id)),
        );

        Dispatch {
            queued: true,
            id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  grace.hopper@navy.example.org "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[tokio::test]
    async fn test_dispatch_disabled_without_backend() {
        let mailer = Mailer::new(
            reqwest::Client::new(),
            &MailerConfig {
                backend_url: Some("   ".to_string()),
            },
        );

        assert!(!mailer.enabled());
        assert_eq!(
            mailer.dispatch_welcome("Ada", "ada@example.com"),
            Dispatch {
                queued: false,
                id: None
            }
        );
    }

    #[tokio::test]
    async fn test_dispatch_returns_before_delivery() {
        // Nothing listens on the discard port; the failure only shows up in logs.
        let mailer = Mailer::new(
            reqwest::Client::new(),
            &MailerConfig {
                backend_url: Some("http://127.0.0.1:9/".to_string()),
            },
        );

        let first = mailer.dispatch_welcome("Ada", "ada@example.com");
        let second = mailer.dispatch_welcome("Grace", "grace@example.com");

        assert!(first.queued && second.queued);
        assert!(first.id.is_some());
        assert_ne!(first.id, second.id);
    }
}
