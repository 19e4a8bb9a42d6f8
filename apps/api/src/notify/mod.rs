//! Notification dispatch — fire-and-forget delivery of the evaluation report.
//!
//! Dispatch failures are logged and never surfaced to the caller: by the time
//! the report goes out, the Evaluated stage is already committed and the HTTP
//! response already decided.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::models::candidate::EvaluationVerdict;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Injected capability for outbound mail.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Builds the evaluation report email: pass/fail subject line plus the
/// per-answer verdicts pretty-printed as the body detail.
pub fn evaluation_email(verdicts: &[EvaluationVerdict], has_passed: bool) -> (String, String) {
    let subject = if has_passed {
        "Interview Result: Passed"
    } else {
        "Interview Result: Not Passed"
    };
    let message = if has_passed {
        "Congratulations! You have passed the interview."
    } else {
        "We regret to inform you that you did not pass the interview."
    };
    let details = serde_json::to_string_pretty(verdicts).unwrap_or_default();
    (
        subject.to_string(),
        format!("{message}\n\nEvaluation Details:\n{details}"),
    )
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Notifier backed by an HTTP mail relay accepting `{from, to, subject, body}`.
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&MailRequest {
                from: &self.from,
                to,
                subject,
                body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_email_wording() {
        let (subject, body) = evaluation_email(&[], true);
        assert_eq!(subject, "Interview Result: Passed");
        assert!(body.starts_with("Congratulations!"));
        assert!(body.contains("Evaluation Details:"));
    }

    #[test]
    fn test_fail_email_includes_verdict_detail() {
        let verdicts = vec![EvaluationVerdict {
            language: Some("Rust".to_string()),
            answer: "no idea".to_string(),
            is_relevant: false,
        }];
        let (subject, body) = evaluation_email(&verdicts, false);
        assert_eq!(subject, "Interview Result: Not Passed");
        assert!(body.contains("\"isRelevant\": false"));
        assert!(body.contains("no idea"));
    }
}
