//! Contact form submission through a third-party forms relay.
//!
//! The relay takes a JSON object with the form fields and an access key,
//! and answers with `{"success": bool, "message": "..."}`.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use wavegrid_config::ContactConfig;

/// Timeout for the relay request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Values entered in the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// JSON body posted to the relay.
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    access_key: &'a str,
    name: &'a str,
    email: &'a str,
    company: &'a str,
    phone: &'a str,
    subject: &'a str,
    message: &'a str,
    from_name: &'a str,
}

/// Relay JSON response (only the fields we need).
#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// No access key configured.
    MissingAccessKey,
    /// Transport failure: DNS, TLS, timeout.
    Http(String),
    /// The relay answered but refused the message.
    Rejected(String),
    /// The relay answered with something that is not its JSON.
    Decode(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::MissingAccessKey => write!(f, "contact.access_key is not configured"),
            RelayError::Http(e) => write!(f, "HTTP error: {e}"),
            RelayError::Rejected(msg) => write!(f, "rejected: {msg}"),
            RelayError::Decode(e) => write!(f, "unexpected response: {e}"),
        }
    }
}

impl std::error::Error for RelayError {}

/// Progress of the latest submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent(String),
    Failed(String),
}

/// Posts submissions on a worker thread and exposes their status.
#[derive(Debug)]
pub struct RelayClient {
    endpoint: String,
    access_key: String,
    default_subject: String,
    status: Arc<RwLock<SubmissionStatus>>,
}

impl RelayClient {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
            default_subject: config.default_subject.clone(),
            status: Arc::new(RwLock::new(SubmissionStatus::Idle)),
        }
    }

    /// Start sending `form`. Returns false if a submission is in flight.
    pub fn submit(&self, form: ContactSubmission) -> bool {
        if let Ok(mut status) = self.status.write() {
            if *status == SubmissionStatus::Sending {
                return false;
            }
            *status = SubmissionStatus::Sending;
        }

        let endpoint = self.endpoint.clone();
        let access_key = self.access_key.clone();
        let default_subject = self.default_subject.clone();
        let status = self.status.clone();

        thread::spawn(move || {
            let outcome = if access_key.is_empty() {
                Err(RelayError::MissingAccessKey)
            } else {
                let payload = build_payload(&access_key, &default_subject, &form);
                send(&endpoint, &payload)
            };

            let next = match outcome {
                Ok(message) => {
                    info!("contact form delivered: {message}");
                    SubmissionStatus::Sent(message)
                }
                Err(e) => {
                    warn!("contact form failed: {e}");
                    SubmissionStatus::Failed(e.to_string())
                }
            };
            if let Ok(mut s) = status.write() {
                *s = next;
            }
        });
        true
    }

    /// Current status. Reports `Sending` while the worker holds the lock.
    pub fn status(&self) -> SubmissionStatus {
        match self.status.try_read() {
            Ok(s) => s.clone(),
            Err(_) => SubmissionStatus::Sending,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_status(&self, status: SubmissionStatus) {
        if let Ok(mut s) = self.status.write() {
            *s = status;
        }
    }

    /// Return a finished submission to `Idle` once it has been shown.
    pub fn acknowledge(&self) {
        if let Ok(mut s) = self.status.write()
            && matches!(*s, SubmissionStatus::Sent(_) | SubmissionStatus::Failed(_))
        {
            *s = SubmissionStatus::Idle;
        }
    }
}

/// Build the relay body. A blank subject falls back to `default_subject`.
fn build_payload<'a>(
    access_key: &'a str,
    default_subject: &'a str,
    form: &'a ContactSubmission,
) -> RelayPayload<'a> {
    let subject = if form.subject.trim().is_empty() {
        default_subject
    } else {
        form.subject.as_str()
    };

    RelayPayload {
        access_key,
        name: &form.name,
        email: &form.email,
        company: &form.company,
        phone: &form.phone,
        subject,
        message: &form.message,
        from_name: &form.name,
    }
}

/// POST the payload and interpret the relay's answer.
fn send(endpoint: &str, payload: &RelayPayload<'_>) -> Result<String, RelayError> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = agent
        .post(endpoint)
        .header("Accept", "application/json")
        .send_json(payload)
        .map_err(|e| RelayError::Http(e.to_string()))?;

    let status_ok = response.status().is_success();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| RelayError::Http(e.to_string()))?;

    interpret(status_ok, &body)
}

/// Success needs both a 2xx status and `"success": true`.
fn interpret(status_ok: bool, body: &str) -> Result<String, RelayError> {
    let response: RelayResponse =
        serde_json::from_str(body).map_err(|e| RelayError::Decode(e.to_string()))?;

    if status_ok && response.success {
        Ok(response.message)
    } else if response.message.is_empty() {
        Err(RelayError::Rejected("Failed to send message".to_string()))
    } else {
        Err(RelayError::Rejected(response.message))
    }
}
