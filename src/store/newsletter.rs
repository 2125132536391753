use crate::store::client::{BackendClient, ClientError};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

const TABLE: &str = "newsletter_subscribers";

#[derive(Error, Debug)]
pub enum NewsletterError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum SubscribeOutcome {
    Subscribed(Subscriber),
    /// The unique constraint on email fired; signing up twice is not an error
    AlreadySubscribed,
}

/// Signs an email address up for the newsletter.
///
/// The shape check runs before any network call; duplicates are reported as
/// an outcome, not a failure.
pub async fn subscribe(
    client: &BackendClient,
    email: &str,
) -> Result<SubscribeOutcome, NewsletterError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(NewsletterError::InvalidEmail(email.to_string()));
    }

    match client.insert(TABLE, &json!({ "email": email })).await {
        Ok(subscriber) => Ok(SubscribeOutcome::Subscribed(subscriber)),
        Err(ClientError::Status { status, .. }) if status == StatusCode::CONFLICT => {
            Ok(SubscribeOutcome::AlreadySubscribed)
        }
        Err(err) => Err(err.into()),
    }
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));
    re.is_match(email)
}
