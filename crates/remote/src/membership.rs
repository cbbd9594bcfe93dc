//! Remote membership lookup.
//!
//! Queries the member table over the PostgREST REST dialect:
//!
//! ```text
//! GET {base}/rest/v1/{table}
//!     ?select=email,phone,full_name,payment_status
//!     &payment_status=eq.completed
//!     &or=(email.ilike."a@x.com",phone.eq."0500")
//!     &limit=1
//! apikey: <key>
//! Authorization: Bearer <key>
//! ```
//!
//! Emails match without regard to case; the member identifier is
//! lower-cased only on the returned [`Member`]. An empty result is "not a
//! member". Anything that prevents reading a
//! result is a [`LookupError`], which callers must surface as retryable.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use showcase_core::member::{Member, MembershipQuery, PAYMENT_STATUS_COMPLETED};

/// Columns requested from the member table.
const SELECT_COLUMNS: &str = "email,phone,full_name,payment_status";

/// Errors from the membership lookup. All of them are transport-level:
/// "no such member" is `Ok(None)`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The membership service returned a non-2xx status code.
    #[error("Membership API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// No membership service URL is configured.
    #[error("Membership lookup is not configured")]
    NotConfigured,
}

/// Finds at most one paid-up member matching an email or phone.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    async fn find_member(&self, query: &MembershipQuery) -> Result<Option<Member>, LookupError>;
}

/// Connection settings for [`MembershipClient`].
#[derive(Debug, Clone)]
pub struct MembershipSettings {
    /// Project base URL, e.g. `https://xyz.supabase.co`. `None` disables lookups.
    pub base_url: Option<String>,
    /// Anonymous API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Member table name.
    pub table: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// One row of the member table as returned by PostgREST.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRow {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl MemberRow {
    /// Convert a row into a verified member.
    ///
    /// Rows without a completed payment are rejected. A row without an
    /// email takes the email from the query; with neither there is no
    /// member identifier and the row is rejected.
    pub fn into_member(self, query: &MembershipQuery) -> Option<Member> {
        if self.payment_status.as_deref() != Some(PAYMENT_STATUS_COMPLETED) {
            return None;
        }
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .or_else(|| query.email.clone())?;
        Some(Member::new(
            &email,
            self.full_name.as_deref().unwrap_or_default(),
            self.phone.as_deref(),
        ))
    }
}

/// Quote a value for a PostgREST logic-tree filter.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Escape `ilike` pattern characters so the value matches literally.
///
/// PostgREST turns `*` into `%` and offers no escape for it, so a literal
/// `*` becomes the single-character wildcard `_`.
fn like_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('*', "_")
}

/// Build the `or=(...)` filter matching email OR phone.
pub fn or_filter(query: &MembershipQuery) -> String {
    let mut conditions = Vec::with_capacity(2);
    if let Some(email) = &query.email {
        conditions.push(format!("email.ilike.{}", quote(&like_literal(email))));
    }
    if let Some(phone) = &query.phone {
        conditions.push(format!("phone.eq.{}", quote(phone)));
    }
    format!("({})", conditions.join(","))
}

/// HTTP client for the remote member table.
pub struct MembershipClient {
    client: reqwest::Client,
    settings: MembershipSettings,
}

impl MembershipClient {
    pub fn new(settings: MembershipSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn table_url(&self) -> Result<String, LookupError> {
        let base = self
            .settings
            .base_url
            .as_deref()
            .ok_or(LookupError::NotConfigured)?;
        Ok(format!(
            "{}/rest/v1/{}",
            base.trim_end_matches('/'),
            self.settings.table
        ))
    }
}

#[async_trait]
impl MembershipLookup for MembershipClient {
    async fn find_member(&self, query: &MembershipQuery) -> Result<Option<Member>, LookupError> {
        let url = self.table_url()?;
        let filter = or_filter(query);
        let status_filter = format!("eq.{PAYMENT_STATUS_COMPLETED}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", SELECT_COLUMNS),
                ("payment_status", status_filter.as_str()),
                ("or", filter.as_str()),
                ("limit", "1"),
            ])
            .header("apikey", &self.settings.api_key)
            .bearer_auth(&self.settings.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Membership lookup rejected");
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<MemberRow> = response.json().await?;
        let member = rows.into_iter().next().and_then(|row| row.into_member(query));
        tracing::debug!(found = member.is_some(), "Membership lookup completed");
        Ok(member)
    }
}
