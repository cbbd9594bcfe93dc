//! Verified members and membership lookup queries.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Payment status a member row must carry to count as verified.
pub const PAYMENT_STATUS_COMPLETED: &str = "completed";

/// A member verified against the remote member table.
///
/// The email is the member identifier and is always stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Member {
    pub fn new(email: &str, full_name: &str, phone: Option<&str>) -> Self {
        Self {
            email: normalize_email(email),
            full_name: full_name.trim().to_string(),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    /// Member identifier used as the owner of submitted projects.
    pub fn id(&self) -> &str {
        &self.email
    }
}

/// Normalize an email to the single case used for member identifiers.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A membership lookup request. Matches on email OR phone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct MembershipQuery {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: Option<String>,
}

impl MembershipQuery {
    /// Build a query, trimming inputs and dropping blank ones.
    ///
    /// The email keeps its case; the remote table may store it in any case
    /// and is matched case-insensitively.
    pub fn new(email: Option<&str>, phone: Option<&str>) -> Self {
        Self {
            email: email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    /// Normalize and validate. At least one of email or phone is required.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let query = Self::new(self.email.as_deref(), self.phone.as_deref());
        if query.email.is_none() && query.phone.is_none() {
            return Err(CoreError::Validation(
                "Enter an email address or phone number".into(),
            ));
        }
        query
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(query)
    }
}
