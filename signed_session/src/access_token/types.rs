use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionError;
use crate::utils::gen_random_string;

/// Opaque credential stored under `SignInInfo.AccessToken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// New random token valid for `expiry_period` from now.
    ///
    /// A period reaching past the representable date range is
    /// [`SessionError::ExpiryPeriodOutOfRange`].
    pub fn create_default_access_token(expiry_period: Duration) -> Result<Self, SessionError> {
        let created_at = Utc::now();
        let Some(expires_at) = created_at.checked_add_signed(expiry_period) else {
            tracing::error!("Access token expiry period out of range: {}", expiry_period);
            return Err(SessionError::ExpiryPeriodOutOfRange);
        };
        Ok(Self {
            value: gen_random_string(32)?,
            created_at,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
