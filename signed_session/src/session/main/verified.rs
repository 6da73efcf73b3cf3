use std::ops::Deref;

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};

use crate::access_token::AccessToken;
use crate::session::errors::SessionError;
use crate::session::types::{SessionData, SessionKey, present};

use super::cookie::Cookie;
use super::session::Session;

/// A session whose payload carries sign-in info, an access token and an
/// unexpired `Expires`.
///
/// Only [`verify_session`] (and the constructors built on it) produce one.
/// Read access goes through `Deref<Target = Session>`; there is no mutable
/// access.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedSession {
    session: Session,
    expires_at: DateTime<Utc>,
}

impl VerifiedSession {
    /// Mint a cookie, a fresh access token, and run the result through
    /// [`verify_session`].
    ///
    /// `extra_data` is the base payload; `Id`, `ClientSig`, `SignInInfo` and
    /// `Expires` are always overwritten.
    #[tracing::instrument(skip(secret, extra_data))]
    pub fn create_new_verified_session(
        secret: &str,
        expiry_period: Duration,
        extra_data: Option<SessionData>,
    ) -> Result<Self, SessionError> {
        let new_cookie = Cookie::create(secret)?;
        let access_token = AccessToken::create_default_access_token(expiry_period)?;
        let expires = access_token.expires_at.timestamp_millis();

        let mut session_data = extra_data.unwrap_or_default();
        session_data.insert(
            SessionKey::Id.as_str().to_string(),
            json!(new_cookie.session_id()),
        );
        session_data.insert(
            SessionKey::ClientSig.as_str().to_string(),
            json!(new_cookie.signature()),
        );
        let mut sign_in_info = Map::new();
        sign_in_info.insert(
            SessionKey::AccessToken.as_str().to_string(),
            serde_json::to_value(&access_token)?,
        );
        session_data.insert(
            SessionKey::SignInInfo.as_str().to_string(),
            Value::Object(sign_in_info),
        );
        session_data.insert(SessionKey::Expires.as_str().to_string(), json!(expires));

        verify_session(Session::from_data(session_data))
    }

    /// Cookie carrying this session's `Id`, freshly signed with `secret`.
    pub fn as_cookie(&self, secret: &str) -> Result<Cookie, SessionError> {
        Cookie::representation_of(&self.session, secret)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn access_token(&self) -> Result<AccessToken, SessionError> {
        let token = self
            .session
            .get(SessionKey::SignInInfo.as_str())
            .and_then(|info| info.get(SessionKey::AccessToken.as_str()))
            .ok_or(SessionError::AccessTokenMissingError)?;
        Ok(serde_json::from_value(token.clone())?)
    }
}

impl Deref for VerifiedSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

/// Promote a session, checking in order: sign-in info, access token, expiry
/// presence, expiry in the future. The first failing check is returned.
pub fn verify_session(session: Session) -> Result<VerifiedSession, SessionError> {
    verify_session_at(session, Utc::now())
}

/// [`verify_session`] against an explicit clock.
pub fn verify_session_at(
    session: Session,
    now: DateTime<Utc>,
) -> Result<VerifiedSession, SessionError> {
    let Some(sign_in_info) = present(session.get(SessionKey::SignInInfo.as_str())) else {
        tracing::debug!("Session has no sign-in info");
        return Err(SessionError::SignInInfoMissingError);
    };

    if present(sign_in_info.get(SessionKey::AccessToken.as_str())).is_none() {
        tracing::debug!("Session has no access token");
        return Err(SessionError::AccessTokenMissingError);
    }

    let Some(expires) =
        present(session.get(SessionKey::Expires.as_str())).and_then(expires_millis)
    else {
        tracing::debug!("Session has no usable expiry");
        return Err(SessionError::ExpiresMissingError);
    };

    if expires <= now.timestamp_millis() {
        tracing::debug!("Session expired at {} ms", expires);
        return Err(SessionError::SessionExpiredError);
    }

    // Beyond the calendar range still lies in the future
    let expires_at =
        DateTime::from_timestamp_millis(expires).unwrap_or(DateTime::<Utc>::MAX_UTC);

    Ok(VerifiedSession {
        session,
        expires_at,
    })
}

// Integers above i64::MAX and floats saturate
fn expires_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|_| i64::MAX))
        .or_else(|| value.as_f64().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{future_millis, past_millis, signed_in_session_data};

    const SECRET: &str = "k";

    fn session_without(key: SessionKey) -> Session {
        let mut data = signed_in_session_data(future_millis());
        data.remove(key.as_str());
        Session::from_data(data)
    }

    #[test]
    fn test_missing_sign_in_info() {
        let result = verify_session(session_without(SessionKey::SignInInfo));
        assert_eq!(result, Err(SessionError::SignInInfoMissingError));
    }

    #[test]
    fn test_null_sign_in_info() {
        let mut data = signed_in_session_data(future_millis());
        data.insert("SignInInfo".to_string(), Value::Null);
        let result = verify_session(Session::from_data(data));
        assert_eq!(result, Err(SessionError::SignInInfoMissingError));
    }

    #[test]
    fn test_missing_access_token() {
        let mut data = signed_in_session_data(future_millis());
        data.insert("SignInInfo".to_string(), json!({ "Other": 1 }));
        let result = verify_session(Session::from_data(data));
        assert_eq!(result, Err(SessionError::AccessTokenMissingError));
    }

    #[test]
    fn test_sign_in_info_not_an_object() {
        let mut data = signed_in_session_data(future_millis());
        data.insert("SignInInfo".to_string(), json!("signed-in"));
        let result = verify_session(Session::from_data(data));
        assert_eq!(result, Err(SessionError::AccessTokenMissingError));
    }

    #[test]
    fn test_missing_expires() {
        let result = verify_session(session_without(SessionKey::Expires));
        assert_eq!(result, Err(SessionError::ExpiresMissingError));
    }

    #[test]
    fn test_zero_or_malformed_expires_counts_as_missing() {
        for value in [json!(0), json!("tomorrow"), json!(null), json!({})] {
            let mut data = signed_in_session_data(future_millis());
            data.insert("Expires".to_string(), value.clone());
            let result = verify_session(Session::from_data(data));
            assert_eq!(
                result,
                Err(SessionError::ExpiresMissingError),
                "Expires = {value}"
            );
        }
    }

    #[test]
    fn test_expired_session() {
        let data = signed_in_session_data(past_millis());
        let result = verify_session(Session::from_data(data));
        assert_eq!(result, Err(SessionError::SessionExpiredError));
    }

    #[test]
    fn test_expires_equal_to_now_is_expired() {
        let now = Utc::now();
        let data = signed_in_session_data(now.timestamp_millis());
        let now = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap();
        let result = verify_session_at(Session::from_data(data), now);
        assert_eq!(result, Err(SessionError::SessionExpiredError));
    }

    #[test]
    fn test_float_expires_is_accepted() {
        let mut data = signed_in_session_data(future_millis());
        data.insert("Expires".to_string(), json!(future_millis() as f64));
        assert!(verify_session(Session::from_data(data)).is_ok());
    }

    #[test]
    fn test_far_future_expires_verifies() {
        for value in [json!(9_000_000_000_000_000i64), json!(u64::MAX), json!(1e300)] {
            let mut data = signed_in_session_data(future_millis());
            data.insert("Expires".to_string(), value.clone());
            let verified = verify_session(Session::from_data(data))
                .unwrap_or_else(|e| panic!("Expires = {value}: {e:?}"));
            assert_eq!(verified.expires_at(), DateTime::<Utc>::MAX_UTC);
        }
    }

    #[test]
    fn test_far_past_expires_is_expired() {
        for value in [json!(-9_000_000_000_000_000i64), json!(-1e300)] {
            let mut data = signed_in_session_data(future_millis());
            data.insert("Expires".to_string(), value.clone());
            let result = verify_session(Session::from_data(data));
            assert_eq!(result, Err(SessionError::SessionExpiredError), "Expires = {value}");
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // Everything is missing, only the first check is reported
        let result = verify_session(Session::new());
        assert_eq!(result, Err(SessionError::SignInInfoMissingError));

        // Access token and expiry are missing
        let data = SessionData::from([("SignInInfo".to_string(), json!({ "x": 1 }))]);
        let result = verify_session(Session::from_data(data));
        assert_eq!(result, Err(SessionError::AccessTokenMissingError));
    }

    #[test]
    fn test_verified_session_keys_sorted() {
        let expires = future_millis();
        let mut data = signed_in_session_data(expires);
        data.insert("zzz".to_string(), json!(1));
        data.insert("AAA".to_string(), json!(2));

        let verified = Session::from_data(data).verify().unwrap();
        let keys: Vec<_> = verified.unmarshall().into_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(verified.expires_at().timestamp_millis(), expires);
    }

    #[test]
    fn test_verification_keeps_payload() {
        let data = signed_in_session_data(future_millis());
        let session = Session::from_data(data.clone());
        let verified = verify_session(session).unwrap();
        assert_eq!(verified.data(), &data);
    }

    #[test]
    fn test_create_new_verified_session() {
        let verified =
            VerifiedSession::create_new_verified_session(SECRET, Duration::milliseconds(3_600_000), None)
                .unwrap();

        let id = verified.session_id().unwrap();
        let client_sig = verified.get("ClientSig").and_then(Value::as_str).unwrap();

        let rederived = Cookie::representation_of(&verified, SECRET).unwrap();
        assert_eq!(rederived.session_id(), id);
        assert_eq!(rederived.signature(), client_sig);
        assert_eq!(verified.as_cookie(SECRET).unwrap(), rederived);

        let token = verified.access_token().unwrap();
        assert_eq!(token.expires_at, verified.expires_at());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_create_new_verified_session_cookie_validates() {
        let verified =
            VerifiedSession::create_new_verified_session(SECRET, Duration::hours(1), None).unwrap();
        let cookie = verified.as_cookie(SECRET).unwrap();
        assert_eq!(Cookie::validate(SECRET, &cookie.value()), Ok(cookie));
    }

    #[test]
    fn test_create_new_verified_session_with_extra_data() {
        let extra = SessionData::from([
            ("Theme".to_string(), json!("dark")),
            ("Id".to_string(), json!("forged")),
            ("Expires".to_string(), json!(1)),
        ]);

        let verified =
            VerifiedSession::create_new_verified_session(SECRET, Duration::hours(1), Some(extra))
                .unwrap();

        assert_eq!(verified.get("Theme"), Some(&json!("dark")));
        assert_ne!(verified.session_id(), Some("forged"));
        assert!(verified.expires_at() > Utc::now());
    }

    #[test]
    fn test_create_new_verified_session_without_secret() {
        let result = VerifiedSession::create_new_verified_session("", Duration::hours(1), None);
        assert_eq!(result, Err(SessionError::SessionSecretNotSet));
    }

    #[test]
    fn test_create_new_verified_session_non_positive_period() {
        let result =
            VerifiedSession::create_new_verified_session(SECRET, Duration::seconds(-1), None);
        assert_eq!(result, Err(SessionError::SessionExpiredError));
    }

    #[test]
    fn test_create_new_verified_session_period_out_of_range() {
        let result = VerifiedSession::create_new_verified_session(
            SECRET,
            Duration::days(365 * 300_000),
            None,
        );
        assert_eq!(result, Err(SessionError::ExpiryPeriodOutOfRange));
    }

    #[test]
    fn test_as_cookie_without_secret() {
        let verified =
            VerifiedSession::create_new_verified_session(SECRET, Duration::hours(1), None).unwrap();
        assert_eq!(
            verified.as_cookie(""),
            Err(SessionError::SessionSecretNotSet)
        );
    }

    #[test]
    fn test_as_cookie_without_id() {
        let mut data = signed_in_session_data(future_millis());
        data.remove("Id");
        let verified = verify_session(Session::from_data(data)).unwrap();
        assert!(matches!(
            verified.as_cookie(SECRET),
            Err(SessionError::Cookie(_))
        ));
    }

    #[test]
    fn test_access_token_undecodable() {
        let mut data = signed_in_session_data(future_millis());
        data.insert(
            "SignInInfo".to_string(),
            json!({ "AccessToken": "opaque-string" }),
        );
        let verified = verify_session(Session::from_data(data)).unwrap();
        assert!(matches!(
            verified.access_token(),
            Err(SessionError::Format(_))
        ));
    }
}
