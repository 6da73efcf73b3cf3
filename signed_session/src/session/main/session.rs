use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::errors::SessionError;
use crate::session::types::{SessionData, SessionKey};
use crate::utils::{base64_decode, base64_encode};

use super::verified::{VerifiedSession, verify_session};

/// Key/value session payload, verified or not.
///
/// The only mutation is wholesale replacement through [`Session::set_data`].
/// Callers must not share a `Session` between writers while it is being verified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    data: SessionData,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from raw key/value pairs. Later duplicates win.
    pub fn from_data<I, K>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut session = Self::new();
        session.marshall(data);
        session
    }

    /// Decode a persisted payload, which must be a JSON object.
    pub fn from_json_value(value: Value) -> Result<Self, SessionError> {
        match value {
            Value::Object(map) => Ok(Self::from_data(map)),
            other => {
                tracing::debug!("Session payload is not an object: {}", other);
                Err(SessionError::Format(
                    "Session payload must be a JSON object".to_string(),
                ))
            }
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, SessionError> {
        Self::from_json_value(serde_json::from_str(s)?)
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn set_data(&mut self, data: SessionData) {
        self.data = data;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The `Id` entry, when it is a string.
    pub fn session_id(&self) -> Option<&str> {
        self.data.get(SessionKey::Id.as_str()).and_then(Value::as_str)
    }

    /// Shallow copy of the payload with keys in sorted order.
    pub fn unmarshall(&self) -> SessionData {
        self.data.clone()
    }

    pub fn to_json_string(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.unmarshall())?)
    }

    /// MessagePack encoding of the payload, keys in sorted order.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, SessionError> {
        Ok(rmp_serde::to_vec(&self.data)?)
    }

    /// Decode a MessagePack payload, which must be a map with string keys.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, SessionError> {
        let data: SessionData = rmp_serde::from_slice(bytes)?;
        Ok(Self::from_data(data))
    }

    pub fn to_msgpack_base64(&self) -> Result<String, SessionError> {
        Ok(base64_encode(self.to_msgpack()?))
    }

    pub fn from_msgpack_base64(s: &str) -> Result<Self, SessionError> {
        Self::from_msgpack(&base64_decode(s)?)
    }

    pub fn verify(self) -> Result<VerifiedSession, SessionError> {
        verify_session(self)
    }

    fn marshall<I, K>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in data {
            self.data.insert(key.into(), value);
        }
    }
}
